/// Convenience result type used across ternvid.
pub type TernvidResult<T> = Result<T, TernvidError>;

/// Top-level error taxonomy used by the pipeline APIs.
///
/// Every variant is fatal for the run that produced it; nothing is retried and no partial
/// output is emitted.
#[derive(thiserror::Error, Debug)]
pub enum TernvidError {
    /// An input triplet breaks the dataset preconditions (missing/non-finite value, negative
    /// component or zero sum).
    #[error("precondition violated at data index {index}: {reason}")]
    Precondition {
        /// Offending position in the dataset.
        index: usize,
        /// What was wrong with the triplet.
        reason: String,
    },

    /// The window parameters reach past the end of the dataset.
    #[error(
        "window range error: start + width + steps requires at least {required} data points, dataset has {actual}"
    )]
    ConfigRange {
        /// Dataset length needed by the window parameters.
        required: usize,
        /// Actual dataset length.
        actual: usize,
    },

    /// A window's points cannot support a density estimate.
    #[error("degenerate window at frame {frame} (indices [{start}, {end})): {reason}")]
    DegenerateWindow {
        /// Frame index of the failing window.
        frame: u64,
        /// Inclusive start index of the window.
        start: usize,
        /// Exclusive end index of the window.
        end: usize,
        /// Why the window is degenerate.
        reason: String,
    },

    /// Invalid user-provided parameters or input files.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while writing frames to a sink.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TernvidError {
    /// Build a [`TernvidError::Precondition`] value.
    pub fn precondition(index: usize, reason: impl Into<String>) -> Self {
        Self::Precondition {
            index,
            reason: reason.into(),
        }
    }

    /// Build a [`TernvidError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TernvidError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TernvidError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`TernvidError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
