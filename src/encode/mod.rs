//! Encoding sinks.
//!
//! Sinks consume rendered frames in frame order; stills and the manifest are written directly.

/// `ffmpeg`-based MP4 sink.
pub mod ffmpeg;
/// Looping GIF sink.
pub mod gif;
/// Run manifest (JSON).
pub mod manifest;
/// Frame sink trait and the in-memory sink.
pub mod sink;
/// Single-frame PNG output.
pub mod still;
