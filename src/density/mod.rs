pub(crate) mod estimator;
pub(crate) mod grid;
pub(crate) mod kde;
pub(crate) mod window;
