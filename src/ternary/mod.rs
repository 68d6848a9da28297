pub(crate) mod dataset;
pub(crate) mod diagram;
pub(crate) mod transform;
