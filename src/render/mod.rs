pub(crate) mod backend;
pub(crate) mod colormap;
pub(crate) mod label;
pub(crate) mod raster;
pub(crate) mod scene;
pub(crate) mod view;
