pub(crate) mod def;
pub(crate) mod fetch;
pub(crate) mod field;
pub(crate) mod intro;
pub(crate) mod particle;
pub(crate) mod raster;
pub(crate) mod sample;
pub(crate) mod source;
