pub(crate) mod chapter;
pub(crate) mod model;
pub(crate) mod story;
pub(crate) mod timeline;
