pub(crate) mod media;
pub(crate) mod scrubber;
pub(crate) mod video;
