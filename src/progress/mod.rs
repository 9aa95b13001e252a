pub(crate) mod clock;
pub(crate) mod frame;
pub(crate) mod source;
pub(crate) mod visibility;
