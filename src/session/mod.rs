pub(crate) mod document;
pub(crate) mod hyper_session;
pub(crate) mod paint;
pub(crate) mod sample;
