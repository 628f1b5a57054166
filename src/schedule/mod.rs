pub(crate) mod buffers;
pub(crate) mod pass;
pub(crate) mod scheduler;
