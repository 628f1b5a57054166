pub(crate) mod node;
pub(crate) mod space;
pub(crate) mod stroke;
