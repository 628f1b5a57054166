pub(crate) mod functions;
pub(crate) mod params;
pub(crate) mod presets;
pub(crate) mod validate;
