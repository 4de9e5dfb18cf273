//! Internal helpers shared by the model and enzyme modules
pub(crate) mod sparse;
