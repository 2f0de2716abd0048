pub(crate) mod group;
pub(crate) mod selection;
pub(crate) mod set;
pub(crate) mod source;
pub(crate) mod variants;
