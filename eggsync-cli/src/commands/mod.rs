pub(crate) mod nests;
pub(crate) mod sync;
