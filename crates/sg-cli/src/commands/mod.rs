//! CLI command implementations

pub(crate) mod migrate;
pub(crate) mod status;
pub(crate) mod up;
pub(crate) mod wait;
