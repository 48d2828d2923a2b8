//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod images;
pub(crate) mod scales;

pub(crate) use build::BuildArgs;
pub(crate) use images::ImagesArgs;
pub(crate) use scales::ScalesArgs;
