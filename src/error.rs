use derive_more::{Display, From};

pub type Result<T> = core::result::Result<T, MarchingCubesError>;

#[derive(Debug, Display, From, Clone, Copy, PartialEq, Eq)]
#[display("{self:?}")]
pub enum MarchingCubesError {
    /// `resolution` was zero — the grid would contain no cubes.
    InvalidResolution,
    /// A metaball was given a non-positive (or non-finite) radius.
    InvalidMetaball,
}

impl std::error::Error for MarchingCubesError {}
