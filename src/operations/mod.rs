//! Sequence transforms applied to extracted windows

pub mod sequence;

pub use sequence::{complement_base, reverse_complement};
