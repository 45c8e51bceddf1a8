//! Domain models owned by external collaborators, specified at the boundary

pub mod asset;
pub mod technician;

pub use asset::{AssetRef, AssetSummary};
pub use technician::{Originator, TechnicianRef};
