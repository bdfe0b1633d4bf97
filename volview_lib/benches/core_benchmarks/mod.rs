pub mod geometry;
pub mod transfer;
