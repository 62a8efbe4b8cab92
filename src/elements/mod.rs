//! BHA elements module

mod bha;
mod component;
mod material;
pub mod section;
mod stabilizer;

pub use bha::Bha;
pub use component::BhaElement;
pub use material::{MaterialKind, PhysicalConstants};
pub use stabilizer::Stabilizer;
