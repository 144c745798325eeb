//! Components - pure data attached to entities

mod common;
mod crew;
mod ship;

pub use common::*;
pub use crew::*;
pub use ship::*;
