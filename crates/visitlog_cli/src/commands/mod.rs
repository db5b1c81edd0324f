//! CLI command implementations.

pub mod add;
pub mod dump;
pub mod inspect;
pub mod verify;
