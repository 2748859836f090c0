//! Core types for talkhis.

mod length;
mod message;

pub use length::*;
pub use message::*;
