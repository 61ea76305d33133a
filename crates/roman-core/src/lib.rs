#![doc = include_str!("../README.md")]

mod config;
mod error;
pub mod pool;
mod service;
mod types;
mod validate;

pub use config::*;
pub use error::*;
pub use service::*;
pub use types::*;
pub use validate::*;

// Public re-export so downstream crates can reach the encoder via
// `roman_core::roman`
pub use roman;
