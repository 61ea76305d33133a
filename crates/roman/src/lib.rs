#![doc = include_str!("../README.md")]
#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod numeral;
mod table;

pub use crate::numeral::*;
pub use crate::table::*;
