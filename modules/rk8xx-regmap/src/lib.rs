#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
extern crate log;

mod file;
mod handle;

pub use file::*;
pub use handle::*;
