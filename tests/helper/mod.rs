#![allow(dead_code)]

mod host;
mod providers;

pub use host::*;
pub use providers::*;
