//! Command-line interface module.

mod args;
pub mod common;
pub mod inspect;
pub mod render;
pub mod serve;

pub use args::{Cli, Commands};
