pub mod args;
pub mod helpers;

pub use args::{Cli, Commands};
