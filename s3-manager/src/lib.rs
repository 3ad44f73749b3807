pub mod aws;
pub mod cli;
pub mod convert;
pub mod load_config;

pub use cli::{run, Cli, Commands};
