//! CLI layer for zbctl-rs.
//!
//! Provides the command-line interface using clap, the command executor,
//! and the output renderers shared by every command.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::{
    CommandInvocation, CompleteJobFlags, FailJobFlags, SetVariablesFlags, execute, parse_key,
};
pub use output::{Renderable, Renderer, RendererRegistry, renderers};
pub use parser::{Cli, Commands};
