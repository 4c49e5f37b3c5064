//! CLI subcommands.

pub mod compare;
pub mod extract_kod;
pub mod parse;
