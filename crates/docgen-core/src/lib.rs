//! Core generation pipeline for docgen.
//!
//! Walks a tree of minijinja templates, renders each with the shared term
//! map, and mirrors the tree into an output directory of `.md` files.

mod config;
mod generator;
mod scanner;
mod terms;

pub use config::{
    CliSettings, Config, ConfigError, DocsConfig, CONFIG_FILENAME, DEFAULT_TEMPLATE_EXT,
};
pub use generator::{
    GenerateConfig, GenerateError, GenerateReport, GeneratedFile, Generator, TemplateFailure,
};
pub use terms::{Terms, PROGRAM_VERSION_KEY};
