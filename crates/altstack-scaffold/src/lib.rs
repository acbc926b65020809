//! Alt-Stack Scaffold - core library for the `create-altstack` CLI
//!
//! This library materializes an alt-stack monorepo on disk from embedded
//! template trees, driven by a resolved option model.
//!
//! # Architecture
//!
//! The library is organized leaf-first:
//!
//! - **Manifest Merger** (`manifest`) - canonical `package.json` documents
//!   and idempotent dependency/script merges against the [`Catalog`]
//! - **Template Materializer** (`templates`) - embedded template trees,
//!   recursive copy with reserved-filename renames, literal placeholder
//!   substitution
//! - **Installer Registry** (`installers`) - the fixed set of
//!   predicate-gated subsystem installers
//! - **Execution Pipeline** (`pipeline`) - the five-stage run with its
//!   fatal/best-effort failure policy
//!
//! The interactive front end (prompts, flags, banner) lives in the
//! `create-altstack` binary crate; this library never prompts. The only
//! user-facing output here is stage progress and the closing summary.

pub mod catalog;
pub mod error;
pub mod installers;
pub mod manifest;
pub mod next_steps;
pub mod options;
pub mod pipeline;
pub mod scaffold;
pub mod templates;

// Re-export main types for convenience
pub use catalog::{Catalog, Dep};
pub use error::ScaffoldError;
pub use installers::{build_registry, InstallerContext, InstallerId};
pub use next_steps::{next_steps, NextSteps};
pub use options::{
    parse_name_and_path, validate_app_name, CliFlags, HttpClient, Messaging, ProjectOptions,
    ServerFramework, Workers, DEFAULT_APP_NAME,
};
pub use pipeline::{CommandRunner, Pipeline, PipelineState, SystemRunner};
pub use scaffold::scaffold_project;
pub use templates::{TemplateTree, PROJECT_NAME_PLACEHOLDER};
