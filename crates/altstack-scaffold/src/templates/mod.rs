//! Embedded template trees and materialization
//!
//! Template trees are compiled into the library with `rust-embed`, so the
//! installed binary is self-contained - there is nothing to fetch and no
//! on-disk template root to locate. A plain-directory source exists for
//! tests and local template development.

pub mod materialize;

use anyhow::{Context, Result};
use rust_embed::RustEmbed;
use std::path::PathBuf;

pub use materialize::{
    materialize, prepare_target_dir, replace_in_dir, replace_in_file, PROJECT_NAME_PLACEHOLDER,
};

/// Template trees shipped with the CLI (`templates/base`, `templates/extras`).
#[derive(RustEmbed)]
#[folder = "templates/"]
struct TemplateAssets;

/// One file of a template tree: path relative to the tree root (with `/`
/// separators) plus its raw contents.
#[derive(Debug, Clone)]
pub struct TemplateEntry {
    pub rel_path: String,
    pub contents: Vec<u8>,
}

/// A read-only template source tree.
#[derive(Debug, Clone)]
pub enum TemplateTree {
    /// A subtree of the embedded `templates/` assets, by prefix
    Embedded(String),
    /// A plain directory on disk (tests, template development)
    Dir(PathBuf),
}

impl TemplateTree {
    /// The foundational monorepo skeleton.
    pub fn base() -> Self {
        Self::Embedded("base".to_string())
    }

    /// A per-subsystem tree under `extras/`, e.g. `apps/server-hono`.
    pub fn extras(rel: &str) -> Self {
        Self::Embedded(format!("extras/{rel}"))
    }

    /// List every file in the tree, depth-first, with stable ordering.
    pub fn entries(&self) -> Result<Vec<TemplateEntry>> {
        let mut entries = match self {
            Self::Embedded(prefix) => {
                let prefix_slash = format!("{prefix}/");
                let mut found = Vec::new();
                for path in TemplateAssets::iter() {
                    if let Some(rel) = path.strip_prefix(&prefix_slash) {
                        let file = TemplateAssets::get(&path)
                            .with_context(|| format!("Missing embedded template file: {path}"))?;
                        found.push(TemplateEntry {
                            rel_path: rel.to_string(),
                            contents: file.data.into_owned(),
                        });
                    }
                }
                if found.is_empty() {
                    anyhow::bail!("No embedded template tree named '{prefix}'");
                }
                found
            }
            Self::Dir(root) => {
                let mut found = Vec::new();
                for entry in walkdir::WalkDir::new(root) {
                    let entry = entry
                        .with_context(|| format!("Failed to walk template dir {}", root.display()))?;
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let rel = entry
                        .path()
                        .strip_prefix(root)
                        .expect("walkdir yields paths under its root");
                    let rel_path = rel
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/");
                    let contents = std::fs::read(entry.path())
                        .with_context(|| format!("Failed to read {}", entry.path().display()))?;
                    found.push(TemplateEntry { rel_path, contents });
                }
                found
            }
        };

        entries.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        Ok(entries)
    }
}
