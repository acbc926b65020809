//! Base project scaffold
//!
//! Materializes the foundational monorepo skeleton into the target
//! directory and substitutes the project name into the fixed allow-list of
//! text files. Everything else in the base tree is copied byte-identical.

use crate::templates::{
    materialize, prepare_target_dir, replace_in_file, TemplateTree, PROJECT_NAME_PLACEHOLDER,
};
use anyhow::Result;
use std::path::Path;

/// Files in the base tree that carry the project-name placeholder.
const BASE_SUBSTITUTION_FILES: [&str; 3] = [
    "package.json",
    "README.md",
    "packages/typescript-config/package.json",
];

/// Materialize the base template into `project_dir`.
///
/// Fatal on any filesystem error; a failure here aborts the whole run.
pub async fn scaffold_project(
    project_dir: &Path,
    project_name: &str,
    overwrite_confirmed: bool,
) -> Result<()> {
    prepare_target_dir(project_dir, overwrite_confirmed).await?;
    materialize(&TemplateTree::base(), project_dir).await?;

    for rel_path in BASE_SUBSTITUTION_FILES {
        replace_in_file(
            &project_dir.join(rel_path),
            PROJECT_NAME_PLACEHOLDER,
            project_name,
        )
        .await?;
    }

    Ok(())
}
