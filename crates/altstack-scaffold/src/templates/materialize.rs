//! Copying template trees into a target directory
//!
//! Materialization is a recursive copy with two twists:
//!
//! - reserved dot-prefixed filenames are stored under stand-in names
//!   (`_gitignore`, `_gitkeep`) because cargo packaging would otherwise
//!   mangle them, and are renamed to their real names on the way out;
//! - placeholder substitution is **literal**. The token and the replacement
//!   are plain substrings, never patterns, so a project name containing
//!   `$` or `(` cannot corrupt the output.

use crate::error::ScaffoldError;
use crate::templates::TemplateTree;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// The token substituted with the project name across generated files.
pub const PROJECT_NAME_PLACEHOLDER: &str = "{{PROJECT_NAME}}";

/// Stand-in filenames that become dotfiles at materialization time.
const RESERVED_RENAMES: [(&str, &str); 2] =
    [("_gitignore", ".gitignore"), ("_gitkeep", ".gitkeep")];

fn rename_reserved(rel_path: &str) -> String {
    let (dir, file) = match rel_path.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, rel_path),
    };

    let renamed = RESERVED_RENAMES
        .iter()
        .find(|(from, _)| *from == file)
        .map(|(_, to)| *to)
        .unwrap_or(file);

    match dir {
        Some(dir) => format!("{dir}/{renamed}"),
        None => renamed.to_string(),
    }
}

fn dir_is_empty(dir: &Path) -> Result<bool, ScaffoldError> {
    let mut entries = std::fs::read_dir(dir).map_err(|e| ScaffoldError::io(dir, e))?;
    Ok(entries.next().is_none())
}

/// Ensure `target` exists and is empty before population.
///
/// A missing directory is created with its parents. An existing non-empty
/// directory is only emptied when the caller has already obtained the
/// user's confirmation (`overwrite_confirmed`); otherwise this fails with
/// [`ScaffoldError::DirectoryNotEmpty`] before any mutation. Emptying is
/// destructive and non-recoverable.
pub async fn prepare_target_dir(target: &Path, overwrite_confirmed: bool) -> Result<()> {
    if !target.exists() {
        fs::create_dir_all(target)
            .await
            .with_context(|| format!("Failed to create directory {}", target.display()))?;
        return Ok(());
    }

    if dir_is_empty(target)? {
        return Ok(());
    }

    if !overwrite_confirmed {
        return Err(ScaffoldError::DirectoryNotEmpty(target.to_path_buf()).into());
    }

    let mut entries = fs::read_dir(target)
        .await
        .with_context(|| format!("Failed to read directory {}", target.display()))?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let file_type = entry.file_type().await?;
        if file_type.is_dir() {
            fs::remove_dir_all(&path)
                .await
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        } else {
            fs::remove_file(&path)
                .await
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
    }

    Ok(())
}

/// Copy every file of `tree` into `target`, preserving structure and
/// applying the reserved-filename renames. Returns the relative paths
/// written (post-rename). Any filesystem error aborts the whole run.
pub async fn materialize(tree: &TemplateTree, target: &Path) -> Result<Vec<String>> {
    fs::create_dir_all(target)
        .await
        .with_context(|| format!("Failed to create directory {}", target.display()))?;

    let mut written = Vec::new();

    for entry in tree.entries()? {
        let rel_path = rename_reserved(&entry.rel_path);
        let target_path = target.join(&rel_path);

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        fs::write(&target_path, &entry.contents)
            .await
            .with_context(|| format!("Failed to write {}", target_path.display()))?;

        written.push(rel_path);
    }

    Ok(written)
}

/// Replace every literal occurrence of `token` in one UTF-8 file.
///
/// Missing files are skipped silently - base-scaffold substitution targets
/// a fixed allow-list, and not every allow-listed file exists in every
/// template.
pub async fn replace_in_file(path: &Path, token: &str, replacement: &str) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let replaced = content.replace(token, replacement);
    fs::write(path, replaced)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

/// Replace every literal occurrence of `token` across all UTF-8 files under
/// `dir`. Binary (non-UTF-8) files are left byte-identical.
pub async fn replace_in_dir(dir: &Path, token: &str, replacement: &str) -> Result<()> {
    for entry in walkdir::WalkDir::new(dir) {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let bytes = fs::read(entry.path())
            .await
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;

        let Ok(text) = String::from_utf8(bytes) else {
            continue;
        };

        if text.contains(token) {
            fs::write(entry.path(), text.replace(token, replacement))
                .await
                .with_context(|| format!("Failed to write {}", entry.path().display()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn fixture_tree() -> (TempDir, TemplateTree) {
        let src = TempDir::new().unwrap();
        std::fs::create_dir_all(src.path().join("apps")).unwrap();
        std::fs::write(
            src.path().join("package.json"),
            "{\n  \"name\": \"{{PROJECT_NAME}}\"\n}\n",
        )
        .unwrap();
        std::fs::write(src.path().join("_gitignore"), "node_modules\n").unwrap();
        std::fs::write(src.path().join("apps/_gitkeep"), "").unwrap();
        let tree = TemplateTree::Dir(src.path().to_path_buf());
        (src, tree)
    }

    fn snapshot(dir: &Path) -> BTreeMap<String, Vec<u8>> {
        let mut files = BTreeMap::new();
        for entry in walkdir::WalkDir::new(dir) {
            let entry = entry.unwrap();
            if entry.file_type().is_file() {
                let rel = entry
                    .path()
                    .strip_prefix(dir)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/");
                files.insert(rel, std::fs::read(entry.path()).unwrap());
            }
        }
        files
    }

    #[tokio::test]
    async fn test_materialize_renames_reserved_files() {
        let (_src, tree) = fixture_tree();
        let target = TempDir::new().unwrap();

        let written = materialize(&tree, target.path()).await.unwrap();

        assert!(written.contains(&".gitignore".to_string()));
        assert!(written.contains(&"apps/.gitkeep".to_string()));
        assert!(target.path().join(".gitignore").exists());
        assert!(target.path().join("apps/.gitkeep").exists());
        assert!(!target.path().join("_gitignore").exists());
    }

    #[tokio::test]
    async fn test_fresh_and_preexisting_empty_targets_match() {
        let (_src, tree) = fixture_tree();

        let parent = TempDir::new().unwrap();
        let fresh = parent.path().join("fresh");
        materialize(&tree, &fresh).await.unwrap();

        let existing = parent.path().join("existing");
        std::fs::create_dir_all(&existing).unwrap();
        prepare_target_dir(&existing, false).await.unwrap();
        materialize(&tree, &existing).await.unwrap();

        assert_eq!(snapshot(&fresh), snapshot(&existing));
    }

    #[tokio::test]
    async fn test_prepare_refuses_unconfirmed_overwrite() {
        let target = TempDir::new().unwrap();
        std::fs::write(target.path().join("precious.txt"), "data").unwrap();

        let err = prepare_target_dir(target.path(), false).await.unwrap_err();
        let err = err.downcast::<ScaffoldError>().unwrap();
        assert!(matches!(err, ScaffoldError::DirectoryNotEmpty(_)));
        assert!(target.path().join("precious.txt").exists());
    }

    #[tokio::test]
    async fn test_prepare_empties_on_confirmation() {
        let target = TempDir::new().unwrap();
        std::fs::create_dir_all(target.path().join("old/deep")).unwrap();
        std::fs::write(target.path().join("old/deep/file.txt"), "x").unwrap();
        std::fs::write(target.path().join("stale.txt"), "y").unwrap();

        prepare_target_dir(target.path(), true).await.unwrap();

        assert!(dir_is_empty(target.path()).unwrap());
    }

    #[tokio::test]
    async fn test_substitution_is_literal_not_a_pattern() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("package.json");
        std::fs::write(&file, "name: {{PROJECT_NAME}} + {{PROJECT_NAME}}").unwrap();

        // A replacement full of regex metacharacters must land verbatim
        let replacement = r"my$1(app)\d+";
        replace_in_file(&file, PROJECT_NAME_PLACEHOLDER, replacement)
            .await
            .unwrap();

        let content = std::fs::read_to_string(&file).unwrap();
        assert_eq!(content, format!("name: {replacement} + {replacement}"));
    }

    #[tokio::test]
    async fn test_replace_in_missing_file_is_noop() {
        let tmp = TempDir::new().unwrap();
        replace_in_file(&tmp.path().join("absent.json"), "{{X}}", "y")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_replace_in_dir_leaves_binary_files_untouched() {
        let tmp = TempDir::new().unwrap();
        let binary = vec![0xff, 0xfe, 0x00, 0x7b, 0x7b];
        std::fs::write(tmp.path().join("logo.bin"), &binary).unwrap();
        std::fs::write(tmp.path().join("readme.txt"), "hello {{PROJECT_NAME}}").unwrap();

        replace_in_dir(tmp.path(), PROJECT_NAME_PLACEHOLDER, "my-app")
            .await
            .unwrap();

        assert_eq!(std::fs::read(tmp.path().join("logo.bin")).unwrap(), binary);
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("readme.txt")).unwrap(),
            "hello my-app"
        );
    }
}
