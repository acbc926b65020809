//! Package manifest (`package.json`) reading, merging, and canonical writes
//!
//! Every merge is a whole-document read-modify-write: load the manifest,
//! mutate the relevant map, serialize back. Serialization is canonical -
//! conventional field order with sorted sub-maps - so regenerating a project
//! from identical inputs is byte-identical, and re-applying the same merge
//! is a no-op.

use crate::catalog::{Catalog, Dep};
use crate::error::ScaffoldError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A `package.json` document.
///
/// Known fields serialize in the conventional order; anything else is kept
/// in `rest` and serialized after them, key-sorted. `BTreeMap` everywhere
/// keeps dependency and script keys sorted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PackageManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scripts: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,

    #[serde(
        default,
        rename = "devDependencies",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub dev_dependencies: BTreeMap<String, String>,

    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

fn manifest_path(pkg_dir: &Path) -> PathBuf {
    pkg_dir.join("package.json")
}

/// Read the manifest from `<pkg_dir>/package.json`.
///
/// A missing file is a [`ScaffoldError::MissingManifest`] - merge operations
/// never create manifests, installers do that explicitly.
pub fn read_manifest(pkg_dir: &Path) -> Result<PackageManifest, ScaffoldError> {
    let path = manifest_path(pkg_dir);
    if !path.exists() {
        return Err(ScaffoldError::MissingManifest(path));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ScaffoldError::io(&path, e))?;
    serde_json::from_str(&content).map_err(|e| ScaffoldError::json(&path, e))
}

/// Write the manifest to `<pkg_dir>/package.json`, creating or overwriting.
pub fn write_manifest(pkg_dir: &Path, manifest: &PackageManifest) -> Result<(), ScaffoldError> {
    let path = manifest_path(pkg_dir);
    let mut content =
        serde_json::to_string_pretty(manifest).map_err(|e| ScaffoldError::json(&path, e))?;
    content.push('\n');
    std::fs::write(&path, content).map_err(|e| ScaffoldError::io(&path, e))
}

/// Insert (or overwrite) catalogued dependencies in the manifest at
/// `pkg_dir`. Later merges of the same name win; applying the same merge
/// twice leaves the document unchanged.
pub fn merge_dependencies(
    pkg_dir: &Path,
    catalog: &Catalog,
    deps: &[Dep],
    dev_mode: bool,
) -> Result<(), ScaffoldError> {
    let mut manifest = read_manifest(pkg_dir)?;

    {
        let target = if dev_mode {
            &mut manifest.dev_dependencies
        } else {
            &mut manifest.dependencies
        };

        for dep in deps {
            let version = catalog.version(*dep)?;
            target.insert(dep.package_name().to_string(), version.to_string());
        }
    }

    write_manifest(pkg_dir, &manifest)
}

/// Insert (or overwrite) script entries in the manifest at `pkg_dir`.
pub fn merge_scripts(pkg_dir: &Path, scripts: &[(&str, &str)]) -> Result<(), ScaffoldError> {
    let mut manifest = read_manifest(pkg_dir)?;

    for (name, command) in scripts {
        manifest
            .scripts
            .insert((*name).to_string(), (*command).to_string());
    }

    write_manifest(pkg_dir, &manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed_manifest(dir: &Path) {
        let manifest = PackageManifest {
            name: Some("@demo/server".to_string()),
            version: Some("1.0.0".to_string()),
            private: Some(true),
            ..Default::default()
        };
        write_manifest(dir, &manifest).unwrap();
    }

    fn manifest_bytes(dir: &Path) -> String {
        std::fs::read_to_string(dir.join("package.json")).unwrap()
    }

    #[test]
    fn test_merge_into_missing_manifest_fails() {
        let tmp = TempDir::new().unwrap();
        let err = merge_scripts(tmp.path(), &[("dev", "tsx watch src/index.ts")]).unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingManifest(_)));

        let err =
            merge_dependencies(tmp.path(), &Catalog::builtin(), &[Dep::Zod], false).unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingManifest(_)));
    }

    #[test]
    fn test_merge_dependencies_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        seed_manifest(tmp.path());
        let catalog = Catalog::builtin();

        merge_dependencies(tmp.path(), &catalog, &[Dep::Zod, Dep::Hono], false).unwrap();
        let once = manifest_bytes(tmp.path());

        merge_dependencies(tmp.path(), &catalog, &[Dep::Zod, Dep::Hono], false).unwrap();
        let twice = manifest_bytes(tmp.path());

        assert_eq!(once, twice);
    }

    #[test]
    fn test_later_merge_overwrites_version() {
        let tmp = TempDir::new().unwrap();
        seed_manifest(tmp.path());

        let old = Catalog::from_entries([(Dep::Zod, "^3.0.0")]);
        let new = Catalog::from_entries([(Dep::Zod, "^4.0.0")]);

        merge_dependencies(tmp.path(), &old, &[Dep::Zod], false).unwrap();
        merge_dependencies(tmp.path(), &new, &[Dep::Zod], false).unwrap();

        let manifest = read_manifest(tmp.path()).unwrap();
        assert_eq!(manifest.dependencies["zod"], "^4.0.0");
        assert_eq!(manifest.dependencies.len(), 1);
    }

    #[test]
    fn test_dev_mode_targets_dev_dependencies() {
        let tmp = TempDir::new().unwrap();
        seed_manifest(tmp.path());

        merge_dependencies(
            tmp.path(),
            &Catalog::builtin(),
            &[Dep::Typescript, Dep::TypesNode],
            true,
        )
        .unwrap();

        let manifest = read_manifest(tmp.path()).unwrap();
        assert!(manifest.dependencies.is_empty());
        assert_eq!(manifest.dev_dependencies["typescript"], "5.9.2");
        assert!(manifest.dev_dependencies.contains_key("@types/node"));
    }

    #[test]
    fn test_unknown_catalog_entry_is_fatal() {
        let tmp = TempDir::new().unwrap();
        seed_manifest(tmp.path());

        let fixture = Catalog::from_entries([(Dep::Zod, "^4.0.0")]);
        let err = merge_dependencies(tmp.path(), &fixture, &[Dep::Hono], false).unwrap_err();
        assert!(matches!(err, ScaffoldError::UnknownDependency("hono")));
    }

    #[test]
    fn test_merge_scripts_overwrites_and_keeps_others() {
        let tmp = TempDir::new().unwrap();
        seed_manifest(tmp.path());

        merge_scripts(tmp.path(), &[("dev", "tsx watch src/index.ts"), ("build", "tsc")])
            .unwrap();
        merge_scripts(tmp.path(), &[("dev", "trigger dev")]).unwrap();

        let manifest = read_manifest(tmp.path()).unwrap();
        assert_eq!(manifest.scripts["dev"], "trigger dev");
        assert_eq!(manifest.scripts["build"], "tsc");
    }

    #[test]
    fn test_serialization_is_canonical() {
        let tmp = TempDir::new().unwrap();
        seed_manifest(tmp.path());
        let catalog = Catalog::builtin();

        // Insert in non-sorted order; output must still be key-sorted
        merge_dependencies(tmp.path(), &catalog, &[Dep::Zod, Dep::Express, Dep::Hono], false)
            .unwrap();

        let content = manifest_bytes(tmp.path());
        let express = content.find("\"express\"").unwrap();
        let hono = content.find("\"hono\"").unwrap();
        let zod = content.find("\"zod\"").unwrap();
        assert!(express < hono && hono < zod);
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("package.json"),
            r#"{"name":"x","packageManager":"pnpm@9.0.0","engines":{"node":">=18"}}"#,
        )
        .unwrap();

        merge_scripts(tmp.path(), &[("dev", "turbo dev")]).unwrap();

        let manifest = read_manifest(tmp.path()).unwrap();
        assert_eq!(
            manifest.rest["packageManager"],
            Value::String("pnpm@9.0.0".to_string())
        );
        assert!(manifest.rest.contains_key("engines"));
    }
}
