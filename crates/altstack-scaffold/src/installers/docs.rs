//! Documentation installer (`apps/docs`, Docusaurus)
//!
//! Generates the whole docs app programmatically: site config, sidebars,
//! a starter doc set, and the theme CSS.

use super::InstallerContext;
use crate::catalog::{Catalog, Dep};
use crate::manifest::{merge_dependencies, write_manifest, PackageManifest};
use crate::templates::PROJECT_NAME_PLACEHOLDER;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

const DOCUSAURUS_CONFIG: &str = r#"import type { Config } from "@docusaurus/types";
import type * as Preset from "@docusaurus/preset-classic";

const config: Config = {
  title: "{{PROJECT_NAME}}",
  tagline: "Full-stack TypeScript Monorepo",
  favicon: "img/favicon.ico",

  url: "https://your-docusaurus-site.example.com",
  baseUrl: "/",

  organizationName: "{{PROJECT_NAME}}",
  projectName: "{{PROJECT_NAME}}",

  onBrokenLinks: "throw",
  onBrokenMarkdownLinks: "warn",

  i18n: {
    defaultLocale: "en",
    locales: ["en"],
  },

  presets: [
    [
      "classic",
      {
        docs: {
          sidebarPath: "./sidebars.ts",
          routeBasePath: "/",
        },
        blog: false,
        theme: {
          customCss: "./src/css/custom.css",
        },
      } satisfies Preset.Options,
    ],
  ],

  themeConfig: {
    navbar: {
      title: "{{PROJECT_NAME}}",
      items: [
        {
          type: "docSidebar",
          sidebarId: "docs",
          position: "left",
          label: "Docs",
        },
        {
          href: "https://github.com/AnthonyAltieri/alt-stack",
          label: "GitHub",
          position: "right",
        },
      ],
    },
    footer: {
      style: "dark",
      copyright: `Built with alt-stack and Docusaurus.`,
    },
  } satisfies Preset.ThemeConfig,
};

export default config;
"#;

const SIDEBARS: &str = r#"import type { SidebarsConfig } from "@docusaurus/plugin-content-docs";

const sidebars: SidebarsConfig = {
  docs: [
    "intro",
    {
      type: "category",
      label: "Getting Started",
      items: ["getting-started/installation", "getting-started/project-structure"],
    },
    {
      type: "category",
      label: "API Reference",
      items: ["api/overview"],
    },
  ],
};

export default sidebars;
"#;

const INTRO_DOC: &str = r#"---
slug: /
sidebar_position: 1
---

# Introduction

Welcome to **{{PROJECT_NAME}}** documentation.

This project was bootstrapped with [create-altstack](https://github.com/AnthonyAltieri/alt-stack).

## Features

- Type-safe API with Zod validation
- Monorepo architecture with Turborepo
- Multiple server framework options (Hono, Express, Bun)

## Quick Start

```bash
cd {{PROJECT_NAME}}
pnpm install
pnpm dev
```
"#;

const INSTALLATION_DOC: &str = r#"---
sidebar_position: 1
---

# Installation

## Prerequisites

- Node.js >= 18
- pnpm 9.0.0+

## Setup

1. Install dependencies:

```bash
pnpm install
```

2. Start development:

```bash
pnpm dev
```
"#;

const STRUCTURE_DOC: &str = r#"---
sidebar_position: 2
---

# Project Structure

```
{{PROJECT_NAME}}/
├── apps/
│   ├── server/      # API server
│   ├── frontend/    # TanStack Start frontend (if included)
│   └── docs/        # This documentation
├── packages/
│   └── typescript-config/  # Shared TypeScript configs
├── package.json
├── pnpm-workspace.yaml
└── turbo.json
```
"#;

const API_OVERVIEW_DOC: &str = r#"---
sidebar_position: 1
---

# API Overview

The API is built with alt-stack's type-safe server framework.

## Endpoints

### Health Check

```
GET /api/health
```

Returns the health status of the API.

### Messages

```
GET /api/messages      # List all messages
POST /api/messages     # Create a message
GET /api/messages/:id  # Get a message
DELETE /api/messages/:id  # Delete a message
```
"#;

const CUSTOM_CSS: &str = r#":root {
  --ifm-color-primary: #7c3aed;
  --ifm-color-primary-dark: #6d28d9;
  --ifm-color-primary-darker: #5b21b6;
  --ifm-color-primary-darkest: #4c1d95;
  --ifm-color-primary-light: #8b5cf6;
  --ifm-color-primary-lighter: #a78bfa;
  --ifm-color-primary-lightest: #c4b5fd;
  --ifm-code-font-size: 95%;
}

[data-theme='dark'] {
  --ifm-color-primary: #a78bfa;
  --ifm-color-primary-dark: #8b5cf6;
  --ifm-color-primary-darker: #7c3aed;
  --ifm-color-primary-darkest: #6d28d9;
  --ifm-color-primary-light: #c4b5fd;
  --ifm-color-primary-lighter: #ddd6fe;
  --ifm-color-primary-lightest: #ede9fe;
}
"#;

async fn write_doc(path: &Path, content: &str, project_name: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content.replace(PROJECT_NAME_PLACEHOLDER, project_name))
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub(super) async fn install(ctx: &InstallerContext<'_>, catalog: &Catalog) -> Result<()> {
    let app_dir = ctx.project_dir.join("apps/docs");

    for dir in ["docs", "src/pages", "static/img"] {
        fs::create_dir_all(app_dir.join(dir))
            .await
            .with_context(|| format!("Failed to create {}", app_dir.join(dir).display()))?;
    }

    let manifest = PackageManifest {
        name: Some(format!("@{}/docs", ctx.project_name)),
        version: Some("1.0.0".to_string()),
        private: Some(true),
        scripts: [
            ("dev", "docusaurus start"),
            ("build", "docusaurus build"),
            ("serve", "docusaurus serve"),
            ("clear", "docusaurus clear"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
        ..Default::default()
    };
    write_manifest(&app_dir, &manifest)?;

    let name = ctx.project_name;
    write_doc(&app_dir.join("docusaurus.config.ts"), DOCUSAURUS_CONFIG, name).await?;
    write_doc(&app_dir.join("sidebars.ts"), SIDEBARS, name).await?;
    write_doc(&app_dir.join("docs/intro.md"), INTRO_DOC, name).await?;
    write_doc(
        &app_dir.join("docs/getting-started/installation.md"),
        INSTALLATION_DOC,
        name,
    )
    .await?;
    write_doc(
        &app_dir.join("docs/getting-started/project-structure.md"),
        STRUCTURE_DOC,
        name,
    )
    .await?;
    write_doc(&app_dir.join("docs/api/overview.md"), API_OVERVIEW_DOC, name).await?;
    write_doc(&app_dir.join("src/css/custom.css"), CUSTOM_CSS, name).await?;

    merge_dependencies(
        &app_dir,
        catalog,
        &[Dep::DocusaurusCore, Dep::DocusaurusPresetClassic],
        false,
    )?;
    merge_dependencies(&app_dir, catalog, &[Dep::Typescript], true)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::read_manifest;
    use crate::options::ProjectOptions;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_docs_install() {
        let project = TempDir::new().unwrap();
        let options = ProjectOptions {
            docs: true,
            ..Default::default()
        };
        let ctx = InstallerContext {
            project_dir: project.path(),
            project_name: "my-app",
            options: &options,
        };
        install(&ctx, &Catalog::builtin()).await.unwrap();

        let app_dir = project.path().join("apps/docs");
        let config = std::fs::read_to_string(app_dir.join("docusaurus.config.ts")).unwrap();
        assert!(config.contains("title: \"my-app\""));
        assert!(app_dir.join("docs/intro.md").exists());
        assert!(app_dir.join("docs/getting-started/installation.md").exists());
        assert!(app_dir.join("docs/api/overview.md").exists());
        assert!(app_dir.join("src/css/custom.css").exists());

        let manifest = read_manifest(&app_dir).unwrap();
        assert_eq!(manifest.scripts["dev"], "docusaurus start");
        assert!(manifest.dependencies.contains_key("@docusaurus/core"));
        assert!(manifest.dev_dependencies.contains_key("typescript"));
    }
}
