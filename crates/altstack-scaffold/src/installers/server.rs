//! Server framework installer (`apps/server`)
//!
//! All three frameworks share one flow: drop the `apps/.gitkeep` marker,
//! materialize the framework's template tree, substitute the project name,
//! then merge the framework and HTTP-client dependency sets.

use super::InstallerContext;
use crate::catalog::{Catalog, Dep};
use crate::manifest::merge_dependencies;
use crate::options::{HttpClient, ServerFramework};
use crate::templates::{
    materialize, replace_in_dir, TemplateTree, PROJECT_NAME_PLACEHOLDER,
};
use anyhow::{Context, Result};
use tokio::fs;

pub(super) async fn install(
    ctx: &InstallerContext<'_>,
    catalog: &Catalog,
    framework: ServerFramework,
) -> Result<()> {
    let server_dir = ctx.project_dir.join("apps/server");

    // The base scaffold marks the empty apps/ directory with a .gitkeep;
    // remove it now that a real app lands there.
    let gitkeep = ctx.project_dir.join("apps/.gitkeep");
    if gitkeep.exists() {
        fs::remove_file(&gitkeep)
            .await
            .with_context(|| format!("Failed to remove {}", gitkeep.display()))?;
    }

    let tree = TemplateTree::extras(&format!("apps/server-{}", framework.slug()));
    materialize(&tree, &server_dir).await?;
    replace_in_dir(&server_dir, PROJECT_NAME_PLACEHOLDER, ctx.project_name).await?;

    let mut deps = vec![Dep::AltResult, Dep::AltServerCore, Dep::Zod, Dep::T3EnvCore];
    match framework {
        ServerFramework::Hono => deps.extend([Dep::AltServerHono, Dep::Hono, Dep::HonoNodeServer]),
        ServerFramework::Express => deps.extend([Dep::AltServerExpress, Dep::Express]),
        ServerFramework::Bun => deps.push(Dep::AltServerBun),
    }
    merge_dependencies(&server_dir, catalog, &deps, false)?;

    let http_deps: &[Dep] = match ctx.options.http_client {
        HttpClient::Ky => &[Dep::AltHttpClientCore, Dep::AltHttpClientKy, Dep::Ky],
        HttpClient::Fetch => &[Dep::AltHttpClientCore, Dep::AltHttpClientFetch],
    };
    merge_dependencies(&server_dir, catalog, http_deps, false)?;

    let mut dev_deps = vec![Dep::Typescript, Dep::TypesNode];
    if framework == ServerFramework::Express {
        dev_deps.push(Dep::TypesExpress);
    }
    merge_dependencies(&server_dir, catalog, &dev_deps, true)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::read_manifest;
    use crate::options::ProjectOptions;
    use tempfile::TempDir;

    async fn run_install(options: &ProjectOptions, framework: ServerFramework) -> TempDir {
        let project = TempDir::new().unwrap();
        std::fs::create_dir_all(project.path().join("apps")).unwrap();
        std::fs::write(project.path().join("apps/.gitkeep"), "").unwrap();

        let ctx = InstallerContext {
            project_dir: project.path(),
            project_name: "my-app",
            options,
        };
        install(&ctx, &Catalog::builtin(), framework).await.unwrap();
        project
    }

    #[tokio::test]
    async fn test_hono_install_populates_server_app() {
        let options = ProjectOptions::default();
        let project = run_install(&options, ServerFramework::Hono).await;

        let server_dir = project.path().join("apps/server");
        assert!(server_dir.join("src/index.ts").exists());
        assert!(!project.path().join("apps/.gitkeep").exists());

        let manifest = read_manifest(&server_dir).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("@my-app/server"));
        assert!(manifest.dependencies.contains_key("hono"));
        assert!(manifest.dependencies.contains_key("@alt-stack/server-hono"));
        assert!(manifest.dependencies.contains_key("@alt-stack/http-client-fetch"));
        assert!(!manifest.dependencies.contains_key("ky"));
        assert!(manifest.dev_dependencies.contains_key("typescript"));
    }

    #[tokio::test]
    async fn test_ky_client_adds_ky_package() {
        let options = ProjectOptions {
            http_client: HttpClient::Ky,
            ..Default::default()
        };
        let project = run_install(&options, ServerFramework::Hono).await;

        let manifest = read_manifest(&project.path().join("apps/server")).unwrap();
        assert!(manifest.dependencies.contains_key("ky"));
        assert!(manifest.dependencies.contains_key("@alt-stack/http-client-ky"));
        assert!(!manifest.dependencies.contains_key("@alt-stack/http-client-fetch"));
    }

    #[tokio::test]
    async fn test_express_adds_type_stubs() {
        let options = ProjectOptions {
            server_framework: ServerFramework::Express,
            ..Default::default()
        };
        let project = run_install(&options, ServerFramework::Express).await;

        let manifest = read_manifest(&project.path().join("apps/server")).unwrap();
        assert!(manifest.dependencies.contains_key("express"));
        assert!(manifest.dev_dependencies.contains_key("@types/express"));
    }
}
