//! Frontend installer (`apps/frontend`, TanStack Start + React)

use super::InstallerContext;
use crate::catalog::{Catalog, Dep};
use crate::manifest::merge_dependencies;
use crate::templates::{
    materialize, replace_in_dir, TemplateTree, PROJECT_NAME_PLACEHOLDER,
};
use anyhow::Result;

pub(super) async fn install(ctx: &InstallerContext<'_>, catalog: &Catalog) -> Result<()> {
    let frontend_dir = ctx.project_dir.join("apps/frontend");

    let tree = TemplateTree::extras("apps/frontend");
    materialize(&tree, &frontend_dir).await?;
    replace_in_dir(&frontend_dir, PROJECT_NAME_PLACEHOLDER, ctx.project_name).await?;

    merge_dependencies(
        &frontend_dir,
        catalog,
        &[
            Dep::TanstackReactStart,
            Dep::TanstackReactRouter,
            Dep::TanstackReactRouterDevtools,
            Dep::React,
            Dep::ReactDom,
            Dep::TailwindMerge,
            Dep::Zod,
        ],
        false,
    )?;

    merge_dependencies(
        &frontend_dir,
        catalog,
        &[
            Dep::TailwindcssVite,
            Dep::TypesNode,
            Dep::TypesReact,
            Dep::TypesReactDom,
            Dep::VitejsPluginReact,
            Dep::Tailwindcss,
            Dep::Typescript,
            Dep::Vite,
            Dep::ViteTsconfigPaths,
        ],
        true,
    )?;

    Ok(())
}
