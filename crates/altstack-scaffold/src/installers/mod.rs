//! Optional-subsystem installers
//!
//! Each installer adds one optional subsystem (a server framework, a
//! messaging integration, a worker integration, the frontend, the docs
//! site) to an already-scaffolded project. Installers are gated by pure
//! predicates over the option model; exactly the active ones run, in the
//! fixed [`InstallerId::ALL`] order, so generation and log output are
//! reproducible. Adding a subsystem means adding a variant here and a
//! module next to the existing ones - the exhaustive matches below make the
//! compiler point at every dispatch site.

mod docs;
mod frontend;
mod kafka;
mod server;
mod workers;

use crate::catalog::Catalog;
use crate::options::{Messaging, ProjectOptions, ServerFramework, Workers};
use anyhow::{Context, Result};
use std::path::Path;

/// Everything an installer action is allowed to see.
///
/// `project_dir` is the sole root for filesystem effects; installers never
/// write outside it.
#[derive(Debug, Clone, Copy)]
pub struct InstallerContext<'a> {
    pub project_dir: &'a Path,
    pub project_name: &'a str,
    pub options: &'a ProjectOptions,
}

/// The fixed catalog of installers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallerId {
    ServerHono,
    ServerExpress,
    ServerBun,
    KafkaKafkajs,
    KafkaWarpstream,
    WorkersTrigger,
    WorkersWarpstream,
    Frontend,
    Docs,
}

impl InstallerId {
    /// All installers, in execution order. Active installers commute, but a
    /// fixed order keeps output and logs deterministic.
    pub const ALL: [InstallerId; 9] = [
        InstallerId::ServerHono,
        InstallerId::ServerExpress,
        InstallerId::ServerBun,
        InstallerId::KafkaKafkajs,
        InstallerId::KafkaWarpstream,
        InstallerId::WorkersTrigger,
        InstallerId::WorkersWarpstream,
        InstallerId::Frontend,
        InstallerId::Docs,
    ];

    /// Stable identifier used in progress output.
    pub fn id(&self) -> &'static str {
        match self {
            InstallerId::ServerHono => "server-hono",
            InstallerId::ServerExpress => "server-express",
            InstallerId::ServerBun => "server-bun",
            InstallerId::KafkaKafkajs => "kafka-kafkajs",
            InstallerId::KafkaWarpstream => "kafka-warpstream",
            InstallerId::WorkersTrigger => "workers-trigger",
            InstallerId::WorkersWarpstream => "workers-warpstream",
            InstallerId::Frontend => "frontend",
            InstallerId::Docs => "docs",
        }
    }

    /// Whether this installer runs for the given options. Pure - a function
    /// of the option model only.
    pub fn is_active(&self, options: &ProjectOptions) -> bool {
        match self {
            InstallerId::ServerHono => options.server_framework == ServerFramework::Hono,
            InstallerId::ServerExpress => options.server_framework == ServerFramework::Express,
            InstallerId::ServerBun => options.server_framework == ServerFramework::Bun,
            InstallerId::KafkaKafkajs => options.messaging == Messaging::Kafkajs,
            InstallerId::KafkaWarpstream => options.messaging == Messaging::Warpstream,
            InstallerId::WorkersTrigger => options.workers == Workers::Trigger,
            InstallerId::WorkersWarpstream => options.workers == Workers::Warpstream,
            InstallerId::Frontend => options.frontend,
            InstallerId::Docs => options.docs,
        }
    }

    /// Run this installer's action to completion. Uniformly async so the
    /// pipeline awaits every installer the same way.
    pub async fn run(&self, ctx: &InstallerContext<'_>, catalog: &Catalog) -> Result<()> {
        match self {
            InstallerId::ServerHono => server::install(ctx, catalog, ServerFramework::Hono).await,
            InstallerId::ServerExpress => {
                server::install(ctx, catalog, ServerFramework::Express).await
            }
            InstallerId::ServerBun => server::install(ctx, catalog, ServerFramework::Bun).await,
            InstallerId::KafkaKafkajs => kafka::install(ctx, catalog, Messaging::Kafkajs).await,
            InstallerId::KafkaWarpstream => {
                kafka::install(ctx, catalog, Messaging::Warpstream).await
            }
            InstallerId::WorkersTrigger => workers::install_trigger(ctx, catalog).await,
            InstallerId::WorkersWarpstream => workers::install_warpstream(ctx, catalog).await,
            InstallerId::Frontend => frontend::install(ctx, catalog).await,
            InstallerId::Docs => docs::install(ctx, catalog).await,
        }
    }
}

/// The installers that will run for this option model, in execution order.
pub fn build_registry(options: &ProjectOptions) -> Vec<InstallerId> {
    InstallerId::ALL
        .into_iter()
        .filter(|installer| installer.is_active(options))
        .collect()
}

/// Write the tsconfig shared by generated app packages, extending the
/// project's typescript-config package.
pub(crate) async fn write_app_tsconfig(app_dir: &Path, project_name: &str) -> Result<()> {
    let tsconfig = serde_json::json!({
        "extends": format!("@{project_name}/typescript-config/base.json"),
        "compilerOptions": {
            "outDir": "dist",
            "rootDir": "src",
        },
        "include": ["src/**/*"],
        "exclude": ["node_modules", "dist"],
    });

    let path = app_dir.join("tsconfig.json");
    let mut content = serde_json::to_string_pretty(&tsconfig)?;
    content.push('\n');
    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
