//! Background worker installers (`apps/workers`)
//!
//! Two providers share the subdirectory but generate different apps: the
//! Trigger.dev variant revolves around its config file and task
//! definitions, the WarpStream variant around a topic table and a consumer
//! loop. Only one can be active per run (closed enumeration).

use super::{write_app_tsconfig, InstallerContext};
use crate::catalog::{Catalog, Dep};
use crate::manifest::{merge_dependencies, write_manifest, PackageManifest};
use crate::templates::PROJECT_NAME_PLACEHOLDER;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

const TRIGGER_CONFIG: &str = r#"import { defineConfig } from "@trigger.dev/sdk/v3";

export default defineConfig({
  project: "{{PROJECT_NAME}}-workers",
  runtime: "node",
  logLevel: "log",
  retries: {
    enabledInDev: true,
    default: {
      maxAttempts: 3,
      minTimeoutInMs: 1000,
      maxTimeoutInMs: 10000,
      factor: 2,
    },
  },
  dirs: ["./src/jobs"],
});
"#;

const TRIGGER_EXAMPLE_JOB: &str = r#"import { task } from "@trigger.dev/sdk/v3";
import { z } from "zod";

const SendNotificationPayload = z.object({
  userId: z.string(),
  message: z.string(),
});

export const sendNotification = task({
  id: "send-notification",
  run: async (payload: z.infer<typeof SendNotificationPayload>) => {
    console.log(`Sending notification to user ${payload.userId}: ${payload.message}`);

    // Add your notification logic here
    // e.g., send email, push notification, etc.

    return { success: true };
  },
});
"#;

const TRIGGER_INDEX: &str = r#"export * from "./jobs/send-notification.js";
"#;

const WARPSTREAM_TOPICS: &str = r#"import { z } from "zod";

export const Topics = {
  "send-notification": z.object({
    userId: z.string(),
    message: z.string(),
  }),
  "process-data": z.object({
    dataId: z.string(),
    type: z.enum(["transform", "aggregate", "export"]),
  }),
} as const;

export type TopicName = keyof typeof Topics;
"#;

const WARPSTREAM_INDEX: &str = r#"import { createWarpStreamWorker } from "@alt-stack/workers-warpstream";
import { Topics } from "./jobs/topics.js";

async function main() {
  const worker = await createWarpStreamWorker({
    bootstrapServer: process.env.WARPSTREAM_URL || "http://localhost:9092",
    groupId: "{{PROJECT_NAME}}-workers",
    jobs: Topics,
  });

  worker.on("send-notification", async (payload) => {
    console.log(`Sending notification to user ${payload.userId}: ${payload.message}`);
    // Add your notification logic here
  });

  worker.on("process-data", async (payload) => {
    console.log(`Processing data ${payload.dataId} with type ${payload.type}`);
    // Add your data processing logic here
  });

  await worker.start();
  console.log("WarpStream worker started");
}

main().catch(console.error);
"#;

async fn write_workers_manifest(
    app_dir: &Path,
    project_name: &str,
    scripts: &[(&str, &str)],
) -> Result<()> {
    let manifest = PackageManifest {
        name: Some(format!("@{project_name}/workers")),
        version: Some("1.0.0".to_string()),
        private: Some(true),
        package_type: Some("module".to_string()),
        scripts: scripts
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        ..Default::default()
    };
    write_manifest(app_dir, &manifest)?;
    write_app_tsconfig(app_dir, project_name).await
}

async fn write_stub(path: &Path, stub: &str, project_name: &str) -> Result<()> {
    fs::write(path, stub.replace(PROJECT_NAME_PLACEHOLDER, project_name))
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub(super) async fn install_trigger(
    ctx: &InstallerContext<'_>,
    catalog: &Catalog,
) -> Result<()> {
    let app_dir = ctx.project_dir.join("apps/workers");
    fs::create_dir_all(app_dir.join("src/jobs"))
        .await
        .with_context(|| format!("Failed to create {}", app_dir.display()))?;

    write_workers_manifest(
        &app_dir,
        ctx.project_name,
        &[
            ("dev", "trigger dev"),
            ("deploy", "trigger deploy"),
            ("check-types", "tsc --noEmit"),
        ],
    )
    .await?;

    write_stub(&app_dir.join("trigger.config.ts"), TRIGGER_CONFIG, ctx.project_name).await?;
    write_stub(
        &app_dir.join("src/jobs/send-notification.ts"),
        TRIGGER_EXAMPLE_JOB,
        ctx.project_name,
    )
    .await?;
    write_stub(&app_dir.join("src/index.ts"), TRIGGER_INDEX, ctx.project_name).await?;

    merge_dependencies(
        &app_dir,
        catalog,
        &[
            Dep::AltWorkersCore,
            Dep::AltWorkersTrigger,
            Dep::TriggerSdk,
            Dep::Zod,
        ],
        false,
    )?;
    merge_dependencies(&app_dir, catalog, &[Dep::Typescript, Dep::TypesNode], true)?;

    Ok(())
}

pub(super) async fn install_warpstream(
    ctx: &InstallerContext<'_>,
    catalog: &Catalog,
) -> Result<()> {
    let app_dir = ctx.project_dir.join("apps/workers");
    fs::create_dir_all(app_dir.join("src/jobs"))
        .await
        .with_context(|| format!("Failed to create {}", app_dir.display()))?;

    write_workers_manifest(
        &app_dir,
        ctx.project_name,
        &[
            ("dev", "tsx watch src/index.ts"),
            ("build", "tsc"),
            ("start", "node dist/index.js"),
            ("check-types", "tsc --noEmit"),
        ],
    )
    .await?;

    write_stub(
        &app_dir.join("src/jobs/topics.ts"),
        WARPSTREAM_TOPICS,
        ctx.project_name,
    )
    .await?;
    write_stub(&app_dir.join("src/index.ts"), WARPSTREAM_INDEX, ctx.project_name).await?;

    merge_dependencies(
        &app_dir,
        catalog,
        &[Dep::AltWorkersCore, Dep::AltWorkersWarpstream, Dep::Zod],
        false,
    )?;
    merge_dependencies(
        &app_dir,
        catalog,
        &[Dep::Typescript, Dep::TypesNode, Dep::Tsx],
        true,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::read_manifest;
    use crate::options::{ProjectOptions, Workers};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_trigger_workers_app() {
        let project = TempDir::new().unwrap();
        let options = ProjectOptions {
            workers: Workers::Trigger,
            ..Default::default()
        };
        let ctx = InstallerContext {
            project_dir: project.path(),
            project_name: "my-app",
            options: &options,
        };
        install_trigger(&ctx, &Catalog::builtin()).await.unwrap();

        let app_dir = project.path().join("apps/workers");
        let config = std::fs::read_to_string(app_dir.join("trigger.config.ts")).unwrap();
        assert!(config.contains("\"my-app-workers\""));
        assert!(app_dir.join("src/jobs/send-notification.ts").exists());

        let manifest = read_manifest(&app_dir).unwrap();
        assert_eq!(manifest.scripts["dev"], "trigger dev");
        assert!(manifest.dependencies.contains_key("@trigger.dev/sdk"));
        assert!(!manifest.dev_dependencies.contains_key("tsx"));
    }

    #[tokio::test]
    async fn test_warpstream_workers_app() {
        let project = TempDir::new().unwrap();
        let options = ProjectOptions {
            workers: Workers::Warpstream,
            ..Default::default()
        };
        let ctx = InstallerContext {
            project_dir: project.path(),
            project_name: "my-app",
            options: &options,
        };
        install_warpstream(&ctx, &Catalog::builtin()).await.unwrap();

        let app_dir = project.path().join("apps/workers");
        assert!(app_dir.join("src/jobs/topics.ts").exists());

        let index = std::fs::read_to_string(app_dir.join("src/index.ts")).unwrap();
        assert!(index.contains("my-app-workers"));

        let manifest = read_manifest(&app_dir).unwrap();
        assert_eq!(manifest.scripts["dev"], "tsx watch src/index.ts");
        assert!(manifest
            .dependencies
            .contains_key("@alt-stack/workers-warpstream"));
        assert!(manifest.dev_dependencies.contains_key("tsx"));
    }
}
