//! Messaging installer (`apps/kafka-consumer`)
//!
//! The consumer app is small enough that it is generated programmatically
//! rather than kept as a template tree: a manifest, the shared tsconfig,
//! and one entrypoint stub that differs per provider.

use super::{write_app_tsconfig, InstallerContext};
use crate::catalog::{Catalog, Dep};
use crate::manifest::{merge_dependencies, write_manifest, PackageManifest};
use crate::options::Messaging;
use crate::templates::PROJECT_NAME_PLACEHOLDER;
use anyhow::{Context, Result};
use tokio::fs;

const KAFKAJS_CONSUMER: &str = r#"import { createKafkaConsumer } from "@alt-stack/kafka-client-kafkajs";
import { z } from "zod";

const MessageSchema = z.object({
  type: z.string(),
  payload: z.unknown(),
});

async function main() {
  const consumer = await createKafkaConsumer({
    brokers: (process.env.KAFKA_BROKERS || "localhost:9092").split(","),
    groupId: "{{PROJECT_NAME}}-group",
  });

  await consumer.subscribe({
    topic: "events",
    schema: MessageSchema,
    handler: async (message) => {
      console.log("Received message:", message);
    },
  });

  console.log("Kafka consumer started");
}

main().catch(console.error);
"#;

const WARPSTREAM_CONSUMER: &str = r#"import { createWarpStreamConsumer } from "@alt-stack/kafka-client-warpstream";
import { z } from "zod";

const MessageSchema = z.object({
  type: z.string(),
  payload: z.unknown(),
});

async function main() {
  const consumer = await createWarpStreamConsumer({
    bootstrapServer: process.env.WARPSTREAM_URL || "http://localhost:9092",
    groupId: "{{PROJECT_NAME}}-group",
  });

  await consumer.subscribe({
    topic: "events",
    schema: MessageSchema,
    handler: async (message) => {
      console.log("Received message:", message);
    },
  });

  console.log("WarpStream consumer started");
}

main().catch(console.error);
"#;

pub(super) async fn install(
    ctx: &InstallerContext<'_>,
    catalog: &Catalog,
    provider: Messaging,
) -> Result<()> {
    let app_dir = ctx.project_dir.join("apps/kafka-consumer");
    fs::create_dir_all(app_dir.join("src"))
        .await
        .with_context(|| format!("Failed to create {}", app_dir.display()))?;

    let manifest = PackageManifest {
        name: Some(format!("@{}/kafka-consumer", ctx.project_name)),
        version: Some("1.0.0".to_string()),
        private: Some(true),
        package_type: Some("module".to_string()),
        scripts: [
            ("dev", "tsx watch src/index.ts"),
            ("build", "tsc"),
            ("start", "node dist/index.js"),
            ("check-types", "tsc --noEmit"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
        ..Default::default()
    };
    write_manifest(&app_dir, &manifest)?;

    write_app_tsconfig(&app_dir, ctx.project_name).await?;

    let (stub, provider_deps): (&str, &[Dep]) = match provider {
        Messaging::Kafkajs => (
            KAFKAJS_CONSUMER,
            &[
                Dep::AltKafkaCore,
                Dep::AltKafkaClientKafkajs,
                Dep::Kafkajs,
                Dep::Zod,
            ],
        ),
        Messaging::Warpstream => (
            WARPSTREAM_CONSUMER,
            &[Dep::AltKafkaCore, Dep::AltKafkaClientWarpstream, Dep::Zod],
        ),
        Messaging::None => anyhow::bail!("kafka installer invoked without a provider"),
    };

    let index_path = app_dir.join("src/index.ts");
    fs::write(
        &index_path,
        stub.replace(PROJECT_NAME_PLACEHOLDER, ctx.project_name),
    )
    .await
    .with_context(|| format!("Failed to write {}", index_path.display()))?;

    merge_dependencies(&app_dir, catalog, provider_deps, false)?;
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
    use crate::options::ProjectOptions;
    use tempfile::TempDir;

    async fn run_install(provider: Messaging) -> TempDir {
        let project = TempDir::new().unwrap();
        let options = ProjectOptions {
            messaging: provider,
            ..Default::default()
        };
        let ctx = InstallerContext {
            project_dir: project.path(),
            project_name: "my-app",
            options: &options,
        };
        install(&ctx, &Catalog::builtin(), provider).await.unwrap();
        project
    }

    #[tokio::test]
    async fn test_warpstream_consumer_app() {
        let project = run_install(Messaging::Warpstream).await;
        let app_dir = project.path().join("apps/kafka-consumer");

        let manifest = read_manifest(&app_dir).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("@my-app/kafka-consumer"));
        assert!(manifest
            .dependencies
            .contains_key("@alt-stack/kafka-client-warpstream"));
        assert!(!manifest.dependencies.contains_key("kafkajs"));
        assert!(manifest.dev_dependencies.contains_key("tsx"));

        let index = std::fs::read_to_string(app_dir.join("src/index.ts")).unwrap();
        assert!(index.contains("my-app-group"));
        assert!(!index.contains("{{PROJECT_NAME}}"));
    }

    #[tokio::test]
    async fn test_kafkajs_consumer_app() {
        let project = run_install(Messaging::Kafkajs).await;
        let app_dir = project.path().join("apps/kafka-consumer");

        let manifest = read_manifest(&app_dir).unwrap();
        assert!(manifest.dependencies.contains_key("kafkajs"));
        assert!(manifest
            .dependencies
            .contains_key("@alt-stack/kafka-client-kafkajs"));

        let tsconfig =
            std::fs::read_to_string(app_dir.join("tsconfig.json")).unwrap();
        assert!(tsconfig.contains("@my-app/typescript-config/base.json"));
    }
}
