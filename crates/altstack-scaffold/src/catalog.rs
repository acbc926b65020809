//! The pinned dependency-version catalog
//!
//! Every dependency an installer can add to a generated manifest is a
//! variant of [`Dep`], so a typo in a dependency name is a compile error.
//! The versions live in an explicit [`Catalog`] value that is passed into
//! the manifest merger - tests substitute fixture catalogs instead of
//! patching a global.

use crate::error::ScaffoldError;
use std::collections::BTreeMap;

/// The closed set of packages installers may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Dep {
    // Core alt-stack packages
    AltResult,
    AltServerCore,
    AltServerHono,
    AltServerExpress,
    AltServerBun,
    AltHttpClientCore,
    AltHttpClientFetch,
    AltHttpClientKy,
    AltKafkaCore,
    AltKafkaClientCore,
    AltKafkaClientKafkajs,
    AltKafkaClientWarpstream,
    AltWorkersCore,
    AltWorkersClientCore,
    AltWorkersTrigger,
    AltWorkersClientTrigger,
    AltWorkersWarpstream,
    AltWorkersClientWarpstream,
    AltZodOpenapi,
    AltZodAsyncapi,
    // Server frameworks
    Hono,
    HonoNodeServer,
    Express,
    TypesExpress,
    // HTTP clients
    Ky,
    // Messaging
    Kafkajs,
    // Workers
    TriggerSdk,
    // Frontend (TanStack Start)
    TanstackReactStart,
    TanstackReactRouter,
    TanstackReactRouterDevtools,
    React,
    ReactDom,
    Vite,
    VitejsPluginReact,
    Tailwindcss,
    TailwindcssVite,
    TailwindMerge,
    ViteTsconfigPaths,
    // Documentation
    DocusaurusCore,
    DocusaurusPresetClassic,
    // Core dependencies (always included)
    Zod,
    T3EnvCore,
    // Dev dependencies
    Typescript,
    TypesNode,
    TypesReact,
    TypesReactDom,
    Tsx,
    Tsup,
    Vitest,
}

impl Dep {
    /// Every catalogued dependency, in catalog order.
    pub const ALL: [Dep; 49] = [
        Dep::AltResult,
        Dep::AltServerCore,
        Dep::AltServerHono,
        Dep::AltServerExpress,
        Dep::AltServerBun,
        Dep::AltHttpClientCore,
        Dep::AltHttpClientFetch,
        Dep::AltHttpClientKy,
        Dep::AltKafkaCore,
        Dep::AltKafkaClientCore,
        Dep::AltKafkaClientKafkajs,
        Dep::AltKafkaClientWarpstream,
        Dep::AltWorkersCore,
        Dep::AltWorkersClientCore,
        Dep::AltWorkersTrigger,
        Dep::AltWorkersClientTrigger,
        Dep::AltWorkersWarpstream,
        Dep::AltWorkersClientWarpstream,
        Dep::AltZodOpenapi,
        Dep::AltZodAsyncapi,
        Dep::Hono,
        Dep::HonoNodeServer,
        Dep::Express,
        Dep::TypesExpress,
        Dep::Ky,
        Dep::Kafkajs,
        Dep::TriggerSdk,
        Dep::TanstackReactStart,
        Dep::TanstackReactRouter,
        Dep::TanstackReactRouterDevtools,
        Dep::React,
        Dep::ReactDom,
        Dep::Vite,
        Dep::VitejsPluginReact,
        Dep::Tailwindcss,
        Dep::TailwindcssVite,
        Dep::TailwindMerge,
        Dep::ViteTsconfigPaths,
        Dep::DocusaurusCore,
        Dep::DocusaurusPresetClassic,
        Dep::Zod,
        Dep::T3EnvCore,
        Dep::Typescript,
        Dep::TypesNode,
        Dep::TypesReact,
        Dep::TypesReactDom,
        Dep::Tsx,
        Dep::Tsup,
        Dep::Vitest,
    ];

    /// The name this package is published under.
    pub fn package_name(&self) -> &'static str {
        match self {
            Dep::AltResult => "@alt-stack/result",
            Dep::AltServerCore => "@alt-stack/server-core",
            Dep::AltServerHono => "@alt-stack/server-hono",
            Dep::AltServerExpress => "@alt-stack/server-express",
            Dep::AltServerBun => "@alt-stack/server-bun",
            Dep::AltHttpClientCore => "@alt-stack/http-client-core",
            Dep::AltHttpClientFetch => "@alt-stack/http-client-fetch",
            Dep::AltHttpClientKy => "@alt-stack/http-client-ky",
            Dep::AltKafkaCore => "@alt-stack/kafka-core",
            Dep::AltKafkaClientCore => "@alt-stack/kafka-client-core",
            Dep::AltKafkaClientKafkajs => "@alt-stack/kafka-client-kafkajs",
            Dep::AltKafkaClientWarpstream => "@alt-stack/kafka-client-warpstream",
            Dep::AltWorkersCore => "@alt-stack/workers-core",
            Dep::AltWorkersClientCore => "@alt-stack/workers-client-core",
            Dep::AltWorkersTrigger => "@alt-stack/workers-trigger",
            Dep::AltWorkersClientTrigger => "@alt-stack/workers-client-trigger",
            Dep::AltWorkersWarpstream => "@alt-stack/workers-warpstream",
            Dep::AltWorkersClientWarpstream => "@alt-stack/workers-client-warpstream",
            Dep::AltZodOpenapi => "@alt-stack/zod-openapi",
            Dep::AltZodAsyncapi => "@alt-stack/zod-asyncapi",
            Dep::Hono => "hono",
            Dep::HonoNodeServer => "@hono/node-server",
            Dep::Express => "express",
            Dep::TypesExpress => "@types/express",
            Dep::Ky => "ky",
            Dep::Kafkajs => "kafkajs",
            Dep::TriggerSdk => "@trigger.dev/sdk",
            Dep::TanstackReactStart => "@tanstack/react-start",
            Dep::TanstackReactRouter => "@tanstack/react-router",
            Dep::TanstackReactRouterDevtools => "@tanstack/react-router-devtools",
            Dep::React => "react",
            Dep::ReactDom => "react-dom",
            Dep::Vite => "vite",
            Dep::VitejsPluginReact => "@vitejs/plugin-react",
            Dep::Tailwindcss => "tailwindcss",
            Dep::TailwindcssVite => "@tailwindcss/vite",
            Dep::TailwindMerge => "tailwind-merge",
            Dep::ViteTsconfigPaths => "vite-tsconfig-paths",
            Dep::DocusaurusCore => "@docusaurus/core",
            Dep::DocusaurusPresetClassic => "@docusaurus/preset-classic",
            Dep::Zod => "zod",
            Dep::T3EnvCore => "@t3-oss/env-core",
            Dep::Typescript => "typescript",
            Dep::TypesNode => "@types/node",
            Dep::TypesReact => "@types/react",
            Dep::TypesReactDom => "@types/react-dom",
            Dep::Tsx => "tsx",
            Dep::Tsup => "tsup",
            Dep::Vitest => "vitest",
        }
    }
}

/// Pinned versions shipped with this release of the CLI.
const PINNED_VERSIONS: [(Dep, &str); 49] = [
    (Dep::AltResult, "^0.1.4"),
    (Dep::AltServerCore, "^0.4.3"),
    (Dep::AltServerHono, "^0.4.4"),
    (Dep::AltServerExpress, "^0.1.0"),
    (Dep::AltServerBun, "^0.1.0"),
    (Dep::AltHttpClientCore, "^0.1.0"),
    (Dep::AltHttpClientFetch, "^0.1.0"),
    (Dep::AltHttpClientKy, "^0.1.0"),
    (Dep::AltKafkaCore, "^0.1.0"),
    (Dep::AltKafkaClientCore, "^0.1.0"),
    (Dep::AltKafkaClientKafkajs, "^0.1.2"),
    (Dep::AltKafkaClientWarpstream, "^0.1.0"),
    (Dep::AltWorkersCore, "^0.1.0"),
    (Dep::AltWorkersClientCore, "^0.1.0"),
    (Dep::AltWorkersTrigger, "^0.2.0"),
    (Dep::AltWorkersClientTrigger, "^0.1.2"),
    (Dep::AltWorkersWarpstream, "^0.1.0"),
    (Dep::AltWorkersClientWarpstream, "^0.1.0"),
    (Dep::AltZodOpenapi, "^0.1.0"),
    (Dep::AltZodAsyncapi, "^0.1.0"),
    (Dep::Hono, "^4.0.0"),
    (Dep::HonoNodeServer, "^1.0.0"),
    (Dep::Express, "^4.21.0"),
    (Dep::TypesExpress, "^4.17.21"),
    (Dep::Ky, "^1.7.0"),
    (Dep::Kafkajs, "^2.2.4"),
    (Dep::TriggerSdk, "^3.3.16"),
    (Dep::TanstackReactStart, "^1.143.11"),
    (Dep::TanstackReactRouter, "^1.143.11"),
    (Dep::TanstackReactRouterDevtools, "^1.143.11"),
    (Dep::React, "^19.0.0"),
    (Dep::ReactDom, "^19.0.0"),
    (Dep::Vite, "^7.1.7"),
    (Dep::VitejsPluginReact, "^4.6.0"),
    (Dep::Tailwindcss, "^4.1.18"),
    (Dep::TailwindcssVite, "^4.1.18"),
    (Dep::TailwindMerge, "^2.6.0"),
    (Dep::ViteTsconfigPaths, "^5.1.4"),
    (Dep::DocusaurusCore, "^3.5.2"),
    (Dep::DocusaurusPresetClassic, "^3.5.2"),
    (Dep::Zod, "^4.0.0"),
    (Dep::T3EnvCore, "^0.9.0"),
    (Dep::Typescript, "5.9.2"),
    (Dep::TypesNode, "^22.5.4"),
    (Dep::TypesReact, "^19.0.8"),
    (Dep::TypesReactDom, "^19.0.3"),
    (Dep::Tsx, "^4.0.0"),
    (Dep::Tsup, "^8.0.0"),
    (Dep::Vitest, "^4.0.3"),
];

/// Read-only dependency-name to version-string table.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: BTreeMap<Dep, &'static str>,
}

impl Catalog {
    /// The catalog shipped with this CLI release.
    pub fn builtin() -> Self {
        Self::from_entries(PINNED_VERSIONS)
    }

    /// Build a catalog from explicit entries (fixtures in tests).
    pub fn from_entries(entries: impl IntoIterator<Item = (Dep, &'static str)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Look up the pinned version for a dependency.
    pub fn version(&self, dep: Dep) -> Result<&'static str, ScaffoldError> {
        self.entries
            .get(&dep)
            .copied()
            .ok_or(ScaffoldError::UnknownDependency(dep.package_name()))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
