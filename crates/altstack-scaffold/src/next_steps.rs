//! Post-generation summary
//!
//! A pure function of the option model - no filesystem access - so the
//! printed layout always reflects what the installers were asked to build,
//! and tests can assert on it directly.

use crate::options::{Messaging, ProjectOptions, Workers};

/// The two sections of the closing summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextSteps {
    /// Shell commands to run next
    pub commands: Vec<String>,
    /// Generated directory layout, one line per entry
    pub layout: Vec<String>,
}

/// Describe the generated project and what to do next.
pub fn next_steps(project_name: &str, options: &ProjectOptions) -> NextSteps {
    let mut commands = vec![format!("cd {project_name}")];
    if options.flags.no_install {
        commands.push("pnpm install".to_string());
    }
    commands.push("pnpm dev".to_string());

    let mut layout = vec![
        "apps/".to_string(),
        "  server/         - API server".to_string(),
    ];

    if options.messaging != Messaging::None {
        layout.push("  kafka-consumer/ - Kafka message consumer".to_string());
    }
    if options.workers != Workers::None {
        layout.push("  workers/        - Background job workers".to_string());
    }
    if options.frontend {
        layout.push("  frontend/       - TanStack Start frontend".to_string());
    }
    if options.docs {
        layout.push("  docs/           - Docusaurus documentation".to_string());
    }

    layout.push("packages/".to_string());
    layout.push("  typescript-config/ - Shared TypeScript configs".to_string());

    NextSteps { commands, layout }
}
