//! Resolved project options driving installer selection
//!
//! The option model is produced once by the CLI front end (flags or
//! interactive prompts) and is immutable afterwards. Every closed choice is
//! a Rust enum so the installer registry dispatches with exhaustive matches.

use crate::error::ScaffoldError;
use clap::ValueEnum;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Fallback project name when none is provided
pub const DEFAULT_APP_NAME: &str = "my-altstack-app";

/// Server framework choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ServerFramework {
    #[default]
    Hono,
    Express,
    Bun,
}

impl ServerFramework {
    pub fn display_name(&self) -> &'static str {
        match self {
            ServerFramework::Hono => "Hono",
            ServerFramework::Express => "Express",
            ServerFramework::Bun => "Bun native",
        }
    }

    /// Template directory suffix under `extras/apps/server-<slug>`
    pub fn slug(&self) -> &'static str {
        match self {
            ServerFramework::Hono => "hono",
            ServerFramework::Express => "express",
            ServerFramework::Bun => "bun",
        }
    }
}

impl fmt::Display for ServerFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// HTTP client choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HttpClient {
    /// Native fetch, no extra runtime dependency
    #[default]
    Fetch,
    Ky,
}

impl HttpClient {
    pub fn display_name(&self) -> &'static str {
        match self {
            HttpClient::Fetch => "Fetch",
            HttpClient::Ky => "ky",
        }
    }
}

/// Messaging provider choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Messaging {
    #[default]
    None,
    Kafkajs,
    Warpstream,
}

impl Messaging {
    pub fn display_name(&self) -> &'static str {
        match self {
            Messaging::None => "None",
            Messaging::Kafkajs => "KafkaJS",
            Messaging::Warpstream => "WarpStream",
        }
    }
}

/// Background worker provider choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Workers {
    #[default]
    None,
    Trigger,
    Warpstream,
}

impl Workers {
    pub fn display_name(&self) -> &'static str {
        match self {
            Workers::None => "None",
            Workers::Trigger => "Trigger.dev",
            Workers::Warpstream => "WarpStream",
        }
    }
}

/// Execution flags - how to run, not what to generate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliFlags {
    /// Skip git init / add / commit
    pub no_git: bool,
    /// Skip the package manager install step
    pub no_install: bool,
    /// Accept all defaults without prompting
    pub use_defaults: bool,
    /// Non-interactive mode: selections come from flags only
    pub ci: bool,
}

/// The fully resolved option model consumed by the installer registry.
///
/// Enumerations and booleans are independently orthogonal - any combination
/// is legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOptions {
    pub app_name: String,
    pub server_framework: ServerFramework,
    pub http_client: HttpClient,
    pub messaging: Messaging,
    pub workers: Workers,
    pub frontend: bool,
    pub docs: bool,
    pub flags: CliFlags,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            server_framework: ServerFramework::default(),
            http_client: HttpClient::default(),
            messaging: Messaging::default(),
            workers: Workers::default(),
            frontend: false,
            docs: false,
            flags: CliFlags::default(),
        }
    }
}

/// npm package-name rule: optional scope, then lowercase name
static APP_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@[a-z0-9-*~][a-z0-9-*._~]*/)?[a-z0-9-~][a-z0-9-._~]*$")
        .expect("app name regex is valid")
});

/// Validate a raw app name, returning the trimmed name on success.
pub fn validate_app_name(raw: &str) -> Result<String, ScaffoldError> {
    let input = raw.trim();

    if input.is_empty() {
        return Err(ScaffoldError::InvalidAppName {
            name: raw.to_string(),
            reason: "app name cannot be empty".to_string(),
        });
    }

    if !APP_NAME_RE.is_match(input) {
        return Err(ScaffoldError::InvalidAppName {
            name: input.to_string(),
            reason: "must be a valid npm package name (lowercase, no spaces, \
                     alphanumeric with dashes)"
                .to_string(),
        });
    }

    Ok(input.to_string())
}

/// Split an app name into the package name and the directory name.
///
/// Scoped packages keep the full scoped string as the package name but use
/// only the trailing segment as the directory: `@org/my-app` creates
/// `./my-app`.
pub fn parse_name_and_path(input: &str) -> (String, String) {
    let trimmed = input.trim();

    if let Some(rest) = trimmed.strip_prefix('@') {
        if let Some((_, name)) = rest.split_once('/') {
            if !name.is_empty() {
                return (trimmed.to_string(), name.to_string());
            }
        }
    }

    (trimmed.to_string(), trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_app_names() {
        assert_eq!(validate_app_name("my-app").unwrap(), "my-app");
        assert_eq!(validate_app_name("  my-app  ").unwrap(), "my-app");
        assert_eq!(validate_app_name("@org/my-app").unwrap(), "@org/my-app");
        assert_eq!(validate_app_name("app2.beta~x").unwrap(), "app2.beta~x");
    }

    #[test]
    fn test_invalid_app_names() {
        assert!(validate_app_name("").is_err());
        assert!(validate_app_name("   ").is_err());
        assert!(validate_app_name("MyApp").is_err());
        assert!(validate_app_name("my app").is_err());
        assert!(validate_app_name("@/broken").is_err());
    }

    #[test]
    fn test_parse_plain_name() {
        let (name, dir) = parse_name_and_path("my-app");
        assert_eq!(name, "my-app");
        assert_eq!(dir, "my-app");
    }

    #[test]
    fn test_parse_scoped_name() {
        let (name, dir) = parse_name_and_path("@acme/my-app");
        assert_eq!(name, "@acme/my-app");
        assert_eq!(dir, "my-app");
    }

    #[test]
    fn test_defaults_match_primary_options() {
        let options = ProjectOptions::default();
        assert_eq!(options.server_framework, ServerFramework::Hono);
        assert_eq!(options.http_client, HttpClient::Fetch);
        assert_eq!(options.messaging, Messaging::None);
        assert_eq!(options.workers, Workers::None);
        assert!(!options.frontend);
        assert!(!options.docs);
    }
}
