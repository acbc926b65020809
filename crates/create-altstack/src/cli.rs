//! Flag parsing and interactive prompts producing the resolved option model

use altstack_scaffold::{
    parse_name_and_path, validate_app_name, CliFlags, HttpClient, Messaging, ProjectOptions,
    ServerFramework, Workers, DEFAULT_APP_NAME,
};
use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "create-altstack")]
#[command(about = "A CLI for creating alt-stack monorepo applications")]
#[command(version)]
pub struct Args {
    /// The name of the application, as well as the name of the directory to create
    pub dir: Option<String>,

    /// Skip initializing a new git repo in the project
    #[arg(long = "no-git")]
    pub no_git: bool,

    /// Skip running the package manager's install command
    #[arg(long = "no-install")]
    pub no_install: bool,

    /// Use all default options (Hono + Fetch, no extras)
    #[arg(short = 'y', long = "default")]
    pub use_defaults: bool,

    /// Run in CI mode (non-interactive, selections come from flags)
    #[arg(long = "ci")]
    pub ci: bool,

    /// Server framework
    #[arg(long, value_enum, default_value_t = ServerFramework::Hono)]
    pub server: ServerFramework,

    /// HTTP client
    #[arg(long = "http-client", value_enum, default_value_t = HttpClient::Fetch)]
    pub http_client: HttpClient,

    /// Messaging provider
    #[arg(long, value_enum, default_value_t = Messaging::None)]
    pub messaging: Messaging,

    /// Workers provider
    #[arg(long, value_enum, default_value_t = Workers::None)]
    pub workers: Workers,

    /// Include the TanStack Start frontend app
    #[arg(long)]
    pub frontend: bool,

    /// Include the Docusaurus documentation app
    #[arg(long)]
    pub docs: bool,
}

/// Everything the pipeline needs for one invocation.
pub struct ResolvedRun {
    pub options: ProjectOptions,
    pub project_dir: PathBuf,
    pub project_name: String,
    pub overwrite_confirmed: bool,
}

/// Resolve CLI args into a full option model.
///
/// CI mode and `--default` read everything from flags; otherwise missing
/// choices are prompted for interactively.
pub fn resolve(args: Args) -> Result<ResolvedRun> {
    let flags = CliFlags {
        no_git: args.no_git,
        no_install: args.no_install,
        use_defaults: args.use_defaults,
        ci: args.ci,
    };

    if args.ci {
        let app_name = match &args.dir {
            Some(dir) => validate_app_name(dir)?,
            None => DEFAULT_APP_NAME.to_string(),
        };
        let options = ProjectOptions {
            app_name,
            server_framework: args.server,
            http_client: args.http_client,
            messaging: args.messaging,
            workers: args.workers,
            frontend: args.frontend,
            docs: args.docs,
            flags,
        };
        return finish(options, false);
    }

    if args.use_defaults {
        let app_name = match &args.dir {
            Some(dir) => validate_app_name(dir)?,
            None => DEFAULT_APP_NAME.to_string(),
        };
        let options = ProjectOptions {
            app_name,
            flags,
            ..ProjectOptions::default()
        };
        return finish(options, false);
    }

    match prompt_options(&args, flags) {
        Ok(options) => {
            let overwrite = confirm_overwrite(&options)?;
            finish(options, overwrite)
        }
        Err(e) if e.kind() == io::ErrorKind::Interrupted => {
            let _ = cliclack::outro_cancel("Operation cancelled.");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn finish(options: ProjectOptions, overwrite_confirmed: bool) -> Result<ResolvedRun> {
    let (project_name, dir_name) = parse_name_and_path(&options.app_name);
    let project_dir = std::env::current_dir()?.join(dir_name);

    Ok(ResolvedRun {
        options,
        project_dir,
        project_name,
        overwrite_confirmed,
    })
}

fn prompt_options(args: &Args, mut flags: CliFlags) -> io::Result<ProjectOptions> {
    cliclack::intro("create-altstack")?;

    let app_name = match &args.dir {
        Some(dir) => validate_app_name(dir).map_err(io::Error::other)?,
        None => cliclack::input("What will your project be called?")
            .placeholder(DEFAULT_APP_NAME)
            .default_input(DEFAULT_APP_NAME)
            .validate(|input: &String| match validate_app_name(input) {
                Ok(_) => Ok(()),
                Err(e) => Err(e.to_string()),
            })
            .interact()?,
    };

    let server_framework: ServerFramework =
        cliclack::select("Which server framework would you like to use?")
            .item(ServerFramework::Hono, "Hono", "recommended")
            .item(ServerFramework::Express, "Express", "")
            .item(ServerFramework::Bun, "Bun native", "")
            .initial_value(ServerFramework::Hono)
            .interact()?;

    let http_client: HttpClient = cliclack::select("Which HTTP client would you like to use?")
        .item(HttpClient::Fetch, "Fetch", "native, recommended")
        .item(HttpClient::Ky, "ky", "")
        .initial_value(HttpClient::Fetch)
        .interact()?;

    let messaging: Messaging = cliclack::select("Would you like to add messaging support?")
        .item(Messaging::None, "None", "")
        .item(Messaging::Kafkajs, "KafkaJS", "")
        .item(Messaging::Warpstream, "WarpStream", "")
        .initial_value(Messaging::None)
        .interact()?;

    let workers: Workers = cliclack::select("Would you like to add background workers?")
        .item(Workers::None, "None", "")
        .item(Workers::Trigger, "Trigger.dev", "")
        .item(Workers::Warpstream, "WarpStream", "")
        .initial_value(Workers::None)
        .interact()?;

    let frontend: bool =
        cliclack::confirm("Would you like to add a frontend? (TanStack Start + React 19)")
            .initial_value(false)
            .interact()?;

    let docs: bool =
        cliclack::confirm("Would you like to add documentation? (Docusaurus + OpenAPI)")
            .initial_value(false)
            .interact()?;

    if !flags.no_git {
        let git: bool =
            cliclack::confirm("Should we initialize a Git repository and stage the changes?")
                .initial_value(true)
                .interact()?;
        flags.no_git = !git;
    }

    if !flags.no_install {
        let install: bool = cliclack::confirm("Should we run 'pnpm install' for you?")
            .initial_value(true)
            .interact()?;
        flags.no_install = !install;
    }

    Ok(ProjectOptions {
        app_name,
        server_framework,
        http_client,
        messaging,
        workers,
        frontend,
        docs,
        flags,
    })
}

/// Ask before reusing a non-empty target directory. Non-interactive runs
/// never confirm; the pipeline fails on a non-empty directory instead.
fn confirm_overwrite(options: &ProjectOptions) -> Result<bool> {
    let (_, dir_name) = parse_name_and_path(&options.app_name);
    let target = std::env::current_dir()?.join(dir_name);

    if !target.is_dir() {
        return Ok(false);
    }

    let count = std::fs::read_dir(&target)?.count();
    if count == 0 {
        return Ok(false);
    }

    cliclack::log::warning(format!(
        "Directory {} has {} existing items",
        target.display(),
        count
    ))?;

    let confirm = cliclack::confirm("Remove existing files and continue?")
        .initial_value(false)
        .interact()?;

    if !confirm {
        anyhow::bail!("Setup cancelled.");
    }

    Ok(true)
}
