//! The staged execution pipeline
//!
//! Five stages run in fixed order: base scaffold, installer execution,
//! dependency install, version-control init, summary. The first two are
//! fatal on failure (the run aborts, no rollback); the next two are
//! best-effort (a failure becomes a warning with a remediation hint and the
//! pipeline continues); the summary always runs. External binaries go
//! through the injected [`CommandRunner`] so tests can simulate failures
//! without spawning processes.

use crate::catalog::Catalog;
use crate::installers::{build_registry, InstallerContext};
use crate::next_steps::next_steps;
use crate::options::ProjectOptions;
use crate::scaffold::scaffold_project;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Where the pipeline currently is.
///
/// `Aborted` is only reachable from `Scaffolding` and
/// `InstallingSubsystems`; failures in `InstallingDeps` and
/// `InitializingVcs` are downgraded to warnings and the pipeline moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    NotStarted,
    Scaffolding,
    InstallingSubsystems,
    InstallingDeps,
    InitializingVcs,
    Reporting,
    Done,
    Aborted,
}

/// Runs external binaries on behalf of the pipeline.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run `program` with `args` in `cwd`, awaiting completion. A non-zero
    /// exit is an error.
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<()>;
}

/// Invokes real processes via tokio. Output is captured, not streamed; the
/// interesting part of a failure is the exit status and stderr tail.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<()> {
        let output = tokio::process::Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .await
            .with_context(|| format!("Failed to spawn '{program}'"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "'{program} {}' exited with {}: {}",
                args.join(" "),
                output.status,
                stderr.trim()
            );
        }

        Ok(())
    }
}

/// The scaffolding pipeline. One instance per run.
pub struct Pipeline<R: CommandRunner> {
    runner: R,
    catalog: Catalog,
    state: PipelineState,
    warnings: Vec<String>,
}

impl<R: CommandRunner> Pipeline<R> {
    pub fn new(runner: R, catalog: Catalog) -> Self {
        Self {
            runner,
            catalog,
            state: PipelineState::NotStarted,
            warnings: Vec::new(),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Warnings collected from the best-effort stages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Run the whole pipeline. On a fatal error the state is `Aborted` and
    /// the error propagates with its cause; otherwise the state is `Done`
    /// (possibly with warnings).
    pub async fn run(
        &mut self,
        project_dir: &Path,
        project_name: &str,
        options: &ProjectOptions,
        overwrite_confirmed: bool,
    ) -> Result<()> {
        match self
            .execute(project_dir, project_name, options, overwrite_confirmed)
            .await
        {
            Ok(()) => {
                self.state = PipelineState::Done;
                Ok(())
            }
            Err(e) => {
                self.state = PipelineState::Aborted;
                Err(e)
            }
        }
    }

    async fn execute(
        &mut self,
        project_dir: &Path,
        project_name: &str,
        options: &ProjectOptions,
        overwrite_confirmed: bool,
    ) -> Result<()> {
        self.state = PipelineState::Scaffolding;
        scaffold_project(project_dir, project_name, overwrite_confirmed).await?;

        // Installers run sequentially: they may touch shared files (the
        // apps/ marker, nested manifests), and sequencing is the only
        // locking discipline. Any failure aborts the stage.
        self.state = PipelineState::InstallingSubsystems;
        let ctx = InstallerContext {
            project_dir,
            project_name,
            options,
        };
        let spinner = cliclack::spinner();
        spinner.start("Setting up project packages...");
        for installer in build_registry(options) {
            if let Err(e) = installer.run(&ctx, &self.catalog).await {
                spinner.stop("Failed to configure packages");
                return Err(e.context(format!("installer '{}' failed", installer.id())));
            }
        }
        spinner.stop("Project packages configured");

        self.state = PipelineState::InstallingDeps;
        if !options.flags.no_install {
            self.install_dependencies(project_dir).await;
        }

        self.state = PipelineState::InitializingVcs;
        if !options.flags.no_git {
            self.initialize_git(project_dir).await;
        }

        self.state = PipelineState::Reporting;
        self.report(project_name, options);

        Ok(())
    }

    async fn install_dependencies(&mut self, project_dir: &Path) {
        let spinner = cliclack::spinner();
        spinner.start("Installing dependencies with pnpm...");

        match self.runner.run("pnpm", &["install"], project_dir).await {
            Ok(()) => spinner.stop("Dependencies installed"),
            Err(e) => {
                spinner.stop("Failed to install dependencies");
                let warning = format!("Failed to install dependencies: {e}");
                let _ = cliclack::log::warning(&warning);
                let _ = cliclack::log::info(
                    "You can run 'pnpm install' manually in the project directory.",
                );
                self.warnings.push(warning);
            }
        }
    }

    async fn initialize_git(&mut self, project_dir: &Path) {
        let spinner = cliclack::spinner();
        spinner.start("Initializing Git repository...");

        let steps: [&[&str]; 3] = [
            &["init"],
            &["add", "."],
            &["commit", "-m", "Initial commit from create-altstack"],
        ];

        for args in steps {
            if let Err(e) = self.runner.run("git", args, project_dir).await {
                spinner.stop("Failed to initialize Git repository");
                let warning = format!("Failed to initialize Git repository: {e}");
                let _ = cliclack::log::warning(&warning);
                let _ = cliclack::log::info("You can initialize git manually with 'git init'");
                self.warnings.push(warning);
                return;
            }
        }

        spinner.stop("Git repository initialized");
    }

    fn report(&self, project_name: &str, options: &ProjectOptions) {
        let steps = next_steps(project_name, options);

        println!();
        println!("{}", "Next steps:".bold());
        println!();
        for command in &steps.commands {
            println!("  {}", command.cyan());
        }
        println!();
        println!("{}", "Your project structure:".bold());
        println!();
        for line in &steps.layout {
            println!("  {}", line.dimmed());
        }
        println!();
    }
}
