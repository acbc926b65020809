//! create-altstack - scaffold an alt-stack TypeScript monorepo

mod cli;

use altstack_scaffold::{Catalog, Pipeline, SystemRunner};
use anyhow::Result;
use clap::Parser;
use colored::Colorize;

const TITLE_TEXT: &str = r"
   _   _   _____   ____ _____  _    ____ _  __
  /_\ | | |_   _| / ___|_   _|/ \  / ___| |/ /
 //_\\| |   | |   \___ \ | | / _ \| |   | ' /
/  _  \ |___| |    ___) || |/ ___ \ |___| . \
\_/ \_/_____|_|   |____/ |_/_/   \_\____|_|\_\
";

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    println!("{}", TITLE_TEXT.purple());

    let args = cli::Args::parse();
    let run = cli::resolve(args)?;

    let mut pipeline = Pipeline::new(SystemRunner, Catalog::builtin());
    let result = pipeline
        .run(
            &run.project_dir,
            &run.project_name,
            &run.options,
            run.overwrite_confirmed,
        )
        .await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
