mod repl;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use capuchin::interpreter;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// run a script file
    Run {
        #[arg(name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Run { file }) => {
            let source = fs::read_to_string(&file)
                .with_context(|| format!("could not read {}", file.display()))?;
            let mut engine = interpreter::new_engine();
            let result = engine.run(&source)?;
            println!("{}", result);
        }
        None => repl::start(),
    }
    Ok(())
}
