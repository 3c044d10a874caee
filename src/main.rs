use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quark", about = "Tokenizer, parser, and module loader for the Quark language")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Parse a file and every module it transitively `use`s, reporting any
  /// errors found. Never proceeds to code generation.
  Check {
    path: PathBuf,
    /// Disable colored diagnostic output.
    #[arg(long)]
    no_color: bool,
  },
}

fn main() -> anyhow::Result<ExitCode> {
  let cli = Cli::parse();
  match cli.command {
    Command::Check { path, no_color } => {
      let ok = quark::driver::check(&path, !no_color)?;
      Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
    }
  }
}
