mod commands;
mod logging;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "beets-audit")]
#[command(version, about = "Audit a beets library for missing cover art and rip logs", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/beets-audit/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// beets library database, overriding the config file
    #[arg(short, long, global = true)]
    library: Option<PathBuf>,

    /// Log progress to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Audit current status of music library
    Audit {
        /// Library query (accepted, but the whole library is always audited)
        query: Vec<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Audit { query } => commands::audit::run(cli.config, cli.library, query),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "beets-audit", &mut io::stdout());
            Ok(())
        }
    }
}
