pub mod init;
pub mod readings;
pub mod suggest;
pub mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure the session engine")]
    Init(init::InitArgs),
    #[command(about = "Run a study session at the desk")]
    Watch(watch::WatchArgs),
    #[command(about = "Show stored sensor readings")]
    Readings(readings::ReadingsArgs),
    #[command(about = "Evaluate a reading against the suggestion thresholds", arg_required_else_help = true)]
    Suggest(suggest::SuggestArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Watch(args) => watch::cmd(args).await,
            Commands::Readings(args) => readings::cmd(args),
            Commands::Suggest(args) => suggest::cmd(args),
        }
    }
}
