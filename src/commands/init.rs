//! Configuration setup command.
//!
//! Runs the interactive wizard for the engine settings, or writes the
//! defaults straight away with `--defaults`.

use crate::{
    libs::{
        config::{Config, EngineConfig},
        messages::Message,
    },
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Save the default engine settings without prompting
    #[arg(short, long)]
    defaults: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.defaults {
        let mut config = Config::read().unwrap_or_default();
        config.engine = Some(EngineConfig::default());
        config.save()?;
        msg_success!(Message::ConfigDefaultsSaved);
        return Ok(());
    }

    Config::init()?.save()?;
    msg_success!(Message::ConfigSaved);
    Ok(())
}
