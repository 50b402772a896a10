use crate::{
    db::readings::Readings,
    libs::{messages::Message, view::View},
    msg_error_anyhow, msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ReadingsArgs {
    /// Number of most recent readings to show
    #[arg(short, long, default_value_t = 20)]
    limit: usize,
}

pub fn cmd(args: ReadingsArgs) -> Result<()> {
    let readings = Readings::new()
        .map_err(|e| msg_error_anyhow!(format!("{}: {}", Message::DbConnectionFailed, e)))?
        .latest(args.limit)?;
    if readings.is_empty() {
        msg_info!(Message::NoReadingsFound);
        return Ok(());
    }

    msg_print!(Message::ReadingsHeader(readings.len()), true);
    View::readings(&readings);
    Ok(())
}
