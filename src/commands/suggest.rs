//! One-off evaluation of a reading.
//!
//! Uses the thresholds from the configuration file, so edits to the bands can
//! be checked without running a session.

use crate::{
    libs::{config::Config, messages::Message, suggestion::SuggestionEvaluator, view::View},
    msg_bail_anyhow, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SuggestArgs {
    /// Temperature in degrees Celsius
    #[arg(allow_negative_numbers = true)]
    temperature: f64,
    /// Relative humidity in percent
    humidity: f64,
    /// Illuminance in lux
    lux: f64,
    /// Use the end-of-session comfort bands instead of the live ones
    #[arg(short, long)]
    comfort: bool,
}

pub fn cmd(args: SuggestArgs) -> Result<()> {
    let engine = Config::read()?.engine_or_default();
    if let Err(e) = engine.validate() {
        msg_bail_anyhow!(e);
    }

    let evaluator = if args.comfort {
        SuggestionEvaluator::comfort(engine.comfort_thresholds)
    } else {
        SuggestionEvaluator::live(engine.live_thresholds)
    };

    let suggestions = evaluator.evaluate(args.temperature, args.humidity, args.lux);
    if suggestions.is_empty() {
        msg_success!(Message::NoSuggestions);
    } else {
        View::suggestions(&suggestions);
    }
    Ok(())
}
