//! Command-line interface wiring for the `huenix` binary.
//!
//! Any state or status flag selects one-shot mode; with none of them the
//! binary starts the interactive prompt.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};

pub mod interactive;
pub mod oneshot;
pub mod utils;

/// Parsed CLI entrypoint for the `huenix` binary.
#[derive(Parser, Debug)]
#[command(
    name = "huenix",
    version,
    about = "Command-line control for Hue bridge light groups",
    allow_negative_numbers = true
)]
pub struct Cli {
    /// Label of the light group to control ("all" for every group).
    #[arg(short = 'g', long)]
    pub group: Option<String>,

    /// Switch the group on or off.
    #[arg(short = 'o', long = "onoff", value_name = "on|off")]
    pub onoff: Option<String>,

    /// Brightness, 0 to 254 (out-of-range values are clamped).
    #[arg(short = 'b', long)]
    pub brightness: Option<i64>,

    /// Saturation, 0 to 254 (out-of-range values are clamped).
    #[arg(short = 's', long)]
    pub saturation: Option<i64>,

    /// Hue, 0 to 65535 (out-of-range values are clamped).
    #[arg(short = 'c', long)]
    pub color: Option<i64>,

    /// Print the current state of all groups.
    #[arg(short = 'p', long = "print")]
    pub print: bool,

    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log more detail to stderr (-v info, -vv debug).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// True when any flag asks for a single invocation rather than the prompt.
    pub fn is_one_shot(&self) -> bool {
        self.group.is_some()
            || self.onoff.is_some()
            || self.brightness.is_some()
            || self.saturation.is_some()
            || self.color.is_some()
            || self.print
    }
}

/// Execute the requested mode.
pub fn run(cli: Cli) -> Result<()> {
    let config = utils::load_config(cli.config.as_deref())?;
    if cli.is_one_shot() {
        oneshot::handle(&cli, &config)
    } else {
        interactive::handle(&config)
    }
}
