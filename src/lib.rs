//! Command interpretation and group resolution for Hue-style lighting bridges.
//!
//! A command line such as `livingroom on bri 200` is parsed into a group token
//! and a clamped [`StatePatch`], the token is matched against the bridge's
//! group listing, and the patch is written to the matching group's action
//! resource.

pub mod bridge;
pub mod command;
pub mod config;
pub mod directory;
pub mod dispatch;
pub mod error;
pub mod keywords;
pub mod patch;
pub mod report;
pub mod resolver;
pub mod session;
pub mod similarity;

#[cfg(test)]
mod test_utils;

pub use bridge::{BridgeGateway, HttpGateway};
pub use command::{Command, parse, parse_line, parse_patch, parse_power};
pub use config::{Config, config_path};
pub use directory::{Directory, Group, GroupId, GroupState};
pub use dispatch::dispatch;
pub use error::{ConfigError, HueError, ValidationError};
pub use keywords::{Keyword, KeywordTable, Meaning};
pub use patch::{Field, StatePatch};
pub use report::{help_text, render_selection, render_status};
pub use resolver::{GroupSelector, SIMILARITY_CUTOFF, normalize, resolve};
pub use session::{CycleOutcome, Input, OneShot, Session, SessionState};
