//! Text rendering for the status table and the interactive help screen.

use std::fmt::Write;

use chrono::Local;

use crate::directory::{Directory, Group};
use crate::keywords::{KeywordTable, Meaning};
use crate::resolver::GroupSelector;

const NOT_AVAILABLE: &str = "N/A";

/// Table of every group in the snapshot.
pub fn render_status(directory: &Directory) -> String {
    render_table(directory, directory.groups().iter())
}

/// Table restricted to `selector`.
pub fn render_selection(directory: &Directory, selector: GroupSelector) -> String {
    match selector {
        GroupSelector::All => render_status(directory),
        GroupSelector::Group(id) => {
            render_table(directory, directory.groups().iter().filter(|g| g.id == id))
        }
    }
}

fn render_table<'a>(directory: &Directory, groups: impl Iterator<Item = &'a Group>) -> String {
    let mut out = String::new();
    let taken = directory.fetched_at().with_timezone(&Local);
    writeln!(&mut out, "Bridge status at {}", taken.format("%Y-%m-%d %H:%M:%S")).ok();
    push_row(
        &mut out,
        &format!(
            "{:12} | {:5} | {:12} | {:12} | {:7}",
            "Group", "State", "Brightness", "Saturation", "Color"
        ),
    );
    for group in groups {
        let state = &group.state;
        let saturation = state
            .saturation
            .map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string());
        let hue = state
            .hue
            .map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string());
        push_row(
            &mut out,
            &format!(
                "{:<12.12} | {:<5} | {:<12} | {:<12} | {:<7}",
                group.label,
                if state.on { "on" } else { "off" },
                state.brightness,
                saturation,
                hue
            ),
        );
    }
    out
}

fn push_row(out: &mut String, row: &str) {
    out.push_str(row.trim_end());
    out.push('\n');
}

/// Help screen for the interactive prompt.
pub fn help_text() -> String {
    let mut out = String::new();
    writeln!(&mut out, "----- Help Menu ----------\n").ok();
    writeln!(&mut out, "Commands take the form: <group> [keyword value]...").ok();
    writeln!(&mut out, "The light group must be the first word of the command.").ok();
    writeln!(&mut out, "Except for on/off, every keyword is followed by its value.\n").ok();
    writeln!(&mut out, "Groups: spaces in group names may be left out;").ok();
    writeln!(&mut out, "\tclose misspellings are matched to the nearest group,").ok();
    writeln!(&mut out, "\tand \"all\" controls every light group.").ok();
    for keyword in KeywordTable::list() {
        let name = match keyword.meaning {
            Meaning::Power(_) => keyword.long.to_string(),
            Meaning::Level(_) => format!("{} ({})", keyword.long, keyword.short()),
        };
        writeln!(&mut out, "  {:<20} {}", name, keyword.description).ok();
    }
    writeln!(&mut out).ok();
    writeln!(&mut out, "Other commands: status [group], help, quit").ok();
    writeln!(&mut out, "\t(\"status\" followed by keywords drives a group named status)\n").ok();
    writeln!(&mut out, "Example command: livingroom on brightness 254 col 0 sat 254").ok();
    out
}
