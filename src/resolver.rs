use std::fmt;

use tracing::debug;

use crate::directory::{Directory, GroupId};
use crate::error::HueError;
use crate::similarity::ratio;

/// Minimum similarity a label needs before a fuzzy match is accepted.
pub const SIMILARITY_CUTOFF: f64 = 0.6;

const ALL_GROUPS_TOKEN: &str = "all";

/// Target of a state patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSelector {
    All,
    Group(GroupId),
}

impl GroupSelector {
    /// Identifier used in the bridge's action path; `0` addresses every group.
    pub fn id(&self) -> u32 {
        match self {
            GroupSelector::All => 0,
            GroupSelector::Group(id) => id.0,
        }
    }
}

impl fmt::Display for GroupSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupSelector::All => write!(f, "all groups"),
            GroupSelector::Group(id) => write!(f, "group {id}"),
        }
    }
}

/// Lower-case and drop every whitespace character.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve a user-supplied group token against the directory.
///
/// `all` selects every group. Anything else picks the label with the highest
/// similarity at or above [`SIMILARITY_CUTOFF`]; on a tie the group listed
/// first by the bridge wins.
pub fn resolve(token: &str, directory: &Directory) -> Result<GroupSelector, HueError> {
    let wanted = normalize(token);
    if wanted == ALL_GROUPS_TOKEN {
        return Ok(GroupSelector::All);
    }

    let mut best: Option<(f64, GroupId)> = None;
    for group in directory.groups() {
        let score = ratio(&wanted, &normalize(&group.label));
        if score < SIMILARITY_CUTOFF {
            continue;
        }
        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, group.id));
        }
    }

    match best {
        Some((score, id)) => {
            debug!(token, %id, score, "resolved group");
            Ok(GroupSelector::Group(id))
        }
        None => Err(HueError::GroupNotFound(token.to_string())),
    }
}
