use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::bridge::BridgeGateway;
use crate::error::HueError;

const GROUPS_PATH: &str = "groups";

/// Identifier the bridge assigns to a group. `0` is reserved for "all groups".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Last state the bridge applied to a group.
///
/// Groups without colour-capable lights report no `sat`/`hue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupState {
    pub on: bool,
    #[serde(rename = "bri")]
    pub brightness: u8,
    #[serde(rename = "sat", default, skip_serializing_if = "Option::is_none")]
    pub saturation: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue: Option<u16>,
}

/// A named group of lights as listed by the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub label: String,
    pub state: GroupState,
}

/// Shape of one entry in the bridge's group listing.
#[derive(Debug, Deserialize)]
struct GroupRecord {
    name: String,
    action: GroupState,
}

/// Snapshot of every group, in the order the bridge listed them.
///
/// Valid for a single command cycle only; fetch a new one for the next.
#[derive(Debug, Clone)]
pub struct Directory {
    groups: Vec<Group>,
    fetched_at: DateTime<Utc>,
}

impl Directory {
    pub fn new(groups: Vec<Group>) -> Self {
        Self {
            groups,
            fetched_at: Utc::now(),
        }
    }

    /// Read the group listing from the bridge.
    pub fn fetch<G: BridgeGateway + ?Sized>(gateway: &G) -> Result<Self, HueError> {
        let body = gateway.get(GROUPS_PATH)?;
        let directory = Self::from_response(&gateway.url(GROUPS_PATH), &body)?;
        debug!(groups = directory.len(), "fetched group directory");
        Ok(directory)
    }

    /// Build a snapshot from a `GET groups` body. Any malformed record fails the whole listing.
    pub fn from_response(url: &str, body: &Value) -> Result<Self, HueError> {
        let malformed = |reason: String| HueError::Malformed {
            url: url.to_string(),
            reason,
        };
        let entries = body
            .as_object()
            .ok_or_else(|| malformed("expected an object keyed by group id".to_string()))?;

        let mut groups = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let id: u32 = key
                .parse()
                .map_err(|_| malformed(format!("group key '{key}' is not a numeric id")))?;
            if id == 0 {
                return Err(malformed("group key 0 is reserved for all groups".to_string()));
            }
            let record: GroupRecord = serde_json::from_value(value.clone())
                .map_err(|err| malformed(format!("group {key}: {err}")))?;
            groups.push(Group {
                id: GroupId(id),
                label: record.name,
                state: record.action,
            });
        }
        Ok(Self::new(groups))
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}
