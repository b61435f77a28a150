use serde_json::json;
use tracing::info;

use crate::bridge::BridgeGateway;
use crate::error::HueError;
use crate::patch::StatePatch;
use crate::resolver::GroupSelector;

/// Bridge path of the action resource for `selector`.
pub fn action_path(selector: GroupSelector) -> String {
    format!("groups/{}/action", selector.id())
}

/// Send `patch` to the selected group(s) with a single write.
///
/// Failures are returned as-is; nothing is retried and no read-back is made.
pub fn dispatch<G: BridgeGateway + ?Sized>(
    gateway: &G,
    selector: GroupSelector,
    patch: &StatePatch,
) -> Result<(), HueError> {
    let body = json!(patch);
    gateway.put(&action_path(selector), &body)?;
    info!(target_group = %selector, %body, "applied state patch");
    Ok(())
}
