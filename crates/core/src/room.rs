//! Handoff to the external video room.
//!
//! The room name depends only on (batch, subject), so every participant of
//! a class lands in the same room no matter who joins first. Role-specific
//! toolbar restrictions travel as URL fragment parameters; they shape the
//! UI and are not an access-control mechanism.

use serde::{Deserialize, Serialize};

use crate::models::attendance::ParticipantRole;

const ROOM_PREFIX: &str = "classgate";

const STUDENT_TOOLBAR: &[&str] = &[
    "microphone",
    "camera",
    "chat",
    "raisehand",
    "tileview",
    "fullscreen",
    "hangup",
];

/// Lowercase ASCII slug: alphanumerics kept, every other run collapsed to a
/// single `-`.
pub fn slug(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_dash = false;
    for c in value.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

pub fn room_name(batch: &str, subject: &str) -> String {
    format!("{}-{}-{}", ROOM_PREFIX, slug(batch), slug(subject))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomHandoff {
    pub room_name: String,
    pub url: String,
    pub role: ParticipantRole,
}

impl RoomHandoff {
    pub fn new(
        base_url: &str,
        batch: &str,
        subject: &str,
        role: ParticipantRole,
        display_name: &str,
    ) -> Self {
        let room_name = room_name(batch, subject);
        let url = format!(
            "{}/{}#{}",
            base_url.trim_end_matches('/'),
            room_name,
            fragment_params(role, display_name)
                .iter()
                .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&")
        );
        Self {
            room_name,
            url,
            role,
        }
    }
}

fn fragment_params(role: ParticipantRole, display_name: &str) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("userInfo.displayName", format!("\"{}\"", display_name.replace('"', "'"))),
        ("config.prejoinPageEnabled", "false".to_string()),
    ];
    if role == ParticipantRole::Student {
        let toolbar = STUDENT_TOOLBAR
            .iter()
            .map(|b| format!("\"{b}\""))
            .collect::<Vec<_>>()
            .join(",");
        params.push(("config.toolbarButtons", format!("[{toolbar}]")));
        params.push(("config.disableInviteFunctions", "true".to_string()));
        params.push(("config.remoteVideoMenu.disableKick", "true".to_string()));
        params.push(("config.remoteVideoMenu.disableGrantModerator", "true".to_string()));
        params.push(("config.disableRemoteMute", "true".to_string()));
    }
    params
}
