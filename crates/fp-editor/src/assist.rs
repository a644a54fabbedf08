//! Boundary with the layout assistant.
//!
//! The assistant itself is a hosted service the browser calls directly.
//! What comes back lands here: critique text becomes an [`Advisory`], and a
//! generated layout becomes at most one `replace_all`. A layout that never
//! arrives and one that arrives unusable read the same to the user, and
//! neither touches the scene.
//!
//! Requests are not cancellable. A [`LayoutTicket`] remembers the editor
//! revision a request was issued at, so a result that arrives after the
//! user kept editing can be recognised as stale.

use crate::editor::SceneEditor;
use fp_core::config::StaleLayoutPolicy;
use fp_core::scene_io::scene_from_layout_json;
use serde::Serialize;

pub const MSG_ALL_GOOD: &str = "All looks good!";
pub const MSG_UNREACHABLE: &str = "Architect AI unreachable.";
pub const MSG_LAYOUT_APPLIED: &str = "Layout synthesized successfully.";
pub const MSG_LAYOUT_FAILED: &str = "Failed to dream up layout.";
pub const MSG_LAYOUT_STALE: &str = "Layout discarded: the plan changed while it was being generated.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryKind {
    Info,
    Success,
    Error,
}

/// Text shown to the user after an assistant round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub text: String,
}

impl Advisory {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: AdvisoryKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: AdvisoryKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: AdvisoryKind::Error,
            text: text.into(),
        }
    }
}

/// Issued when a layout request starts; handed back with its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutTicket {
    revision: u64,
}

impl LayoutTicket {
    pub fn issue(editor: &SceneEditor) -> Self {
        Self {
            revision: editor.revision(),
        }
    }

    /// Rebuild a ticket from a handle the host kept per request.
    pub fn at_revision(revision: u64) -> Self {
        Self { revision }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the scene changed since the request was issued.
    pub fn is_stale(&self, editor: &SceneEditor) -> bool {
        editor.revision() != self.revision
    }
}

/// Turn a critique response into advisory text. Nothing is committed.
pub fn suggestion_advisory(response: Result<Option<String>, String>) -> Advisory {
    match response {
        Ok(Some(text)) if !text.trim().is_empty() => Advisory::info(text),
        Ok(_) => Advisory::info(MSG_ALL_GOOD),
        Err(e) => {
            log::warn!("suggestion request failed: {e}");
            Advisory::info(MSG_UNREACHABLE)
        }
    }
}

/// Apply a generated layout (JSON array of drafts) as one `replace_all`.
///
/// `response` is the raw service result: `Err` for transport failures,
/// `Ok(json)` otherwise. Returns the advisory and whether the scene changed.
pub fn apply_layout(
    editor: &mut SceneEditor,
    ticket: LayoutTicket,
    response: Result<String, String>,
) -> (Advisory, bool) {
    let json = match response {
        Ok(json) => json,
        Err(e) => {
            log::warn!("layout request failed: {e}");
            return (Advisory::info(MSG_LAYOUT_FAILED), false);
        }
    };

    if ticket.is_stale(editor) && editor.config().stale_layouts == StaleLayoutPolicy::Discard {
        log::debug!("discarding stale layout (issued at revision {})", ticket.revision);
        return (Advisory::info(MSG_LAYOUT_STALE), false);
    }

    match scene_from_layout_json(&json, editor.config().default_vertical_extent()) {
        Ok(scene) => {
            editor.replace_all(scene);
            (Advisory::success(MSG_LAYOUT_APPLIED), true)
        }
        Err(e) => {
            log::warn!("generated layout rejected: {e}");
            (Advisory::info(MSG_LAYOUT_FAILED), false)
        }
    }
}
