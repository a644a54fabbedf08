//! Lint diagnostics for floor-plan scenes.
//!
//! Reports structural issues without modifying the scene. Error-severity
//! findings make a scene unacceptable at the import boundary; the rest are
//! advisory.

use crate::id::ElementId;
use crate::model::{Color, Element};
use serde::Serialize;
use std::collections::HashSet;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    /// Informational — the scene is usable as-is.
    Info,
    /// Probably a mistake, but the editor can cope.
    Warning,
    /// Breaks an editor invariant; import must reject the scene.
    Error,
}

/// A single lint diagnostic for an element.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintDiagnostic {
    /// The element this diagnostic refers to.
    pub element_id: ElementId,
    /// Index of the element in the scene.
    pub index: usize,
    /// Human-readable message.
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "duplicate-id", "non-positive-size").
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run all lint rules over the scene and return diagnostics in scene order.
#[must_use]
pub fn lint_scene(elements: &[Element]) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    let mut seen = HashSet::new();
    for (index, el) in elements.iter().enumerate() {
        if !seen.insert(el.id) {
            diags.push(diag(
                el,
                index,
                LintSeverity::Error,
                "duplicate-id",
                format!("Element id `{}` is used more than once.", el.id),
            ));
        }
        lint_numbers(el, index, &mut diags);
        lint_color(el, index, &mut diags);
    }
    diags
}

/// First error-severity diagnostic, formatted for the caller.
///
/// # Errors
/// Returns the message of the first error found.
pub fn check_scene(elements: &[Element]) -> Result<(), String> {
    match lint_scene(elements)
        .into_iter()
        .find(|d| d.severity == LintSeverity::Error)
    {
        Some(d) => Err(format!("element {} ({}): {}", d.index, d.rule, d.message)),
        None => Ok(()),
    }
}

// ─── Rules ────────────────────────────────────────────────────────────────

fn lint_numbers(el: &Element, index: usize, diags: &mut Vec<LintDiagnostic>) {
    let finite = [el.x, el.y, el.width, el.height, el.rotation]
        .iter()
        .chain(el.vertical_extent.iter())
        .all(|v| v.is_finite());
    if !finite {
        diags.push(diag(
            el,
            index,
            LintSeverity::Error,
            "non-finite",
            format!("Element `{}` has a NaN or infinite coordinate.", el.id),
        ));
        return;
    }

    if el.width <= 0.0 || el.height <= 0.0 {
        diags.push(diag(
            el,
            index,
            LintSeverity::Error,
            "non-positive-size",
            format!(
                "Element `{}` has size {}×{}; both sides must be positive.",
                el.id, el.width, el.height
            ),
        ));
    }

    if !(0.0..360.0).contains(&el.rotation) {
        diags.push(diag(
            el,
            index,
            LintSeverity::Info,
            "rotation-range",
            format!(
                "Rotation {}° on `{}` is outside [0, 360); it will be read modulo 360.",
                el.rotation, el.id
            ),
        ));
    }
}

fn lint_color(el: &Element, index: usize, diags: &mut Vec<LintDiagnostic>) {
    if let Some(hex) = &el.color
        && Color::from_hex(hex).is_none()
    {
        diags.push(diag(
            el,
            index,
            LintSeverity::Warning,
            "invalid-color",
            format!(
                "Color `{hex}` on `{}` is not a hex color; the {} default is used instead.",
                el.id,
                el.material.display_name()
            ),
        ));
    }
}

fn diag(
    el: &Element,
    index: usize,
    severity: LintSeverity,
    rule: &'static str,
    message: String,
) -> LintDiagnostic {
    LintDiagnostic {
        element_id: el.id,
        index,
        message,
        severity,
        rule,
    }
}
