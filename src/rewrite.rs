//! Environment-tag substitution over serialized space documents.
//!
//! The serialized blob embeds identifiers suffixed with one of the four
//! environment tags. Retargeting replaces every occurrence of every known
//! tag with the target environment's tag, normalizing mixed-tag documents
//! to a single environment. The patterns are disjoint literals, so the
//! substitution is order-independent, and retargeting a document to the
//! environment it already carries is a no-op.

use crate::models::{Environment, SpaceDocument};
use crate::{Error, Result};

/// The four tag literals rewritten during retargeting.
const TAG_PATTERNS: [&str; 4] = ["_dev", "_tst", "_stg", "_prd"];

/// Replaces every known environment tag in `text` with the target's tag.
#[must_use]
pub fn retarget_text(text: &str, target: Environment) -> String {
    let mut out = text.to_string();
    for pattern in TAG_PATTERNS {
        out = out.replace(pattern, target.tag());
    }
    out
}

/// Retargets a whole space document.
///
/// The substitution runs over the serialized form of the entire document,
/// not just the `serialized_space` field, and the result is re-parsed so the
/// output written to disk is guaranteed to be valid JSON.
///
/// # Errors
///
/// Returns an error if the rewritten text no longer parses as JSON.
pub fn retarget_document(document: &SpaceDocument, target: Environment) -> Result<SpaceDocument> {
    let text = serde_json::to_string(document).map_err(|e| Error::OperationFailed {
        operation: "serialize_space_document".to_string(),
        cause: e.to_string(),
    })?;

    let rewritten = retarget_text(&text, target);

    serde_json::from_str(&rewritten).map_err(|e| Error::OperationFailed {
        operation: "retarget_document".to_string(),
        cause: format!("rewritten document is not valid JSON: {e}"),
    })
}
