//! Marker-delimited section replacement for the README.
//!
//! The README carries exactly one tool-owned region bounded by literal HTML
//! comment markers. Each run rewrites that region wholesale; everything
//! outside it belongs to the user and is preserved byte-for-byte.
//!
//! ```text
//! # My Profile            ← user content, untouched
//! <!-- STATS:START -->    ← start marker
//! ...generated block...   ← owned by this tool, replaced every run
//! <!-- STATS:END -->      ← end marker
//! More user content.      ← untouched
//! ```
//!
//! ## Placement Rules
//!
//! - Both markers present (start before end): the span from the first start
//!   marker through the first end marker after it is replaced by
//!   `start + body + end`.
//! - Either marker absent: a fresh `start + body + end` block is appended at
//!   the end of the document, separated from prior content by a blank line.
//! - The operation is idempotent: splicing the same body twice produces the
//!   same document as splicing it once.
//!
//! ## Malformed Documents
//!
//! Duplicate markers or an end marker with no start marker after it cannot be
//! spliced unambiguously. Rather than splitting on first occurrences and
//! silently corrupting the document, these are hard errors — the user has to
//! fix the README by hand once.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SpliceError {
    #[error("duplicate start marker {0:?} in document")]
    DuplicateStartMarker(String),
    #[error("duplicate end marker {0:?} in document")]
    DuplicateEndMarker(String),
    #[error("end marker {0:?} appears without a preceding start marker")]
    EndBeforeStart(String),
}

/// Replace the marker-delimited section of `doc` with `body`, or append a new
/// marked block if the document has no section yet.
///
/// `body` is spliced verbatim between the markers; callers that want the
/// markers on their own lines include the newlines in `body`.
pub fn replace_section(
    doc: &str,
    start: &str,
    end: &str,
    body: &str,
) -> Result<String, SpliceError> {
    let block = format!("{start}{body}{end}");

    match locate_section(doc, start, end)? {
        Some((from, to)) => {
            let mut out = String::with_capacity(doc.len() + block.len());
            out.push_str(&doc[..from]);
            out.push_str(&block);
            out.push_str(&doc[to..]);
            Ok(out)
        }
        None => {
            let mut out = String::with_capacity(doc.len() + block.len() + 2);
            out.push_str(doc);
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push('\n');
            out.push_str(&block);
            out.push('\n');
            Ok(out)
        }
    }
}

/// Find the byte span of the existing section: start of the start marker to
/// end of the end marker. `None` means no section exists and the block should
/// be appended.
fn locate_section(doc: &str, start: &str, end: &str) -> Result<Option<(usize, usize)>, SpliceError> {
    let start_at = doc.find(start);
    let end_at = doc.find(end);

    let (start_at, end_at) = match (start_at, end_at) {
        (Some(s), Some(e)) => (s, e),
        // One marker without the other: treat as no section. A lone marker is
        // user text we must not touch.
        _ => return Ok(None),
    };

    if doc[start_at + start.len()..].contains(start) {
        return Err(SpliceError::DuplicateStartMarker(start.to_string()));
    }

    if end_at < start_at {
        // The only end marker sits before the start marker; there is no
        // well-formed pair unless another end marker follows the start.
        if !doc[start_at + start.len()..].contains(end) {
            return Err(SpliceError::EndBeforeStart(end.to_string()));
        }
        return Err(SpliceError::DuplicateEndMarker(end.to_string()));
    }

    // First end marker at-or-after the start marker closes the section.
    let close = doc[start_at + start.len()..]
        .find(end)
        .map(|i| start_at + start.len() + i);
    let close = match close {
        Some(c) => c,
        // Only end marker precedes the start marker.
        None => return Err(SpliceError::EndBeforeStart(end.to_string())),
    };

    if doc[close + end.len()..].contains(end) {
        return Err(SpliceError::DuplicateEndMarker(end.to_string()));
    }

    Ok(Some((start_at, close + end.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: &str = "<!--S-->";
    const E: &str = "<!--E-->";

    #[test]
    fn appends_block_when_no_markers() {
        let out = replace_section("# X\n", S, E, "hello").unwrap();
        assert_eq!(out, "# X\n\n<!--S-->hello<!--E-->\n");
    }

    #[test]
    fn append_adds_newline_when_doc_has_none() {
        let out = replace_section("# X", S, E, "hello").unwrap();
        assert_eq!(out, "# X\n\n<!--S-->hello<!--E-->\n");
    }

    #[test]
    fn append_to_empty_document() {
        let out = replace_section("", S, E, "hello").unwrap();
        assert_eq!(out, "\n<!--S-->hello<!--E-->\n");
    }

    #[test]
    fn replaces_existing_section() {
        let doc = "pre\n<!--S-->old stuff<!--E-->\npost\n";
        let out = replace_section(doc, S, E, "new").unwrap();
        assert_eq!(out, "pre\n<!--S-->new<!--E-->\npost\n");
    }

    #[test]
    fn preserves_prefix_verbatim_on_append() {
        let doc = "line one\nline two\n";
        let out = replace_section(doc, S, E, "body").unwrap();
        assert!(out.starts_with(doc));
    }

    #[test]
    fn idempotent_on_fresh_document() {
        let once = replace_section("# X\n", S, E, "hello").unwrap();
        let twice = replace_section(&once, S, E, "hello").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn idempotent_with_multiline_body() {
        let body = "\n![chart](a.png)\n\n- **Repos:** 4\n";
        let once = replace_section("# Profile\nintro\n", S, E, body).unwrap();
        let twice = replace_section(&once, S, E, body).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn lone_start_marker_is_treated_as_user_text() {
        let doc = "before <!--S--> after\n";
        let out = replace_section(doc, S, E, "x").unwrap();
        assert!(out.starts_with(doc));
        assert!(out.ends_with("<!--S-->x<!--E-->\n"));
    }

    #[test]
    fn duplicate_start_marker_is_error() {
        let doc = "<!--S-->a<!--S-->b<!--E-->";
        assert_eq!(
            replace_section(doc, S, E, "x"),
            Err(SpliceError::DuplicateStartMarker(S.to_string()))
        );
    }

    #[test]
    fn duplicate_end_marker_is_error() {
        let doc = "<!--S-->a<!--E-->b<!--E-->";
        assert_eq!(
            replace_section(doc, S, E, "x"),
            Err(SpliceError::DuplicateEndMarker(E.to_string()))
        );
    }

    #[test]
    fn end_before_start_is_error() {
        let doc = "<!--E-->middle<!--S-->tail";
        assert_eq!(
            replace_section(doc, S, E, "x"),
            Err(SpliceError::EndBeforeStart(E.to_string()))
        );
    }

    #[test]
    fn replacement_keeps_surrounding_text() {
        let doc = "head\n<!--S-->x<!--E-->\ntail with <!--unrelated-->\n";
        let out = replace_section(doc, S, E, "y").unwrap();
        assert_eq!(out, "head\n<!--S-->y<!--E-->\ntail with <!--unrelated-->\n");
    }
}
