//! Button identifier grammars.
//!
//! The external platform gives back nothing but the flat identifier
//! string of the clicked button, so the identifier is the only state
//! that survives between requests. Two grammars carry it:
//!
//! ```text
//! primary:  {action}-{entry_id}[-p{page}-s{size}]
//! linked:   {action}-linked-{entry_id}-pkg-{encoded_package}-p{page}-s{size}
//! ```
//!
//! The grammars are structurally different and parsed by independent
//! functions rather than one generic parser; package tokens may
//! themselves contain `-p`, `-s`, and `--`, and keeping the parsers
//! separate keeps those cases tractable. Both parsers are pure.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{NavError, NavResult};
use crate::nav::codec::decode_package_name;
use crate::nav::codec::encode_package_name;
use crate::nav::page::PageState;

/// Allow-list of entity-id prefixes the parser recognizes as a
/// subject. Fixed: unrecognized prefixes are parse failures, not new
/// kinds.
pub const ENTITY_PREFIXES: &[&str] = &["etr_", "seq_", "plt_", "prtn_"];

/// Marker introducing the linked-context grammar.
const LINKED_MARKER: &str = "-linked-";
/// Marker introducing the encoded package token.
const PACKAGE_MARKER: &str = "-pkg-";

/// Trailing pagination pattern of the primary grammar.
fn trailing_pagination() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"p(\d+)-s(\d+)$").unwrap())
}

/// A parsed primary-grammar interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryInteraction {
    /// Action segments preceding the entry id, rejoined with `-`.
    pub action: String,
    /// The recognized entry id.
    pub entry_id: String,
    /// Pagination carried by the identifier, if any. The item count is
    /// a placeholder zero; refresh it before trusting `has_next`.
    pub page: Option<PageState>,
}

/// A parsed linked-grammar interaction.
///
/// Page and size are raw wire integers: negative pages and zero sizes
/// parse successfully here, and bounds are enforced later by
/// `PageState` construction and clamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedInteraction {
    pub entry_id: String,
    pub package_name: String,
    pub page_number: i64,
    pub page_size: i64,
}

/// Parses a primary-grammar identifier.
///
/// The entry id is located by scanning segments for the first one that
/// starts with an allow-listed entity prefix; everything before it is
/// the action, everything after it the optional pagination remainder.
/// A remainder that does not end in `p{page}-s{size}` yields no
/// pagination rather than an error; buttons without pagination context
/// are valid.
pub fn parse_primary(id: &str) -> NavResult<PrimaryInteraction> {
    let segments: Vec<&str> = id.split('-').collect();
    if segments.len() < 2 {
        return Err(NavError::MalformedIdentifier(id.to_string()));
    }

    let subject_index = segments
        .iter()
        .position(|segment| ENTITY_PREFIXES.iter().any(|p| segment.starts_with(p)))
        .ok_or_else(|| NavError::NoSubjectFound(id.to_string()))?;

    let action = segments[..subject_index].join("-");
    let entry_id = segments[subject_index].to_string();
    let remainder = segments[subject_index + 1..].join("-");

    let page = if remainder.is_empty() {
        None
    } else {
        trailing_pagination()
            .captures(&remainder)
            .and_then(|captures| {
                let page: i64 = captures[1].parse().ok()?;
                let size: i64 = captures[2].parse().ok()?;
                PageState::new(page, size, 0).ok()
            })
    };

    Ok(PrimaryInteraction {
        action,
        entry_id,
        page,
    })
}

/// Parses a linked-grammar identifier.
///
/// The package token is cut by splitting on the **last** `-p`
/// occurrence, not the first, because encoded package names may
/// contain `-p` themselves (e.g. `lab--exp-ph2`).
pub fn parse_linked(id: &str) -> NavResult<LinkedInteraction> {
    if !id.contains(LINKED_MARKER) || !id.contains(PACKAGE_MARKER) {
        return Err(NavError::InvalidLinkedIdentifier(id.to_string()));
    }

    let marker = id
        .find(LINKED_MARKER)
        .ok_or_else(|| NavError::InvalidLinkedIdentifier(id.to_string()))?;
    let remainder = &id[marker + LINKED_MARKER.len()..];

    let (entry_id, after_entry) = remainder
        .split_once(PACKAGE_MARKER)
        .ok_or_else(|| NavError::InvalidLinkedIdentifier(id.to_string()))?;

    let page_marker = after_entry
        .rfind("-p")
        .ok_or_else(|| NavError::MissingPageMarker(id.to_string()))?;
    let package_token = &after_entry[..page_marker];
    let after_page_marker = &after_entry[page_marker + 2..];

    let (page_str, size_str) = after_page_marker
        .split_once("-s")
        .ok_or_else(|| NavError::MissingSizeMarker(id.to_string()))?;

    let page_number: i64 = page_str
        .parse()
        .map_err(|_| NavError::InvalidPageNumber(page_str.to_string()))?;
    let page_size: i64 = size_str
        .parse()
        .map_err(|_| NavError::InvalidSizeNumber(size_str.to_string()))?;

    Ok(LinkedInteraction {
        entry_id: entry_id.to_string(),
        package_name: decode_package_name(package_token),
        page_number,
        page_size,
    })
}

/// Builds a primary-grammar identifier.
pub fn primary_id(action: &str, entry_id: &str, page: Option<&PageState>) -> String {
    match page {
        Some(state) => format!("{action}-{entry_id}-{}", state.to_suffix()),
        None => format!("{action}-{entry_id}"),
    }
}

/// Builds a linked-grammar identifier, re-encoding the package name so
/// the subject is never lost across clicks.
pub fn linked_id(
    action: &str,
    entry_id: &str,
    package_name: &str,
    page_number: u64,
    page_size: u64,
) -> String {
    format!(
        "{action}-linked-{entry_id}-pkg-{}-p{page_number}-s{page_size}",
        encode_package_name(package_name)
    )
}
