//! Renders application state into canvas blocks.
//!
//! Every renderer here produces the *next* round of identifiers:
//! navigation buttons embed the state that results from the click
//! (next = page + 1 clamped to the last page, previous = page - 1
//! floored at zero), while their `enabled` flags reflect the current
//! page. Button text is fixed per role; the identifier is the only
//! varying part. Linked-package renderers re-encode the package name
//! into every identifier so the subject survives arbitrarily many
//! clicks.

use std::collections::BTreeMap;

use crate::canvas::blocks::Block;
use crate::nav::{linked_id, primary_id, PageState};
use crate::store::PackageRow;

pub const TEXT_PREVIOUS: &str = "Previous";
pub const TEXT_NEXT: &str = "Next";
pub const TEXT_BACK: &str = "Back to package";
pub const TEXT_BROWSE: &str = "Browse files";
pub const TEXT_METADATA: &str = "View metadata";
pub const TEXT_CREATE: &str = "Create package";
pub const TEXT_RETRY: &str = "Retry";

/// Initial canvas for an entry: the primary package plus one browse
/// button per linked package.
pub fn overview(
    entry_id: &str,
    package_name: &str,
    linked: &[String],
    default_page_size: u64,
) -> Vec<Block> {
    let mut value = format!("## {package_name}\n\nVersioned data package for this entry.");
    if !linked.is_empty() {
        value.push_str("\n\nLinked packages:");
        for name in linked {
            value.push_str(&format!("\n- {name}"));
        }
    }

    let mut actions = vec![
        Block::button(primary_id("browse-files", entry_id, None), TEXT_BROWSE, true),
        Block::button(
            primary_id("view-metadata", entry_id, None),
            TEXT_METADATA,
            true,
        ),
    ];
    for name in linked {
        actions.push(Block::button(
            linked_id("browse", entry_id, name, 0, default_page_size),
            format!("Browse {name}"),
            true,
        ));
    }

    vec![
        Block::markdown("canvas-overview", value),
        Block::section("canvas-actions", actions),
    ]
}

/// File listing for the current page of a package, primary or linked.
///
/// `page` must already carry the true item count and be clamped; rows
/// are the full ordered content list and are sliced here. A zero-item
/// package renders an empty notice and the non-paginated primary
/// actions only, with no pager.
pub fn file_listing(
    entry_id: &str,
    linked_package: Option<&str>,
    page: &PageState,
    rows: &[PackageRow],
) -> Vec<Block> {
    let label = linked_package.unwrap_or("Package files");

    if rows.is_empty() {
        return vec![
            Block::markdown("canvas-content", format!("**{label}** is empty.")),
            primary_actions(entry_id),
        ];
    }

    let start = page.start_index() as usize;
    let end = page.end_index() as usize;
    let mut value = format!(
        "**{label}** — {} files (page {} of {})\n",
        page.total_items(),
        page.page_number() + 1,
        page.total_pages()
    );
    for row in &rows[start.min(rows.len())..end.min(rows.len())] {
        value.push_str(&format!("\n- `{}` ({} bytes)", row.name, row.size));
    }

    vec![
        Block::markdown("canvas-content", value),
        pager(entry_id, linked_package, page),
        primary_actions(entry_id),
    ]
}

/// Metadata key/value view with a back button.
pub fn metadata_view(
    entry_id: &str,
    package_name: &str,
    metadata: &BTreeMap<String, String>,
) -> Vec<Block> {
    let mut value = format!("**{package_name}** metadata\n");
    if metadata.is_empty() {
        value.push_str("\n_No metadata recorded._");
    }
    for (key, val) in metadata {
        value.push_str(&format!("\n- **{key}**: {val}"));
    }

    vec![
        Block::markdown("canvas-content", value),
        Block::section(
            "canvas-actions",
            vec![Block::button(
                primary_id("back-to-package", entry_id, None),
                TEXT_BACK,
                true,
            )],
        ),
    ]
}

/// No package exists for the subject yet: offer creation.
pub fn not_found(entry_id: &str) -> Vec<Block> {
    vec![
        Block::markdown(
            "canvas-content",
            "No data package has been created for this entry yet.",
        ),
        Block::section(
            "canvas-actions",
            vec![Block::button(
                primary_id("create-package", entry_id, None),
                TEXT_CREATE,
                true,
            )],
        ),
    ]
}

/// Acknowledgment after a creation request.
pub fn creation_requested(entry_id: &str) -> Vec<Block> {
    vec![
        Block::markdown(
            "canvas-content",
            "Package creation has been requested. Check back shortly.",
        ),
        Block::section(
            "canvas-actions",
            vec![Block::button(
                primary_id("back-to-package", entry_id, None),
                TEXT_BACK,
                true,
            )],
        ),
    ]
}

/// Content fetch failed transiently: retry with the same requested
/// page, size, and subject so no state is lost.
pub fn transient_error(retry_id: &str) -> Vec<Block> {
    vec![
        Block::markdown(
            "canvas-content",
            "Something went wrong while loading the package. Please retry.",
        ),
        Block::section(
            "canvas-actions",
            vec![Block::button(retry_id, TEXT_RETRY, true)],
        ),
    ]
}

/// Fallthrough for unrecognized or unparseable identifiers. When the
/// entry is known a recovery button points back to the primary
/// context.
pub fn unknown_action(entry_id: Option<&str>) -> Vec<Block> {
    let mut blocks = vec![Block::markdown(
        "canvas-content",
        "That action is no longer available.",
    )];
    if let Some(entry_id) = entry_id {
        blocks.push(Block::section(
            "canvas-actions",
            vec![Block::button(
                primary_id("back-to-package", entry_id, None),
                TEXT_BACK,
                true,
            )],
        ));
    }
    blocks
}

/// The pager row. Identifiers encode the post-click page.
fn pager(entry_id: &str, linked_package: Option<&str>, page: &PageState) -> Block {
    let last = page.total_pages().saturating_sub(1);
    let prev_page = page.page_number().saturating_sub(1);
    let next_page = (page.page_number() + 1).min(last);

    let (prev_id, next_id) = match linked_package {
        Some(package) => (
            linked_id(
                "prev-page",
                entry_id,
                package,
                prev_page,
                page.page_size(),
            ),
            linked_id(
                "next-page",
                entry_id,
                package,
                next_page,
                page.page_size(),
            ),
        ),
        None => (
            primary_id("prev-page", entry_id, Some(&page.at_page(prev_page))),
            primary_id("next-page", entry_id, Some(&page.at_page(next_page))),
        ),
    };

    Block::section(
        "canvas-pager",
        vec![
            Block::button(prev_id, TEXT_PREVIOUS, page.has_previous()),
            Block::button(next_id, TEXT_NEXT, page.has_next()),
        ],
    )
}

/// Non-paginated primary actions, present on every listing.
fn primary_actions(entry_id: &str) -> Block {
    Block::section(
        "canvas-actions",
        vec![
            Block::button(
                primary_id("view-metadata", entry_id, None),
                TEXT_METADATA,
                true,
            ),
            Block::button(primary_id("back-to-package", entry_id, None), TEXT_BACK, true),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::parse_linked;

    fn rows(count: usize) -> Vec<PackageRow> {
        (0..count)
            .map(|i| PackageRow {
                name: format!("file_{i:03}.csv"),
                size: 100 + i as u64,
            })
            .collect()
    }

    fn find_button<'a>(blocks: &'a [Block], text: &str) -> Option<&'a Block> {
        blocks
            .iter()
            .flat_map(|block| block.buttons())
            .find(|button| matches!(button, Block::Button { text: t, .. } if t == text))
    }

    #[test]
    fn test_first_page_pager_state() {
        let page = PageState::new(0, 15, 100).unwrap();
        let blocks = file_listing("etr_123", None, &page, &rows(100));

        let prev = find_button(&blocks, TEXT_PREVIOUS).unwrap();
        let next = find_button(&blocks, TEXT_NEXT).unwrap();
        match (prev, next) {
            (
                Block::Button {
                    enabled: prev_enabled,
                    ..
                },
                Block::Button {
                    id: next_id,
                    enabled: next_enabled,
                    ..
                },
            ) => {
                assert!(!prev_enabled);
                assert!(next_enabled);
                assert!(next_id.ends_with("p1-s15"), "got {next_id}");
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_last_page_next_clamps() {
        let page = PageState::new(6, 15, 100).unwrap();
        let blocks = file_listing("etr_123", None, &page, &rows(100));
        let next = find_button(&blocks, TEXT_NEXT).unwrap();
        match next {
            Block::Button { id, enabled, .. } => {
                assert!(!enabled);
                // the embedded target never exceeds the last valid page
                assert!(id.ends_with("p6-s15"), "got {id}");
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_listing_slices_current_page() {
        let page = PageState::new(1, 15, 40).unwrap();
        let blocks = file_listing("etr_123", None, &page, &rows(40));
        match &blocks[0] {
            Block::Markdown { value, .. } => {
                assert!(value.contains("page 2 of 3"));
                assert!(value.contains("file_015.csv"));
                assert!(!value.contains("file_014.csv"));
                assert!(!value.contains("file_030.csv"));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_empty_package_has_no_pager() {
        let page = PageState::new(0, 15, 0).unwrap();
        let blocks = file_listing("etr_123", None, &page, &[]);
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], Block::Markdown { value, .. } if value.contains("empty")));
        assert!(find_button(&blocks, TEXT_PREVIOUS).is_none());
        assert!(find_button(&blocks, TEXT_NEXT).is_none());
        assert!(find_button(&blocks, TEXT_METADATA).is_some());
    }

    #[test]
    fn test_linked_pager_keeps_subject() {
        let page = PageState::new(1, 15, 60).unwrap();
        let blocks = file_listing("etr_1", Some("lab/exp-001"), &page, &rows(60));
        let next = find_button(&blocks, TEXT_NEXT).unwrap();
        match next {
            Block::Button { id, .. } => {
                let parsed = parse_linked(id).unwrap();
                assert_eq!(parsed.package_name, "lab/exp-001");
                assert_eq!(parsed.page_number, 2);
                assert_eq!(parsed.page_size, 15);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_not_found_offers_creation() {
        let blocks = not_found("etr_123");
        let create = find_button(&blocks, TEXT_CREATE).unwrap();
        match create {
            Block::Button { id, .. } => assert_eq!(id, "create-package-etr_123"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_transient_error_reembeds_request() {
        let retry_id = "browse-linked-etr_1-pkg-lab--exp-p2-s15";
        let blocks = transient_error(retry_id);
        let retry = find_button(&blocks, TEXT_RETRY).unwrap();
        match retry {
            Block::Button { id, .. } => assert_eq!(id, retry_id),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_overview_links() {
        let blocks = overview(
            "etr_1",
            "lab/exp-001",
            &["lab/exp-002".to_string()],
            15,
        );
        let browse_linked = find_button(&blocks, "Browse lab/exp-002").unwrap();
        match browse_linked {
            Block::Button { id, .. } => {
                assert_eq!(id, "browse-linked-etr_1-pkg-lab--exp-002-p0-s15");
            }
            _ => unreachable!(),
        }
    }
}
