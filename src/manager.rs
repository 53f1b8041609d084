//! Per-interaction orchestration.
//!
//! One inbound identifier in, one block list out: dispatch the
//! action, parse the grammar it implies, clamp whatever pagination it
//! carried against the live content, fetch through the collaborators,
//! and render. No state survives between calls except what rides in
//! the identifiers themselves.
//!
//! Failure policy: identifiers the parsers reject degrade to the
//! unknown-action rendering (a stray or legacy button never breaks
//! the canvas); stale page numbers are clamped silently; only
//! collaborator failures become user-visible blocks, and those always
//! carry an actionable button.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::canvas::{builder, Block};
use crate::error::NavError;
use crate::nav::{
    dispatch, linked_id, parse_linked, parse_primary, primary_id, Action, PageState,
};
use crate::store::PackageStore;

/// Orchestrates navigation for a single interaction.
pub struct NavigationManager {
    packages: Arc<dyn PackageStore>,
    default_page_size: u64,
}

impl NavigationManager {
    pub fn new(packages: Arc<dyn PackageStore>, default_page_size: u64) -> Self {
        Self {
            packages,
            default_page_size: default_page_size.max(1),
        }
    }

    /// Renders the initial canvas for an entry.
    pub async fn initial_canvas(&self, entry_id: &str) -> Vec<Block> {
        let package = match self.packages.package_for_entry(entry_id).await {
            Ok(package) => package,
            Err(NavError::NotFound(_)) => return builder::not_found(entry_id),
            Err(e) => {
                warn!(%entry_id, error = %e, "initial canvas fetch failed");
                return builder::transient_error(&primary_id("back-to-package", entry_id, None));
            }
        };

        let linked = match self.packages.linked_packages(entry_id).await {
            Ok(linked) => linked,
            Err(e) => {
                warn!(%entry_id, error = %e, "linked package lookup failed, omitting");
                Vec::new()
            }
        };

        builder::overview(entry_id, &package, &linked, self.default_page_size)
    }

    /// Handles a button click and renders the resulting blocks.
    ///
    /// `entry_hint` is the entry id the webhook envelope carried, used
    /// only for the recovery button when the identifier itself is
    /// unparseable.
    pub async fn handle_interaction(
        &self,
        button_id: &str,
        entry_hint: Option<&str>,
    ) -> Vec<Block> {
        let action = dispatch(button_id);
        match action {
            Action::BrowseFiles | Action::NextPage | Action::PrevPage => {
                self.primary_listing(button_id, entry_hint).await
            }
            Action::ViewMetadata => self.metadata(button_id, entry_hint).await,
            Action::BackToPackage => match parse_primary(button_id) {
                Ok(parsed) => self.initial_canvas(&parsed.entry_id).await,
                Err(e) => self.degrade(button_id, e, entry_hint),
            },
            Action::CreatePackage => match parse_primary(button_id) {
                Ok(parsed) => builder::creation_requested(&parsed.entry_id),
                Err(e) => self.degrade(button_id, e, entry_hint),
            },
            Action::BrowseLinked | Action::NextPageLinked | Action::PrevPageLinked => {
                self.linked_listing(button_id, entry_hint).await
            }
            Action::Unknown => {
                debug!(button_id, "unknown action");
                builder::unknown_action(entry_hint)
            }
        }
    }

    /// Primary-context file listing. The identifier already encodes
    /// the target page (pager buttons embed their post-click state),
    /// so no further arithmetic happens here.
    async fn primary_listing(&self, button_id: &str, entry_hint: Option<&str>) -> Vec<Block> {
        let parsed = match parse_primary(button_id) {
            Ok(parsed) => parsed,
            Err(e) => return self.degrade(button_id, e, entry_hint),
        };
        let entry_id = parsed.entry_id;
        let requested = parsed
            .page
            .unwrap_or_else(|| PageState::first(self.default_page_size));

        let package = match self.packages.package_for_entry(&entry_id).await {
            Ok(package) => package,
            Err(NavError::NotFound(_)) => return builder::not_found(&entry_id),
            Err(e) => {
                warn!(%entry_id, error = %e, "package resolution failed");
                return builder::transient_error(&primary_id(
                    "browse-files",
                    &entry_id,
                    Some(&requested),
                ));
            }
        };

        let rows = match self.packages.fetch_rows(&package).await {
            Ok(rows) => rows,
            Err(NavError::NotFound(_)) => return builder::not_found(&entry_id),
            Err(e) => {
                warn!(%entry_id, %package, error = %e, "row fetch failed");
                return builder::transient_error(&primary_id(
                    "browse-files",
                    &entry_id,
                    Some(&requested),
                ));
            }
        };

        let page = requested.with_total(rows.len() as u64).clamp();
        builder::file_listing(&entry_id, None, &page, &rows)
    }

    /// Linked-context file listing.
    async fn linked_listing(&self, button_id: &str, entry_hint: Option<&str>) -> Vec<Block> {
        let parsed = match parse_linked(button_id) {
            Ok(parsed) => parsed,
            Err(e) => return self.degrade(button_id, e, entry_hint),
        };

        // out-of-range wire numbers land on the first page at the
        // default size, then clamp like everything else
        let requested = PageState::new(parsed.page_number, parsed.page_size, 0)
            .unwrap_or_else(|_| PageState::first(self.default_page_size));

        let rows = match self.packages.fetch_rows(&parsed.package_name).await {
            Ok(rows) => rows,
            Err(NavError::NotFound(_)) => return builder::not_found(&parsed.entry_id),
            Err(e) => {
                warn!(
                    entry_id = %parsed.entry_id,
                    package = %parsed.package_name,
                    error = %e,
                    "linked row fetch failed"
                );
                return builder::transient_error(&linked_id(
                    "browse",
                    &parsed.entry_id,
                    &parsed.package_name,
                    requested.page_number(),
                    requested.page_size(),
                ));
            }
        };

        let page = requested.with_total(rows.len() as u64).clamp();
        builder::file_listing(&parsed.entry_id, Some(&parsed.package_name), &page, &rows)
    }

    /// Primary-package metadata view.
    async fn metadata(&self, button_id: &str, entry_hint: Option<&str>) -> Vec<Block> {
        let parsed = match parse_primary(button_id) {
            Ok(parsed) => parsed,
            Err(e) => return self.degrade(button_id, e, entry_hint),
        };
        let entry_id = parsed.entry_id;

        let package = match self.packages.package_for_entry(&entry_id).await {
            Ok(package) => package,
            Err(NavError::NotFound(_)) => return builder::not_found(&entry_id),
            Err(e) => {
                warn!(%entry_id, error = %e, "package resolution failed");
                return builder::transient_error(&primary_id("view-metadata", &entry_id, None));
            }
        };

        match self.packages.fetch_metadata(&package).await {
            Ok(metadata) => builder::metadata_view(&entry_id, &package, &metadata),
            Err(NavError::NotFound(_)) => builder::not_found(&entry_id),
            Err(e) => {
                warn!(%entry_id, %package, error = %e, "metadata fetch failed");
                builder::transient_error(&primary_id("view-metadata", &entry_id, None))
            }
        }
    }

    /// A structurally bad identifier never errors the request; it
    /// renders the unknown-action fallback.
    fn degrade(&self, button_id: &str, error: NavError, entry_hint: Option<&str>) -> Vec<Block> {
        debug!(button_id, error = %error, "degrading malformed identifier");
        builder::unknown_action(entry_hint)
    }
}
