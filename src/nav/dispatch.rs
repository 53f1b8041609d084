//! Mapping from inbound button identifiers to actions.
//!
//! The table is an explicit ordered slice rather than a map so that
//! precedence between overlapping prefixes is visible and testable:
//! `next-page-linked` must be tried before `next-page`, or the short
//! prefix would swallow every linked pager click.

/// The fixed set of actions a button can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    BrowseFiles,
    ViewMetadata,
    BackToPackage,
    NextPage,
    PrevPage,
    CreatePackage,
    BrowseLinked,
    NextPageLinked,
    PrevPageLinked,
    /// Fallthrough for identifiers matching no known prefix. Stray or
    /// legacy identifiers land here instead of failing the request.
    Unknown,
}

impl Action {
    /// True for actions carried by the linked-context grammar.
    pub fn is_linked(&self) -> bool {
        matches!(
            self,
            Action::BrowseLinked | Action::NextPageLinked | Action::PrevPageLinked
        )
    }
}

/// Ordered dispatch table. Longer, more specific prefixes come first.
const DISPATCH_TABLE: &[(&str, Action)] = &[
    ("next-page-linked", Action::NextPageLinked),
    ("prev-page-linked", Action::PrevPageLinked),
    ("browse-linked", Action::BrowseLinked),
    ("next-page", Action::NextPage),
    ("prev-page", Action::PrevPage),
    ("browse-files", Action::BrowseFiles),
    ("view-metadata", Action::ViewMetadata),
    ("back-to-package", Action::BackToPackage),
    ("create-package", Action::CreatePackage),
];

/// Resolves the action requested by a button identifier.
///
/// Prefix match in table order; unmatched identifiers resolve to
/// [`Action::Unknown`], never an error.
pub fn dispatch(button_id: &str) -> Action {
    DISPATCH_TABLE
        .iter()
        .find(|(prefix, _)| button_id.starts_with(prefix))
        .map(|(_, action)| *action)
        .unwrap_or(Action::Unknown)
}
