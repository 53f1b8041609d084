//! The stateless navigation protocol.
//!
//! Everything the UI needs between clicks travels inside a button
//! identifier string: the requested action, the subject being browsed,
//! and the pagination state. This module owns that wire format.

pub mod button;
pub mod codec;
pub mod dispatch;
pub mod page;

pub use button::{
    linked_id, parse_linked, parse_primary, primary_id, LinkedInteraction, PrimaryInteraction,
    ENTITY_PREFIXES,
};
pub use codec::{decode_package_name, encode_package_name};
pub use dispatch::{dispatch, Action};
pub use page::PageState;
