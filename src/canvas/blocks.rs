//! Canvas block model.
//!
//! The external platform consumes an ordered list of blocks. The
//! schema is fixed: free text (`MARKDOWN`), a single actionable
//! element (`BUTTON`), or a horizontal group of buttons (`SECTION`).
//! A button's `id` is a full navigation identifier; it is the only
//! state the platform hands back when the button is clicked.

use serde::{Deserialize, Serialize};

/// A single UI block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    #[serde(rename = "MARKDOWN")]
    Markdown { id: String, value: String },
    #[serde(rename = "BUTTON")]
    Button {
        id: String,
        text: String,
        enabled: bool,
    },
    #[serde(rename = "SECTION")]
    Section { id: String, children: Vec<Block> },
}

impl Block {
    pub fn markdown(id: impl Into<String>, value: impl Into<String>) -> Self {
        Block::Markdown {
            id: id.into(),
            value: value.into(),
        }
    }

    pub fn button(id: impl Into<String>, text: impl Into<String>, enabled: bool) -> Self {
        Block::Button {
            id: id.into(),
            text: text.into(),
            enabled,
        }
    }

    pub fn section(id: impl Into<String>, children: Vec<Block>) -> Self {
        Block::Section {
            id: id.into(),
            children,
        }
    }

    /// Flattens this block into the buttons it contains.
    pub fn buttons(&self) -> Vec<&Block> {
        match self {
            Block::Button { .. } => vec![self],
            Block::Section { children, .. } => {
                children.iter().flat_map(|child| child.buttons()).collect()
            }
            Block::Markdown { .. } => Vec::new(),
        }
    }
}
