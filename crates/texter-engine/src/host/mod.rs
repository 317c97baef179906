//! Collaborator seams for hosts embedding the engine.
//!
//! The engine itself never talks to a UI. A host supplies selection state
//! through [`SelectionPort`] and translates between flat character offsets
//! and its own tree-shaped positions through [`PositionMapper`].
//! [`TreeMapper`] is the reference mapper over an owned node tree.

mod tree_mapper;

pub use tree_mapper::TreeMapper;

use crate::models::SelectionRange;

/// Where the active selection lives.
///
/// [`Document`](crate::editing::Document) implements this over its own field;
/// an embedding host would implement it against its real selection state.
pub trait SelectionPort {
    /// The current selection, if any.
    fn capture(&self) -> Option<SelectionRange>;
    /// Reinstates a selection after the displayed content was replaced.
    fn restore(&mut self, range: SelectionRange);
}

/// A position inside the tree: child indices from the root down to a text
/// node, plus a character offset within that node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreePosition {
    pub path: Vec<usize>,
    pub offset: usize,
}

/// A tree-shaped counterpart of a flat character range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRange {
    pub start: TreePosition,
    pub end: TreePosition,
}

/// Two-way translation between tree positions and flat offsets.
///
/// Implementations must agree with the extractor's traversal: document
/// order, counting text characters only.
pub trait PositionMapper {
    /// Flat offset of a tree position, or `None` if the position does not
    /// name a text node within bounds.
    fn offset_of(&self, position: &TreePosition) -> Option<usize>;

    /// Tree range covering `len` characters from flat offset `start`, or
    /// `None` if the range does not fit the text.
    fn range_of(&self, start: usize, len: usize) -> Option<TreeRange>;
}
