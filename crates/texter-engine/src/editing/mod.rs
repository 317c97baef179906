//! # Formatting span algebra
//!
//! The core of the engine: three operations over [`FormattingMap`] values plus
//! a [`Document`] that strings them together.
//!
//! - **`extract`**: walk an owned markup tree and read off a normalized
//!   interval list per tag name.
//! - **`render`**: turn a formatting map plus literal text back into a markup
//!   string with minimal, properly nested tags, resolving cross-tag overlap
//!   with a close/reopen sweep.
//! - **`apply_tag`**: rewrite one tag's interval list for a selected range,
//!   splitting and merging so the list stays normalized. The selection always
//!   wins over existing formatting.
//!
//! All three are pure functions over their inputs; the only state lives in
//! [`Document`], which owns a tree and a selection and treats
//! render-plus-reselect as one step.
//!
//! ## Normalization invariants
//!
//! Per tag name: intervals ascend by start and never overlap, and two
//! intervals may touch only when their attribute sets differ (equal-attrs
//! neighbours must already be merged). `render` and `apply_tag` check these
//! up front and fail fast instead of emitting invalid markup.

pub mod apply;
pub mod document;
pub mod extract;
pub mod render;

pub use apply::apply_tag;
pub use document::{Document, Patch};
pub use extract::extract;
pub use render::render;

use crate::models::{FormattingInterval, FormattingMap};

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("interval {index} for <{tag}> ends before it starts")]
    InvertedInterval { tag: String, index: usize },
    #[error("overlapping intervals for <{tag}> at index {index}")]
    OverlappingIntervals { tag: String, index: usize },
    #[error("touching intervals for <{tag}> at index {index} carry identical attributes")]
    UnmergedNeighbours { tag: String, index: usize },
    #[error("selection {start}..{end} exceeds the text length {len}")]
    SelectionOutOfBounds { start: usize, end: usize, len: usize },
    #[error("re-parsing rendered markup failed: {0}")]
    Reparse(#[from] crate::parsing::ParseError),
}

/// Checks the normalization invariants for one tag's interval list.
pub(crate) fn validate_tag(tag: &str, intervals: &[FormattingInterval]) -> Result<(), EditError> {
    let mut prev: Option<&FormattingInterval> = None;
    for (index, interval) in intervals.iter().enumerate() {
        if interval.end < interval.start {
            return Err(EditError::InvertedInterval {
                tag: tag.to_string(),
                index,
            });
        }
        if let Some(prev) = prev {
            if interval.start < prev.end {
                return Err(EditError::OverlappingIntervals {
                    tag: tag.to_string(),
                    index,
                });
            }
            if interval.start == prev.end && interval.attrs == prev.attrs {
                return Err(EditError::UnmergedNeighbours {
                    tag: tag.to_string(),
                    index,
                });
            }
        }
        prev = Some(interval);
    }
    Ok(())
}

/// Checks every tag list in `map`; used by `render` before serializing.
pub(crate) fn validate_map(map: &FormattingMap) -> Result<(), EditError> {
    for (tag, intervals) in map.iter() {
        validate_tag(tag, intervals)?;
    }
    Ok(())
}
