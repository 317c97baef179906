use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::AttrMap;

/// One instance of a tag covering a half-open character range `[start, end)`
/// with a fixed attribute set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattingInterval {
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub attrs: AttrMap,
}

impl FormattingInterval {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            attrs: AttrMap::new(),
        }
    }

    pub fn with_attrs(start: usize, end: usize, attrs: AttrMap) -> Self {
        Self { start, end, attrs }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// True when `pos` falls inside the half-open range.
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }
}

/// Tag name → ordered interval list, the flat counterpart of a markup tree.
///
/// Per tag name the list is expected to be *normalized*: ascending by start,
/// no overlaps (I1), and adjacent intervals only when their attributes differ
/// (I2). [`extract`](crate::editing::extract) and
/// [`apply_tag`](crate::editing::apply_tag) produce normalized lists;
/// [`render`](crate::editing::render) and `apply_tag` reject lists that are
/// not.
///
/// Keys are kept in lexicographic order, which also fixes the renderer's
/// discovery order for deterministic output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattingMap(BTreeMap<String, Vec<FormattingInterval>>);

impl FormattingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intervals recorded for `tag`, empty when the tag is absent.
    pub fn tag(&self, tag: &str) -> &[FormattingInterval] {
        self.0.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replaces the interval list for `tag`; an empty list removes the entry.
    pub fn set_tag(&mut self, tag: &str, intervals: Vec<FormattingInterval>) {
        if intervals.is_empty() {
            self.0.remove(tag);
        } else {
            self.0.insert(tag.to_string(), intervals);
        }
    }

    /// Appends one interval to `tag`'s list, creating the list if needed.
    pub fn push(&mut self, tag: &str, interval: FormattingInterval) {
        self.0.entry(tag.to_string()).or_default().push(interval);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FormattingInterval])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn get_mut(&mut self, tag: &str) -> Option<&mut Vec<FormattingInterval>> {
        self.0.get_mut(tag)
    }
}
