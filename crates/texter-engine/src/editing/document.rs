use crate::editing::{EditError, apply_tag, extract, render};
use crate::host::SelectionPort;
use crate::models::{AttrMap, FormattingMap, Node, SelectionRange, text_len_of, text_of};
use crate::parsing::{ParseError, parse};

/// An owned markup document plus its active selection.
///
/// `Document` strings the pure operations together: formatting state is read
/// with [`extract`], edited with [`apply_tag`], and written back by rendering
/// and re-parsing, which also normalizes the tree. The render-and-reselect
/// pair is one atomic step from the caller's point of view: the tree and the
/// selection are only swapped in after every fallible stage has succeeded,
/// so an error leaves the document exactly as it was.
///
/// A version counter bumps on every successful mutation so hosts can tell
/// stale views from current ones.
#[derive(Debug, Clone, Default)]
pub struct Document {
    children: Vec<Node>,
    selection: Option<SelectionRange>,
    version: u64,
}

/// What a successful mutation changed, for host bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// The selection as restored after the edit.
    pub new_selection: SelectionRange,
    /// Document version after the edit.
    pub version: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `markup` into a fresh document with no selection.
    pub fn from_markup(markup: &str) -> Result<Self, ParseError> {
        Ok(Self {
            children: parse(markup)?,
            selection: None,
            version: 0,
        })
    }

    /// Wraps an already built tree.
    pub fn from_nodes(children: Vec<Node>) -> Self {
        Self {
            children,
            selection: None,
            version: 0,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    /// The flat text, all element boundaries stripped.
    pub fn text(&self) -> String {
        text_of(&self.children)
    }

    /// Character length of the flat text.
    pub fn text_len(&self) -> usize {
        text_len_of(&self.children)
    }

    /// Reads the current formatting state off the tree.
    pub fn formatting(&self) -> FormattingMap {
        extract(&self.children)
    }

    /// Serializes the document back to markup.
    pub fn markup(&self) -> Result<String, EditError> {
        render(&self.formatting(), &self.text())
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selection(&self) -> Option<SelectionRange> {
        self.selection
    }

    /// Sets the active selection. The range must fit the current text.
    pub fn select(&mut self, range: SelectionRange) -> Result<(), EditError> {
        let len = self.text_len();
        if range.end > len {
            return Err(EditError::SelectionOutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }
        self.selection = Some(range);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Applies (or removes) `tag` over the active selection.
    ///
    /// With no selection this is a no-op and returns `Ok(None)`. Otherwise
    /// the selection is captured, the edit runs over it, and the same range
    /// is restored afterwards; formatting edits never change text length.
    pub fn apply_tag(
        &mut self,
        tag: &str,
        attrs: &AttrMap,
        remove: bool,
    ) -> Result<Option<Patch>, EditError> {
        match self.capture() {
            Some(range) => self.apply_tag_at(tag, range, attrs, remove).map(Some),
            None => Ok(None),
        }
    }

    /// Applies (or removes) `tag` over an explicit range, bypassing the
    /// selection port. The range becomes the active selection on success.
    pub fn apply_tag_at(
        &mut self,
        tag: &str,
        range: SelectionRange,
        attrs: &AttrMap,
        remove: bool,
    ) -> Result<Patch, EditError> {
        let text = self.text();
        let len = text.chars().count();
        if range.end > len {
            return Err(EditError::SelectionOutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }

        let mut map = self.formatting();
        apply_tag(&mut map, tag, range, attrs, remove)?;
        let markup = render(&map, &text)?;
        let children = parse(&markup)?;

        self.children = children;
        self.restore(range);
        self.version += 1;
        Ok(Patch {
            new_selection: range,
            version: self.version,
        })
    }
}

impl SelectionPort for Document {
    fn capture(&self) -> Option<SelectionRange> {
        self.selection
    }

    fn restore(&mut self, range: SelectionRange) {
        self.selection = Some(range);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttrMap, FormattingInterval};
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips_markup_through_the_tree() {
        let doc = Document::from_markup("ab<strong>cd</strong>ef").unwrap();
        assert_eq!(doc.text(), "abcdef");
        assert_eq!(doc.markup().unwrap(), "ab<strong>cd</strong>ef");
    }

    #[test]
    fn apply_tag_without_selection_is_a_noop() {
        let mut doc = Document::from_markup("abcdef").unwrap();
        let patch = doc.apply_tag("strong", &AttrMap::new(), false).unwrap();
        assert_eq!(patch, None);
        assert_eq!(doc.version(), 0);
        assert_eq!(doc.markup().unwrap(), "abcdef");
    }

    #[test]
    fn apply_tag_over_selection_restores_it_and_bumps_version() {
        let mut doc = Document::from_markup("abcdef").unwrap();
        doc.select(SelectionRange::new(1, 4)).unwrap();

        let patch = doc
            .apply_tag("strong", &AttrMap::new(), false)
            .unwrap()
            .unwrap();
        assert_eq!(patch.new_selection, SelectionRange::new(1, 4));
        assert_eq!(patch.version, 1);
        assert_eq!(doc.selection(), Some(SelectionRange::new(1, 4)));
        assert_eq!(doc.markup().unwrap(), "a<strong>bcd</strong>ef");
    }

    #[test]
    fn apply_tag_at_merges_with_existing_formatting() {
        let mut doc = Document::from_markup("<strong>abcde</strong>fgh").unwrap();
        doc.apply_tag_at(
            "strong",
            SelectionRange::new(5, 8),
            &AttrMap::new(),
            false,
        )
        .unwrap();
        assert_eq!(doc.markup().unwrap(), "<strong>abcdefgh</strong>");
        assert_eq!(
            doc.formatting().tag("strong"),
            &[FormattingInterval::new(0, 8)]
        );
    }

    #[test]
    fn remove_strips_the_selected_stretch() {
        let mut doc = Document::from_markup("<em>abcdef</em>").unwrap();
        doc.apply_tag_at("em", SelectionRange::new(2, 4), &AttrMap::new(), true)
            .unwrap();
        assert_eq!(doc.markup().unwrap(), "<em>ab</em>cd<em>ef</em>");
    }

    #[test]
    fn selection_out_of_bounds_is_rejected_and_document_untouched() {
        let mut doc = Document::from_markup("abc").unwrap();
        let err = doc.select(SelectionRange::new(1, 9)).unwrap_err();
        assert!(matches!(
            err,
            EditError::SelectionOutOfBounds { end: 9, len: 3, .. }
        ));

        let err = doc
            .apply_tag_at("strong", SelectionRange::new(0, 4), &AttrMap::new(), false)
            .unwrap_err();
        assert!(matches!(err, EditError::SelectionOutOfBounds { .. }));
        assert_eq!(doc.version(), 0);
        assert_eq!(doc.markup().unwrap(), "abc");
    }

    #[test]
    fn failed_edit_leaves_tree_and_selection_alone() {
        let mut doc = Document::from_markup("abcdef").unwrap();
        doc.select(SelectionRange::new(0, 2)).unwrap();
        let before = doc.markup().unwrap();

        let err = doc
            .apply_tag_at("strong", SelectionRange::new(0, 99), &AttrMap::new(), false)
            .unwrap_err();
        assert!(matches!(err, EditError::SelectionOutOfBounds { .. }));
        assert_eq!(doc.markup().unwrap(), before);
        assert_eq!(doc.selection(), Some(SelectionRange::new(0, 2)));
    }

    #[test]
    fn text_length_is_stable_across_formatting_edits() {
        let mut doc = Document::from_markup("tex<u>t te</u>xt").unwrap();
        let len = doc.text_len();
        doc.apply_tag_at("strong", SelectionRange::new(2, 7), &AttrMap::new(), false)
            .unwrap();
        assert_eq!(doc.text_len(), len);
        assert_eq!(doc.text(), "text text");
    }
}
