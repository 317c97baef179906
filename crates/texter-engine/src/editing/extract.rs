use crate::models::{Element, FormattingInterval, FormattingMap, Node};

/// Reads the formatting spans out of a markup tree.
///
/// Depth-first walk in document order with a running character cursor. Every
/// element contributes an interval `[cursor at entry, cursor after subtree)`
/// under its tag name, except that an element continuing a touching interval
/// with identical attributes extends that interval instead of opening a new
/// one, and an element nested inside a same-name same-attrs ancestor folds
/// into the ancestor's interval. Same-tag same-attrs runs therefore come out
/// merged; cross-tag relationships mirror the source tree's nesting.
pub fn extract(nodes: &[Node]) -> FormattingMap {
    let mut map = FormattingMap::new();
    let mut cursor = 0usize;
    let mut open = Vec::new();
    walk(nodes, &mut cursor, &mut map, &mut open);
    map
}

/// Stack of intervals whose end is still pending: (tag name, index in list).
type OpenStack = Vec<(String, usize)>;

fn walk(nodes: &[Node], cursor: &mut usize, map: &mut FormattingMap, open: &mut OpenStack) {
    for node in nodes {
        match node {
            Node::Text(s) => *cursor += s.chars().count(),
            Node::Element(el) => {
                match claim_interval(map, open, el, *cursor) {
                    Some(index) => {
                        open.push((el.name.clone(), index));
                        walk(&el.children, cursor, map, open);
                        open.pop();
                        if let Some(list) = map.get_mut(&el.name)
                            && let Some(interval) = list.get_mut(index)
                        {
                            interval.end = *cursor;
                        }
                    }
                    // Folded into an open ancestor; the ancestor closes it out.
                    None => walk(&el.children, cursor, map, open),
                }
            }
        }
    }
}

/// Decides which interval `el` belongs to: an open same-name same-attrs
/// ancestor (fold, `None`), the touching previous interval with identical
/// attributes (continuation), or a fresh one appended at `cursor`.
fn claim_interval(
    map: &mut FormattingMap,
    open: &OpenStack,
    el: &Element,
    cursor: usize,
) -> Option<usize> {
    if open
        .iter()
        .any(|(name, index)| *name == el.name && map.tag(name)[*index].attrs == el.attrs)
    {
        return None;
    }

    let list = map.tag(&el.name);
    if let Some(prev) = list.last()
        && prev.end >= cursor
        && prev.attrs == el.attrs
    {
        return Some(list.len() - 1);
    }

    map.push(
        &el.name,
        FormattingInterval::with_attrs(cursor, cursor, el.attrs.clone()),
    );
    Some(map.tag(&el.name).len() - 1)
}
