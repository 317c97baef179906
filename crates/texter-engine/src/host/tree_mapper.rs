use super::{PositionMapper, TreePosition, TreeRange};
use crate::models::Node;

/// Reference [`PositionMapper`] over an owned node tree.
///
/// Borrows the tree for its lifetime; positions are resolved against the
/// tree as it was at construction, so rebuild the mapper after any edit
/// that replaces nodes.
pub struct TreeMapper<'a> {
    nodes: &'a [Node],
}

impl<'a> TreeMapper<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        Self { nodes }
    }

    /// Paths and character lengths of every text node, in document order.
    fn leaves(&self) -> Vec<(Vec<usize>, usize)> {
        let mut out = Vec::new();
        collect_leaves(self.nodes, &mut Vec::new(), &mut out);
        out
    }
}

fn collect_leaves(nodes: &[Node], path: &mut Vec<usize>, out: &mut Vec<(Vec<usize>, usize)>) {
    for (index, node) in nodes.iter().enumerate() {
        path.push(index);
        match node {
            Node::Text(s) => out.push((path.clone(), s.chars().count())),
            Node::Element(el) => collect_leaves(&el.children, path, out),
        }
        path.pop();
    }
}

/// Walks the leaf list until `remaining` characters are consumed. With
/// `prefer_end` set, a boundary offset lands at the end of the leaf before
/// it rather than the start of the leaf after it.
fn locate(
    leaves: &[(Vec<usize>, usize)],
    mut remaining: usize,
    prefer_end: bool,
) -> Option<TreePosition> {
    for (path, len) in leaves {
        if remaining < *len || (remaining == *len && prefer_end) {
            return Some(TreePosition {
                path: path.clone(),
                offset: remaining,
            });
        }
        remaining -= len;
    }
    None
}

impl PositionMapper for TreeMapper<'_> {
    fn offset_of(&self, position: &TreePosition) -> Option<usize> {
        let mut acc = 0;
        let mut nodes = self.nodes;
        for (depth, &index) in position.path.iter().enumerate() {
            for sibling in nodes.get(..index)? {
                acc += sibling.text_len();
            }
            let node = nodes.get(index)?;
            let innermost = depth == position.path.len() - 1;
            match node {
                Node::Text(s) if innermost => {
                    if position.offset > s.chars().count() {
                        return None;
                    }
                    return Some(acc + position.offset);
                }
                Node::Element(el) if !innermost => nodes = &el.children,
                _ => return None,
            }
        }
        None
    }

    fn range_of(&self, start: usize, len: usize) -> Option<TreeRange> {
        let leaves = self.leaves();
        // A collapsed range may sit at the very end of the text, so its
        // start is allowed to land on a leaf end too.
        let start_pos = locate(&leaves, start, len == 0)?;
        let end_pos = locate(&leaves, start + len, true)?;
        Some(TreeRange {
            start: start_pos,
            end: end_pos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::extract;
    use crate::parsing::parse;
    use pretty_assertions::assert_eq;

    fn pos(path: &[usize], offset: usize) -> TreePosition {
        TreePosition {
            path: path.to_vec(),
            offset,
        }
    }

    // Leaves of this tree: "ab" at [0], "cd" at [1,0], "ef" at [1,1,0],
    // "gh" at [2]; flat text "abcdefgh".
    fn tree() -> Vec<Node> {
        parse("ab<strong>cd<em>ef</em></strong>gh").unwrap()
    }

    #[test]
    fn offset_of_walks_document_order() {
        let nodes = tree();
        let mapper = TreeMapper::new(&nodes);
        assert_eq!(mapper.offset_of(&pos(&[0], 0)), Some(0));
        assert_eq!(mapper.offset_of(&pos(&[1, 0], 1)), Some(3));
        assert_eq!(mapper.offset_of(&pos(&[1, 1, 0], 1)), Some(5));
        assert_eq!(mapper.offset_of(&pos(&[2], 2)), Some(8));
    }

    #[test]
    fn offset_of_rejects_bad_positions() {
        let nodes = tree();
        let mapper = TreeMapper::new(&nodes);
        // Not a text node.
        assert_eq!(mapper.offset_of(&pos(&[1], 0)), None);
        // Offset past the node's text.
        assert_eq!(mapper.offset_of(&pos(&[0], 3)), None);
        // Path past the sibling list.
        assert_eq!(mapper.offset_of(&pos(&[7], 0)), None);
        assert_eq!(mapper.offset_of(&pos(&[], 0)), None);
    }

    #[test]
    fn range_of_spans_leaves() {
        let nodes = tree();
        let mapper = TreeMapper::new(&nodes);
        let range = mapper.range_of(3, 4).unwrap();
        assert_eq!(range.start, pos(&[1, 0], 1));
        assert_eq!(range.end, pos(&[2], 1));
    }

    #[test]
    fn boundary_offsets_split_between_leaf_end_and_next_start() {
        let nodes = tree();
        let mapper = TreeMapper::new(&nodes);
        let range = mapper.range_of(2, 2).unwrap();
        assert_eq!(range.start, pos(&[1, 0], 0));
        assert_eq!(range.end, pos(&[1, 0], 2));
    }

    #[test]
    fn collapsed_range_at_text_end_resolves() {
        let nodes = tree();
        let mapper = TreeMapper::new(&nodes);
        let range = mapper.range_of(8, 0).unwrap();
        assert_eq!(range.start, pos(&[2], 2));
        assert_eq!(range.end, pos(&[2], 2));
    }

    #[test]
    fn range_past_the_text_is_none() {
        let nodes = tree();
        let mapper = TreeMapper::new(&nodes);
        assert!(mapper.range_of(6, 5).is_none());
    }

    #[test]
    fn agrees_with_extraction_offsets() {
        let nodes = tree();
        let mapper = TreeMapper::new(&nodes);
        let map = extract(&nodes);
        let strong = &map.tag("strong")[0];
        assert_eq!(mapper.offset_of(&pos(&[1, 0], 0)), Some(strong.start));
        let em = &map.tag("em")[0];
        assert_eq!(mapper.offset_of(&pos(&[1, 1, 0], 0)), Some(em.start));
    }

    #[test]
    fn multibyte_text_counts_chars() {
        let nodes = parse("héllo<strong>世界</strong>").unwrap();
        let mapper = TreeMapper::new(&nodes);
        assert_eq!(mapper.offset_of(&pos(&[1, 0], 2)), Some(7));
        let range = mapper.range_of(5, 2).unwrap();
        assert_eq!(range.start, pos(&[1, 0], 0));
        assert_eq!(range.end, pos(&[1, 0], 2));
    }
}
