use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::editing::{EditError, validate_map};
use crate::models::{AttrMap, FormattingMap};

/// A span waiting to be opened or currently open during the sweep.
#[derive(Clone, Copy)]
struct Opener<'a> {
    name: &'a str,
    end: usize,
    attrs: &'a AttrMap,
    /// Discovery order (map tag order, then list order); breaks end ties.
    seq: usize,
}

/// Serializes a formatting map plus literal text into markup with minimal,
/// properly nested tags.
///
/// Every tag list must be normalized; lists of *different* tags may overlap
/// freely — that is the case this sweep exists to resolve. Positions run from
/// `0` to `text` length inclusive. At each position, spans due to close are
/// closed first: the open stack is popped down to the deepest span closing
/// here, and any other spans popped on the way are either finalized (they
/// close here too) or reopened so they continue. Then spans starting here
/// are opened, longest-lived outermost. Finally the literal character is
/// emitted, escaped.
///
/// A leading space in the output is replaced with `&nbsp;` so hosts that
/// collapse leading whitespace still show it.
pub fn render(map: &FormattingMap, text: &str) -> Result<String, EditError> {
    validate_map(map)?;

    let chars: Vec<char> = text.chars().collect();

    // Openers-by-position index. Empty intervals have no visible extent and
    // are skipped.
    let mut openers: BTreeMap<usize, Vec<Opener<'_>>> = BTreeMap::new();
    let mut seq = 0;
    for (tag, list) in map.iter() {
        for interval in list {
            if interval.is_empty() {
                continue;
            }
            openers.entry(interval.start).or_default().push(Opener {
                name: tag,
                end: interval.end,
                attrs: &interval.attrs,
                seq,
            });
            seq += 1;
        }
    }

    let mut out = String::new();
    let mut open_stack: Vec<Opener<'_>> = Vec::new();
    // Tag name → position where its currently open span closes. One entry per
    // name suffices: same-tag spans never overlap in a normalized map.
    let mut pending_close: BTreeMap<&str, usize> = BTreeMap::new();

    for i in 0..=chars.len() {
        // All spans closing at this position are resolved in one pass: pop
        // down to the deepest of them, finalize every same-position closer
        // met on the way, and reopen the survivors once. One pass per
        // closer would reopen a survivor only to re-close it for the next
        // target, leaving empty element pairs in the output.
        if let Some(deepest) = open_stack
            .iter()
            .position(|entry| pending_close.get(entry.name) == Some(&i))
        {
            let mut reopen_buffer: Vec<Opener<'_>> = Vec::new();
            while open_stack.len() > deepest {
                if let Some(entry) = open_stack.pop() {
                    push_close_tag(&mut out, entry.name);
                    if pending_close.get(entry.name) == Some(&i) {
                        pending_close.remove(entry.name);
                    } else {
                        reopen_buffer.push(entry);
                    }
                }
            }
            while let Some(entry) = reopen_buffer.pop() {
                push_open_tag(&mut out, entry.name, entry.attrs);
                open_stack.push(entry);
            }
        }

        if let Some(mut starting) = openers.remove(&i) {
            starting.sort_by_key(|opener| (Reverse(opener.end), opener.seq));
            for opener in starting {
                push_open_tag(&mut out, opener.name, opener.attrs);
                pending_close.insert(opener.name, opener.end);
                open_stack.push(opener);
            }
        }

        if let Some(ch) = chars.get(i) {
            let mut buf = [0u8; 4];
            html_escape::encode_text_to_string(ch.encode_utf8(&mut buf), &mut out);
        }
    }

    Ok(match out.strip_prefix(' ') {
        Some(rest) => format!("&nbsp;{rest}"),
        None => out,
    })
}

fn push_open_tag(out: &mut String, name: &str, attrs: &AttrMap) {
    out.push('<');
    out.push_str(name);
    for (attr, value) in attrs {
        out.push(' ');
        out.push_str(attr);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out.push('>');
}

fn push_close_tag(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
