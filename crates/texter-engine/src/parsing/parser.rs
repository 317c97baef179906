use std::borrow::Cow;

use super::{ParseError, cursor::Cursor};
use crate::models::{Element, Node};

/// Parses a markup string into a node tree.
///
/// Tag names are folded to lowercase; attribute values are kept verbatim.
/// Character entities in text runs are decoded, so the trees produced here
/// round-trip with [`render`](crate::editing::render), which escapes on the
/// way out. A leading `&nbsp;` is read back as a plain space, undoing the
/// renderer's leading-whitespace workaround.
///
/// Input must be balanced: every element closed, every closer matching the
/// innermost open element. Anything else is an error, never a guess.
pub fn parse(markup: &str) -> Result<Vec<Node>, ParseError> {
    let doc: Cow<'_, str> = match markup.strip_prefix("&nbsp;") {
        Some(rest) => Cow::Owned(format!(" {rest}")),
        None => Cow::Borrowed(markup),
    };
    let mut cur = Cursor::new(&doc);
    parse_nodes(&mut cur, None)
}

/// Parses a run of sibling nodes until EOF (top level) or until the closing
/// tag of `enclosing` (inside an element).
fn parse_nodes(cur: &mut Cursor<'_>, enclosing: Option<&str>) -> Result<Vec<Node>, ParseError> {
    let mut out = Vec::new();
    let mut text_start = cur.i;

    loop {
        if cur.eof() {
            if let Some(name) = enclosing {
                return Err(ParseError::UnclosedElement { name: name.into() });
            }
            flush_text(&mut out, cur.slice_from(text_start));
            return Ok(out);
        }
        if cur.peek() == Some(b'<') {
            flush_text(&mut out, cur.slice_from(text_start));

            if cur.starts_with(b"</") {
                let found = parse_closing_tag(cur)?;
                return match enclosing {
                    Some(open) if open == found => Ok(out),
                    Some(open) => Err(ParseError::MismatchedClosingTag {
                        expected: open.into(),
                        found,
                    }),
                    None => Err(ParseError::StrayClosingTag { name: found }),
                };
            }

            let element = parse_open_tag(cur)?;
            let children = parse_nodes(cur, Some(&element.name))?;
            out.push(Node::Element(Element { children, ..element }));
            text_start = cur.i;
        } else {
            cur.bump();
        }
    }
}

/// Appends a text node for `raw`, decoding entities. Empty runs are dropped.
fn flush_text(out: &mut Vec<Node>, raw: &str) {
    if !raw.is_empty() {
        out.push(Node::text(html_escape::decode_html_entities(raw)));
    }
}

/// Parses `<name attr="value" ...>` with the cursor on the `<`.
fn parse_open_tag(cur: &mut Cursor<'_>) -> Result<Element, ParseError> {
    let at = cur.i;
    cur.bump();

    let name = cur.take_while(|b| b.is_ascii_alphanumeric());
    if name.is_empty() {
        return Err(ParseError::MalformedTag { at });
    }
    let mut element = Element::new(name);

    loop {
        cur.take_while(|b| b == b' ');
        match cur.peek() {
            None => return Err(ParseError::UnexpectedEof),
            Some(b'>') => {
                cur.bump();
                return Ok(element);
            }
            Some(_) => {
                let attr = cur.take_while(|b| b.is_ascii_alphanumeric() || b == b'-');
                if attr.is_empty() || !cur.starts_with(b"=\"") {
                    return Err(ParseError::MalformedTag { at });
                }
                cur.bump_n(2);
                let value = cur.take_while(|b| b != b'"');
                if cur.bump() != Some(b'"') {
                    return Err(ParseError::UnexpectedEof);
                }
                element.attrs.insert(attr.to_string(), value.to_string());
            }
        }
    }
}

/// Parses `</name>` with the cursor on the `<`, returning the lowercased name.
fn parse_closing_tag(cur: &mut Cursor<'_>) -> Result<String, ParseError> {
    let at = cur.i;
    cur.bump_n(2);

    let name = cur.take_while(|b| b.is_ascii_alphanumeric());
    if name.is_empty() || cur.bump() != Some(b'>') {
        return Err(ParseError::MalformedTag { at });
    }
    Ok(name.to_ascii_lowercase())
}
