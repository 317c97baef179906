use crate::editing::{EditError, validate_tag};
use crate::models::{AttrMap, FormattingInterval, FormattingMap, SelectionRange};

/// Applies (or removes, when `remove` is set) a tag with the given attributes
/// over a character range, rewriting that tag's interval list in place. Other
/// tags are untouched.
///
/// The rewrite is a single left-to-right sweep over character positions. At
/// each position the attributes the tag *should* carry there are computed:
/// inside the selection the request wins outright (the caller's attributes,
/// or nothing when removing); outside it, whatever existing occurrence covers
/// the position keeps its own. An output interval is closed and a new one
/// opened exactly where that answer changes, so the result is normalized by
/// construction: splits at attribute boundaries, seamless merges with
/// touching equal-attribute neighbours, and tails of partially covered
/// occurrences all fall out of the same rule.
///
/// An empty range is a no-op. The existing list for the tag must already be
/// normalized or the call fails without modifying the map.
pub fn apply_tag(
    map: &mut FormattingMap,
    tag: &str,
    range: SelectionRange,
    attrs: &AttrMap,
    remove: bool,
) -> Result<(), EditError> {
    let tag = tag.to_ascii_lowercase();
    validate_tag(&tag, map.tag(&tag))?;

    if range.is_empty() {
        return Ok(());
    }

    let existing = map.tag(&tag).to_vec();
    if existing.is_empty() {
        if !remove {
            map.set_tag(
                &tag,
                vec![FormattingInterval::with_attrs(
                    range.start,
                    range.end,
                    attrs.clone(),
                )],
            );
        }
        return Ok(());
    }

    let mut out: Vec<FormattingInterval> = Vec::new();
    let mut remaining = existing.iter();
    let mut occ = remaining.next();
    // Start position and attributes of the output interval being built.
    let mut open: Option<(usize, &AttrMap)> = None;

    let mut i = 0;
    while occ.is_some() || i <= range.end {
        while let Some(current) = occ
            && current.end <= i
        {
            occ = remaining.next();
        }

        let desired: Option<&AttrMap> = if range.contains(i) {
            if remove { None } else { Some(attrs) }
        } else if let Some(current) = occ
            && current.contains(i)
        {
            Some(&current.attrs)
        } else {
            None
        };

        if let Some((opened_at, open_attrs)) = open
            && Some(open_attrs) != desired
        {
            out.push(FormattingInterval::with_attrs(
                opened_at,
                i,
                open_attrs.clone(),
            ));
            open = None;
        }
        if open.is_none()
            && let Some(wanted) = desired
        {
            open = Some((i, wanted));
        }

        i += 1;
    }

    map.set_tag(&tag, out);
    Ok(())
}
