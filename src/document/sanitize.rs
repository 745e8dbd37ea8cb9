//! Presentation-markup stripping
//!
//! Listing and detail pages wrap their values in `<b>`, `<font>`, `<nobr>` and
//! friends. Each wrapper is replaced by its own children so that the text and
//! link structure left behind is the same no matter how a cell was styled.

use scraper::Html;

/// Inline wrappers removed by [`unwrap_presentation_tags`]
pub const PRESENTATION_TAGS: [&str; 5] = ["b", "i", "u", "nobr", "font"];

/// Replaces every presentation wrapper with its children
///
/// Returns the number of wrappers removed. Running it again on the same tree
/// removes nothing.
pub fn unwrap_presentation_tags(html: &mut Html) -> usize {
    let wrappers: Vec<_> = html
        .tree
        .root()
        .descendants()
        .filter(|node| {
            node.value()
                .as_element()
                .is_some_and(|el| PRESENTATION_TAGS.contains(&el.name()))
        })
        .map(|node| node.id())
        .collect();

    let mut removed = 0;
    for id in wrappers {
        let children: Vec<_> = match html.tree.get(id) {
            Some(node) if node.parent().is_some() => node.children().map(|c| c.id()).collect(),
            _ => continue,
        };

        if let Some(mut wrapper) = html.tree.get_mut(id) {
            for child in children {
                wrapper.insert_id_before(child);
            }
            wrapper.detach();
            removed += 1;
        }
    }

    removed
}
