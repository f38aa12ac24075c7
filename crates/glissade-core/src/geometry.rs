//! Element geometry in content coordinates.

use glissade_types::backend::ElementId;

use crate::page::Page;

/// Cumulative distance from the content origin to the top of `element`.
///
/// Sums `offset_top` up the offset-parent chain and stops at the content
/// layer. Unknown handles contribute nothing; a cyclic parent chain is cut
/// after visiting every element once.
pub fn offset_top(page: &Page, element: ElementId) -> f64 {
    let content = page.content();
    let mut distance = 0.0;
    let mut current = Some(element);
    let mut steps = 0;

    while let Some(id) = current {
        if Some(id) == content || steps > page.elements.len() {
            break;
        }
        let Some(el) = page.get(id) else {
            break;
        };
        distance += el.offset_top;
        current = el.offset_parent;
        steps += 1;
    }

    distance
}

/// Border-box height plus vertical margins.
pub fn outer_height(page: &Page, element: ElementId) -> f64 {
    page.get(element)
        .map(|el| el.height + el.margin_top + el.margin_bottom)
        .unwrap_or(0.0)
}

/// Border-box height.
pub fn height(page: &Page, element: ElementId) -> f64 {
    page.get(element).map(|el| el.height).unwrap_or(0.0)
}

/// Resolve a `#id` anchor (or a bare id) to an element.
pub fn resolve_anchor(page: &Page, href: &str) -> Option<ElementId> {
    let id = href.strip_prefix('#').unwrap_or(href);
    if id.is_empty() {
        return None;
    }
    page.element_by_id(id)
}

/// Offset of the element an anchor points at, if it exists.
pub fn anchor_offset(page: &Page, href: &str) -> Option<f64> {
    resolve_anchor(page, href).map(|id| offset_top(page, id))
}
