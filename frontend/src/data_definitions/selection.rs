//! Reduce the live DOM selection to a `SelectionSnapshot`.

use common::highlight::SelectionSnapshot;
use common::study_const::HIGHLIGHT_CSS_CLASS;
use wasm_bindgen::JsCast;
use web_sys::{Element, Node};

/// Snapshot the current selection relative to the element `container_id`.
///
/// Returns `None` when nothing is selected or the selection does not touch
/// the container at all.
pub fn capture_selection(container_id: &str) -> Option<SelectionSnapshot> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let selection = window.get_selection().ok().flatten()?;
    if selection.is_collapsed() || selection.range_count() == 0 {
        return None;
    }
    let range = selection.get_range_at(0).ok()?;
    let container = document.get_element_by_id(container_id)?;
    let container_node: &Node = container.as_ref();

    let start_node = range.start_container().ok()?;
    let end_node = range.end_container().ok()?;
    let starts_inside = container_node.contains(Some(&start_node));
    if !starts_inside && !container_node.contains(Some(&end_node)) {
        return None;
    }

    let preceding_text = if starts_inside {
        let before = document.create_range().ok()?;
        before.set_start(container_node, 0).ok()?;
        before.set_end(&start_node, range.start_offset().ok()?).ok()?;
        Some(String::from(before.to_string()))
    } else {
        None
    };

    let ancestor = range.common_ancestor_container().ok()?;
    let ancestor_element = if ancestor.node_type() == Node::TEXT_NODE {
        ancestor.parent_element()
    } else {
        ancestor.dyn_into::<Element>().ok()
    };
    let inside_highlight = ancestor_element
        .and_then(|e| e.closest(&format!("mark.{HIGHLIGHT_CSS_CLASS}")).ok().flatten())
        .is_some();

    Some(SelectionSnapshot {
        selection_text: String::from(selection.to_string()),
        preceding_text,
        inside_highlight,
    })
}

/// Drop the browser selection once it has been turned into a highlight.
pub fn clear_selection() {
    if let Some(selection) = web_sys::window().and_then(|w| w.get_selection().ok().flatten()) {
        if let Err(e) = selection.remove_all_ranges() {
            dioxus::logger::tracing::debug!("Cannot clear browser selection: {e:?}");
        }
    }
}
