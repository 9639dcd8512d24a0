use wasm_bindgen::JsCast;
use web_sys::{Document, Element, NodeList, Window};

use crate::error::{MountError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(MountError::NoWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(MountError::NoDocument)
}

pub fn query(document: &Document, selector: &'static str) -> Result<Element> {
    document
        .query_selector(selector)?
        .ok_or(MountError::MissingElement(selector))
}

pub fn query_all(document: &Document, selector: &'static str) -> Result<Vec<Element>> {
    Ok(elements(document.query_selector_all(selector)?))
}

pub fn query_all_in(root: &Element, selector: &'static str) -> Result<Vec<Element>> {
    Ok(elements(root.query_selector_all(selector)?))
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let _ = if on { classes.add_1(class) } else { classes.remove_1(class) };
}

/// Resolved CSS length in pixels; keywords such as `normal` count as zero.
pub fn parse_px(value: &str) -> f64 {
    value
        .trim()
        .trim_end_matches("px")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|px| px.is_finite())
        .unwrap_or(0.0)
}

pub fn computed_px(window: &Window, element: &Element, property: &str) -> f64 {
    window
        .get_computed_style(element)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value(property).ok())
        .map(|value| parse_px(&value))
        .unwrap_or(0.0)
}

pub fn inner_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .unwrap_or(0.0)
}
