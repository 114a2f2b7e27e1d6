//! dom_utils.rs – thin helper layer for repetitive DOM operations.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlTextAreaElement};

use crate::constants::{CSS_TAB_BUTTON, CSS_TAB_BUTTON_ACTIVE};

/// Mark a tab button as the active one (adds "tab-button active" class).
pub fn set_active(btn: &Element) {
    btn.set_class_name(CSS_TAB_BUTTON_ACTIVE);
}

/// Remove the `active` modifier from a tab button.
pub fn set_inactive(btn: &Element) {
    btn.set_class_name(CSS_TAB_BUTTON);
}

/// Toggle the `disabled` attribute on any form control.
pub fn set_disabled(el: &Element, disabled: bool) -> Result<(), JsValue> {
    if disabled {
        el.set_attribute("disabled", "")
    } else {
        el.remove_attribute("disabled")
    }
}

pub fn textarea(document: &Document, id: &str) -> Option<HtmlTextAreaElement> {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlTextAreaElement>().ok())
}

/// Create `<tag class=...>` with optional text content.
pub fn element_with_text(
    document: &Document,
    tag: &str,
    class: &str,
    text: Option<&str>,
) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    if text.is_some() {
        el.set_text_content(text);
    }
    Ok(el)
}

/// Create an element like [`element_with_text`] and append it to `parent`.
pub fn append_text(
    document: &Document,
    parent: &Element,
    tag: &str,
    class: &str,
    text: Option<&str>,
) -> Result<Element, JsValue> {
    let el = element_with_text(document, tag, class, text)?;
    parent.append_child(&el)?;
    Ok(el)
}
