use crate::constants::{FATAL_CLASS, STATUS_ID};
use web_sys as web;

/// Replace the status line text. A no-op once a fatal message is showing.
#[inline]
pub fn set_status(document: &web::Document, text: &str) {
    if is_fatal(document) {
        return;
    }
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        if el.text_content().as_deref() != Some(text) {
            el.set_text_content(Some(text));
        }
    }
}

/// Show an unrecoverable error (camera denied, model failed to load).
pub fn set_fatal(document: &web::Document, text: &str) {
    log::error!("{}", text);
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        _ = el.class_list().add_1(FATAL_CLASS);
        el.set_text_content(Some(text));
    }
}

#[inline]
pub fn is_fatal(document: &web::Document) -> bool {
    document
        .get_element_by_id(STATUS_ID)
        .map(|el| el.class_list().contains(FATAL_CLASS))
        .unwrap_or(false)
}
