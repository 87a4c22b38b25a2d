//! Page chrome unrelated to the lookup workflow: the scroll-to-top button.

/// Whether the scroll-to-top button should show.
///
/// Browsers disagree on which element reports the scroll offset, so both
/// the body's and the document element's are checked.
pub fn scroll_button_visible(body_scroll_top: f64, document_scroll_top: f64, threshold: f64) -> bool {
    body_scroll_top > threshold || document_scroll_top > threshold
}
