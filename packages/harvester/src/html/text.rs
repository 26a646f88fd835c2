//! Text extraction helpers.

use scraper::ElementRef;

/// Concatenated text of `element` and its descendants, trimmed.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of `element` with line breaks turned into spaces.
pub fn single_line(element: ElementRef<'_>) -> String {
    element_text(element).replace('\n', " ")
}
