// src/templates/components/error.rs

use maud::{html, Markup};

pub const LOAD_ERROR_TEXT: &str = "Error loading data. Check console for details.";

/// Inline message block for the listing area. Never a blocking dialog.
fn inline_error(message: &str) -> Markup {
    html! {
        p class="text-center text-red-500 p-4 col-span-full" role="alert" { (message) }
    }
}

/// Message for a failed load. The detail was logged when the load failed
/// and stays off the page.
pub fn load_error_block() -> Markup {
    inline_error(LOAD_ERROR_TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_is_an_inline_alert() {
        let html = load_error_block().into_string();
        assert!(html.contains(r#"role="alert""#));
        assert!(html.contains(LOAD_ERROR_TEXT));
    }
}
