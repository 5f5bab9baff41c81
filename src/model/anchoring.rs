//! Selector helpers
//!
//! Clients that create annotations describe where they anchor with a
//! `TextQuoteSelector` (the quote plus a little context on each side) and,
//! when the quote alone is ambiguous, a `TextPositionSelector` (character
//! offsets). Tools that analyse a corpus usually only need the quote.

use super::types::Selector;

/// Exact quote from the first quote selector, or an empty string
pub fn selectors_to_exact(selectors: &[Selector]) -> String {
    selectors
        .iter()
        .find_map(|sel| match sel {
            Selector::TextQuote { exact, .. } => Some(exact.clone()),
            _ => None,
        })
        .unwrap_or_default()
}

/// Offsets from the first position selector
pub fn selectors_to_position(selectors: &[Selector]) -> Option<(u64, u64)> {
    selectors.iter().find_map(|sel| match sel {
        Selector::TextPosition { start, end } => Some((*start, *end)),
        _ => None,
    })
}
