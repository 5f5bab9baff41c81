//! Response model module
//!
//! Typed views of what the Hypothesis API returns: annotation records with
//! their anchoring targets, search pages, and the account profile.
//!
//! Decoding is strict about shape (`total` and `rows` must be present) and
//! lenient about content: absent or `null` record fields decode to empty
//! values so that only a missing `id` is treated as a malformed record.

mod anchoring;
mod profile;
mod types;

pub use anchoring::{selectors_to_exact, selectors_to_position};
pub use profile::{Group, Profile};
pub use types::{Document, Page, Record, SearchResult, Selector, Target, UserInfo};

#[cfg(test)]
mod tests;
