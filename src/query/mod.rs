//! Query model module
//!
//! Search filters for the annotation search endpoint and their rendering into
//! request query pairs.
//!
//! # Overview
//!
//! A [`SearchParams`] is built once per search session. Only its
//! `search_after` cursor changes while paging, and only on the pagination
//! engine's own copy. [`SearchParams::render`] is pure: the same field values
//! always produce the same [`RenderedQuery`].

mod types;

pub use types::{RenderedQuery, SearchParams, PUBLIC_GROUP};

#[cfg(test)]
mod tests;
