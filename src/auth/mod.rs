//! Authentication module
//!
//! The Hypothesis API accepts an optional developer token sent as a bearer
//! header. Anonymous requests omit the header entirely and only see public
//! annotations.

mod credentials;

pub use credentials::Credentials;
