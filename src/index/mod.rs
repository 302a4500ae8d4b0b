//! Search-index boundary.
//!
//! The rest of the crate only sees the logical operations in
//! [`SearchIndex`]; the Elasticsearch-compatible JSON DSL lives entirely in
//! [`HttpSearchIndex`].

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;

pub use client::{HttpSearchIndex, SearchIndex};
pub use error::IndexError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockFailure, MockSearchIndex};
pub use model::{Fuzziness, RawHit};
