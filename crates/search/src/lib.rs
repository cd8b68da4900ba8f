//! Search-query tokenizing for the symbol search box.

pub mod query;

pub use query::{Term, WILDCARDS, query_to_terms};
