//! Salary explorer core: load a job-listings table, check its required
//! columns, and derive grouped means, salary-range filters, summaries and
//! attribute-match recommendations from it.
//!
//! Every operation in [`data`] is a pure function of an immutable
//! [`data::Dataset`]; nothing is cached between calls.

pub mod config;
pub mod data;
