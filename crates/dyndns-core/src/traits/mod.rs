//! Core traits for the updater
//!
//! - [`DnsProvider`]: Notify a dynamic-DNS endpoint for a set of domains

pub mod dns_provider;

pub use dns_provider::{DnsProvider, UpdateOutcome, UpdateResult};
