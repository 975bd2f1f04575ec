// # dyndns-core
//
// Core library for the IONOS dynamic DNS updater.
//
// ## Architecture Overview
//
// - **DnsProvider**: Trait for notifying a dynamic-DNS endpoint
// - **UpdateScheduler**: Drives the provider on a fixed interval, forever
// - **DyndnsConfig**: Immutable configuration handed in by the daemon
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Scheduling is separate from provider calls
// 2. **Single-shot Providers**: One HTTP call per attempt, no hidden retries
// 3. **Explicit Dependencies**: Configuration and provider are injected, no ambient state
// 4. **Library-First**: All core functionality can be used as a library

pub mod config;
pub mod engine;
pub mod error;
pub mod traits;

// Re-export core types for convenience
pub use config::{DyndnsConfig, EngineConfig, MAX_INTERVAL_SECS, ProviderSettings};
pub use engine::{EngineEvent, RunCounters, UpdateScheduler};
pub use error::{Error, Result};
pub use traits::{DnsProvider, UpdateOutcome, UpdateResult};
