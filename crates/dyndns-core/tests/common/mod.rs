//! Test doubles and common utilities for scheduler contract tests
//!
//! This module provides a scripted provider whose behaviour per call can be
//! chosen up front, plus a call log that survives the provider being moved
//! into the scheduler.

#![allow(dead_code)]

use dyndns_core::error::{Error, Result};
use dyndns_core::traits::{DnsProvider, UpdateResult};
use dyndns_core::{DyndnsConfig, EngineEvent};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// One recorded provider call
#[derive(Debug, Clone)]
pub struct Call {
    /// When the call started
    pub started_at: Instant,
    /// Domains passed to the provider
    pub domains: Vec<String>,
}

/// Shared view of the calls a [`ScriptedProvider`] received
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    /// Number of calls so far
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All calls so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Whole seconds between the first call and each call
    pub fn offsets_secs(&self) -> Vec<u64> {
        let calls = self.calls();
        let Some(first) = calls.first().map(|c| c.started_at) else {
            return Vec::new();
        };
        calls
            .iter()
            .map(|c| c.started_at.duration_since(first).as_secs())
            .collect()
    }
}

/// A provider whose result and latency are scripted per call (1-based)
pub struct ScriptedProvider {
    log: CallLog,
    failing_calls: HashSet<usize>,
    slow_calls: HashMap<usize, Duration>,
}

impl ScriptedProvider {
    /// A provider that succeeds instantly on every call
    pub fn new() -> Self {
        Self {
            log: CallLog::default(),
            failing_calls: HashSet::new(),
            slow_calls: HashMap::new(),
        }
    }

    /// Fail the given calls with a 401
    pub fn failing_on(mut self, calls: &[usize]) -> Self {
        self.failing_calls.extend(calls.iter().copied());
        self
    }

    /// Make the given call take `delay` before answering
    pub fn slow_on(mut self, call: usize, delay: Duration) -> Self {
        self.slow_calls.insert(call, delay);
        self
    }

    /// Handle to the call log, valid after the provider is moved away
    pub fn call_log(&self) -> CallLog {
        self.log.clone()
    }
}

#[async_trait::async_trait]
impl DnsProvider for ScriptedProvider {
    async fn update_domains(&self, domains: &[String]) -> Result<UpdateResult> {
        let call_number = {
            let mut calls = self.log.calls.lock().unwrap();
            calls.push(Call {
                started_at: Instant::now(),
                domains: domains.to_vec(),
            });
            calls.len()
        };

        if let Some(delay) = self.slow_calls.get(&call_number) {
            tokio::time::sleep(*delay).await;
        }

        if self.failing_calls.contains(&call_number) {
            return Err(Error::http(401, "authentication failed"));
        }

        Ok(UpdateResult { status: 200 })
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// Helper to create a minimal DyndnsConfig for testing
pub fn minimal_config(update_secs: u64, heartbeat_secs: u64) -> DyndnsConfig {
    DyndnsConfig::new("test-key", vec!["example.com".to_string()])
        .with_update_interval(Duration::from_secs(update_secs))
        .with_heartbeat_interval(Duration::from_secs(heartbeat_secs))
}

/// Receive events until the next heartbeat, returning it with the events seen before it
pub async fn next_heartbeat(rx: &mut mpsc::Receiver<EngineEvent>) -> (u64, Vec<EngineEvent>) {
    let mut seen = Vec::new();
    loop {
        match rx.recv().await.expect("scheduler keeps running") {
            EngineEvent::Heartbeat {
                successful_updates,
                ..
            } => return (successful_updates, seen),
            other => seen.push(other),
        }
    }
}
