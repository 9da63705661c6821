// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Per-action call counters and response times.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::soap::SoapAction;

/// Per-client call statistics.
#[derive(Debug, Default)]
pub struct ClientStats {
    /// Successful calls, indexed by [`SoapAction::index`].
    calls: [AtomicU64; 8],

    /// Failed calls.
    failures: AtomicU64,

    /// Total response time of successful calls in microseconds.
    total_response_time_us: AtomicU64,
}

impl ClientStats {
    /// Creates new statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful call.
    pub fn record_call(&self, action: SoapAction, duration: Duration) {
        self.calls[action.index()].fetch_add(1, Ordering::Relaxed);
        self.total_response_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// Records a failed call.
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the number of successful calls of one operation.
    pub fn calls(&self, action: SoapAction) -> u64 {
        self.calls[action.index()].load(Ordering::Relaxed)
    }

    /// Returns the number of successful calls.
    pub fn total_calls(&self) -> u64 {
        self.calls.iter().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    /// Returns the number of failed calls.
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Returns the success rate.
    pub fn success_rate(&self) -> f64 {
        let ok = self.total_calls();
        let total = ok + self.failures();
        if total == 0 {
            return 1.0;
        }
        ok as f64 / total as f64
    }

    /// Returns the average response time of successful calls.
    pub fn average_response_time(&self) -> Duration {
        let total_calls = self.total_calls();
        if total_calls == 0 {
            return Duration::ZERO;
        }
        let total_us = self.total_response_time_us.load(Ordering::Relaxed);
        Duration::from_micros(total_us / total_calls)
    }

    /// Resets all statistics.
    pub fn reset(&self) {
        for counter in &self.calls {
            counter.store(0, Ordering::Relaxed);
        }
        self.failures.store(0, Ordering::Relaxed);
        self.total_response_time_us.store(0, Ordering::Relaxed);
    }
}
