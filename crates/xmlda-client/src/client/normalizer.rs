// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Request normalization.
//!
//! Before a request is sent, a missing locale is replaced by the client's
//! default locale and a missing client request handle by a freshly generated
//! one. Operations that carry an `Options` block additionally always request
//! error text, diagnostic info, item names and item timestamps.
//!
//! Normalization mutates the caller's request in place and has no failure
//! mode.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::messages::{
    Browse, GetProperties, GetStatus, Read, RequestOptions, Subscribe, SubscriptionCancel,
    SubscriptionPolledRefresh, Write,
};

// =============================================================================
// RequestHandleGenerator
// =============================================================================

/// Generates client request handles.
///
/// Handles are the decimal rendering of a per-generator counter, so every
/// handle produced by one generator is distinct, across threads included.
#[derive(Debug, Default)]
pub struct RequestHandleGenerator {
    next: AtomicU64,
}

impl RequestHandleGenerator {
    /// Creates a generator whose first handle is `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed),
        }
    }

    /// Returns the next handle.
    pub fn next_handle(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }

    /// Returns the number the next handle will carry.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

// =============================================================================
// RequestNormalizer
// =============================================================================

/// Fills in locale, handle and return flags.
#[derive(Debug)]
pub struct RequestNormalizer {
    default_locale: String,
    handles: RequestHandleGenerator,
}

impl RequestNormalizer {
    /// Creates a normalizer.
    pub fn new(default_locale: impl Into<String>, handle_seed: u64) -> Self {
        Self {
            default_locale: default_locale.into(),
            handles: RequestHandleGenerator::new(handle_seed),
        }
    }

    /// Returns the default locale.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Returns a fresh client request handle.
    pub fn generate_handle(&self) -> String {
        self.handles.next_handle()
    }

    /// Returns `locale` if present and non-empty, else the default locale.
    pub fn normalize_locale(&self, locale: Option<String>) -> String {
        match locale {
            Some(l) if !l.is_empty() => l,
            _ => self.default_locale.clone(),
        }
    }

    /// Returns `handle` if present and non-empty, else a fresh handle.
    pub fn normalize_handle(&self, handle: Option<String>) -> String {
        match handle {
            Some(h) if !h.is_empty() => h,
            _ => self.generate_handle(),
        }
    }

    /// Normalizes an options block, creating one if absent.
    ///
    /// `return_item_path` is left as the caller set it.
    pub fn normalize_options(&self, options: Option<RequestOptions>) -> RequestOptions {
        let mut options = options.unwrap_or_default();
        options.locale_id = Some(self.normalize_locale(options.locale_id.take()));
        options.client_request_handle =
            Some(self.normalize_handle(options.client_request_handle.take()));
        options.return_error_text = true;
        options.return_diagnostic_info = true;
        options.return_item_name = true;
        options.return_item_time = true;
        options
    }

    fn fill_locale(&self, locale: &mut Option<String>) {
        *locale = Some(self.normalize_locale(locale.take()));
    }

    fn fill_handle(&self, handle: &mut Option<String>) {
        *handle = Some(self.normalize_handle(handle.take()));
    }

    fn fill_options(&self, options: &mut Option<RequestOptions>) {
        *options = Some(self.normalize_options(options.take()));
    }
}

// =============================================================================
// Normalize
// =============================================================================

/// A request the normalizer knows how to complete.
pub trait Normalize {
    /// Completes this request in place.
    fn normalize(&mut self, normalizer: &RequestNormalizer);
}

impl Normalize for GetStatus {
    fn normalize(&mut self, normalizer: &RequestNormalizer) {
        normalizer.fill_locale(&mut self.locale_id);
        normalizer.fill_handle(&mut self.client_request_handle);
    }
}

impl Normalize for Browse {
    fn normalize(&mut self, normalizer: &RequestNormalizer) {
        normalizer.fill_locale(&mut self.locale_id);
        normalizer.fill_handle(&mut self.client_request_handle);
    }
}

impl Normalize for GetProperties {
    fn normalize(&mut self, normalizer: &RequestNormalizer) {
        normalizer.fill_locale(&mut self.locale_id);
        normalizer.fill_handle(&mut self.client_request_handle);
    }
}

impl Normalize for Read {
    fn normalize(&mut self, normalizer: &RequestNormalizer) {
        normalizer.fill_options(&mut self.options);
    }
}

impl Normalize for Write {
    fn normalize(&mut self, normalizer: &RequestNormalizer) {
        normalizer.fill_options(&mut self.options);
    }
}

impl Normalize for Subscribe {
    fn normalize(&mut self, normalizer: &RequestNormalizer) {
        normalizer.fill_options(&mut self.options);
    }
}

impl Normalize for SubscriptionPolledRefresh {
    fn normalize(&mut self, normalizer: &RequestNormalizer) {
        normalizer.fill_options(&mut self.options);
    }
}

impl Normalize for SubscriptionCancel {
    // SubscriptionCancel carries no locale.
    fn normalize(&mut self, normalizer: &RequestNormalizer) {
        normalizer.fill_handle(&mut self.client_request_handle);
    }
}
