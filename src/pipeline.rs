//! Refresh pipeline: request every catalog command, then drain completions
//! a few per frame into a per-command result store.
//!
//! The pipeline is driven from a single thread (the host's render tick) and
//! never blocks on I/O. A cycle looks like this:
//!
//! 1. [`Pipeline::start_refresh`] issues one request per command.
//! 2. [`Pipeline::poll`] is called every frame; it consumes at most
//!    `max_completions_per_poll` finished requests, flattens their JSON
//!    bodies and stores them under the command name.
//! 3. Once nothing is pending, [`Pipeline::is_loaded`] turns true.
//!
//! Failures (transport errors, unparsable bodies) are logged and the
//! command simply has no data for the cycle. There is no retry and no
//! timeout of its own; a request that never finishes keeps the cycle
//! unloaded.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::catalog::Catalog;
use crate::config;
use crate::error::{Gw2tpError, Result};
use crate::fetch::{Fetcher, ResponseHandle};
use crate::flatten::{flatten, FlatResult};
use crate::rows::{build_rows, Row};

// ---------------------------------------------------------------------------
// PendingRequest
// ---------------------------------------------------------------------------

/// A request issued this cycle that has not been consumed yet.
#[derive(Debug)]
pub struct PendingRequest {
    pub command: String,
    pub endpoint: String,
    handle: ResponseHandle,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

pub struct Pipeline {
    base_url: String,
    catalog: Catalog,
    fetcher: Box<dyn Fetcher>,
    max_completions_per_poll: usize,
    pending: Vec<PendingRequest>,
    store: BTreeMap<String, FlatResult>,
    requested: bool,
    loaded: bool,
}

impl Pipeline {
    pub fn new(base_url: &str, catalog: Catalog, fetcher: Box<dyn Fetcher>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            catalog,
            fetcher,
            max_completions_per_poll: config::DEFAULT_MAX_COMPLETIONS_PER_POLL,
            pending: Vec::new(),
            store: BTreeMap::new(),
            requested: false,
            loaded: false,
        }
    }

    /// Bound the completions consumed by each [`poll`](Self::poll). Clamped to at least 1.
    pub fn with_max_completions_per_poll(mut self, max: usize) -> Self {
        self.max_completions_per_poll = max.max(1);
        self
    }

    // -- Cycle control -------------------------------------------------------

    /// Start a refresh cycle unless one has already been requested.
    ///
    /// Clears previous results and issues one request per catalog command,
    /// in catalog order.
    pub fn start_refresh(&mut self) {
        if self.requested {
            return;
        }

        tracing::info!(commands = self.catalog.len(), "Requesting data from API");
        self.store.clear();
        self.pending.clear();

        for spec in &self.catalog {
            let endpoint = spec.endpoint_path().to_string();
            let url = format!("{}/{}", self.base_url, endpoint);
            tracing::debug!(command = %spec.name, url = %url, "Issuing request");
            let handle = self.fetcher.fetch(&url);
            self.pending.push(PendingRequest {
                command: spec.name.clone(),
                endpoint,
                handle,
            });
        }

        self.requested = true;
        self.loaded = false;
    }

    /// Forget the current cycle so the next [`start_refresh`](Self::start_refresh) begins a new one.
    ///
    /// Outstanding requests are abandoned, not cancelled.
    pub fn reset(&mut self) {
        self.requested = false;
        self.loaded = false;
        self.store.clear();
        self.pending.clear();
    }

    /// Consume up to `max_completions_per_poll` finished requests.
    pub fn poll(&mut self) -> usize {
        self.poll_up_to(self.max_completions_per_poll)
    }

    /// Consume up to `max` finished requests, in pending order.
    ///
    /// Returns how many were consumed, failures included. Afterwards the
    /// pipeline is loaded exactly when nothing is pending.
    pub fn poll_up_to(&mut self, max: usize) -> usize {
        let mut consumed = 0;
        let mut i = 0;

        while i < self.pending.len() && consumed < max {
            let Some(outcome) = self.pending[i].handle.try_take() else {
                i += 1;
                continue;
            };
            let request = self.pending.remove(i);
            consumed += 1;
            self.complete(request, outcome);
        }

        self.loaded = self.pending.is_empty();
        consumed
    }

    fn complete(&mut self, request: PendingRequest, outcome: Result<String>) {
        let parsed = outcome.and_then(|body| {
            serde_json::from_str::<Value>(&body).map_err(Gw2tpError::from)
        });

        match parsed {
            Ok(json) => {
                let flat = flatten(&json, "");
                let command = self
                    .catalog
                    .command_for_endpoint(&request.endpoint)
                    .unwrap_or(&request.command)
                    .to_string();
                tracing::debug!(command = %command, fields = flat.len(), "Stored response");
                self.store.insert(command, flat);
            }
            Err(err) => {
                tracing::error!(
                    endpoint = %request.endpoint,
                    err = ?err,
                    "Failed to load response"
                );
            }
        }
    }

    // -- Accessors -----------------------------------------------------------

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_commands(&self) -> Vec<&str> {
        self.pending.iter().map(|r| r.command.as_str()).collect()
    }

    pub fn result(&self, command: &str) -> Option<&FlatResult> {
        self.store.get(command)
    }

    pub fn results(&self) -> &BTreeMap<String, FlatResult> {
        &self.store
    }

    /// Ordered display rows for a command, or `None` if it has no data yet.
    pub fn rows(&self, command: &str) -> Result<Option<Vec<Row>>> {
        let Some(flat) = self.store.get(command) else {
            return Ok(None);
        };
        let spec = self
            .catalog
            .get(command)
            .ok_or_else(|| Gw2tpError::NotFound(format!("Unknown command: {command}")))?;
        build_rows(spec, flat).map(Some)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn max_completions_per_poll(&self) -> usize {
        self.max_completions_per_poll
    }
}
