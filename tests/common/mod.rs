//! Shared test fixtures for the GW2TP addon integration tests.
//!
//! Provides `MockFetcher`, a transport whose requests complete only when the
//! test says so, and `RecordingUi`, a `Ui` that records what was drawn.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::channel::oneshot;
use gw2tp_addon::{Catalog, CommandSpec, Fetcher, Gw2tpError, ResponseHandle, TableRow, Ui};

pub const BASE_URL: &str = "http://backend.test/api";

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MockState {
    requested: Vec<String>,
    senders: HashMap<String, oneshot::Sender<gw2tp_addon::Result<String>>>,
}

/// Fetcher backed by oneshot channels.
///
/// Clones share state, so a test can keep one clone while the pipeline owns
/// the other.
#[derive(Clone, Default)]
pub struct MockFetcher {
    state: Rc<RefCell<MockState>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxed(&self) -> Box<dyn Fetcher> {
        Box::new(self.clone())
    }

    /// Every URL requested so far, in order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.state.borrow().requested.clone()
    }

    /// Complete the outstanding request for `endpoint` with `body`.
    ///
    /// Returns `false` if no such request is outstanding or its handle was
    /// already dropped.
    pub fn complete(&self, endpoint: &str, body: &str) -> bool {
        self.resolve(endpoint, Ok(body.to_string()))
    }

    /// Fail the outstanding request for `endpoint` with a transport error.
    pub fn fail(&self, endpoint: &str) -> bool {
        self.resolve(
            endpoint,
            Err(Gw2tpError::Transport("connection reset".into())),
        )
    }

    fn resolve(&self, endpoint: &str, outcome: gw2tp_addon::Result<String>) -> bool {
        let url = format!("{BASE_URL}/{endpoint}");
        let sender = self.state.borrow_mut().senders.remove(&url);
        match sender {
            Some(tx) => tx.send(outcome).is_ok(),
            None => false,
        }
    }
}

impl Fetcher for MockFetcher {
    fn fetch(&self, url: &str) -> ResponseHandle {
        let (tx, rx) = oneshot::channel();
        let mut state = self.state.borrow_mut();
        state.requested.push(url.to_string());
        state.senders.insert(url.to_string(), tx);
        ResponseHandle::new(async move {
            rx.await
                .map_err(|_| Gw2tpError::Transport("request abandoned".into()))?
        })
    }
}

// ---------------------------------------------------------------------------
// Catalog helpers
// ---------------------------------------------------------------------------

/// A catalog with one price-triple command per name and no declared ordering.
pub fn simple_catalog(names: &[&str]) -> Catalog {
    Catalog::new(names.iter().map(|n| CommandSpec::new(n)).collect()).unwrap()
}

pub fn stack_buy_body() -> &'static str {
    r#"{"stack_buy_g": 1, "stack_buy_s": 2, "stack_buy_c": 3}"#
}

// ---------------------------------------------------------------------------
// RecordingUi
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Button(String),
    Text(String),
    Table {
        id: String,
        header: String,
        rows: Vec<TableRow>,
    },
    SameLine,
}

pub struct RecordingUi {
    pub width: f32,
    pub events: Vec<UiEvent>,
    /// Button label that reports a click on its next draw.
    pub click: Option<String>,
}

impl RecordingUi {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            events: Vec::new(),
            click: None,
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn tables(&self) -> Vec<(&str, &[TableRow])> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Table { id, rows, .. } => Some((id.as_str(), rows.as_slice())),
                _ => None,
            })
            .collect()
    }

    pub fn same_line_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, UiEvent::SameLine))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Ui for RecordingUi {
    fn window_width(&self) -> f32 {
        self.width
    }

    fn button(&mut self, label: &str) -> bool {
        self.events.push(UiEvent::Button(label.to_string()));
        if self.click.as_deref() == Some(label) {
            self.click = None;
            true
        } else {
            false
        }
    }

    fn text(&mut self, text: &str) {
        self.events.push(UiEvent::Text(text.to_string()));
    }

    fn table(&mut self, id: &str, header: &str, rows: &[TableRow]) {
        self.events.push(UiEvent::Table {
            id: id.to_string(),
            header: header.to_string(),
            rows: rows.to_vec(),
        });
    }

    fn same_line(&mut self) {
        self.events.push(UiEvent::SameLine);
    }
}
