//! Non-blocking HTTP transport behind the [`Fetcher`] seam.
//!
//! The pipeline never awaits a request. It holds a [`ResponseHandle`] per
//! request and checks it once per frame with [`ResponseHandle::try_take`];
//! the actual I/O runs elsewhere (a Tokio runtime for [`HttpFetcher`], a
//! channel in tests).

use std::future::Future;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::{Gw2tpError, Result};

// ---------------------------------------------------------------------------
// ResponseHandle
// ---------------------------------------------------------------------------

/// An in-flight request that eventually yields a response body or an error.
pub struct ResponseHandle {
    inner: BoxFuture<'static, Result<String>>,
}

impl ResponseHandle {
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<String>> + Send + 'static,
    {
        Self {
            inner: future.boxed(),
        }
    }

    /// A handle that is already complete.
    pub fn ready(result: Result<String>) -> Self {
        Self::new(futures::future::ready(result))
    }

    /// Poll once without blocking.
    ///
    /// Returns `None` while the request is still running. Once this has
    /// returned `Some`, the handle is spent and must not be polled again.
    pub fn try_take(&mut self) -> Option<Result<String>> {
        self.inner.as_mut().now_or_never()
    }
}

impl std::fmt::Debug for ResponseHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ResponseHandle")
    }
}

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

/// Issues GET requests without blocking the caller.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> ResponseHandle;
}

// ---------------------------------------------------------------------------
// HttpFetcher
// ---------------------------------------------------------------------------

/// [`Fetcher`] backed by `reqwest` on a private Tokio runtime.
///
/// Each request is spawned as its own task. Dropping the returned handle
/// detaches the task; its result is discarded when it finishes.
pub struct HttpFetcher {
    runtime: tokio::runtime::Runtime,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("gw2tp-http")
            .enable_all()
            .build()?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { runtime, client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> ResponseHandle {
        let client = self.client.clone();
        let url = url.to_string();
        let task = self.runtime.spawn(async move {
            let resp = client.get(&url).send().await?.error_for_status()?;
            Ok::<_, Gw2tpError>(resp.text().await?)
        });
        ResponseHandle::new(async move {
            task.await
                .map_err(|e| Gw2tpError::Transport(format!("Task join error: {e}")))?
        })
    }
}
