//! Non-blocking resolver decorator with a background worker pool.
//!
//! `BackgroundResolver` exposes the same resolve contract as any other
//! [`Resolve`] implementation but never waits for a lookup: a cache miss
//! enqueues the address for a fixed pool of worker tasks and returns the
//! address itself as the not-yet-known sentinel. Callers observe
//! resolution by asking again.

use super::{Address, CachingResolver, Resolve, Resolving};
use dashmap::DashSet;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, Mutex as AsyncMutex};
use tokio::task::JoinHandle;

/// Default number of background worker tasks.
pub const DEFAULT_POOL_SIZE: usize = 4;

type Queue = Arc<AsyncMutex<mpsc::UnboundedReceiver<Address>>>;

/// Resolver that performs all slow lookups on background workers.
///
/// Wraps a [`CachingResolver`]; the workers resolve through it, so the
/// cache is populated as a side effect and subsequent calls hit the
/// synchronous cached path. The worker pool is started in the
/// constructor — there is no hidden first-call initialization — and runs
/// until the resolver is dropped or [`BackgroundResolver::shutdown`] is
/// called, whichever closes the queue first.
///
/// An address whose backend lookup hangs forever permanently occupies
/// one worker, reducing the effective pool size. There is no per-lookup
/// timeout or cancellation of queued addresses.
pub struct BackgroundResolver {
    caching: Arc<CachingResolver>,
    /// Addresses enqueued but not yet picked up by a worker.
    pending: Arc<DashSet<Address>>,
    /// Sender half of the work queue; taken on shutdown to close it.
    queue: Mutex<Option<mpsc::UnboundedSender<Address>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl BackgroundResolver {
    /// Creates the resolver and starts `pool_size` worker tasks
    /// (clamped to at least one) on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime, as task spawning
    /// requires one.
    pub fn new(caching: Arc<CachingResolver>, pool_size: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let rx: Queue = Arc::new(AsyncMutex::new(rx));
        let pending = Arc::new(DashSet::new());

        let workers = (0..pool_size.max(1))
            .map(|id| {
                tokio::spawn(worker_loop(
                    id,
                    Arc::clone(&rx),
                    Arc::clone(&caching),
                    Arc::clone(&pending),
                ))
            })
            .collect();

        Self {
            caching,
            pending,
            queue: Mutex::new(Some(tx)),
            workers: Mutex::new(workers),
        }
    }

    /// Creates the resolver with [`DEFAULT_POOL_SIZE`] workers.
    pub fn with_default_pool(caching: Arc<CachingResolver>) -> Self {
        Self::new(caching, DEFAULT_POOL_SIZE)
    }

    /// Returns the current answer for an address without waiting.
    ///
    /// A cache hit returns the resolved name. A miss enqueues the
    /// address for the worker pool — unless it is already queued — and
    /// returns the address itself. Either way the call is cheap and
    /// never blocks on the backend lookup.
    pub fn resolve_now(&self, addr: Address) -> String {
        if let Some(name) = self.caching.cached(addr.as_str()) {
            return name;
        }

        if self.pending.insert(addr.clone()) {
            let sent = self
                .queue
                .lock()
                .ok()
                .and_then(|guard| guard.as_ref().map(|tx| tx.send(addr.clone()).is_ok()))
                .unwrap_or(false);
            if sent {
                tracing::debug!(address = %addr, "queued for background resolution");
            } else {
                // Queue already closed; nothing will drain this entry.
                self.pending.remove(&addr);
            }
        }

        addr.as_str().to_string()
    }

    /// The wrapped caching resolver.
    pub fn cache(&self) -> &CachingResolver {
        &self.caching
    }

    /// Number of addresses enqueued and not yet picked up by a worker.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Closes the work queue and waits for all workers to finish their
    /// current lookup and exit. Idempotent.
    pub async fn shutdown(&self) {
        if let Ok(mut guard) = self.queue.lock() {
            guard.take();
        }
        let handles = match self.workers.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(_) => Vec::new(),
        };
        for handle in handles {
            let _ = handle.await;
        }
    }
}

impl Resolve for BackgroundResolver {
    fn resolve(&self, addr: Address) -> Resolving {
        Box::pin(std::future::ready(self.resolve_now(addr)))
    }
}

impl std::fmt::Debug for BackgroundResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundResolver")
            .field("pending", &self.pending.len())
            .field("cache", &self.caching)
            .finish_non_exhaustive()
    }
}

/// One worker: dequeue, resolve through the cache, log, repeat.
///
/// Runs until the queue closes. A panicking backend lookup is contained
/// to the iteration that triggered it; the worker keeps draining the
/// queue afterwards.
async fn worker_loop(
    id: usize,
    queue: Queue,
    caching: Arc<CachingResolver>,
    pending: Arc<DashSet<Address>>,
) {
    loop {
        let addr = { queue.lock().await.recv().await };
        let Some(addr) = addr else {
            break;
        };

        // From here the address is no longer "queued"; a concurrent
        // caller may re-enqueue it while the lookup is in flight, which
        // the cache check in `resolve_now` keeps cheap once it lands.
        pending.remove(&addr);

        match AssertUnwindSafe(caching.resolve(addr.clone()))
            .catch_unwind()
            .await
        {
            Ok(name) => {
                tracing::debug!(worker = id, address = %addr, name = %name, "background resolution complete");
            }
            Err(_) => {
                tracing::error!(worker = id, address = %addr, "backend lookup panicked; worker continues");
            }
        }
    }

    tracing::debug!(worker = id, "resolver worker stopped");
}
