//! Reactive kolam viewer.
//!
//! Each distinct source handed to [`Viewer::show`] starts one asynchronous
//! load; the outcome is published into a single-slot cell that readers can
//! poll ([`Viewer::state`]) or watch ([`Viewer::subscribe`]).
//!
//! ```text
//! show(src) ──► same as last? ──yes──► nothing
//!                    │ no
//!                    ▼
//!      generation += 1, publish Loading
//!                    │
//!                    ▼ (task)
//!      load ──► Ready(markup) | Empty
//!                    │
//!                    ▼
//!      publish only if generation is still current
//! ```
//!
//! A superseded load is not cancelled; its result is dropped when it lands.

pub mod markup;
mod state;

pub use state::{Snapshot, ViewState};

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use url::Url;

use crate::source::{self, Fetch};
use crate::svg::AnimateOptions;
use crate::{debug, log};

/// Loads kolam sources and publishes what to show.
pub struct Viewer<F: Fetch> {
    inner: Arc<Inner<F>>,
}

impl<F: Fetch> Clone for Viewer<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<F> {
    fetcher: F,
    base: Option<Url>,
    options: AnimateOptions,
    runtime: Handle,
    /// Last requested source, compared verbatim.
    last_src: Mutex<Option<String>>,
    slot: watch::Sender<Snapshot>,
}

impl<F: Fetch> Viewer<F> {
    /// Create a viewer whose loads run on `runtime`.
    pub fn new(fetcher: F, base: Option<Url>, options: AnimateOptions, runtime: Handle) -> Self {
        let (slot, _) = watch::channel(Snapshot::default());
        Self {
            inner: Arc::new(Inner {
                fetcher,
                base,
                options,
                runtime,
                last_src: Mutex::new(None),
                slot,
            }),
        }
    }

    /// Show `src`. Starts a load unless `src` is the last requested source.
    ///
    /// Returns whether a load was started.
    pub fn show(&self, src: &str) -> bool {
        let generation = {
            let mut last = self.inner.last_src.lock();
            if last.as_deref() == Some(src) {
                return false;
            }
            *last = Some(src.to_string());

            let mut generation = 0;
            self.inner.slot.send_modify(|snapshot| {
                snapshot.generation += 1;
                snapshot.state = ViewState::Loading;
                generation = snapshot.generation;
            });
            generation
        };

        debug!("viewer"; "#{} loading {}", generation, src);

        let inner = Arc::clone(&self.inner);
        let src = src.to_string();
        self.inner.runtime.spawn(async move {
            let state = inner.load(&src).await;
            inner.publish(generation, state);
        });
        true
    }

    /// The currently published state.
    pub fn state(&self) -> ViewState {
        self.inner.slot.borrow().state.clone()
    }

    /// The currently published snapshot, generation included.
    #[cfg(test)]
    pub fn snapshot(&self) -> Snapshot {
        self.inner.slot.borrow().clone()
    }

    /// Watch published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.slot.subscribe()
    }

    /// Wait until the current load (if any) has finished.
    pub async fn settled(&self) -> ViewState {
        let mut rx = self.subscribe();
        match rx.wait_for(|snapshot| !snapshot.state.is_loading()).await {
            Ok(snapshot) => snapshot.state.clone(),
            Err(_) => self.state(),
        }
    }
}

impl<F: Fetch> Inner<F> {
    async fn load(&self, src: &str) -> ViewState {
        match source::load(&self.fetcher, src, self.base.as_ref(), &self.options).await {
            Ok(Some(markup)) => ViewState::Ready(markup),
            Ok(None) => {
                log!("viewer"; "{}: no <svg> element, nothing to show", src);
                ViewState::Empty
            }
            Err(e) => {
                log!("error"; "{}: {}", src, e);
                ViewState::Empty
            }
        }
    }

    /// Publish `state` if `generation` is still the latest request.
    fn publish(&self, generation: u64, state: ViewState) -> bool {
        let label = state.label();
        let published = self.slot.send_if_modified(|snapshot| {
            if snapshot.generation != generation {
                return false;
            }
            snapshot.state = state;
            true
        });

        if published {
            debug!("viewer"; "#{} {}", generation, label);
        } else {
            debug!("viewer"; "#{} superseded, result dropped", generation);
        }
        published
    }
}
