//! Serialized, last-call-wins full relayouts.
//!
//! Rapid structural edits can request relayouts faster than they complete. A [`LayoutSession`]
//! runs them one at a time and only hands back the result of the newest request; anything older
//! resolves to [`Error::Superseded`] so a stale layout is never applied over newer graph state.

use crate::config::{LayoutConfig, Viewport};
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::result::LayoutResult;
use canopy_graph::Graph;
use futures::lock::Mutex;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct LayoutSession {
    engine: Engine,
    gate: Mutex<()>,
    generation: AtomicU64,
}

impl Default for LayoutSession {
    fn default() -> Self {
        Self::new(Engine::default())
    }
}

impl LayoutSession {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            gate: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Generation of the most recent request (0 before the first one).
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Marks every in-flight relayout as stale, e.g. after an edit that will be followed by a
    /// new request later.
    pub fn invalidate(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Queues a full relayout of `graph`.
    ///
    /// The request is numbered when this method is called, not when the future is first polled,
    /// so call order decides which request is the newest. The graph is taken by value: the
    /// caller keeps mutating its own copy while the layout runs.
    pub fn relayout(
        &self,
        graph: Graph,
        config: LayoutConfig,
        viewport: Viewport,
    ) -> impl Future<Output = Result<LayoutResult>> + '_ {
        let generation = self.invalidate();
        async move {
            let _turn = self.gate.lock().await;
            self.check(generation)?;
            let result = self.engine.layout(&graph, &config, viewport).await?;
            self.check(generation)?;
            tracing::debug!(generation, nodes = result.positions.len(), "relayout ready");
            Ok(result)
        }
    }

    fn check(&self, generation: u64) -> Result<()> {
        let latest = self.generation();
        if latest == generation {
            Ok(())
        } else {
            tracing::debug!(generation, latest, "discarding superseded relayout");
            Err(Error::Superseded { generation, latest })
        }
    }
}
