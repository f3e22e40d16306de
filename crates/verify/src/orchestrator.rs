//! Verification pipeline
//!
//! For each incoming event the orchestrator runs every configured verifier in
//! sequence: build a timestamped update context against the verifier's state
//! handle, check it for timing ambiguity against the accepted history, on a
//! clash reset state and history and redo the cycle against the clean
//! baseline, record stats, append the accepted update, and finally let the
//! verifier judge the cycle, collecting a diagnostic when it fails.
//!
//! Processing is strictly sequential per orchestrator instance; the host
//! routes all events for one partition key to the same instance. Separate
//! instances over disjoint keys may run in parallel and share nothing.

use crate::clash::ClashDetector;
use crate::config::VerifyConfig;
use crate::context::{build_update_context, UpdateContext};
use crate::history::HistoryStore;
use crate::state::{StateBackend, StateDescriptor, TtlStateHandle};
use crate::stats::{StatsReport, UpdateStats};
use crate::verifier::{TtlVerifier, VerificationContext};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use vigil_core::{Clock, Result, UpdateEvent, Value};

/// Runs every configured verifier over an ordered stream of update events
pub struct VerificationOrchestrator {
    ttl: Duration,
    detector: ClashDetector,
    verifiers: Vec<Arc<dyn TtlVerifier>>,
    backend: Arc<dyn StateBackend>,
    history: Arc<dyn HistoryStore>,
    clock: Arc<dyn Clock>,
    stats: UpdateStats,
    // One handle per (key, verifier), created on first use and kept for the
    // pipeline lifetime
    states: HashMap<(String, &'static str), Box<dyn TtlStateHandle>>,
}

impl VerificationOrchestrator {
    /// Wire up a pipeline
    pub fn new(
        config: &VerifyConfig,
        verifiers: Vec<Arc<dyn TtlVerifier>>,
        backend: Arc<dyn StateBackend>,
        history: Arc<dyn HistoryStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            ttl: config.ttl(),
            detector: ClashDetector::new(config.ttl()),
            verifiers,
            backend,
            history,
            clock,
            stats: UpdateStats::new(config.report_stat_after_updates),
            states: HashMap::new(),
        }
    }

    /// The clash detector this pipeline evaluates with
    pub fn detector(&self) -> &ClashDetector {
        &self.detector
    }

    /// Current stats counters
    pub fn stats(&self) -> StatsReport {
        self.stats.snapshot()
    }

    /// Process one event, returning a diagnostic per failed verification
    ///
    /// An empty vec means every verifier accepted its cycle. Verifiers with
    /// no payload in the event are skipped.
    ///
    /// # Errors
    ///
    /// Propagates collaborator failures (state store, history persistence)
    /// unchanged; the event is abandoned mid-way in that case.
    pub fn process(&mut self, event: &UpdateEvent) -> Result<Vec<String>> {
        let mut diagnostics = Vec::new();
        let verifiers = self.verifiers.clone();
        for verifier in &verifiers {
            let Some(update) = event.update_for(verifier.id()) else {
                debug!(key = %event.key, verifier = verifier.id(), "no payload in event, skipping");
                continue;
            };
            let update = update.clone();

            let context = self.evaluate(event, verifier.as_ref(), &update)?;
            if !verifier.verify(&self.detector, &context) {
                diagnostics.push(context.to_string());
            }
        }
        Ok(diagnostics)
    }

    /// Run one verifier's update-check-append cycle for one event
    fn evaluate(
        &mut self,
        event: &UpdateEvent,
        verifier: &dyn TtlVerifier,
        update: &Value,
    ) -> Result<VerificationContext> {
        let mut prev_updates = self.history.load(&event.key, verifier.id())?;
        let mut cycle = self.run_cycle(&event.key, verifier, update)?;

        let clash = self
            .detector
            .is_ambiguous(&cycle.update_with_ts()?, &prev_updates);
        if clash {
            // No expiry schedule can be ruled out; the only clean baseline
            // is an empty one. At most one reset per evaluation: the redo
            // runs against a just-cleared history and cannot clash again.
            debug!(key = %event.key, verifier = verifier.id(), "timing clash, resetting state");
            self.reset(&event.key, verifier)?;
            prev_updates = Vec::new();
            cycle = self.run_cycle(&event.key, verifier, update)?;
        }

        self.stats.record(clash, prev_updates.len());
        self.history
            .append(&event.key, verifier.id(), &cycle.update_with_ts()?)?;

        Ok(VerificationContext {
            key: event.key.clone(),
            verifier_id: verifier.id().to_string(),
            prev_updates,
            update_context: cycle,
        })
    }

    fn run_cycle(
        &mut self,
        key: &str,
        verifier: &dyn TtlVerifier,
        update: &Value,
    ) -> Result<UpdateContext> {
        let clock = self.clock.clone();
        let state = self.state_for(key, verifier)?;
        build_update_context(clock.as_ref(), state.as_mut(), update)
    }

    fn reset(&mut self, key: &str, verifier: &dyn TtlVerifier) -> Result<()> {
        let state = self.state_for(key, verifier)?;
        state.clear()?;
        self.history.clear(key, verifier.id())
    }

    fn state_for(
        &mut self,
        key: &str,
        verifier: &dyn TtlVerifier,
    ) -> Result<&mut Box<dyn TtlStateHandle>> {
        match self.states.entry((key.to_string(), verifier.id())) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let descriptor =
                    StateDescriptor::new(key, verifier.id(), verifier.shape(), self.ttl);
                let handle = self.backend.create_state(&descriptor)?;
                Ok(entry.insert(handle))
            }
        }
    }
}
