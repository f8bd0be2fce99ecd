//! Submission delivery collaborator
//!
//! The real transport (emailing the studio, a booking backend) lives outside
//! this crate; the core only needs a success-or-failure signal per payload.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::intake::SubmissionPayload;
use crate::{Error, Result};

/// Proof that a courier accepted a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Courier-assigned reference for the accepted submission
    pub reference: String,
}

/// Accepts a packaged submission and resolves success or failure. The call
/// blocks; the session facade keeps it off the interaction thread.
pub trait DeliverySink: Send + Sync {
    fn deliver(&self, payload: &SubmissionPayload) -> Result<DeliveryReceipt>;
}

/// A courier that pretends to ship submissions: sleeps for a configurable
/// latency, then succeeds with a numbered receipt or fails with a scripted
/// reason. Keeps every accepted payload so tests can assert exactly-once
/// delivery.
pub struct SimulatedCourier {
    latency: Duration,
    fail_with: Mutex<Option<String>>,
    accepted: Mutex<Vec<SubmissionPayload>>,
    counter: AtomicU64,
}

impl SimulatedCourier {
    pub fn new() -> Self {
        SimulatedCourier {
            latency: Duration::ZERO,
            fail_with: Mutex::new(None),
            accepted: Mutex::new(Vec::new()),
            counter: AtomicU64::new(1),
        }
    }

    pub fn with_latency(latency: Duration) -> Self {
        let mut courier = SimulatedCourier::new();
        courier.latency = latency;
        courier
    }

    /// Script every delivery to fail with `reason` until cleared.
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.fail_with.lock().unwrap() = Some(reason.into());
    }

    pub fn succeed(&self) {
        *self.fail_with.lock().unwrap() = None;
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted.lock().unwrap().len()
    }

    pub fn last_accepted(&self) -> Option<SubmissionPayload> {
        self.accepted.lock().unwrap().last().cloned()
    }
}

impl Default for SimulatedCourier {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliverySink for SimulatedCourier {
    fn deliver(&self, payload: &SubmissionPayload) -> Result<DeliveryReceipt> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        if let Some(reason) = self.fail_with.lock().unwrap().clone() {
            return Err(Error::DeliveryFailed(reason));
        }
        self.accepted.lock().unwrap().push(payload.clone());
        let number = self.counter.fetch_add(1, Ordering::Relaxed);
        Ok(DeliveryReceipt {
            reference: format!("CI-{:05}", number),
        })
    }
}
