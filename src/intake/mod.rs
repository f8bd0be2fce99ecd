//! Consent-and-release intake form
//!
//! The controller ties the four pieces of the intake flow together: the
//! free-typed field store, the fixed acknowledgement set, the captured
//! evidence bundle, and the submission pipeline. User input mutates state
//! directly; capture surfaces push completed artifacts in through
//! [`IntakeForm::complete_capture`] and [`IntakeForm::record_signature`];
//! a submission attempt runs the validator and, when clean, produces the
//! payload for the delivery collaborator.
//!
//! Everything here runs on one logical thread. The only asynchronous step,
//! delivery, happens outside the form and reports back through
//! [`IntakeForm::resolve_delivery`].

mod consent;
mod evidence;
mod fields;
mod submit;
mod validate;

pub use consent::{AcknowledgementSet, Clause};
pub use evidence::{EvidenceBundle, IdSide};
pub use fields::{ClientRecord, TextField};
pub use submit::{SubmissionPayload, SubmissionState, SubmitOutcome};
pub use validate::{
    adult_cutoff, age_on, validate, FieldId, ValidationReport, MINIMUM_AGE_YEARS,
};

use chrono::{Local, NaiveDate};

use crate::surface::DeliveryReceipt;
use crate::Artifact;

/// One client's intake session, created fresh per visit and discarded after
/// a successful submission.
#[derive(Debug, Clone)]
pub struct IntakeForm {
    record: ClientRecord,
    consents: AcknowledgementSet,
    evidence: EvidenceBundle,
    state: SubmissionState,
    errors: ValidationReport,
    failure: Option<String>,
    receipt: Option<DeliveryReceipt>,
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeForm {
    pub fn new() -> Self {
        IntakeForm {
            record: ClientRecord::new(),
            consents: AcknowledgementSet::new(),
            evidence: EvidenceBundle::new(),
            state: SubmissionState::Editing,
            errors: ValidationReport::default(),
            failure: None,
            receipt: None,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    fn editable(&self) -> bool {
        self.state() == SubmissionState::Editing
    }

    /// The error set produced by the last submission attempt.
    pub fn current_errors(&self) -> &ValidationReport {
        &self.errors
    }

    /// The reason the last delivery failed, if it did.
    pub fn last_failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// The courier receipt once the session has submitted.
    pub fn receipt(&self) -> Option<&DeliveryReceipt> {
        self.receipt.as_ref()
    }

    pub fn record(&self) -> &ClientRecord {
        &self.record
    }

    pub fn consents(&self) -> &AcknowledgementSet {
        &self.consents
    }

    pub fn evidence(&self) -> &EvidenceBundle {
        &self.evidence
    }

    // --- Edits (ignored once the form leaves Editing) ---

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        if self.editable() {
            self.record.set_text(field, value);
        }
    }

    pub fn set_date_of_birth(&mut self, dob: Option<NaiveDate>) {
        if self.editable() {
            self.record.set_date_of_birth(dob);
        }
    }

    pub fn set_clause(&mut self, clause: Clause, agreed: bool) {
        if self.editable() {
            self.consents.set_clause(clause, agreed);
        }
    }

    pub fn complete_capture(&mut self, side: IdSide, artifact: Artifact) {
        if self.editable() {
            self.evidence.complete_capture(side, artifact);
        }
    }

    pub fn record_signature(&mut self, artifact: Artifact) {
        if self.editable() {
            self.evidence.record_signature(artifact);
        }
    }

    pub fn clear_signature(&mut self) {
        if self.editable() {
            self.evidence.clear_signature();
        }
    }

    /// Preview the validator against the current state without submitting.
    pub fn validate_at(&self, today: NaiveDate) -> ValidationReport {
        validate(&self.record, &self.consents, &self.evidence, today)
    }

    /// Attempt to submit as of the local calendar date.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.submit_at(Local::now().date_naive())
    }

    /// Attempt to submit as of `today`.
    ///
    /// A second call while a delivery is in flight (or after the session has
    /// submitted) is a no-op: no validation, no payload construction.
    pub fn submit_at(&mut self, today: NaiveDate) -> SubmitOutcome {
        if !self.editable() {
            return SubmitOutcome::Ignored;
        }

        let report = self.validate_at(today);
        if !report.is_ok() {
            self.errors = report.clone();
            return SubmitOutcome::Invalid(report);
        }

        let Some(payload) = SubmissionPayload::package(&self.record, &self.consents, &self.evidence)
        else {
            // Unreachable after a clean validation pass
            return SubmitOutcome::Invalid(report);
        };

        self.errors = ValidationReport::default();
        self.failure = None;
        self.state = SubmissionState::Submitting;
        SubmitOutcome::Accepted(Box::new(payload))
    }

    /// Report the outcome of the in-flight delivery.
    ///
    /// Success makes the session terminal. Failure returns the form to
    /// `Editing` with the reason surfaced and every field and artifact
    /// intact, so the client can simply resubmit.
    pub fn resolve_delivery(&mut self, outcome: Result<DeliveryReceipt, String>) {
        if self.state() != SubmissionState::Submitting {
            log::warn!("delivery resolution arrived outside an in-flight submission; ignored");
            return;
        }
        match outcome {
            Ok(receipt) => {
                self.receipt = Some(receipt);
                self.failure = None;
                self.state = SubmissionState::Submitted;
            }
            Err(reason) => {
                let reason = if reason.trim().is_empty() {
                    "Your submission could not be delivered. Please try again.".to_string()
                } else {
                    reason
                };
                log::warn!("delivery failed: {}", reason);
                self.failure = Some(reason);
                self.state = SubmissionState::Editing;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn shot(tag: u8) -> Artifact {
        Artifact::from_bytes("image/jpeg", vec![tag; 16])
    }

    fn filled_form(_today: NaiveDate) -> IntakeForm {
        let mut form = IntakeForm::new();
        form.set_text(TextField::FullName, "Jane Doe");
        form.set_date_of_birth(Some(date(1996, 1, 2)));
        form.set_text(TextField::Phone, "520-555-0144");
        form.set_text(TextField::Email, "jane@example.com");
        form.set_text(TextField::TattooDescription, "A raven over a crescent moon");
        form.set_text(TextField::TattooPlacement, "Left forearm");
        for clause in Clause::ALL {
            form.set_clause(clause, true);
        }
        form.complete_capture(IdSide::Front, shot(1));
        form.complete_capture(IdSide::Back, shot(2));
        form.record_signature(shot(3));
        form
    }

    fn receipt(reference: &str) -> DeliveryReceipt {
        DeliveryReceipt {
            reference: reference.to_string(),
        }
    }

    #[test]
    fn happy_path_reaches_submitted() {
        let today = date(2026, 8, 6);
        let mut form = filled_form(today);
        assert_eq!(form.state(), SubmissionState::Editing);

        let outcome = form.submit_at(today);
        let payload = match outcome {
            SubmitOutcome::Accepted(p) => p,
            other => panic!("expected acceptance, got {:?}", other),
        };
        assert_eq!(form.state(), SubmissionState::Submitting);
        assert_eq!(payload.full_name, "Jane Doe");

        form.resolve_delivery(Ok(receipt("CI-0001")));
        assert_eq!(form.state(), SubmissionState::Submitted);
        assert_eq!(form.receipt().map(|r| r.reference.as_str()), Some("CI-0001"));
        assert_eq!(form.last_failure(), None);
    }

    #[test]
    fn invalid_submission_stays_editing_with_errors() {
        let today = date(2026, 8, 6);
        let mut form = IntakeForm::new();
        let outcome = form.submit_at(today);
        match outcome {
            SubmitOutcome::Invalid(report) => assert!(!report.is_ok()),
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(form.state(), SubmissionState::Editing);
        assert!(!form.current_errors().is_ok());
    }

    #[test]
    fn repeat_submit_while_in_flight_is_a_no_op() {
        let today = date(2026, 8, 6);
        let mut form = filled_form(today);
        assert!(matches!(form.submit_at(today), SubmitOutcome::Accepted(_)));
        assert_eq!(form.submit_at(today), SubmitOutcome::Ignored);
        assert_eq!(form.state(), SubmissionState::Submitting);

        form.resolve_delivery(Ok(receipt("CI-0002")));
        // Terminal: no further submissions this session
        assert_eq!(form.submit_at(today), SubmitOutcome::Ignored);
    }

    #[test]
    fn delivery_failure_returns_to_editing_with_everything_intact() {
        let today = date(2026, 8, 6);
        let mut form = filled_form(today);
        let before = form.record().clone();
        assert!(matches!(form.submit_at(today), SubmitOutcome::Accepted(_)));

        form.resolve_delivery(Err("The courier pigeon got lost.".into()));
        assert_eq!(form.state(), SubmissionState::Editing);
        assert_eq!(form.last_failure(), Some("The courier pigeon got lost."));
        assert_eq!(form.record(), &before);
        assert!(form.evidence().is_complete());
        assert!(form.consents().all_acknowledged());

        // Retry is just submitting again
        assert!(matches!(form.submit_at(today), SubmitOutcome::Accepted(_)));
        form.resolve_delivery(Ok(receipt("CI-0003")));
        assert_eq!(form.state(), SubmissionState::Submitted);
        assert_eq!(form.last_failure(), None);
    }

    #[test]
    fn blank_failure_reason_gets_a_fallback_message() {
        let today = date(2026, 8, 6);
        let mut form = filled_form(today);
        assert!(matches!(form.submit_at(today), SubmitOutcome::Accepted(_)));
        form.resolve_delivery(Err("  ".into()));
        assert!(form.last_failure().is_some_and(|m| !m.trim().is_empty()));
    }

    #[test]
    fn edits_are_ignored_while_in_flight() {
        let today = date(2026, 8, 6);
        let mut form = filled_form(today);
        assert!(matches!(form.submit_at(today), SubmitOutcome::Accepted(_)));

        form.set_text(TextField::FullName, "Someone Else");
        form.clear_signature();
        assert_eq!(form.record().full_name, "Jane Doe");
        assert!(form.evidence().signature().is_some());
    }

    #[test]
    fn stray_delivery_resolution_changes_nothing() {
        let mut form = IntakeForm::new();
        form.resolve_delivery(Err("late".into()));
        assert_eq!(form.state(), SubmissionState::Editing);
        assert_eq!(form.last_failure(), None);
    }

    #[test]
    fn payload_carries_wire_shape_and_references() {
        let today = date(2026, 8, 6);
        let mut form = filled_form(today);
        let payload = match form.submit_at(today) {
            SubmitOutcome::Accepted(p) => p,
            other => panic!("expected acceptance, got {:?}", other),
        };

        assert_eq!(payload.consents.len(), 7);
        assert!(payload.consents.values().all(|v| *v));
        assert_eq!(payload.id_front, shot(1).reference());
        assert_eq!(payload.id_back, shot(2).reference());
        assert_eq!(payload.signature, shot(3).reference());

        let value = serde_json::to_value(&*payload).unwrap();
        for key in [
            "fullName",
            "dateOfBirth",
            "phone",
            "email",
            "tattooDescription",
            "tattooPlacement",
            "consents",
            "signature",
            "idFront",
            "idBack",
        ] {
            assert!(value.get(key).is_some(), "payload missing {}", key);
        }
    }
}
