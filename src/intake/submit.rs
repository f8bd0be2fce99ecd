//! Submission lifecycle and payload shaping

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::consent::AcknowledgementSet;
use super::evidence::{EvidenceBundle, IdSide};
use super::fields::ClientRecord;
use super::validate::ValidationReport;

/// Where one intake session is in its lifecycle.
///
/// `Editing` is initial. `Submitting` is entered only after a clean
/// validation pass, and `Submitted` is terminal for the session. A failed
/// delivery lands back in `Editing` with the reason surfaced through
/// [`crate::intake::IntakeForm::last_failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmissionState {
    Editing,
    Submitting,
    Submitted,
}

/// What a submission attempt did.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; the report is now the form's current error set and
    /// nothing else changed.
    Invalid(ValidationReport),
    /// Validation passed and the form is now `Submitting`. The caller owns
    /// handing the payload to the delivery collaborator and returning the
    /// view to the top of the form.
    Accepted(Box<SubmissionPayload>),
    /// A delivery was already in flight, or the session already submitted.
    Ignored,
}

/// The packaged consent-and-release submission handed to delivery.
///
/// Images travel as content references (artifact digests), not bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub email: String,
    pub tattoo_description: String,
    pub tattoo_placement: String,
    pub consents: BTreeMap<String, bool>,
    pub signature: String,
    pub id_front: String,
    pub id_back: String,
}

impl SubmissionPayload {
    /// Package the current form state. Returns `None` when a required piece
    /// is absent; a passing validation rules that out.
    pub(crate) fn package(
        record: &ClientRecord,
        consents: &AcknowledgementSet,
        evidence: &EvidenceBundle,
    ) -> Option<Self> {
        let date_of_birth = record.date_of_birth?;
        let id_front = evidence.id_photo(IdSide::Front)?.reference();
        let id_back = evidence.id_photo(IdSide::Back)?.reference();
        let signature = evidence.signature()?.reference();

        Some(SubmissionPayload {
            full_name: record.full_name.clone(),
            date_of_birth,
            phone: record.phone.clone(),
            email: record.email.clone(),
            tattoo_description: record.tattoo_description.clone(),
            tattoo_placement: record.tattoo_placement.clone(),
            consents: consents.as_map(),
            signature,
            id_front,
            id_back,
        })
    }
}
