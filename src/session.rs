//! Async-friendly intake session
//!
//! The form itself is synchronous, single-threaded state. This facade backs
//! it with a dedicated worker thread that owns the [`IntakeForm`] and its
//! collaborator surfaces and executes commands sent from async tasks, so
//! callers get an async interface without sharing the form across threads.
//!
//! Delivery is the one suspension point: an accepted submission ships on a
//! side thread and its outcome re-enters the command loop as an internal
//! event. The loop stays responsive the whole time, which is what makes the
//! in-flight `Submitting` state observable and repeat submits no-ops.

use std::sync::mpsc::{self, Sender};
use std::thread;

use chrono::NaiveDate;
use tokio::sync::oneshot;

use crate::intake::{
    Clause, ClientRecord, IdSide, IntakeForm, SubmissionState, SubmitOutcome, TextField,
    ValidationReport,
};
use crate::surface::{CaptureSession, DeliveryReceipt, Facing, StudioSurfaces};
use crate::{Artifact, Error, Result};

enum Command {
    SetText(TextField, String, oneshot::Sender<Result<()>>),
    SetDateOfBirth(Option<NaiveDate>, oneshot::Sender<Result<()>>),
    SetClause(Clause, bool, oneshot::Sender<Result<()>>),
    CaptureId(IdSide, oneshot::Sender<Result<()>>),
    RecordSignature(Artifact, oneshot::Sender<Result<()>>),
    ClearSignature(oneshot::Sender<Result<()>>),
    Submit(oneshot::Sender<Result<SubmitAck>>),
    Status(oneshot::Sender<Result<SessionStatus>>),

    // Internal: outcome of the in-flight delivery
    Resolved(std::result::Result<DeliveryReceipt, String>),

    Close(Option<oneshot::Sender<Result<()>>>),
}

/// What a submit request did, from the caller's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAck {
    /// Validation passed; delivery is in flight. The view should return to
    /// the top of the form while it waits.
    Accepted,
    /// Validation failed; the report is the form's current error set.
    Rejected(ValidationReport),
    /// A delivery was already in flight, or the session already submitted.
    Ignored,
}

/// A point-in-time snapshot of the session, safe to render from.
#[derive(Debug, Clone)]
pub struct SessionStatus {
    pub state: SubmissionState,
    pub errors: ValidationReport,
    pub last_failure: Option<String>,
    pub record: ClientRecord,
    pub evidence_complete: bool,
    pub receipt: Option<DeliveryReceipt>,
}

/// Handle to one intake session backed by a worker thread.
pub struct IntakeSession {
    cmd_tx: Sender<Command>,
}

impl IntakeSession {
    /// Spawn the worker thread that owns a fresh form and the given
    /// surfaces.
    pub async fn start(surfaces: StudioSurfaces) -> Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();
        let internal_tx = cmd_tx.clone();

        thread::spawn(move || {
            let mut form = IntakeForm::new();
            let _ = init_tx.send(Ok(()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::SetText(field, value, resp) => {
                        form.set_text(field, value);
                        let _ = resp.send(Ok(()));
                    }
                    Command::SetDateOfBirth(dob, resp) => {
                        form.set_date_of_birth(dob);
                        let _ = resp.send(Ok(()));
                    }
                    Command::SetClause(clause, agreed, resp) => {
                        form.set_clause(clause, agreed);
                        let _ = resp.send(Ok(()));
                    }
                    Command::CaptureId(side, resp) => {
                        let _ = resp.send(capture_id(&mut form, &surfaces, side));
                    }
                    Command::RecordSignature(artifact, resp) => {
                        form.record_signature(artifact);
                        let _ = resp.send(Ok(()));
                    }
                    Command::ClearSignature(resp) => {
                        form.clear_signature();
                        let _ = resp.send(Ok(()));
                    }
                    Command::Submit(resp) => {
                        let ack = match form.submit() {
                            SubmitOutcome::Accepted(payload) => {
                                let sink = surfaces.delivery.clone();
                                let tx = internal_tx.clone();
                                thread::spawn(move || {
                                    let outcome = sink.deliver(&payload).map_err(|e| match e {
                                        Error::DeliveryFailed(reason) => reason,
                                        other => other.to_string(),
                                    });
                                    let _ = tx.send(Command::Resolved(outcome));
                                });
                                SubmitAck::Accepted
                            }
                            SubmitOutcome::Invalid(report) => SubmitAck::Rejected(report),
                            SubmitOutcome::Ignored => SubmitAck::Ignored,
                        };
                        let _ = resp.send(Ok(ack));
                    }
                    Command::Status(resp) => {
                        let status = SessionStatus {
                            state: form.state(),
                            errors: form.current_errors().clone(),
                            last_failure: form.last_failure().map(str::to_string),
                            record: form.record().clone(),
                            evidence_complete: form.evidence().is_complete(),
                            receipt: form.receipt().cloned(),
                        };
                        let _ = resp.send(Ok(status));
                    }
                    Command::Resolved(outcome) => {
                        form.resolve_delivery(outcome);
                    }
                    Command::Close(resp) => {
                        if let Some(resp) = resp {
                            let _ = resp.send(Ok(()));
                        }
                        break;
                    }
                }
            }
        });

        init_rx
            .await
            .map_err(|e| Error::Other(format!("Worker init canceled: {}", e)))??;
        Ok(Self { cmd_tx })
    }

    pub async fn set_text(&self, field: TextField, value: &str) -> Result<()> {
        self.request(|tx| Command::SetText(field, value.to_string(), tx))
            .await
    }

    pub async fn set_date_of_birth(&self, dob: Option<NaiveDate>) -> Result<()> {
        self.request(|tx| Command::SetDateOfBirth(dob, tx)).await
    }

    pub async fn set_clause(&self, clause: Clause, agreed: bool) -> Result<()> {
        self.request(|tx| Command::SetClause(clause, agreed, tx))
            .await
    }

    /// Open the camera, grab one frame for the given ID side, and release
    /// the stream. Open failures surface as recoverable capture errors;
    /// retry by calling again.
    pub async fn capture_id(&self, side: IdSide) -> Result<()> {
        self.request(|tx| Command::CaptureId(side, tx)).await
    }

    pub async fn record_signature(&self, artifact: Artifact) -> Result<()> {
        self.request(|tx| Command::RecordSignature(artifact, tx))
            .await
    }

    pub async fn clear_signature(&self) -> Result<()> {
        self.request(|tx| Command::ClearSignature(tx)).await
    }

    /// Validate and, when clean, start the single in-flight delivery.
    pub async fn submit(&self) -> Result<SubmitAck> {
        self.request(Command::Submit).await
    }

    pub async fn status(&self) -> Result<SessionStatus> {
        self.request(Command::Status).await
    }

    /// Shut the worker down.
    pub async fn close(self) -> Result<()> {
        self.request(|tx| Command::Close(Some(tx))).await
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<Result<T>>) -> Command) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .map_err(|_| Error::SessionClosed("Session worker is gone".into()))?;
        rx.await
            .map_err(|e| Error::SessionClosed(format!("Request canceled: {}", e)))?
    }
}

impl Drop for IntakeSession {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(Command::Close(None));
    }
}

fn capture_id(form: &mut IntakeForm, surfaces: &StudioSurfaces, side: IdSide) -> Result<()> {
    if form.state() != SubmissionState::Editing {
        return Err(Error::CaptureFailed("The form is no longer editable".into()));
    }
    // The guard closes the stream on every path out of this function
    let capture = CaptureSession::open(surfaces.camera.as_ref(), Facing::Environment)?;
    let shot = capture.capture()?;
    form.complete_capture(side, shot);
    Ok(())
}
