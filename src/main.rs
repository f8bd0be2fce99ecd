use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use serde_json::json;

use corruptink::intake::{Clause, IdSide, TextField};
use corruptink::surface::{ScriptedCamera, SimulatedCourier, StudioSurfaces};
use corruptink::{Artifact, IntakeSession, SiteContent, Studio, StudioConfig};

/// Line-driven console for the intake desk: one JSON command per stdin line,
/// one JSON response per stdout line. Runs against simulated camera and
/// delivery surfaces so a full consent flow can be exercised without a UI.
#[derive(Parser)]
#[command(name = "corruptink", version, about = "Corrupt Ink intake desk driver")]
struct Args {
    /// Site content JSON file; defaults to the built-in seed content
    #[arg(long)]
    content: Option<PathBuf>,

    /// Simulated delivery latency in milliseconds
    #[arg(long, default_value_t = 400)]
    delivery_latency_ms: u64,

    /// Script every delivery to fail with this reason
    #[arg(long)]
    fail_delivery: Option<String>,
}

#[derive(Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Op {
    SetField { field: String, value: String },
    SetDob { value: String },
    SetClause { clause: String, agreed: bool },
    CaptureId { side: String },
    Sign { data_url: String },
    ClearSignature,
    Submit,
    Status,
    Content,
    Quit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let content = match &args.content {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading content file {}", path.display()))?;
            SiteContent::from_json(&json)?
        }
        None => SiteContent::seed(),
    };
    let studio = Studio::new(StudioConfig::default(), content);

    let camera = Arc::new(ScriptedCamera::new(Artifact::from_bytes(
        "image/jpeg",
        b"driver-frame".to_vec(),
    )));
    let courier = Arc::new(SimulatedCourier::with_latency(Duration::from_millis(
        args.delivery_latency_ms,
    )));
    if let Some(reason) = &args.fail_delivery {
        courier.fail_with(reason.clone());
    }
    let session = IntakeSession::start(StudioSurfaces::new(camera, courier)).await?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let op = match serde_json::from_str::<Op>(&line) {
            Ok(op) => op,
            Err(e) => {
                respond(&mut out, json!({ "ok": false, "error": format!("Unrecognized command: {}", e) }))?;
                continue;
            }
        };
        if matches!(op, Op::Quit) {
            respond(&mut out, json!({ "ok": true }))?;
            break;
        }
        let reply = handle(&session, &studio, op).await;
        respond(&mut out, reply)?;
    }

    session.close().await?;
    Ok(())
}

fn respond(out: &mut impl Write, value: serde_json::Value) -> io::Result<()> {
    writeln!(out, "{}", value)?;
    out.flush()
}

async fn handle(session: &IntakeSession, studio: &Studio, op: Op) -> serde_json::Value {
    match run_op(session, studio, op).await {
        Ok(value) => value,
        Err(e) => json!({ "ok": false, "error": e.to_string() }),
    }
}

async fn run_op(
    session: &IntakeSession,
    studio: &Studio,
    op: Op,
) -> corruptink::Result<serde_json::Value> {
    use corruptink::Error;

    match op {
        Op::SetField { field, value } => {
            let field = TextField::from_key(&field)
                .ok_or_else(|| Error::DataError(format!("Unknown field: {}", field)))?;
            session.set_text(field, &value).await?;
            Ok(json!({ "ok": true }))
        }
        Op::SetDob { value } => {
            let dob = if value.trim().is_empty() {
                None
            } else {
                Some(
                    chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                        .map_err(|e| Error::DataError(format!("Bad date: {}", e)))?,
                )
            };
            session.set_date_of_birth(dob).await?;
            Ok(json!({ "ok": true }))
        }
        Op::SetClause { clause, agreed } => {
            let clause = Clause::from_key(&clause)
                .ok_or_else(|| Error::DataError(format!("Unknown clause: {}", clause)))?;
            session.set_clause(clause, agreed).await?;
            Ok(json!({ "ok": true }))
        }
        Op::CaptureId { side } => {
            let side = IdSide::from_key(&side)
                .ok_or_else(|| Error::DataError(format!("Unknown ID side: {}", side)))?;
            session.capture_id(side).await?;
            Ok(json!({ "ok": true }))
        }
        Op::Sign { data_url } => {
            let artifact = Artifact::from_data_url(&data_url)?;
            session.record_signature(artifact).await?;
            Ok(json!({ "ok": true }))
        }
        Op::ClearSignature => {
            session.clear_signature().await?;
            Ok(json!({ "ok": true }))
        }
        Op::Submit => {
            let ack = session.submit().await?;
            let value = match ack {
                corruptink::SubmitAck::Accepted => json!({ "ok": true, "result": "accepted" }),
                corruptink::SubmitAck::Ignored => json!({ "ok": true, "result": "ignored" }),
                corruptink::SubmitAck::Rejected(report) => {
                    json!({ "ok": true, "result": "rejected", "errors": errors_json(&report) })
                }
            };
            Ok(value)
        }
        Op::Status => {
            let status = session.status().await?;
            Ok(json!({
                "ok": true,
                "state": status.state,
                "errors": errors_json(&status.errors),
                "lastFailure": status.last_failure,
                "evidenceComplete": status.evidence_complete,
                "receipt": status.receipt.map(|r| r.reference),
                "fullName": status.record.full_name,
            }))
        }
        Op::Content => Ok(json!({
            "ok": true,
            "studio": studio.config().studio_name,
            "contact": studio.config().contact,
            "content": studio.content(),
        })),
        Op::Quit => Ok(json!({ "ok": true })),
    }
}

fn errors_json(report: &corruptink::intake::ValidationReport) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = report
        .iter()
        .map(|(id, msg)| (id.key().to_string(), serde_json::Value::from(msg)))
        .collect();
    serde_json::Value::Object(map)
}
