//! Submission validation
//!
//! A pure pass over the current record, acknowledgements, and evidence.
//! Every rule is evaluated independently so one submission attempt surfaces
//! every problem at once; nothing here mutates state or performs I/O.
//!
//! Age is checked against a cutoff date: a client is old enough exactly when
//! their date of birth falls on or before today shifted back eighteen years.
//! All comparisons are calendar-date only, so time-of-day can never shift
//! the result within a day.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::consent::AcknowledgementSet;
use super::evidence::EvidenceBundle;
use super::fields::ClientRecord;

/// Minimum client age, in whole years.
pub const MINIMUM_AGE_YEARS: i32 = 18;

/// Identifies a field or form section an error message attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldId {
    FullName,
    DateOfBirth,
    Phone,
    Email,
    TattooDescription,
    TattooPlacement,
    /// Combined key for the ID front/back pair
    Identification,
    /// Combined key for the whole acknowledgement section
    Consents,
    Signature,
}

impl FieldId {
    pub fn key(self) -> &'static str {
        match self {
            FieldId::FullName => "fullName",
            FieldId::DateOfBirth => "dateOfBirth",
            FieldId::Phone => "phone",
            FieldId::Email => "email",
            FieldId::TattooDescription => "tattooDescription",
            FieldId::TattooPlacement => "tattooPlacement",
            FieldId::Identification => "identification",
            FieldId::Consents => "consents",
            FieldId::Signature => "signature",
        }
    }
}

/// Field identifier to human-readable message. An empty report means the
/// record is submittable. Recomputed on every submission attempt, never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<FieldId, String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message(&self, id: FieldId) -> Option<&str> {
        self.errors.get(&id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.errors.iter().map(|(id, msg)| (*id, msg.as_str()))
    }

    fn flag(&mut self, id: FieldId, message: impl Into<String>) {
        self.errors.insert(id, message.into());
    }
}

/// Whole-year age with month/day boundary correction: the year difference,
/// minus one if today has not yet reached the birthday's month/day.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years
}

/// Latest date of birth that still counts as of age today. A Feb 29 cutoff
/// that lands in a non-leap year clamps to Feb 28.
pub fn adult_cutoff(today: NaiveDate) -> NaiveDate {
    let year = today.year() - MINIMUM_AGE_YEARS;
    match NaiveDate::from_ymd_opt(year, today.month(), today.day()) {
        Some(date) => date,
        None => NaiveDate::from_ymd_opt(year, 2, 28).unwrap_or(today),
    }
}

fn email_shape_ok(email: &str) -> bool {
    // local@domain.tld shape, nothing close to full RFC validation
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Run every rule against the current form state as of `today`.
pub fn validate(
    record: &ClientRecord,
    consents: &AcknowledgementSet,
    evidence: &EvidenceBundle,
    today: NaiveDate,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    if record.full_name.trim().is_empty() {
        report.flag(FieldId::FullName, "Full name is required.");
    }

    match record.date_of_birth {
        None => report.flag(FieldId::DateOfBirth, "Date of birth is required."),
        Some(dob) => {
            if dob > adult_cutoff(today) {
                report.flag(
                    FieldId::DateOfBirth,
                    format!("You must be at least {} years old.", MINIMUM_AGE_YEARS),
                );
            }
        }
    }

    if record.email.trim().is_empty() {
        report.flag(FieldId::Email, "Email address is required.");
    } else if !email_shape_ok(record.email.trim()) {
        report.flag(FieldId::Email, "Enter a valid email address.");
    }

    if record.phone.trim().is_empty() {
        report.flag(FieldId::Phone, "Phone number is required.");
    }

    if !evidence.has_both_ids() {
        report.flag(
            FieldId::Identification,
            "Photos of the front and back of your ID are required.",
        );
    }

    if record.tattoo_description.trim().is_empty() {
        report.flag(
            FieldId::TattooDescription,
            "Describe the tattoo you are getting.",
        );
    }

    if record.tattoo_placement.trim().is_empty() {
        report.flag(FieldId::TattooPlacement, "Tattoo placement is required.");
    }

    if !consents.all_acknowledged() {
        report.flag(
            FieldId::Consents,
            "Every acknowledgement must be accepted before you can submit.",
        );
    }

    if evidence.signature().is_none() {
        report.flag(FieldId::Signature, "Your signature is required.");
    }

    report
}
