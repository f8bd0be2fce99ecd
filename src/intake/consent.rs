//! Consent and release acknowledgements
//!
//! The release form carries a fixed set of seven clauses. Every one of them
//! must be accepted before a submission can proceed; none can be added or
//! removed at runtime.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One named acknowledgement on the release form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Clause {
    AgeAttestation,
    SobrietyAttestation,
    MedicalDisclosure,
    DesignVariation,
    Permanence,
    AftercareReceipt,
    LiabilityRelease,
}

impl Clause {
    pub const ALL: [Clause; 7] = [
        Clause::AgeAttestation,
        Clause::SobrietyAttestation,
        Clause::MedicalDisclosure,
        Clause::DesignVariation,
        Clause::Permanence,
        Clause::AftercareReceipt,
        Clause::LiabilityRelease,
    ];

    /// Wire key, matching the serde rename.
    pub fn key(self) -> &'static str {
        match self {
            Clause::AgeAttestation => "ageAttestation",
            Clause::SobrietyAttestation => "sobrietyAttestation",
            Clause::MedicalDisclosure => "medicalDisclosure",
            Clause::DesignVariation => "designVariation",
            Clause::Permanence => "permanence",
            Clause::AftercareReceipt => "aftercareReceipt",
            Clause::LiabilityRelease => "liabilityRelease",
        }
    }

    pub fn from_key(key: &str) -> Option<Clause> {
        Clause::ALL.into_iter().find(|c| c.key() == key)
    }

    /// The fixed prompt shown next to the checkbox.
    pub fn prompt(self) -> &'static str {
        match self {
            Clause::AgeAttestation => "I confirm that I am at least 18 years of age.",
            Clause::SobrietyAttestation => {
                "I am not under the influence of alcohol or drugs."
            }
            Clause::MedicalDisclosure => {
                "I have disclosed all medical conditions that could affect this procedure."
            }
            Clause::DesignVariation => {
                "I understand the finished tattoo may vary slightly from the approved design."
            }
            Clause::Permanence => "I understand that a tattoo is a permanent change to my skin.",
            Clause::AftercareReceipt => {
                "I have received and understood the aftercare instructions."
            }
            Clause::LiabilityRelease => {
                "I release Corrupt Ink and its artists from liability arising from this procedure."
            }
        }
    }

    fn index(self) -> usize {
        Clause::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

/// The current accept/decline state of all seven clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcknowledgementSet {
    agreed: [bool; 7],
}

impl AcknowledgementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a single clause.
    pub fn set_clause(&mut self, clause: Clause, agreed: bool) {
        self.agreed[clause.index()] = agreed;
    }

    pub fn is_acknowledged(&self, clause: Clause) -> bool {
        self.agreed[clause.index()]
    }

    /// True only when every clause has been accepted.
    pub fn all_acknowledged(&self) -> bool {
        self.agreed.iter().all(|a| *a)
    }

    /// Accept every clause at once.
    pub fn acknowledge_all(&mut self) {
        self.agreed = [true; 7];
    }

    /// Snapshot keyed by wire name, as carried in the submission payload.
    pub fn as_map(&self) -> BTreeMap<String, bool> {
        Clause::ALL
            .into_iter()
            .map(|c| (c.key().to_string(), self.is_acknowledged(c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_fully_declined() {
        let set = AcknowledgementSet::new();
        assert!(!set.all_acknowledged());
        for clause in Clause::ALL {
            assert!(!set.is_acknowledged(clause));
        }
    }

    #[test]
    fn all_acknowledged_requires_every_clause() {
        let mut set = AcknowledgementSet::new();
        for clause in Clause::ALL {
            set.set_clause(clause, true);
        }
        assert!(set.all_acknowledged());

        // Withdrawing any single clause breaks the conjunction
        for clause in Clause::ALL {
            set.set_clause(clause, false);
            assert!(!set.all_acknowledged());
            set.set_clause(clause, true);
        }
    }

    #[test]
    fn map_snapshot_covers_all_seven_keys() {
        let mut set = AcknowledgementSet::new();
        set.set_clause(Clause::Permanence, true);
        let map = set.as_map();
        assert_eq!(map.len(), 7);
        assert_eq!(map["permanence"], true);
        assert_eq!(map["liabilityRelease"], false);
    }

    #[test]
    fn clause_keys_round_trip() {
        for clause in Clause::ALL {
            assert_eq!(Clause::from_key(clause.key()), Some(clause));
            assert!(!clause.prompt().is_empty());
        }
    }
}
