//! Free-typed intake fields
//!
//! The field store holds exactly what the client typed. Nothing is
//! normalized or validated at write time; transiently invalid values are
//! expected while the form is being filled in, and every rule is applied at
//! submission instead.

use chrono::NaiveDate;

/// The five free-text intake fields. The date of birth is stored separately
/// as a real date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TextField {
    FullName,
    Phone,
    Email,
    TattooDescription,
    TattooPlacement,
}

impl TextField {
    pub const ALL: [TextField; 5] = [
        TextField::FullName,
        TextField::Phone,
        TextField::Email,
        TextField::TattooDescription,
        TextField::TattooPlacement,
    ];

    /// Wire/driver key for the field.
    pub fn key(self) -> &'static str {
        match self {
            TextField::FullName => "fullName",
            TextField::Phone => "phone",
            TextField::Email => "email",
            TextField::TattooDescription => "tattooDescription",
            TextField::TattooPlacement => "tattooPlacement",
        }
    }

    pub fn from_key(key: &str) -> Option<TextField> {
        TextField::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// The in-progress intake record for one client session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientRecord {
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: String,
    pub email: String,
    pub tattoo_description: String,
    pub tattoo_placement: String,
}

impl ClientRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a text field with whatever was typed.
    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let value = value.into();
        match field {
            TextField::FullName => self.full_name = value,
            TextField::Phone => self.phone = value,
            TextField::Email => self.email = value,
            TextField::TattooDescription => self.tattoo_description = value,
            TextField::TattooPlacement => self.tattoo_placement = value,
        }
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::FullName => &self.full_name,
            TextField::Phone => &self.phone,
            TextField::Email => &self.email,
            TextField::TattooDescription => &self.tattoo_description,
            TextField::TattooPlacement => &self.tattoo_placement,
        }
    }

    /// Overwrite the date of birth; `None` clears it.
    pub fn set_date_of_birth(&mut self, dob: Option<NaiveDate>) {
        self.date_of_birth = dob;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_keep_last_written_value_verbatim() {
        let mut record = ClientRecord::new();
        for field in TextField::ALL {
            record.set_text(field, "  first ");
            record.set_text(field, " LAST value ");
            // No trimming, casing, or other normalization applied
            assert_eq!(record.text(field), " LAST value ");
        }
    }

    #[test]
    fn date_of_birth_can_be_set_and_cleared() {
        let mut record = ClientRecord::new();
        assert_eq!(record.date_of_birth, None);
        let dob = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        record.set_date_of_birth(Some(dob));
        assert_eq!(record.date_of_birth, Some(dob));
        record.set_date_of_birth(None);
        assert_eq!(record.date_of_birth, None);
    }

    #[test]
    fn field_keys_round_trip() {
        for field in TextField::ALL {
            assert_eq!(TextField::from_key(field.key()), Some(field));
        }
        assert_eq!(TextField::from_key("nope"), None);
    }
}
