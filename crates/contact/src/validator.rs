use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Latin letters, whitespace, or anything in the Bengali block.
const NAME_PATTERN: &str = r"^[A-Za-z\s\x{0980}-\x{09FF}]+$";

/// Bangladeshi mobile number: `01`, an operator digit 3-9, then eight digits.
const PHONE_PATTERN: &str = r"^01[3-9][0-9]{8}$";

static NAME_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(NAME_PATTERN).ok());
static PHONE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(PHONE_PATTERN).ok());

fn is_match(re: &LazyLock<Option<Regex>>, text: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(text))
}

/// A contact field that can carry a failure indicator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldId {
    Name,
    Phone,
    Address,
}

impl FieldId {
    pub const ALL: [FieldId; 3] = [FieldId::Name, FieldId::Phone, FieldId::Address];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Phone => "phone",
            FieldId::Address => "address",
        }
    }
}

/// Raw contact text as typed by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl ContactInput {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    pub fn field(&self, field: FieldId) -> &str {
        match field {
            FieldId::Name => &self.name,
            FieldId::Phone => &self.phone,
            FieldId::Address => &self.address,
        }
    }
}

/// Outcome of validating all three fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    failures: BTreeSet<FieldId>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, field: FieldId) -> bool {
        self.failures.contains(&field)
    }

    pub fn failures(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.failures.iter().copied()
    }
}

fn field_is_valid(field: FieldId, value: &str) -> bool {
    match field {
        FieldId::Name => is_match(&NAME_RE, value),
        FieldId::Phone => is_match(&PHONE_RE, value),
        FieldId::Address => !value.is_empty(),
    }
}

/// Check every field (after trimming) and report all failures together.
pub fn validate(contact: &ContactInput) -> ValidationReport {
    let failures = FieldId::ALL
        .into_iter()
        .filter(|field| !field_is_valid(*field, contact.field(*field).trim()))
        .collect();
    ValidationReport { failures }
}
