//! Record data model.
//!
//! A [`Record`] is what the remote collection stores and returns. The form
//! edits a [`Draft`], which never carries an identifier, and sends it as a
//! [`RecordPayload`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned record identifier.
///
/// The collection may hand out numeric or string ids; both are kept as-is
/// and compared by exact value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Gender radio selection. Anything the server sends other than
/// `"male"` or `"female"` reads as unset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    #[default]
    Unset,
    Male,
    Female,
}

impl Gender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Next radio option, used by Left/Right and Space in the form.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Unset | Self::Female => Self::Male,
            Self::Male => Self::Female,
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        match value.as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Unset,
        }
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted record as returned by the collection.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub gender: Gender,
    /// Servers that store the request body verbatim hand this back as
    /// `marital`.
    #[serde(default, alias = "marital")]
    pub is_married: bool,
    #[serde(default)]
    pub address: String,
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("gender", &self.gender)
            .field("is_married", &self.is_married)
            .field("address", &self.address)
            .finish()
    }
}

/// Local form state for one record, without an id.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub gender: Gender,
    pub is_married: bool,
    pub address: String,
}

impl Draft {
    /// True when every field holds its blank default.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    pub fn to_payload(&self) -> RecordPayload {
        RecordPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            gender: self.gender,
            marital: self.is_married,
            address: self.address.clone(),
        }
    }
}

impl From<&Record> for Draft {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            password: record.password.clone(),
            gender: record.gender,
            is_married: record.is_married,
            address: record.address.clone(),
        }
    }
}

impl fmt::Debug for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draft")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("gender", &self.gender)
            .field("is_married", &self.is_married)
            .field("address", &self.address)
            .finish()
    }
}

/// Body of create and update requests.
///
/// The marital flag travels as `marital`, not `is_married`; the collection
/// is expected to map it.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RecordPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub gender: Gender,
    pub marital: bool,
    pub address: String,
}
