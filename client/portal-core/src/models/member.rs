use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Permanent member of the association roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermanentMember {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub house_name: Option<String>,
    pub joined_year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermanentMemberPayload {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub house_name: Option<String>,
    pub joined_year: i32,
}

/// Temporary member, valid only for a bounded period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporaryMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporaryMemberPayload {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
}

/// Junior member, listed under a guardian.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JuniorMember {
    pub id: i64,
    pub name: String,
    pub guardian_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JuniorMemberPayload {
    pub name: String,
    pub guardian_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}
