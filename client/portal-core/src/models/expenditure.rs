use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expenditure {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub spent_on: NaiveDate,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenditurePayload {
    pub description: String,
    pub amount: f64,
    pub spent_on: NaiveDate,
    #[serde(default)]
    pub category: Option<String>,
}
