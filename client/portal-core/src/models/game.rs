use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub venue: Option<String>,
    pub scheduled_on: NaiveDate,
    #[serde(default)]
    pub winners: Vec<Winner>,
}

/// A placed winner of a game (first/second/third).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Winner {
    pub place: u8,
    pub member_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamePayload {
    pub name: String,
    #[serde(default)]
    pub venue: Option<String>,
    pub scheduled_on: NaiveDate,
    #[serde(default)]
    pub winners: Vec<Winner>,
}
