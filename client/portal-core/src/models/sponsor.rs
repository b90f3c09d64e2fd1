use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sponsor {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub year: i32,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SponsorPayload {
    pub name: String,
    pub amount: f64,
    pub year: i32,
    #[serde(default)]
    pub logo: Option<String>,
}
