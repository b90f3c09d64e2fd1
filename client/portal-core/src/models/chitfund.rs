use serde::{Deserialize, Serialize};

/// One row of the chit-fund ledger: a member's position for a given month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChitFundEntry {
    pub id: i64,
    pub member_name: String,
    /// Ledger month as "YYYY-MM".
    pub month: String,
    pub amount_paid: f64,
    pub amount_due: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChitFundPayload {
    pub member_name: String,
    pub month: String,
    pub amount_paid: f64,
    pub amount_due: f64,
}
