use serde::{Deserialize, Serialize};

/// A media memory (photo with caption) from past events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub year: i32,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryPayload {
    pub title: String,
    pub image: String,
    pub year: i32,
    #[serde(default)]
    pub caption: Option<String>,
}
