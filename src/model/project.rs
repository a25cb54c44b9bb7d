use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A client site whose content is being planned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub created_at: Timestamp,
}
