use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Outcome recorded for an outgoing email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationStatus {
    Sent,
    Failed,
}

impl CommunicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommunicationStatus::Sent => "sent",
            CommunicationStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommunicationRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub subject: String,
    pub body: String,
    pub sent_by: Option<Uuid>,
    pub status: Option<String>,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCommunication {
    pub candidate_id: Uuid,
    pub subject: String,
    pub body: String,
    pub sent_by: Option<Uuid>,
    pub status: CommunicationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_match_column_check() {
        assert_eq!(CommunicationStatus::Sent.as_str(), "sent");
        assert_eq!(CommunicationStatus::Failed.as_str(), "failed");
        assert_eq!(
            serde_json::to_value(CommunicationStatus::Failed).unwrap(),
            serde_json::json!("failed")
        );
    }
}
