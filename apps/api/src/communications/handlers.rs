//! Axum route handlers for candidate communications.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::communications::sender::{EmailSender, OutgoingEmail};
use crate::errors::AppError;
use crate::models::communication::{CommunicationRow, CommunicationStatus, NewCommunication};
use crate::state::AppState;
use crate::store::{candidates, communications};

#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    pub subject: String,
    pub body: String,
    /// Recruiter who sent the message, when known.
    #[serde(default)]
    pub sent_by: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub success: bool,
    pub status: CommunicationStatus,
    /// `None` when the message went out but could not be logged.
    pub communication: Option<CommunicationRow>,
}

/// GET /api/v1/candidates/:id/communications
pub async fn handle_list_communications(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<Vec<CommunicationRow>>, AppError> {
    Ok(Json(
        communications::list_communications(&state.db, candidate_id).await?,
    ))
}

/// POST /api/v1/candidates/:id/communications
///
/// Emails the candidate, then logs the attempt as `sent` or `failed`.
pub async fn handle_send_communication(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
    Json(request): Json<SendEmailRequest>,
) -> Result<(StatusCode, Json<SendEmailResponse>), AppError> {
    validate_message(&request)?;

    let candidate = candidates::get_candidate(&state.db, candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;
    if candidate.email.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(format!(
            "Candidate {candidate_id} has no email address"
        )));
    }

    let email = OutgoingEmail {
        to: candidate.email,
        candidate_name: candidate.full_name,
        subject: request.subject.trim().to_string(),
        body: request.body,
    };
    let status = deliver(state.mailer.as_ref(), &email).await?;

    let entry = NewCommunication {
        candidate_id,
        subject: email.subject,
        body: email.body,
        sent_by: request.sent_by,
        status,
    };
    let communication = match communications::log_communication(&state.db, &entry).await {
        Ok(row) => Some(row),
        Err(e) => {
            error!("Failed to log communication for candidate {candidate_id}: {e}");
            None
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(SendEmailResponse {
            success: status == CommunicationStatus::Sent,
            status,
            communication,
        }),
    ))
}

/// Sends through `mailer` and maps the report onto the logged status.
pub async fn deliver(
    mailer: &dyn EmailSender,
    email: &OutgoingEmail,
) -> Result<CommunicationStatus, AppError> {
    let report = mailer.send(email).await?;
    let status = if report.success {
        CommunicationStatus::Sent
    } else {
        CommunicationStatus::Failed
    };
    info!(
        "Email \"{}\" via {}: {}{}",
        email.subject,
        mailer.backend(),
        status.as_str(),
        report.message.map(|m| format!(" ({m})")).unwrap_or_default()
    );
    Ok(status)
}

fn validate_message(request: &SendEmailRequest) -> Result<(), AppError> {
    if request.subject.trim().is_empty() {
        return Err(AppError::Validation("subject cannot be empty".to_string()));
    }
    if request.body.trim().is_empty() {
        return Err(AppError::Validation("body cannot be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::communications::sender::DeliveryReport;
    use async_trait::async_trait;

    struct FixedSender(Result<bool, ()>);

    #[async_trait]
    impl EmailSender for FixedSender {
        async fn send(&self, _email: &OutgoingEmail) -> Result<DeliveryReport, AppError> {
            match self.0 {
                Ok(success) => Ok(DeliveryReport {
                    success,
                    message: None,
                }),
                Err(()) => Err(AppError::Email("connection refused".to_string())),
            }
        }

        fn backend(&self) -> &'static str {
            "fixed"
        }
    }

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            to: "omar@example.com".to_string(),
            candidate_name: "Omar Haddad".to_string(),
            subject: "Next steps".to_string(),
            body: "Thanks for your time today.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_delivered_email_is_logged_as_sent() {
        let status = deliver(&FixedSender(Ok(true)), &email()).await.unwrap();
        assert_eq!(status, CommunicationStatus::Sent);
    }

    #[tokio::test]
    async fn test_rejected_email_is_logged_as_failed() {
        let status = deliver(&FixedSender(Ok(false)), &email()).await.unwrap();
        assert_eq!(status, CommunicationStatus::Failed);
    }

    #[tokio::test]
    async fn test_unreachable_sender_is_an_error() {
        let err = deliver(&FixedSender(Err(())), &email()).await.unwrap_err();
        assert!(matches!(err, AppError::Email(_)));
    }

    #[test]
    fn test_blank_subject_or_body_is_rejected() {
        let blank_subject = SendEmailRequest {
            subject: "  ".to_string(),
            body: "Hello".to_string(),
            sent_by: None,
        };
        assert!(validate_message(&blank_subject).is_err());

        let blank_body = SendEmailRequest {
            subject: "Hello".to_string(),
            body: "\n".to_string(),
            sent_by: None,
        };
        assert!(validate_message(&blank_body).is_err());
    }
}
