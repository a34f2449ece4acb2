use serde::{Deserialize, Serialize};
use crate::models::domain::{ConnectionResult, PaymentStatus, QuizSession};

/// Response for the quiz submission endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitQuizResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub message: String,
}

/// Stored quiz row for a session
///
/// Keys mirror the `quiz_sessions` columns (`age_range`, `experience_level`,
/// ...), which is what result pages read back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizDataResponse {
    pub session_id: String,
    pub age_range: Option<String>,
    pub city: Option<String>,
    pub school: Option<String>,
    pub company: Option<String>,
    pub industry: Option<String>,
    pub experience_level: Option<String>,
    pub first_name: Option<String>,
    pub payment_status: PaymentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<QuizSession> for QuizDataResponse {
    fn from(session: QuizSession) -> Self {
        let answers = session.submission.answers;
        Self {
            session_id: session.session_id,
            age_range: answers.age_range,
            city: answers.city,
            school: answers.school,
            company: answers.company,
            industry: answers.industry,
            experience_level: answers.experience_level,
            first_name: session.submission.first_name,
            payment_status: session.payment_status,
            created_at: session.created_at,
        }
    }
}

/// Share copy rendered alongside a result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharePayload {
    pub title: String,
    pub caption: String,
    #[serde(rename = "rarityMessage")]
    pub rarity_message: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
}

/// Computed result for a stored session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResultResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(flatten)]
    pub result: ConnectionResult,
    pub share: SharePayload,
}

/// Checkout redirect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    #[serde(rename = "checkoutUrl")]
    pub checkout_url: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Webhook acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuizAnswers, QuizSubmission};

    #[test]
    fn test_quiz_data_uses_column_names() {
        let session = QuizSession {
            session_id: "session-1-abc".to_string(),
            submission: QuizSubmission {
                answers: QuizAnswers {
                    age_range: Some("18-24".to_string()),
                    city: Some("Nashville".to_string()),
                    experience_level: Some("10+".to_string()),
                    ..Default::default()
                },
                first_name: Some("Sam".to_string()),
            },
            payment_status: PaymentStatus::Pending,
            created_at: chrono::Utc::now(),
        };

        let value = serde_json::to_value(QuizDataResponse::from(session)).unwrap();

        assert_eq!(value["session_id"], "session-1-abc");
        assert_eq!(value["age_range"], "18-24");
        assert_eq!(value["experience_level"], "10+");
        assert_eq!(value["first_name"], "Sam");
        assert_eq!(value["payment_status"], "pending");
        assert!(value["school"].is_null());
        assert!(value.get("created_at").is_some());
        assert!(value.get("ageRange").is_none());
        assert!(value.get("experienceLevel").is_none());
    }

    #[test]
    fn test_checkout_response_omits_empty_message() {
        let value = serde_json::to_value(CheckoutResponse {
            checkout_url: "https://checkout.example.com/pay/cs_1".to_string(),
            session_id: "cs_1".to_string(),
            message: None,
        })
        .unwrap();

        assert_eq!(value["checkoutUrl"], "https://checkout.example.com/pay/cs_1");
        assert!(value.get("message").is_none());
    }
}
