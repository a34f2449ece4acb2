use serde::{Deserialize, Serialize};

/// Quiz answers fed into the scoring engine
///
/// Every field is optional; a missing field scores exactly like an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswers {
    #[serde(rename = "ageRange", default)]
    pub age_range: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(rename = "experienceLevel", default)]
    pub experience_level: Option<String>,
}

impl QuizAnswers {
    pub fn age_range(&self) -> &str {
        self.age_range.as_deref().unwrap_or("")
    }

    pub fn city(&self) -> &str {
        self.city.as_deref().unwrap_or("")
    }

    pub fn school(&self) -> &str {
        self.school.as_deref().unwrap_or("")
    }

    pub fn company(&self) -> &str {
        self.company.as_deref().unwrap_or("")
    }

    pub fn industry(&self) -> &str {
        self.industry.as_deref().unwrap_or("")
    }

    pub fn experience_level(&self) -> &str {
        self.experience_level.as_deref().unwrap_or("")
    }

    /// Key hashed for the per-answer-set variation
    ///
    /// Raw values (not lowercased) joined with `-` in a fixed field order.
    pub fn variation_key(&self) -> String {
        [
            self.city(),
            self.school(),
            self.company(),
            self.industry(),
            self.age_range(),
            self.experience_level(),
        ]
        .join("-")
    }
}

/// Output of the scoring engine
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionResult {
    /// Always within 2..=6
    pub connections: u8,
    /// One decimal place followed by `%`, e.g. `"6.0%"`
    pub rarity: String,
}

/// A full quiz submission as stored per session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSubmission {
    #[serde(flatten)]
    pub answers: QuizAnswers,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
}

/// Payment lifecycle of a quiz session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
        }
    }

    /// Unknown values are treated as pending
    pub fn parse(value: &str) -> Self {
        match value {
            "completed" => PaymentStatus::Completed,
            _ => PaymentStatus::Pending,
        }
    }
}

/// Stored quiz session row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(flatten)]
    pub submission: QuizSubmission,
    #[serde(rename = "paymentStatus")]
    pub payment_status: PaymentStatus,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Payment details recorded once checkout completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub email: String,
    pub amount_cents: i64,
    pub checkout_session_id: String,
}

/// Cached per-session result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(flatten)]
    pub result: ConnectionResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_read_as_empty() {
        let answers = QuizAnswers::default();
        assert_eq!(answers.city(), "");
        assert_eq!(answers.experience_level(), "");
        assert_eq!(answers.variation_key(), "-----");
    }

    #[test]
    fn test_variation_key_field_order() {
        let answers = QuizAnswers {
            age_range: Some("18-24".to_string()),
            city: Some("Austin".to_string()),
            school: Some("UT".to_string()),
            company: Some("Dell".to_string()),
            industry: Some("tech".to_string()),
            experience_level: Some("3-5".to_string()),
        };
        assert_eq!(answers.variation_key(), "Austin-UT-Dell-tech-18-24-3-5");
    }

    #[test]
    fn test_answers_deserialize_camel_case() {
        let answers: QuizAnswers =
            serde_json::from_str(r#"{"ageRange":"45+","experienceLevel":"10+"}"#).unwrap();
        assert_eq!(answers.age_range(), "45+");
        assert_eq!(answers.experience_level(), "10+");
        assert_eq!(answers.city, None);
    }

    #[test]
    fn test_payment_status_parse() {
        assert_eq!(PaymentStatus::parse("completed"), PaymentStatus::Completed);
        assert_eq!(PaymentStatus::parse("pending"), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::parse("refunded"), PaymentStatus::Pending);
    }
}
