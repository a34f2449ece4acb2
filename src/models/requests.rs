use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::core::pricing::AmountInput;
use crate::models::domain::{QuizAnswers, QuizSubmission};

/// Quiz submission posted when the quiz completes
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    #[validate(length(max = 50))]
    #[serde(alias = "age_range", rename = "ageRange", default)]
    pub age_range: Option<String>,
    #[validate(length(max = 255))]
    #[serde(default)]
    pub city: Option<String>,
    #[validate(length(max = 255))]
    #[serde(default)]
    pub school: Option<String>,
    #[validate(length(max = 255))]
    #[serde(default)]
    pub company: Option<String>,
    #[validate(length(max = 255))]
    #[serde(default)]
    pub industry: Option<String>,
    #[validate(length(max = 50))]
    #[serde(alias = "experience_level", rename = "experienceLevel", default)]
    pub experience_level: Option<String>,
    #[validate(length(max = 255))]
    #[serde(alias = "first_name", rename = "firstName", default)]
    pub first_name: Option<String>,
}

impl SubmitQuizRequest {
    /// Wire names of required fields that are absent or empty, in form order
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("ageRange", &self.age_range),
            ("city", &self.city),
            ("school", &self.school),
            ("industry", &self.industry),
            ("experienceLevel", &self.experience_level),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }

    pub fn into_submission(self) -> QuizSubmission {
        QuizSubmission {
            answers: QuizAnswers {
                age_range: self.age_range,
                city: self.city,
                school: self.school,
                company: self.company,
                industry: self.industry,
                experience_level: self.experience_level,
            },
            first_name: self.first_name,
        }
    }
}

/// Request to start a paid checkout
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCheckoutRequest {
    pub amount: AmountInput,
    #[validate(length(min = 1, max = 255))]
    #[serde(alias = "session_id", rename = "sessionId")]
    pub session_id: String,
}

/// `?sessionId=` query used by the lookup endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionQuery {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_fields_lists_in_order() {
        let req = SubmitQuizRequest {
            city: Some("Boise".to_string()),
            industry: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            req.missing_required_fields(),
            vec!["ageRange", "school", "industry", "experienceLevel"]
        );
    }

    #[test]
    fn test_company_is_optional() {
        let req = SubmitQuizRequest {
            age_range: Some("25-34".to_string()),
            city: Some("Boise".to_string()),
            school: Some("Boise State".to_string()),
            industry: Some("tech".to_string()),
            experience_level: Some("3-5".to_string()),
            ..Default::default()
        };
        assert!(req.missing_required_fields().is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_overlong_field_fails_validation() {
        let req = SubmitQuizRequest {
            city: Some("x".repeat(256)),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_into_submission_keeps_first_name() {
        let req = SubmitQuizRequest {
            city: Some("Nashville".to_string()),
            first_name: Some("Sam".to_string()),
            ..Default::default()
        };
        let submission = req.into_submission();
        assert_eq!(submission.answers.city(), "Nashville");
        assert_eq!(submission.first_name.as_deref(), Some("Sam"));
    }
}
