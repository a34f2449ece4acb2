// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{QuizAnswers, ConnectionResult, QuizSubmission, QuizSession, PaymentStatus, PaymentInfo, SessionResult};
pub use requests::{SubmitQuizRequest, CreateCheckoutRequest, SessionQuery};
pub use responses::{SubmitQuizResponse, QuizDataResponse, SessionResultResponse, SharePayload, CheckoutResponse, WebhookAck, HealthResponse, ErrorResponse};
