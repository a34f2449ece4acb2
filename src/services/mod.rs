// Service exports
pub mod cache;
pub mod checkout;
pub mod postgres;

pub use cache::{ResultCache, CacheError};
pub use checkout::{CheckoutClient, CheckoutProduct, CheckoutSession, CheckoutError, WebhookEvent, WebhookOutcome, interpret_event};
pub use postgres::{PostgresClient, PostgresError};
