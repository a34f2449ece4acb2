use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use crate::models::{PaymentInfo, PaymentStatus, QuizAnswers, QuizSession, QuizSubmission};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// PostgreSQL store for quiz sessions
///
/// One row per session id holding the submitted answers and, once the
/// checkout webhook fires, the payment details.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Pool that only connects on first query
    ///
    /// Migrations are not run. Handlers that never reach the database work
    /// without a server behind the URL.
    pub fn connect_lazy(database_url: &str) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(Duration::from_secs(1))
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Store (or replace) the answers for a session
    ///
    /// Re-submitting keeps payment columns untouched.
    pub async fn store_submission(
        &self,
        session_id: &str,
        submission: &QuizSubmission,
    ) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO quiz_sessions (
                session_id, age_range, city, school, company, industry, experience_level, first_name
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (session_id) DO UPDATE SET
                age_range = EXCLUDED.age_range,
                city = EXCLUDED.city,
                school = EXCLUDED.school,
                company = EXCLUDED.company,
                industry = EXCLUDED.industry,
                experience_level = EXCLUDED.experience_level,
                first_name = EXCLUDED.first_name,
                updated_at = NOW()
        "#;

        let answers = &submission.answers;
        sqlx::query(query)
            .bind(session_id)
            .bind(&answers.age_range)
            .bind(&answers.city)
            .bind(&answers.school)
            .bind(&answers.company)
            .bind(&answers.industry)
            .bind(&answers.experience_level)
            .bind(&submission.first_name)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Stored quiz answers for session {}", session_id);

        Ok(())
    }

    /// Load a session, `None` when the id is unknown
    pub async fn get_session(&self, session_id: &str) -> Result<Option<QuizSession>, PostgresError> {
        let query = r#"
            SELECT session_id, age_range, city, school, company, industry,
                   experience_level, first_name, payment_status, created_at
            FROM quiz_sessions
            WHERE session_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| {
            let status: String = row.get("payment_status");
            QuizSession {
                session_id: row.get("session_id"),
                submission: QuizSubmission {
                    answers: QuizAnswers {
                        age_range: row.get("age_range"),
                        city: row.get("city"),
                        school: row.get("school"),
                        company: row.get("company"),
                        industry: row.get("industry"),
                        experience_level: row.get("experience_level"),
                    },
                    first_name: row.get("first_name"),
                },
                payment_status: PaymentStatus::parse(&status),
                created_at: row.get("created_at"),
            }
        }))
    }

    /// Record a completed payment
    ///
    /// Returns `false` when no session matched.
    pub async fn update_payment_info(
        &self,
        session_id: &str,
        info: &PaymentInfo,
    ) -> Result<bool, PostgresError> {
        let query = r#"
            UPDATE quiz_sessions
            SET
                email = $1,
                amount_cents = $2,
                payment_status = $3,
                checkout_session_id = $4,
                updated_at = NOW()
            WHERE session_id = $5
        "#;

        let result = sqlx::query(query)
            .bind(&info.email)
            .bind(info.amount_cents)
            .bind(PaymentStatus::Completed.as_str())
            .bind(&info.checkout_session_id)
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
