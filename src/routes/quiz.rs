use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::scoring::compute_result;
use crate::models::{
    ErrorResponse, HealthResponse, QuizAnswers, QuizDataResponse, SessionQuery, SessionResult,
    SessionResultResponse, SharePayload, SubmitQuizRequest, SubmitQuizResponse,
};
use crate::routes::AppState;

/// Register the stateless scoring route
///
/// Split out so the engine can be served without a database.
pub fn configure_scoring(cfg: &mut web::ServiceConfig) {
    cfg.route("/score", web::post().to(score));
}

/// Configure all quiz routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/search", web::post().to(submit_quiz))
        .route("/get-quiz-data", web::get().to(get_quiz_data))
        .route("/result", web::get().to(get_result))
        .configure(configure_scoring);
}

/// New opaque session identifier, `session-<millis>-<9 hex chars>`
pub fn new_session_id() -> String {
    let suffix: String = uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(9)
        .collect();
    format!("session-{}-{}", chrono::Utc::now().timestamp_millis(), suffix)
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score answers directly
///
/// POST /api/score
///
/// Any JSON object is accepted; unknown or missing fields simply do not
/// adjust the score.
async fn score(answers: web::Json<QuizAnswers>) -> impl Responder {
    HttpResponse::Ok().json(compute_result(&answers))
}

/// Submit quiz answers and open a session
///
/// POST /api/search
///
/// Request body:
/// ```json
/// {
///   "ageRange": "18-24",
///   "city": "Nashville",
///   "school": "Belmont",
///   "company": "Republic Records",
///   "industry": "music",
///   "experienceLevel": "3-5",
///   "firstName": "Sam"
/// }
/// ```
async fn submit_quiz(
    state: web::Data<AppState>,
    req: web::Json<SubmitQuizRequest>,
) -> impl Responder {
    let req = req.into_inner();

    let missing = req.missing_required_fields();
    if !missing.is_empty() {
        tracing::info!("Quiz submission missing fields: {:?}", missing);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            format!("Missing required fields: {}", missing.join(", ")),
            400,
        ));
    }

    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
            400,
        ));
    }

    let session_id = new_session_id();
    let submission = req.into_submission();

    // Persistence is best-effort; the client still gets a session to continue with
    match state.postgres.store_submission(&session_id, &submission).await {
        Ok(()) => tracing::info!("Quiz data stored for session: {}", session_id),
        Err(e) => tracing::error!("Error storing quiz data for {}: {}", session_id, e),
    }

    HttpResponse::Ok().json(SubmitQuizResponse {
        session_id,
        message: "Search initiated successfully".to_string(),
    })
}

fn missing_session_id() -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(
        "Missing sessionId parameter",
        "Session ID is required",
        400,
    ))
}

fn session_not_found(session_id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "Quiz data not found",
        format!("No quiz data for session {}", session_id),
        404,
    ))
}

/// Stored answers for a session
///
/// GET /api/get-quiz-data?sessionId={sessionId}
async fn get_quiz_data(
    state: web::Data<AppState>,
    query: web::Query<SessionQuery>,
) -> impl Responder {
    let Some(session_id) = query.session_id.as_deref().filter(|id| !id.is_empty()) else {
        return missing_session_id();
    };

    match state.postgres.get_session(session_id).await {
        Ok(Some(session)) => HttpResponse::Ok().json(QuizDataResponse::from(session)),
        Ok(None) => session_not_found(session_id),
        Err(e) => {
            tracing::error!("Error fetching quiz data for {}: {}", session_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to fetch quiz data",
                e.to_string(),
                500,
            ))
        }
    }
}

/// Connection result for a stored session
///
/// GET /api/result?sessionId={sessionId}
async fn get_result(
    state: web::Data<AppState>,
    query: web::Query<SessionQuery>,
) -> impl Responder {
    let Some(session_id) = query.session_id.as_deref().filter(|id| !id.is_empty()) else {
        return missing_session_id();
    };

    let cached = match &state.cache {
        Some(cache) => cache.get_result(session_id).await.unwrap_or_else(|e| {
            tracing::warn!("Result cache lookup failed for {}: {}", session_id, e);
            None
        }),
        None => None,
    };

    let session_result = match cached {
        Some(hit) => hit,
        None => {
            let session = match state.postgres.get_session(session_id).await {
                Ok(Some(session)) => session,
                Ok(None) => return session_not_found(session_id),
                Err(e) => {
                    tracing::error!("Error fetching quiz data for {}: {}", session_id, e);
                    return HttpResponse::InternalServerError().json(ErrorResponse::new(
                        "Failed to fetch quiz data",
                        e.to_string(),
                        500,
                    ));
                }
            };

            let computed = SessionResult {
                result: compute_result(&session.submission.answers),
                first_name: session.submission.first_name,
            };

            if let Some(cache) = &state.cache {
                if let Err(e) = cache.set_result(session_id, &computed).await {
                    tracing::warn!("Failed to cache result for {}: {}", session_id, e);
                }
            }

            computed
        }
    };

    tracing::debug!(
        "Result for {}: {} connections ({})",
        session_id,
        session_result.result.connections,
        session_result.result.rarity
    );

    let first_name = session_result.first_name.as_deref();
    let share = SharePayload {
        title: state.share.title(&session_result.result, first_name),
        caption: state.share.caption(&session_result.result, first_name),
        rarity_message: state.share.rarity_message(&session_result.result, first_name),
        file_name: state.share.file_name(first_name, session_result.result.connections),
    };

    HttpResponse::Ok().json(SessionResultResponse {
        session_id: session_id.to_string(),
        first_name: session_result.first_name.clone(),
        result: session_result.result,
        share,
    })
}
