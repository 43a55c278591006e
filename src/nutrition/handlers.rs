use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{error, instrument, warn};

use super::dto::{CaloriesResponse, GetCaloriesRequest};
use super::service::LookupError;
use super::source::SourceError;
use crate::{auth::services::AuthUser, state::AppState};

pub fn calories_routes() -> Router<AppState> {
    Router::new().route("/get-calories", post(get_calories))
}

#[instrument(skip(state, payload))]
pub async fn get_calories(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<GetCaloriesRequest>,
) -> Result<Json<CaloriesResponse>, (StatusCode, String)> {
    state
        .calories
        .lookup(&payload.dish_name, payload.servings)
        .await
        .map(|result| Json(result.into()))
        .map_err(into_status)
}

fn into_status(e: LookupError) -> (StatusCode, String) {
    match e {
        LookupError::EmptyDishName | LookupError::InvalidServings(_) => {
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        LookupError::NotFound => (
            StatusCode::NOT_FOUND,
            "No foods found for this dish. Try a different name.".into(),
        ),
        LookupError::NoMatch => (
            StatusCode::NOT_FOUND,
            "Could not match this dish to a known food. Try a different name.".into(),
        ),
        LookupError::CaloriesUnavailable => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "Calorie information is not available for this dish.".into(),
        ),
        LookupError::Source(SourceError::RateLimited) => {
            warn!("nutrition database rate limited");
            (
                StatusCode::TOO_MANY_REQUESTS,
                "Nutrition service is busy, please try again later.".into(),
            )
        }
        LookupError::Source(SourceError::Unauthorized) => {
            error!("nutrition database api key rejected; check USDA_API_KEY");
            (
                StatusCode::BAD_GATEWAY,
                "Nutrition service is misconfigured.".into(),
            )
        }
        LookupError::Source(SourceError::Transient(msg)) => {
            error!(error = %msg, "nutrition database request failed");
            (
                StatusCode::BAD_GATEWAY,
                "Failed to fetch nutrition data.".into(),
            )
        }
    }
}
