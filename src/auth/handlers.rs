use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{error, instrument, warn};

use crate::{
    auth::{
        dto::{CredentialsRequest, TokenResponse},
        repo::RepositoryError,
        repo_types::UserResponse,
        services::AuthError,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

fn to_http(err: AuthError) -> (StatusCode, String) {
    match err {
        AuthError::Validation(e) => {
            warn!(error = %e, "validation failed");
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        e @ AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, e.to_string()),
        AuthError::Repository(RepositoryError::Conflict) => {
            (StatusCode::CONFLICT, "email already registered".into())
        }
        other => {
            error!(error = %other, "auth request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".into(),
            )
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserResponse>), (StatusCode, String)> {
    let user = state.auth.sign_up(payload.into()).await.map_err(to_http)?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, (StatusCode, String)> {
    let token = state.auth.login(payload.into()).await.map_err(to_http)?;
    Ok(Json(TokenResponse { token }))
}
