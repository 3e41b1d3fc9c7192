use std::sync::Arc;

use axum::extract::State;
use axum::response::Redirect;
use axum::Json;
use bcrypt::{hash, verify, DEFAULT_COST};

use crate::db::AppState;
use crate::error::ApiError;
use crate::models::user::{LoginRequest, SignupRequest, User};

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<Redirect, ApiError> {
    let SignupRequest {
        username,
        email,
        password,
    } = payload;

    if state.user_repo.find_by_email(&email).await?.is_some() {
        return Err(ApiError::BadRequest("User already exists".into()));
    }

    // bcrypt is CPU-bound.
    let hashed = tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST)).await??;

    state
        .user_repo
        .create(User {
            id: None,
            username,
            email,
            password: hashed,
        })
        .await?;

    Ok(Redirect::to("/"))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Redirect, ApiError> {
    // Unknown email and wrong password must be indistinguishable.
    let Some(user) = state.user_repo.find_by_email(&payload.email).await? else {
        return Err(ApiError::Unauthorized);
    };

    let valid = tokio::task::spawn_blocking(move || {
        verify(payload.password, &user.password).unwrap_or(false)
    })
    .await?;

    if !valid {
        return Err(ApiError::Unauthorized);
    }

    Ok(Redirect::to("/home.html"))
}

#[cfg(test)]
mod tests {
    use bcrypt::{hash, verify};

    // DEFAULT_COST takes ~100ms per hash; the minimum cost keeps tests fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn hash_and_verify_round_trip() {
        let hashed = hash("correct-horse-battery-staple", TEST_COST).unwrap();

        assert!(hashed.starts_with("$2"), "expected a bcrypt hash");
        assert!(verify("correct-horse-battery-staple", &hashed).unwrap());
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hashed = hash("real-password", TEST_COST).unwrap();
        assert!(!verify("wrong-password", &hashed).unwrap());
    }
}
