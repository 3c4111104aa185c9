//! HTTP handlers for the session and catalog endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use super::cookies::{REFRESH_COOKIE, clear_session_cookies, cookie_value, set_session_cookies};
use super::error::AppError;
use super::middleware::SessionIdentity;
use super::routes::AppState;
use crate::actions::{
    AddMovieAction, GetMovieAction, GetUserAction, ListGenresAction, ListMoviesAction,
    LoginAction, LogoutAction, RecommendMoviesAction, RefreshTokenAction, Registration,
    SignupAction, UpdateReviewAction, UpdateRoleAction,
};
use crate::api::{
    LoginRequest, LogoutRequest, MessageResponse, RegisterRequest, ReviewResponse,
    UpdateReviewRequest, UpdateRoleRequest, UserResponse,
};
use crate::{AuthError, Genre, Movie, Role, UserRepository};

/// Register a new user.
///
/// POST /register
pub async fn register<U>(
    State(state): State<AppState<U>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError>
where
    U: UserRepository + 'static,
{
    let action = SignupAction::new(state.store, state.hasher);
    let user = action
        .execute(Registration {
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
            favourite_genres: body.favourite_genres,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Authenticate and set both session cookies. Tokens never appear in the body.
///
/// POST /login
pub async fn login<U>(
    State(state): State<AppState<U>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<UserResponse>), AppError>
where
    U: UserRepository + 'static,
{
    let action = LoginAction::new(state.store, state.jwt.clone(), state.hasher);
    let (user, pair) = action.execute(&body.email, &body.password).await?;

    let jar = set_session_cookies(jar, &pair, &state.jwt);
    Ok((jar, Json(UserResponse::from(user))))
}

/// Clear the stored pair for a subject and expire both cookies.
///
/// POST /logout
pub async fn logout<U>(
    State(state): State<AppState<U>>,
    jar: CookieJar,
    Json(body): Json<LogoutRequest>,
) -> Result<(CookieJar, Json<MessageResponse>), AppError>
where
    U: UserRepository + 'static,
{
    LogoutAction::new(state.store).execute(&body.user_id).await?;

    Ok((
        clear_session_cookies(jar),
        Json(MessageResponse::new("Logged out successfully")),
    ))
}

/// Exchange the refresh cookie for a new pair.
///
/// Cookies are only replaced after the new pair has been persisted.
///
/// POST /refresh
pub async fn refresh<U>(
    State(state): State<AppState<U>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), AppError>
where
    U: UserRepository + 'static,
{
    let Some(token) = cookie_value(&jar, REFRESH_COOKIE) else {
        log::debug!(target: "marquee_auth", "msg=\"refresh rejected\", reason=\"missing_cookie\"");
        return Err(AppError(AuthError::Unauthorized));
    };

    let action = RefreshTokenAction::new(state.store, state.jwt.clone())
        .enforce_session_currency(state.settings.enforce_session_currency);
    let (_, pair) = action.execute(&token).await?;

    let jar = set_session_cookies(jar, &pair, &state.jwt);
    Ok((jar, Json(MessageResponse::new("Tokens refreshed"))))
}

/// Get the caller's profile.
///
/// GET /me
pub async fn me<U>(
    State(state): State<AppState<U>>,
    identity: SessionIdentity,
) -> Result<Json<UserResponse>, AppError>
where
    U: UserRepository + 'static,
{
    let user = GetUserAction::new(state.store)
        .execute(&identity.subject_id)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Change another identity's role. Admin only.
///
/// PUT /admin/users/{user_id}/role
pub async fn update_role<U>(
    State(state): State<AppState<U>>,
    identity: SessionIdentity,
    Path(user_id): Path<String>,
    Json(body): Json<UpdateRoleRequest>,
) -> Result<Json<UserResponse>, AppError>
where
    U: UserRepository + 'static,
{
    identity.require_role(Role::Admin)?;

    let user = UpdateRoleAction::new(state.store)
        .execute(&user_id, body.role)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// GET /movies
pub async fn list_movies<U>(
    State(state): State<AppState<U>>,
) -> Result<Json<Vec<Movie>>, AppError>
where
    U: UserRepository + 'static,
{
    let movies = ListMoviesAction::new(state.catalog).execute().await?;
    Ok(Json(movies))
}

/// GET /genres
pub async fn list_genres<U>(
    State(state): State<AppState<U>>,
) -> Result<Json<Vec<Genre>>, AppError>
where
    U: UserRepository + 'static,
{
    let genres = ListGenresAction::new(state.catalog).execute().await?;
    Ok(Json(genres))
}

/// GET /movie/{imdb_id}
pub async fn get_movie<U>(
    State(state): State<AppState<U>>,
    Path(imdb_id): Path<String>,
) -> Result<Json<Movie>, AppError>
where
    U: UserRepository + 'static,
{
    let movie = GetMovieAction::new(state.catalog).execute(&imdb_id).await?;
    Ok(Json(movie))
}

/// POST /add-movie
pub async fn add_movie<U>(
    State(state): State<AppState<U>>,
    Json(body): Json<Movie>,
) -> Result<(StatusCode, Json<Movie>), AppError>
where
    U: UserRepository + 'static,
{
    let movie = AddMovieAction::new(state.catalog).execute(body).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Best-ranked movies in the caller's stored favourite genres.
///
/// GET /recommendedmovies
pub async fn recommended_movies<U>(
    State(state): State<AppState<U>>,
    identity: SessionIdentity,
) -> Result<Json<Vec<Movie>>, AppError>
where
    U: UserRepository + 'static,
{
    let movies = RecommendMoviesAction::new(state.store, state.catalog)
        .limit(state.recommendation_limit)
        .execute(&identity.subject_id)
        .await?;

    Ok(Json(movies))
}

/// Store the admin review of a movie. Admin only.
///
/// PATCH /updatereview/{imdb_id}
pub async fn update_review<U>(
    State(state): State<AppState<U>>,
    identity: SessionIdentity,
    Path(imdb_id): Path<String>,
    Json(body): Json<UpdateReviewRequest>,
) -> Result<Json<ReviewResponse>, AppError>
where
    U: UserRepository + 'static,
{
    identity.require_role(Role::Admin)?;

    let movie = UpdateReviewAction::new(state.catalog)
        .execute(&imdb_id, &body.admin_review)
        .await?;

    Ok(Json(ReviewResponse::from(movie)))
}
