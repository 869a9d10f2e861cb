//! HTTP routes of the MyGram API.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use chrono::TimeDelta;
use mygram_auth::{auth_body::AuthBody, jwt::JwtKeys};
use mygram_models::db::connection::DbConnection;
use mygram_web::{
    auth_token::{PublicToken, issue_public_token},
    comment::{self, CommentApi, CommentDeleted, CommentEdit, CommentFilter, CommentInput},
    ctx::{
        Ctx,
        resolver::{login_user, mw_ctx_resolver},
    },
    extract::{ApiJson, ApiPath, ApiQuery},
    mw_auth::mw_require_auth,
    photo::{self, PhotoApi, PhotoDeleted, PhotoFilter, PhotoInput},
    prelude::Result as WebResult,
    social_media::{
        self, SocialMediaApi, SocialMediaDeleted, SocialMediaFilter, SocialMediaInput,
    },
    user::{self, UserApi, UserDeleted, UserEdit, UserLogin, UserSignup},
};
use tower_cookies::{CookieManagerLayer, Cookies};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::config::ServerConfig;

/// State shared by every handler, read only after startup.
#[derive(Clone)]
pub struct AppState {
    pub connection: DbConnection,
    pub keys: Arc<JwtKeys>,
    pub token_ttl: TimeDelta,
}

impl AppState {
    pub fn new(connection: DbConnection, config: &ServerConfig) -> Self {
        Self {
            connection,
            keys: Arc::new(JwtKeys::new(config.jwt_secret.as_bytes())),
            token_ttl: config.token_ttl,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/public", get(public_token))
        .route("/users/register", post(register))
        .route("/users/login", post(login));

    let user_routes = Router::new()
        .route("/users", get(list_users))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        );

    let photo_routes = Router::new()
        .route("/photos", get(list_photos).post(create_photo))
        .route(
            "/photos/{id}",
            get(get_photo).put(update_photo).delete(delete_photo),
        );

    let comment_routes = Router::new()
        .route("/comments", get(list_comments).post(create_comment))
        .route(
            "/comments/{id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        );

    let social_media_routes = Router::new()
        .route(
            "/socialmedias",
            get(list_social_medias).post(create_social_media),
        )
        .route(
            "/socialmedias/{id}",
            get(get_social_media)
                .put(update_social_media)
                .delete(delete_social_media),
        );

    let protected_routes = Router::new()
        .merge(user_routes)
        .merge(photo_routes)
        .merge(comment_routes)
        .merge(social_media_routes)
        .route_layer(middleware::from_fn(mw_require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(
            state.keys.clone(),
            mw_ctx_resolver,
        ))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

async fn public_token(State(state): State<AppState>) -> WebResult<Json<PublicToken>> {
    Ok(Json(issue_public_token(&state.keys)?))
}

async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UserSignup>,
) -> WebResult<(StatusCode, Json<UserApi>)> {
    let user = user::register(payload, &state.connection)?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    ApiJson(payload): ApiJson<UserLogin>,
) -> WebResult<Json<AuthBody>> {
    let auth = user::login(&payload, &state.keys, state.token_ttl, &state.connection)?;
    Ok(Json(login_user(auth, &cookies)))
}

async fn list_users(State(state): State<AppState>) -> WebResult<Json<Vec<UserApi>>> {
    Ok(Json(user::list(&state.connection)?))
}

async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> WebResult<Json<UserApi>> {
    Ok(Json(user::get(id, &state.connection)?))
}

async fn update_user(
    State(state): State<AppState>,
    ctx: Ctx,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UserEdit>,
) -> WebResult<Json<UserApi>> {
    Ok(Json(user::update(id, &ctx, payload, &state.connection)?))
}

async fn delete_user(
    State(state): State<AppState>,
    ctx: Ctx,
    ApiPath(id): ApiPath<i64>,
) -> WebResult<Json<UserDeleted>> {
    Ok(Json(user::delete(id, &ctx, &state.connection)?))
}

async fn list_photos(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<PhotoFilter>,
) -> WebResult<Json<Vec<PhotoApi>>> {
    Ok(Json(photo::list(&filter, &state.connection)?))
}

async fn get_photo(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> WebResult<Json<PhotoApi>> {
    Ok(Json(photo::get(id, &state.connection)?))
}

async fn create_photo(
    State(state): State<AppState>,
    ctx: Ctx,
    ApiJson(payload): ApiJson<PhotoInput>,
) -> WebResult<(StatusCode, Json<PhotoApi>)> {
    let photo = photo::create(ctx.user_id(), payload, &state.connection)?;
    Ok((StatusCode::CREATED, Json(photo)))
}

async fn update_photo(
    State(state): State<AppState>,
    ctx: Ctx,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<PhotoInput>,
) -> WebResult<Json<PhotoApi>> {
    Ok(Json(photo::update(
        id,
        ctx.user_id(),
        payload,
        &state.connection,
    )?))
}

async fn delete_photo(
    State(state): State<AppState>,
    ctx: Ctx,
    ApiPath(id): ApiPath<i64>,
) -> WebResult<Json<PhotoDeleted>> {
    Ok(Json(photo::delete(id, ctx.user_id(), &state.connection)?))
}

async fn list_comments(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<CommentFilter>,
) -> WebResult<Json<Vec<CommentApi>>> {
    Ok(Json(comment::list(&filter, &state.connection)?))
}

async fn get_comment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> WebResult<Json<CommentApi>> {
    Ok(Json(comment::get(id, &state.connection)?))
}

async fn create_comment(
    State(state): State<AppState>,
    ctx: Ctx,
    ApiJson(payload): ApiJson<CommentInput>,
) -> WebResult<(StatusCode, Json<CommentApi>)> {
    let comment = comment::create(ctx.user_id(), payload, &state.connection)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

async fn update_comment(
    State(state): State<AppState>,
    ctx: Ctx,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<CommentEdit>,
) -> WebResult<Json<CommentApi>> {
    Ok(Json(comment::update(
        id,
        ctx.user_id(),
        payload,
        &state.connection,
    )?))
}

async fn delete_comment(
    State(state): State<AppState>,
    ctx: Ctx,
    ApiPath(id): ApiPath<i64>,
) -> WebResult<Json<CommentDeleted>> {
    Ok(Json(comment::delete(id, ctx.user_id(), &state.connection)?))
}

async fn list_social_medias(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<SocialMediaFilter>,
) -> WebResult<Json<Vec<SocialMediaApi>>> {
    Ok(Json(social_media::list(&filter, &state.connection)?))
}

async fn get_social_media(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> WebResult<Json<SocialMediaApi>> {
    Ok(Json(social_media::get(id, &state.connection)?))
}

async fn create_social_media(
    State(state): State<AppState>,
    ctx: Ctx,
    ApiJson(payload): ApiJson<SocialMediaInput>,
) -> WebResult<(StatusCode, Json<SocialMediaApi>)> {
    let entry = social_media::create(ctx.user_id(), payload, &state.connection)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_social_media(
    State(state): State<AppState>,
    ctx: Ctx,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<SocialMediaInput>,
) -> WebResult<Json<SocialMediaApi>> {
    Ok(Json(social_media::update(
        id,
        ctx.user_id(),
        payload,
        &state.connection,
    )?))
}

async fn delete_social_media(
    State(state): State<AppState>,
    ctx: Ctx,
    ApiPath(id): ApiPath<i64>,
) -> WebResult<Json<SocialMediaDeleted>> {
    Ok(Json(social_media::delete(
        id,
        ctx.user_id(),
        &state.connection,
    )?))
}
