// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{article, comment, message, user},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (articles + comments + likes, comments, users, messages).
/// * Applies global middleware (Trace, CORS).
/// * Injects the shared state (services and config).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let article_routes = Router::new()
        .route("/", post(article::create_article).route_layer(auth.clone()))
        .route("/{id}", get(article::get_article))
        // Reading comments is public, writing them requires a token
        .route(
            "/{id}/comments",
            get(comment::list_comments)
                .merge(post(comment::create_comment).route_layer(auth.clone())),
        )
        .route(
            "/{id}/like",
            post(article::like_article)
                .delete(article::unlike_article)
                .route_layer(auth.clone()),
        );

    let comment_routes = Router::new()
        .route("/{id}", delete(comment::delete_comment))
        .route_layer(auth.clone());

    let user_routes = Router::new()
        .route("/me", put(user::update_me).route_layer(auth.clone()))
        .route("/{id}", get(user::get_user));

    // The board is public to read; posting and moving notes require a token
    let message_routes = Router::new()
        .route(
            "/",
            get(message::list_messages)
                .merge(post(message::create_message).route_layer(auth.clone())),
        )
        .route("/{id}", put(message::move_message).route_layer(auth));

    Router::new()
        .nest("/api/articles", article_routes)
        .nest("/api/comments", comment_routes)
        .nest("/api/users", user_routes)
        .nest("/api/messages", message_routes)
        // Global Middleware (ServiceBuilder applies top to bottom)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
