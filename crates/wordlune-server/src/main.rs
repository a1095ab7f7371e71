use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use wordlune_ai::GeminiClient;
use wordlune_ai::client::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use wordlune_api::auth::{self, AppState, AppStateInner};
use wordlune_api::middleware::require_auth;
use wordlune_api::{account, admin, enrich, lists, stories, words};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordlune=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("WORDLUNE_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("WORDLUNE_DB_PATH").unwrap_or_else(|_| "wordlune.db".into());
    let host = std::env::var("WORDLUNE_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("WORDLUNE_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let gemini_key = std::env::var("WORDLUNE_GEMINI_API_KEY").unwrap_or_default();
    let gemini_model =
        std::env::var("WORDLUNE_GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
    let gemini_base =
        std::env::var("WORDLUNE_GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

    // Init database
    let db = wordlune_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let ai = GeminiClient::new(gemini_key, gemini_model, gemini_base);
    let state: AppState = Arc::new(AppStateInner { db, ai, jwt_secret });

    // Routes
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        // Lists & their words, scoped by learning language
        .route("/languages/{language}/lists", get(lists::get_lists))
        .route("/languages/{language}/lists", post(lists::create_list))
        .route("/languages/{language}/lists/{list_id}", get(lists::get_list_details))
        .route("/languages/{language}/lists/{list_id}", delete(lists::delete_list))
        .route("/languages/{language}/lists/{list_id}/words", post(words::add_word))
        .route("/languages/{language}/lists/{list_id}/words/bulk", post(words::add_words_bulk))
        .route(
            "/languages/{language}/lists/{list_id}/words/delete-batch",
            post(words::delete_words_batch),
        )
        .route(
            "/languages/{language}/lists/{list_id}/words/{word_id}",
            patch(words::update_word),
        )
        .route(
            "/languages/{language}/lists/{list_id}/words/{word_id}",
            delete(words::delete_word),
        )
        .route("/languages/{language}/words", get(words::get_all_words))
        // Dashboard word bank
        .route("/my-words", get(words::get_personal_words))
        .route("/my-words", post(words::add_personal_word))
        .route("/my-words/{word_id}", patch(words::update_personal_word))
        .route("/my-words/{word_id}", delete(words::delete_personal_word))
        // Stories
        .route("/stories/{language}", get(stories::get_stories))
        .route("/stories/{language}", post(stories::upsert_user_story))
        .route("/stories/{language}/{story_id}", get(stories::get_story))
        .route("/stories/{language}/{story_id}", delete(stories::delete_user_story))
        .route("/my-stories", get(stories::get_my_stories))
        // Moderation
        .route("/admin/stories/{language}", post(admin::upsert_story))
        .route("/admin/stories/{language}/{story_id}", delete(admin::delete_story))
        .route("/admin/moderation/stories", get(admin::get_moderation_stories))
        .route("/admin/users/{user_id}/ban", post(admin::ban_user))
        .route("/admin/users/{user_id}/unban", post(admin::unban_user))
        // Account
        .route("/account/settings", get(account::get_settings))
        .route("/account/settings", put(account::put_settings))
        .route("/account/username", put(account::update_username))
        // AI enrichment dispatch
        .route("/ai", post(enrich::dispatch))
        .layer(middleware::from_fn(require_auth))
        .with_state(state);

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("WordLune server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
