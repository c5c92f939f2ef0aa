// Svadhyaya - Web Server
// Read-only JSON API over the bundled content, plus the HTML pages

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use svadhyaya::{
    ContentLibrary, DharmaCard, DharmaCategory, Scripture, ScriptureCategory, Translations, Verse,
    DEFAULT_LANGUAGE,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    library: Arc<ContentLibrary>,
    translations: Arc<Translations>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn not_found(message: String) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message),
        }
    }
}

/// Scripture response without the verse bodies (for the grid)
#[derive(Serialize)]
struct ScriptureSummary {
    id: String,
    title: String,
    title_translit: String,
    description: String,
    category: ScriptureCategory,
    cover: String,
    verse_count: usize,
    available: bool,
}

impl From<&Scripture> for ScriptureSummary {
    fn from(s: &Scripture) -> Self {
        Self {
            id: s.id.clone(),
            title: s.title.clone(),
            title_translit: s.title_translit.clone(),
            description: s.description.clone(),
            category: s.category,
            cover: s.cover.clone(),
            verse_count: s.verse_count(),
            available: s.is_available(),
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// Apply the text search plus an optional category slug. A present but
/// unrecognized slug matches nothing rather than silently widening the
/// result to every category.
fn filter_scriptures<'a>(
    library: &'a ContentLibrary,
    query: &str,
    category_slug: Option<&str>,
) -> Vec<&'a Scripture> {
    let matches = library.search_scriptures(query);
    match category_slug {
        None => matches,
        Some(slug) => match ScriptureCategory::from_slug(slug) {
            Some(category) => matches
                .into_iter()
                .filter(|s| s.category == category)
                .collect(),
            None => Vec::new(),
        },
    }
}

/// Same slug rule as filter_scriptures, for the dharma cards
fn filter_dharma<'a>(
    library: &'a ContentLibrary,
    category_slug: Option<&str>,
) -> Vec<&'a DharmaCard> {
    match category_slug {
        None => library.dharma_cards().iter().collect(),
        Some(slug) => match DharmaCategory::from_slug(slug) {
            Some(category) => library.dharma_by_category(category),
            None => Vec::new(),
        },
    }
}

/// GET /api/scriptures?category=&q= - Scripture grid, filtered
async fn get_scriptures(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let query = params.get("q").map(|s| s.as_str()).unwrap_or("");
    let category_slug = params.get("category").map(|s| s.as_str());

    let summaries: Vec<ScriptureSummary> = filter_scriptures(&state.library, query, category_slug)
        .into_iter()
        .map(ScriptureSummary::from)
        .collect();

    (StatusCode::OK, Json(ApiResponse::ok(summaries)))
}

/// GET /api/scriptures/:id - Full scripture including verses
async fn get_scripture(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.library.scripture(&id) {
        Some(scripture) => (StatusCode::OK, Json(ApiResponse::ok(scripture.clone()))).into_response(),
        None => scripture_not_found(&state, &id),
    }
}

/// GET /api/scriptures/:id/verses - Verses only
async fn get_scripture_verses(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.library.scripture(&id) {
        Some(scripture) => {
            let verses: Vec<Verse> = scripture.verses.clone();
            (StatusCode::OK, Json(ApiResponse::ok(verses))).into_response()
        }
        None => scripture_not_found(&state, &id),
    }
}

/// GET /api/dharma?category= - Dharma cards, filtered
async fn get_dharma_cards(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let category_slug = params.get("category").map(|s| s.as_str());

    let cards: Vec<DharmaCard> = filter_dharma(&state.library, category_slug)
        .into_iter()
        .cloned()
        .collect();

    (StatusCode::OK, Json(ApiResponse::ok(cards)))
}

/// GET /api/dharma/:id - Single dharma card
async fn get_dharma_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.library.dharma_card(&id) {
        Some(card) => (StatusCode::OK, Json(ApiResponse::ok(card.clone()))).into_response(),
        None => {
            let message = state
                .translations
                .translate(DEFAULT_LANGUAGE, "content.not_found")
                .to_string();
            (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::not_found(format!("{} ({})", message, id))),
            )
                .into_response()
        }
    }
}

/// GET /api/translations/:lang - Full string table for one language.
/// Unknown languages fall back to the default table.
async fn get_translations(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> impl IntoResponse {
    let table = state
        .translations
        .language_table(&lang)
        .or_else(|| state.translations.language_table(DEFAULT_LANGUAGE))
        .cloned()
        .unwrap_or_default();

    (StatusCode::OK, Json(ApiResponse::ok(table)))
}

fn scripture_not_found(state: &AppState, id: &str) -> axum::response::Response {
    let message = state
        .translations
        .translate(DEFAULT_LANGUAGE, "content.not_found")
        .to_string();
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::not_found(format!("{} ({})", message, id))),
    )
        .into_response()
}

// ============================================================================
// Pages
// ============================================================================

/// GET / - Library grid
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

/// GET /reader - Book-flip verse reader
async fn serve_reader() -> impl IntoResponse {
    Html(include_str!("../web/reader.html"))
}

/// GET /dharma - Dharma knowledge cards
async fn serve_dharma() -> impl IntoResponse {
    Html(include_str!("../web/dharma.html"))
}

/// GET /mala - Decorative mala counter
async fn serve_mala() -> impl IntoResponse {
    Html(include_str!("../web/mala.html"))
}

/// Fallback - the not-found page with a way back to the library
async fn serve_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(include_str!("../web/404.html")))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 Svadhyaya - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Bundled content; a malformed bundle is a packaging defect
    let library = match ContentLibrary::load() {
        Ok(library) => library,
        Err(e) => {
            eprintln!("❌ Could not load content bundle: {}", e);
            std::process::exit(1);
        }
    };
    let translations = match Translations::load() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("❌ Could not load translations: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "✓ Content loaded: {} scriptures, {} dharma cards",
        library.scripture_count(),
        library.dharma_count()
    );

    // Create shared state
    let state = AppState {
        library: Arc::new(library),
        translations: Arc::new(translations),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/scriptures", get(get_scriptures))
        .route("/scriptures/:id", get(get_scripture))
        .route("/scriptures/:id/verses", get(get_scripture_verses))
        .route("/dharma", get(get_dharma_cards))
        .route("/dharma/:id", get(get_dharma_card))
        .route("/translations/:lang", get(get_translations))
        .with_state(state.clone());

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .route("/reader", get(serve_reader))
        .route("/dharma", get(serve_dharma))
        .route("/mala", get(serve_mala))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new("web"))
        .fallback(serve_not_found)
        .layer(CorsLayer::permissive());

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   API: http://localhost:3000/api/scriptures");
    println!("   UI:  http://localhost:3000");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}

// ============================================================================
// TESTS
// ============================================================================
