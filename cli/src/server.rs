use std::path::PathBuf;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::limit::RequestBodyLimitLayer;

use recepten_core::db::Database;
use recepten_core::drafts::DraftStore;
use recepten_core::models::{Draft, Recipe, default_ingredients};

const BODY_LIMIT: usize = 1024 * 1024; // 1 MB

#[derive(Clone)]
struct AppState {
    db_path: PathBuf,
    drafts: DraftStore,
}

impl AppState {
    // One connection per request; nothing is pooled. Opening also runs the
    // idempotent schema setup.
    fn open_db(&self) -> anyhow::Result<Database> {
        Database::open(&self.db_path)
    }
}

// --- Request / Response types ---

#[derive(Deserialize)]
struct AddRecipeRequest {
    name: String,
    ingredients: Vec<String>,
}

#[derive(Deserialize)]
struct DefaultIngredientsRequest {
    #[serde(default)]
    recipe_name: String,
}

#[derive(Deserialize)]
struct GetIngredientsRequest {
    recipe_ids: Vec<i64>,
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

// --- Error handling ---

enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(err) => {
                eprintln!("Internal server error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (
            status,
            Json(ErrorResponse {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

// --- Middleware ---

async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert(
        "content-security-policy",
        HeaderValue::from_static("default-src 'none'"),
    );
    response
}

// --- Draft handlers ---

async fn list_drafts(State(state): State<AppState>) -> Json<Vec<Draft>> {
    // Absent or malformed scratch files read as empty
    Json(state.drafts.list())
}

async fn add_recipe(
    State(state): State<AppState>,
    Json(req): Json<AddRecipeRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .drafts
        .append(Draft {
            name: req.name,
            ingredients: req.ingredients,
        })
        .context("failed to write draft file")?;
    Ok(Json(serde_json::json!({ "success": true })))
}

async fn delete_recipe(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let removed = state
        .drafts
        .remove_at(index)
        .context("failed to write draft file")?;
    if removed {
        Ok(Json(serde_json::json!({ "success": true })))
    } else {
        Err(ApiError::NotFound("Recipe not found".to_string()))
    }
}

async fn get_default_ingredients_route(
    Json(req): Json<DefaultIngredientsRequest>,
) -> Json<serde_json::Value> {
    // Unknown names answer null rather than an error
    Json(serde_json::json!({ "ingredients": default_ingredients(&req.recipe_name) }))
}

// --- Database handlers ---

async fn save_to_db(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let drafts = state.drafts.list();
    if drafts.is_empty() {
        return Err(ApiError::BadRequest("No recipes to save".to_string()));
    }

    let db = state.open_db().context("database error")?;
    let saved = db
        .commit_drafts(&drafts)
        .context("failed to save recipes")?;

    // Cleared only after the inserts return; the two stores are not
    // updated atomically.
    state
        .drafts
        .clear()
        .context("failed to clear draft file")?;

    Ok(Json(serde_json::json!({ "success": true, "saved": saved })))
}

async fn view_db(State(state): State<AppState>) -> Result<Json<Vec<Recipe>>, ApiError> {
    let db = state.open_db().context("database error")?;
    let recipes = db.list_all().context("database error")?;
    Ok(Json(recipes))
}

async fn get_ingredients(
    State(state): State<AppState>,
    Json(req): Json<GetIngredientsRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let db = state.open_db().context("database error")?;
    let ingredients = db
        .fetch_ingredients_by_ids(&req.recipe_ids)
        .context("database error")?;
    Ok(Json(
        serde_json::json!({ "success": true, "ingredients": ingredients }),
    ))
}

async fn delete_and_export_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let db = state.open_db().context("database error")?;
    let moved = db
        .delete_and_export(id, &state.drafts)
        .context("failed to export recipe")?;
    if moved.is_some() {
        Ok(Json(serde_json::json!({ "success": true })))
    } else {
        Err(ApiError::NotFound("Recipe not found".to_string()))
    }
}

// --- Router builder ---

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_drafts))
        .route("/recipe_manager", get(list_drafts))
        .route("/add_recipe", post(add_recipe))
        .route("/delete_recipe/{index}", delete(delete_recipe))
        .route("/save_to_db", post(save_to_db))
        .route(
            "/get_default_ingredients",
            post(get_default_ingredients_route),
        )
        .route("/view_db", get(view_db))
        .route("/get_ingredients", post(get_ingredients))
        .route(
            "/delete_and_export_recipe/{id}",
            post(delete_and_export_recipe),
        )
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(middleware::from_fn(security_headers))
        .with_state(state)
}

// --- Server startup ---

pub async fn start_server(
    db_path: PathBuf,
    drafts: DraftStore,
    port: u16,
    bind: &str,
) -> anyhow::Result<()> {
    // Fail fast on an unusable database path; also ensures the schema
    // before the first request.
    Database::open(&db_path).context("failed to initialize database")?;

    let state = AppState { db_path, drafts };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{bind}:{port}")).await?;
    eprintln!("Listening on http://{bind}:{port}");
    axum::serve(listener, app).await?;

    Ok(())
}
