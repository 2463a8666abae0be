use axum::{
    Json, Router,
    extract::{Multipart, State},
    response::Html,
    routing::{get, post},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::chart::{self, ChartOptions};
use crate::config::DashboardConfig;
use crate::db;
use crate::error::Result;
use crate::excel;
use crate::products::ProductTable;
use crate::widgets::WidgetValues;

/// Shared application state: just the connection settings, resolved once at
/// startup. No data survives across render cycles.
pub struct AppState {
    pub config: DashboardConfig,
}

/// Everything one render cycle produces, in display order: the full product
/// listing, the merged top-5 ranking, the chart (base64 PNG, absent when the
/// selector names no known kind) and the echoed widget values.
#[derive(Serialize)]
pub struct RenderResponse {
    pub products: ProductTable,
    pub top5: ProductTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,
    pub widgets: WidgetValues,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(serve_dashboard))
        .route("/health", get(health))
        .route("/api/products", get(get_products))
        .route("/api/render", post(render_cycle))
        .with_state(state)
}

pub async fn run(
    config: DashboardConfig,
    addr: &str,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let app = router(Arc::new(AppState { config }));

    let listener = TcpListener::bind(addr).await?;
    log::info!("listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_dashboard() -> Html<&'static str> {
    Html(include_str!("./static/dashboard.html"))
}

async fn health() -> &'static str {
    "ok"
}

/// Fresh read of the product table, straight from the database.
async fn get_products(State(state): State<Arc<AppState>>) -> Result<Json<ProductTable>> {
    let products = db::fetch_products(&state.config).await?;
    Ok(Json(products))
}

/// One full render cycle: query the database, merge the optional uploaded
/// spreadsheet, rank, build and render the selected chart, echo the widget
/// values. Any failure aborts the cycle with a single error response; the
/// next request starts over from the top.
async fn render_cycle(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<RenderResponse>> {
    let mut upload_bytes: Option<Vec<u8>> = None;
    let mut chart_kind = String::new();
    let mut widgets = WidgetValues::default();

    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        match field.name().unwrap_or("") {
            "spreadsheet" => {
                let bytes = field.bytes().await.unwrap_or_default();
                if !bytes.is_empty() {
                    upload_bytes = Some(bytes.to_vec());
                }
            }
            "chart_kind" => {
                chart_kind = field.text().await.unwrap_or_default();
            }
            "widgets" => {
                let raw = field.text().await.unwrap_or_default();
                if !raw.is_empty() {
                    widgets = serde_json::from_str(&raw).unwrap_or_default();
                }
            }
            _ => {}
        }
    }

    let products = db::fetch_products(&state.config).await?;

    let upload = upload_bytes
        .as_deref()
        .map(excel::parse_upload)
        .transpose()?;
    let top5 = products.merge_and_rank(upload.as_ref());

    let chart = match chart::build_chart(&top5, &chart_kind) {
        Some(spec) => {
            let png = chart::render_chart(&spec, &ChartOptions::default())?;
            Some(BASE64.encode(png))
        }
        None => None,
    };

    Ok(Json(RenderResponse {
        products,
        top5,
        chart,
        widgets: widgets.clamped(),
    }))
}
