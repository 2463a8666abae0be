use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Everything that can stop a render cycle.
///
/// All variants are caught at the top of the cycle and turned into a single
/// user-visible message; none of them is fatal to the process. The next
/// request starts over from the top.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// One or more required environment variables are absent. The list is
    /// complete: validation collects every missing name before failing.
    #[error("variáveis de ambiente ausentes: {}", .missing.join(", "))]
    Config { missing: Vec<String> },

    /// An environment variable is present but its value cannot be used.
    #[error("valor de configuração inválido: {name}={value}")]
    ConfigValue { name: String, value: String },

    /// Connection or query failure against the product database.
    #[error("erro ao consultar o banco de dados: {0}")]
    DataSource(#[from] sqlx::Error),

    /// The uploaded spreadsheet is readable but lacks expected columns.
    #[error("planilha enviada sem as colunas: {}", .missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },

    /// The uploaded file could not be read as an xlsx workbook at all.
    #[error("falha ao ler a planilha: {0}")]
    Upload(#[from] calamine::XlsxError),

    /// Chart rendering failed inside the plotting backend.
    #[error("falha ao gerar o gráfico: {0}")]
    Chart(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match self {
            DashboardError::Config { .. } | DashboardError::ConfigValue { .. } => {
                log::error!("configuration error: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            DashboardError::DataSource(ref e) => {
                log::error!("database error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            DashboardError::SchemaMismatch { .. } | DashboardError::Upload(_) => {
                StatusCode::BAD_REQUEST
            }
            DashboardError::Chart(ref msg) => {
                log::error!("chart rendering error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
