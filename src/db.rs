use crate::config::DashboardConfig;
use crate::error::Result;
use crate::products::{ProductRecord, ProductTable};
use sqlx::{Connection, PgConnection};

/// The one query this dashboard runs. Results arrive already ordered
/// descending by price; `DISTINCT` drops exact duplicate rows at the source.
pub const PRODUCTS_QUERY: &str = "SELECT DISTINCT titulo, preco FROM produtos ORDER BY preco DESC";

/// Opens a connection, runs [`PRODUCTS_QUERY`] and closes the connection
/// again, all within the current render cycle. There is no pool: one
/// connection, one query, released at scope exit.
pub async fn fetch_products(config: &DashboardConfig) -> Result<ProductTable> {
    let mut conn = PgConnection::connect(&config.database_url()).await?;
    let rows = sqlx::query_as::<_, ProductRecord>(PRODUCTS_QUERY)
        .fetch_all(&mut conn)
        .await?;
    conn.close().await?;

    log::info!("loaded {} products from {}", rows.len(), config.db_host);
    Ok(ProductTable::new(rows))
}
