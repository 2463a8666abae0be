/*!
# Gerenciador de Produtos

A small interactive product dashboard, built in Rust.

## Overview

The application connects to a PostgreSQL database, lists product records
(`titulo`, `preco`), lets the user merge in an uploaded `.xlsx` spreadsheet,
recomputes a top-5 ranking by price and renders the result as a
user-selectable chart (bar, line, scatter or pie), alongside a handful of
independent input widgets whose values are simply echoed back.

## Architecture

A single axum server drives everything:

- **Config Loader** — resolves the database settings from environment
  variables once at startup, with batch validation of missing names.
- **Data Source Client** — one connection and one fixed read-only query per
  render cycle; no pool, no caching.
- **Merge-and-Rank** — in-memory concatenation of the base table with the
  uploaded one, followed by a stable top-5 selection by descending price.
- **Chart Builder** — a declarative chart specification per kind, rendered to
  PNG with plotters.
- **Presentation Shell** — an embedded single-page view plus a JSON API; the
  whole cycle runs per request and owns no cross-request state.

## Modules

- **config**: environment-driven connection settings
- **error**: the error taxonomy and its HTTP mapping
- **products**: product records, tables and the merge-and-rank operation
- **db**: the PostgreSQL read query
- **excel**: xlsx upload parsing
- **chart**: chart specifications and PNG rendering
- **widgets**: capture-and-echo input widget values
- **app**: routing and the render cycle

## REST API Endpoints

- `GET /` - the dashboard page
- `GET /health` - liveness probe
- `GET /api/products` - fresh product listing as JSON
- `POST /api/render` - one full render cycle (multipart: optional
  `spreadsheet` file, `chart_kind` selector, `widgets` JSON)
*/

pub mod app;
pub mod chart;
pub mod config;
pub mod db;
pub mod error;
pub mod excel;
pub mod products;
pub mod widgets;

/// Re-export everything from these modules to make it easier to use
pub use chart::*;
pub use config::*;
pub use error::*;
pub use excel::*;
pub use products::*;
pub use widgets::*;
