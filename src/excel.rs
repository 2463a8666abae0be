use crate::error::{DashboardError, Result};
use crate::products::{ProductRecord, ProductTable};
use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;

const TITULO: &str = "titulo";
const PRECO: &str = "preco";

/// Parses an uploaded `.xlsx` workbook into a [`ProductTable`].
///
/// Only the first sheet is read. Its first row is taken as the header and must
/// contain both a `titulo` and a `preco` column; anything missing is reported
/// as a [`DashboardError::SchemaMismatch`] listing every absent column.
///
/// Data rows are coerced leniently: `preco` accepts integer and float cells as
/// well as numeric-looking text, and rows whose price cell is empty or
/// non-numeric are skipped rather than failing the whole upload.
pub fn parse_upload(bytes: &[u8]) -> Result<ProductTable> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    let sheet_name = match workbook.sheet_names().first() {
        Some(name) => name.clone(),
        None => return Err(schema_mismatch(&[TITULO, PRECO])),
    };
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let header = match rows.next() {
        Some(header) => header,
        None => return Err(schema_mismatch(&[TITULO, PRECO])),
    };

    let titulo_idx = find_column(header, TITULO);
    let preco_idx = find_column(header, PRECO);

    let missing: Vec<&str> = [(TITULO, titulo_idx), (PRECO, preco_idx)]
        .iter()
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(schema_mismatch(&missing));
    }
    let (titulo_idx, preco_idx) = (titulo_idx.unwrap_or(0), preco_idx.unwrap_or(0));

    let mut records = Vec::new();
    for row in rows {
        let titulo = match row.get(titulo_idx) {
            Some(Data::Empty) | None => continue,
            Some(cell) => cell.to_string(),
        };
        let preco = match row.get(preco_idx) {
            Some(Data::Int(i)) => *i as f64,
            Some(Data::Float(f)) => *f,
            Some(Data::String(s)) => match s.trim().parse::<f64>() {
                Ok(value) => value,
                Err(_) => continue,
            },
            _ => continue,
        };
        records.push(ProductRecord { titulo, preco });
    }

    Ok(ProductTable::new(records))
}

fn find_column(header: &[Data], name: &str) -> Option<usize> {
    header
        .iter()
        .position(|cell| cell.to_string().trim() == name)
}

fn schema_mismatch(columns: &[&str]) -> DashboardError {
    DashboardError::SchemaMismatch {
        missing: columns.iter().map(|c| c.to_string()).collect(),
    }
}
