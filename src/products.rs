use serde::{Deserialize, Serialize};

/// How many rows the ranking keeps.
pub const TOP_N: usize = 5;

/// One title/price pair. Rows carry no identity; equality is value-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductRecord {
    pub titulo: String,
    pub preco: f64,
}

impl ProductRecord {
    pub fn new(titulo: impl Into<String>, preco: f64) -> Self {
        Self {
            titulo: titulo.into(),
            preco,
        }
    }
}

/// Ordered sequence of product records. Insertion order is query/result
/// order; only an explicit ranking re-orders it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductTable(pub Vec<ProductRecord>);

impl ProductTable {
    pub fn new(rows: Vec<ProductRecord>) -> Self {
        Self(rows)
    }

    pub fn rows(&self) -> &[ProductRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Concatenates `self` with the optional uploaded table (keeping every row
    /// from both, no deduplication) and selects the [`TOP_N`] rows with the
    /// largest `preco`. The sort is stable, so ties keep their first-seen
    /// concatenation order. Fewer than [`TOP_N`] rows in total returns all of
    /// them. Neither source table is modified.
    pub fn merge_and_rank(&self, upload: Option<&ProductTable>) -> ProductTable {
        let mut merged = self.0.clone();
        if let Some(extra) = upload {
            merged.extend(extra.0.iter().cloned());
        }
        merged.sort_by(|a, b| b.preco.total_cmp(&a.preco));
        merged.truncate(TOP_N);
        ProductTable(merged)
    }
}

impl FromIterator<ProductRecord> for ProductTable {
    fn from_iter<I: IntoIterator<Item = ProductRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, f64)]) -> ProductTable {
        rows.iter()
            .map(|(t, p)| ProductRecord::new(*t, *p))
            .collect()
    }

    #[test]
    fn merges_and_ranks_base_with_upload() {
        let base = table(&[("A", 10.0), ("B", 30.0), ("C", 20.0)]);
        let upload = table(&[("D", 50.0), ("E", 5.0)]);

        let ranked = base.merge_and_rank(Some(&upload));

        assert_eq!(
            ranked,
            table(&[("D", 50.0), ("B", 30.0), ("C", 20.0), ("A", 10.0), ("E", 5.0)])
        );
    }

    #[test]
    fn output_size_is_min_of_five_and_total() {
        let base = table(&[("A", 1.0), ("B", 2.0)]);
        assert_eq!(base.merge_and_rank(None).len(), 2);

        let upload = table(&[("C", 3.0), ("D", 4.0), ("E", 5.0), ("F", 6.0)]);
        assert_eq!(base.merge_and_rank(Some(&upload)).len(), TOP_N);
    }

    #[test]
    fn no_upload_still_applies_the_cut() {
        let base = table(&[
            ("A", 7.0),
            ("B", 3.0),
            ("C", 9.0),
            ("D", 1.0),
            ("E", 5.0),
            ("F", 8.0),
        ]);
        let ranked = base.merge_and_rank(None);
        assert_eq!(ranked.len(), TOP_N);
        assert_eq!(ranked.rows()[0].titulo, "C");
        assert_eq!(ranked.rows()[4].titulo, "B");
    }

    #[test]
    fn ties_keep_concatenation_order() {
        let base = table(&[("base-first", 10.0), ("base-second", 10.0)]);
        let upload = table(&[("upload-first", 10.0)]);

        let ranked = base.merge_and_rank(Some(&upload));

        let titles: Vec<&str> = ranked.rows().iter().map(|r| r.titulo.as_str()).collect();
        assert_eq!(titles, vec!["base-first", "base-second", "upload-first"]);
    }

    #[test]
    fn duplicate_rows_are_not_deduplicated() {
        let base = table(&[("A", 10.0)]);
        let upload = table(&[("A", 10.0)]);
        assert_eq!(base.merge_and_rank(Some(&upload)).len(), 2);
    }

    #[test]
    fn ranking_is_idempotent_and_leaves_sources_untouched() {
        let base = table(&[("A", 10.0), ("B", 30.0), ("C", 20.0)]);
        let snapshot = base.clone();

        let first = base.merge_and_rank(None);
        let second = base.merge_and_rank(None);

        assert_eq!(first, second);
        assert_eq!(base, snapshot);
    }

    #[test]
    fn empty_tables_rank_to_empty() {
        let base = ProductTable::default();
        assert!(base.merge_and_rank(None).is_empty());
    }
}
