// taulu: Read taxonomic profiler outputs into abundance tables.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//
use indexmap::IndexMap;

/// A taxa x samples table of abundance values.
///
/// Rows are keyed by a taxon identifier (a MetaPhlAn lineage string or a CAMI
/// taxonomy path) and columns by a sample label. Cells hold None for samples
/// that do not contain the taxon.
///
/// Row order is the order of first appearance across the input series and
/// column order is the input order.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AbundanceTable {
    samples: Vec<String>,
    rows: IndexMap<String, Vec<Option<f64>>>,
}

impl AbundanceTable {
    /// Outer-join per-sample series into one table
    ///
    /// Aligns the (taxon, value) mappings in `series` on their taxon keys.
    /// The rows are the union of the taxa seen across all series; a cell is
    /// None when the sample's series does not contain the row's taxon.
    ///
    /// Duplicate sample labels are kept as distinct columns, deduplicating
    /// them is the caller's responsibility.
    ///
    /// ## Usage
    /// ```rust
    /// use taulu::table::AbundanceTable;
    /// use indexmap::IndexMap;
    ///
    /// let series = vec![
    ///     ("sample1".to_string(), IndexMap::from([("X".to_string(), 1.0), ("Y".to_string(), 2.0)])),
    ///     ("sample2".to_string(), IndexMap::from([("Y".to_string(), 3.0), ("Z".to_string(), 4.0)])),
    /// ];
    ///
    /// let got = AbundanceTable::from_series(series);
    ///
    /// assert_eq!(got.samples(), &["sample1".to_string(), "sample2".to_string()]);
    /// assert_eq!(got.get("X", "sample2"), None);
    /// assert_eq!(got.get("Y", "sample1"), Some(2.0));
    /// assert_eq!(got.get("Y", "sample2"), Some(3.0));
    /// ```
    ///
    pub fn from_series(
        series: Vec<(String, IndexMap<String, f64>)>,
    ) -> Self {
        let n_samples = series.len();
        let mut samples: Vec<String> = Vec::with_capacity(n_samples);
        let mut rows: IndexMap<String, Vec<Option<f64>>> = IndexMap::new();

        for (col, (label, values)) in series.into_iter().enumerate() {
            samples.push(label);
            for (taxon, value) in values {
                let cells = rows.entry(taxon).or_insert_with(|| vec![None; n_samples]);
                cells[col] = Some(value);
            }
        }

        Self { samples, rows }
    }

    /// Sample labels in column order.
    pub fn samples(
        &self,
    ) -> &[String] {
        &self.samples
    }

    /// Taxon identifiers in row order.
    pub fn taxa(
        &self,
    ) -> impl Iterator<Item = &str> + '_ {
        self.rows.keys().map(|taxon| taxon.as_str())
    }

    pub fn n_samples(
        &self,
    ) -> usize {
        self.samples.len()
    }

    pub fn n_taxa(
        &self,
    ) -> usize {
        self.rows.len()
    }

    pub fn is_empty(
        &self,
    ) -> bool {
        self.rows.is_empty()
    }

    /// The value for `taxon` in the column labeled `sample`
    ///
    /// Returns None if the taxon or the sample is not in the table, or if the
    /// cell is missing. With duplicate sample labels this reads the first
    /// matching column.
    ///
    pub fn get(
        &self,
        taxon: &str,
        sample: &str,
    ) -> Option<f64> {
        let col = self.samples.iter().position(|label| label == sample)?;
        self.rows.get(taxon)?.get(col).copied().flatten()
    }

    /// Iterate over (taxon, cells) rows in table order.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&str, &[Option<f64>])> + '_ {
        self.rows
            .iter()
            .map(|(taxon, cells)| (taxon.as_str(), cells.as_slice()))
    }
}
