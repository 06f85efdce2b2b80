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
use std::io::Write;

use crate::table::AbundanceTable;

type E = Box<dyn std::error::Error>;

/// Format an abundance table as tab-separated plain text
///
/// Writes a header line naming the columns ("taxon" followed by the sample
/// labels) and one line per row in table order. Missing cells are written as
/// empty fields.
///
/// ## Usage
/// ```rust
/// use taulu::printer::write_table;
/// use taulu::table::AbundanceTable;
/// use indexmap::IndexMap;
///
/// let series = vec![
///     ("sample1.tsv".to_string(), IndexMap::from([("g__Bacillus".to_string(), 62.5)])),
///     ("sample2.tsv".to_string(), IndexMap::from([("g__Lactobacillus".to_string(), 18.75)])),
/// ];
/// let table = AbundanceTable::from_series(series);
///
/// let mut output: Vec<u8> = Vec::new();
/// write_table(&table, &mut output).unwrap();
///
/// let mut expected: Vec<u8> = Vec::new();
/// expected.append(&mut b"taxon\tsample1.tsv\tsample2.tsv\n".to_vec());
/// expected.append(&mut b"g__Bacillus\t62.5\t\n".to_vec());
/// expected.append(&mut b"g__Lactobacillus\t\t18.75\n".to_vec());
///
/// assert_eq!(output, expected);
/// ```
///
pub fn write_table<W: Write>(
    table: &AbundanceTable,
    conn_out: &mut W,
) -> Result<(), E> {
    let mut header = String::from("taxon");
    for sample in table.samples() {
        header.push('\t');
        header.push_str(sample);
    }
    header.push('\n');
    conn_out.write_all(header.as_bytes())?;

    for (taxon, cells) in table.iter() {
        let mut line = String::from(taxon);
        for cell in cells {
            line.push('\t');
            if let Some(value) = cell {
                line.push_str(&value.to_string());
            }
        }
        line.push('\n');
        conn_out.write_all(line.as_bytes())?;
    }

    conn_out.flush()?;
    Ok(())
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn write_table_empty_table_has_only_a_header() {
        use super::write_table;
        use crate::table::AbundanceTable;
        use indexmap::IndexMap;

        let series = vec![
            ("sample1.tsv".to_string(), IndexMap::new()),
            ("sample2.tsv".to_string(), IndexMap::new()),
        ];
        let table = AbundanceTable::from_series(series);

        let mut output: Vec<u8> = Vec::new();
        write_table(&table, &mut output).unwrap();

        assert_eq!(output, b"taxon\tsample1.tsv\tsample2.tsv\n".to_vec());
    }

    #[test]
    fn write_table_fills_missing_cells_with_empty_fields() {
        use super::write_table;
        use crate::table::AbundanceTable;
        use indexmap::IndexMap;

        let series = vec![
            ("s1".to_string(), IndexMap::from([
                ("X".to_string(), 1.0),
                ("Y".to_string(), 2.5),
            ])),
            ("s2".to_string(), IndexMap::from([
                ("Y".to_string(), 3.0),
                ("Z".to_string(), 4.0),
            ])),
        ];
        let table = AbundanceTable::from_series(series);

        let mut output: Vec<u8> = Vec::new();
        write_table(&table, &mut output).unwrap();

        let mut expected: Vec<u8> = Vec::new();
        expected.append(&mut b"taxon\ts1\ts2\n".to_vec());
        expected.append(&mut b"X\t1\t\n".to_vec());
        expected.append(&mut b"Y\t2.5\t3\n".to_vec());
        expected.append(&mut b"Z\t\t4\n".to_vec());

        assert_eq!(output, expected);
    }
}
