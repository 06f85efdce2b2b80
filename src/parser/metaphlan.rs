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
use std::io::Read;

use indexmap::IndexMap;

use crate::parser::MalformedProfile;

type E = Box<dyn std::error::Error>;

/// Check whether the deepest level of a lineage string is at a rank
///
/// `clade_name` is a `|`-delimited MetaPhlAn lineage string. The deepest level
/// matches when the string ends in the one-letter rank code followed by two
/// underscores and an alphanumeric/underscore clade name, eg.
/// `k__Bacteria|p__Firmicutes|g__Bacillus` matches rank letter 'g' but not 'p'.
///
pub fn clade_matches_rank(
    clade_name: &str,
    rank_letter: char,
) -> bool {
    let prefix: String = [rank_letter, '_', '_'].iter().collect();
    match clade_name.rfind(&prefix) {
        Some(pos) => clade_name[(pos + prefix.len())..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_'),
        None => false,
    }
}

/// Parse a MetaPhlAn profile
///
/// Reads clade rows stored in the *MetaPhlAn* format: four tab-separated
/// columns `clade_name`, `ncbi_tax_id`, `relative_abundance`,
/// `additional_species`, with '#' marking comment lines.
///
/// Returns the relative abundances of the clades whose deepest lineage level
/// is at `rank`. Only the first character of `rank` is significant and it is
/// lower-cased, so "g" and "Genus" both select genus rows.
///
/// ## Errors
///
/// Errors if a data row does not have four columns or if a relative abundance
/// is not a decimal number.
///
/// ## Usage
/// ```rust
/// use taulu::parser::metaphlan::read_metaphlan;
/// use std::io::Cursor;
///
/// let data: Vec<u8> = b"#mpa_vJan21\nk__Bacteria\t2\t100.0\t\nk__Bacteria|p__Firmicutes|g__Bacillus\t2|1239|1386\t62.5\t\n".to_vec();
///
/// let mut input: Cursor<Vec<u8>> = Cursor::new(data);
/// let got = read_metaphlan("g", &mut input).unwrap();
///
/// assert_eq!(got.get("k__Bacteria|p__Firmicutes|g__Bacillus"), Some(&62.5));
/// assert_eq!(got.len(), 1);
/// ```
///
pub fn read_metaphlan<R: Read>(
    rank: &str,
    conn: &mut R,
) -> Result<IndexMap<String, f64>, E> {
    let separator: char = '\t';
    let rank_letter = match rank.chars().next() {
        Some(letter) => letter.to_ascii_lowercase(),
        // No rank requested means no rows can match it
        None => return Ok(IndexMap::new()),
    };

    let mut contents: String = String::new();
    conn.read_to_string(&mut contents)?;

    let mut abundances: IndexMap<String, f64> = IndexMap::new();
    for (idx, line) in contents.lines().enumerate() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let records: Vec<&str> = line.split(separator).collect();
        if records.len() != 4 {
            return Err(Box::new(MalformedProfile {
                format: "metaphlan",
                line: idx + 1,
                expected: 4,
                found: records.len(),
            }));
        }

        let clade_name = records[0];
        if !clade_matches_rank(clade_name, rank_letter) {
            continue;
        }

        let relative_abundance = records[2].parse::<f64>()?;
        abundances.insert(clade_name.to_string(), relative_abundance);
    }

    Ok(abundances)
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn clade_at_requested_rank_matches() {
        use super::clade_matches_rank;

        assert!(clade_matches_rank("k__Bacteria|p__Firmicutes|g__Bacillus", 'g'));
        assert!(clade_matches_rank("k__Bacteria", 'k'));
        assert!(clade_matches_rank("k__Bacteria|p__Firmicutes|g__Bacillus|s__Bacillus_subtilis", 's'));
    }

    #[test]
    fn clade_at_other_rank_does_not_match() {
        use super::clade_matches_rank;

        assert!(!clade_matches_rank("k__Bacteria|p__Firmicutes|g__Bacillus", 'p'));
        assert!(!clade_matches_rank("k__Bacteria|p__Firmicutes|g__Bacillus|s__Bacillus_subtilis", 'g'));
        assert!(!clade_matches_rank("UNCLASSIFIED", 'g'));
    }

    #[test]
    fn read_metaphlan_selects_rank_rows() {
        use super::read_metaphlan;
        use std::io::Cursor;

        let data: Vec<u8> = vec![
            b"#clade_name\tncbi_tax_id\trelative_abundance\tadditional_species\n".to_vec(),
            b"k__Bacteria\t2\t100.0\t\n".to_vec(),
            b"k__Bacteria|p__Firmicutes\t2|1239\t81.25\t\n".to_vec(),
            b"k__Bacteria|p__Firmicutes|g__Bacillus\t2|1239|1386\t62.5\t\n".to_vec(),
            b"k__Bacteria|p__Firmicutes|g__Lactobacillus\t2|1239|1578\t18.75\t\n".to_vec(),
            b"k__Bacteria|p__Firmicutes|g__Bacillus|s__Bacillus_subtilis\t2|1239|1386|1423\t62.5\t\n".to_vec(),
        ].concat();

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let got = read_metaphlan("g", &mut input).unwrap();

        assert_eq!(got.len(), 2);
        assert_eq!(got.get("k__Bacteria|p__Firmicutes|g__Bacillus"), Some(&62.5));
        assert_eq!(got.get("k__Bacteria|p__Firmicutes|g__Lactobacillus"), Some(&18.75));
    }

    #[test]
    fn read_metaphlan_full_rank_name_selects_by_first_letter() {
        use super::read_metaphlan;
        use std::io::Cursor;

        let data: Vec<u8> = vec![
            b"k__Bacteria|p__Firmicutes\t2|1239\t81.25\t\n".to_vec(),
            b"k__Bacteria|p__Firmicutes|g__Bacillus\t2|1239|1386\t62.5\t\n".to_vec(),
        ].concat();

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let got = read_metaphlan("Phylum", &mut input).unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got.get("k__Bacteria|p__Firmicutes"), Some(&81.25));
    }

    #[test]
    fn read_metaphlan_rank_not_in_file_is_empty() {
        use super::read_metaphlan;
        use std::io::Cursor;

        let data: Vec<u8> = b"k__Bacteria\t2\t100.0\t\n".to_vec();

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let got = read_metaphlan("s", &mut input).unwrap();

        assert!(got.is_empty());
    }

    #[test]
    fn read_metaphlan_wrong_column_count_is_an_error() {
        use super::read_metaphlan;
        use std::io::Cursor;

        let data: Vec<u8> = b"k__Bacteria\t2\t100.0\n".to_vec();

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let got = read_metaphlan("k", &mut input);

        assert!(got.is_err());
    }

    #[test]
    fn read_metaphlan_bad_abundance_is_an_error() {
        use super::read_metaphlan;
        use std::io::Cursor;

        let data: Vec<u8> = b"k__Bacteria\t2\tabundant\t\n".to_vec();

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let got = read_metaphlan("k", &mut input);

        assert!(got.is_err());
    }

    #[test]
    fn read_metaphlan_is_idempotent() {
        use super::read_metaphlan;
        use std::io::Cursor;

        let data: Vec<u8> = vec![
            b"k__Bacteria|p__Firmicutes|g__Bacillus\t2|1239|1386\t62.5\t\n".to_vec(),
            b"k__Bacteria|p__Firmicutes|g__Lactobacillus\t2|1239|1578\t18.75\t\n".to_vec(),
        ].concat();

        let first = read_metaphlan("g", &mut Cursor::new(data.clone())).unwrap();
        let second = read_metaphlan("g", &mut Cursor::new(data)).unwrap();

        assert_eq!(first, second);
    }
}
