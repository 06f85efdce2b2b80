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

/// Parse a CAMI profile
///
/// Reads taxon rows stored in the *CAMI profiling* format (output by eg.
/// KMCP): five tab-separated columns `taxid`, `rank`, `taxpath`, `taxpathsn`,
/// `percentage`, with '@' marking header and comment lines.
///
/// Returns the percentages of the rows whose rank column equals `rank`
/// exactly, keyed by the taxonomy path. The `|` delimiters in `taxpathsn` are
/// replaced with `;` in the keys.
///
/// ## Errors
///
/// Errors if a data row does not have five columns or if a percentage is not
/// a decimal number.
///
/// ## Usage
/// ```rust
/// use taulu::parser::cami::read_cami;
/// use std::io::Cursor;
///
/// let data: Vec<u8> = b"@SampleID:SRX1\n@@TAXID\tRANK\tTAXPATH\tTAXPATHSN\tPERCENTAGE\n1386\tgenus\t2|1239|1386\tBacteria|Firmicutes|Bacillus\t62.5\n".to_vec();
///
/// let mut input: Cursor<Vec<u8>> = Cursor::new(data);
/// let got = read_cami("genus", &mut input).unwrap();
///
/// assert_eq!(got.get("Bacteria;Firmicutes;Bacillus"), Some(&62.5));
/// assert_eq!(got.len(), 1);
/// ```
///
pub fn read_cami<R: Read>(
    rank: &str,
    conn: &mut R,
) -> Result<IndexMap<String, f64>, E> {
    let separator: char = '\t';
    let mut contents: String = String::new();
    conn.read_to_string(&mut contents)?;

    let mut percentages: IndexMap<String, f64> = IndexMap::new();
    for (idx, line) in contents.lines().enumerate() {
        if line.is_empty() || line.starts_with('@') {
            continue;
        }

        let records: Vec<&str> = line.split(separator).collect();
        if records.len() != 5 {
            return Err(Box::new(MalformedProfile {
                format: "cami",
                line: idx + 1,
                expected: 5,
                found: records.len(),
            }));
        }

        if records[1] != rank {
            continue;
        }

        // Convert taxpaths to use ; delimiters
        let taxpathsn = records[3].replace('|', ";");
        let percentage = records[4].parse::<f64>()?;
        percentages.insert(taxpathsn, percentage);
    }

    Ok(percentages)
}
