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

//! taulu is a library for:
//!
//!   - Reading taxonomic abundance profiles output by metagenomic profilers.
//!   - Selecting the rows at a single taxonomic rank from a profile.
//!   - Combining rank-filtered profiles from many samples into one
//!     taxa x samples abundance table.
//!
//! The following plain text formats are supported:
//!   - [MetaPhlAn](https://github.com/biobakery/MetaPhlAn) clade profiles
//!     (tab-separated, '#' comments; ranks are the one-letter codes embedded
//!     in the clade name, eg. `g__` for genus).
//!   - [CAMI profiling format](https://github.com/bioboxes/rfc) as output by
//!     eg. [KMCP](https://github.com/shenwei356/kmcp) (tab-separated, '@'
//!     comments; ranks are full words in the RANK column, eg. "genus").
//!
//! Input compressed with gzip is decompressed transparently based on the .gz
//! file extension.
//!
//! ## Rust API
//!
//! The API provides two functions per format:
//!
//!   - [read_metaphlan_file] / [read_cami_file]: read one profile into a
//!     mapping from taxon to abundance at a requested rank.
//!   - [read_metaphlan_files] / [read_cami_files]: read many profiles and
//!     outer-join them into an [AbundanceTable], one column per input file.
//!
//! For operating on structs that implement [Read](std::io::Read) directly,
//! use [parser::metaphlan::read_metaphlan] and [parser::cami::read_cami].
//! [printer::write_table] formats a combined table as plain text.
//!
//! All operations are pure transformations: each call opens, parses, and
//! closes its own inputs sequentially and no state is retained between calls.
//!

use std::path::Path;

use indexmap::IndexMap;
use log::debug;

pub mod parser;
pub mod printer;
pub mod sample;
pub mod table;

use crate::parser::cami::read_cami;
use crate::parser::metaphlan::read_metaphlan;
use crate::parser::open_profile;
use crate::sample::sample_label_from_path;
use crate::sample::sample_name_from_path;

pub use crate::table::AbundanceTable;

type E = Box<dyn std::error::Error>;

/// Rank used for MetaPhlAn profiles when no other rank is requested.
pub const METAPHLAN_DEFAULT_RANK: &str = "g";

/// Rank used for CAMI profiles when no other rank is requested.
pub const CAMI_DEFAULT_RANK: &str = "genus";

/// Read relative abundances at `rank` from a MetaPhlAn profile file.
///
/// Returns a mapping from the clade names whose deepest lineage level is at
/// `rank` to their relative abundance. Only the first character of `rank` is
/// significant and it is lower-cased; see [METAPHLAN_DEFAULT_RANK].
///
/// A rank that is not present in the file yields an empty mapping.
///
/// ## Errors
///
/// Errors if the file is missing or unreadable, or if its contents do not
/// match the four-column tab-separated MetaPhlAn layout.
///
pub fn read_metaphlan_file<P: AsRef<Path>>(
    path: P,
    rank: &str,
) -> Result<IndexMap<String, f64>, E> {
    let path = path.as_ref();
    debug!("Reading MetaPhlAn profile from {}", path.display());

    let mut conn = open_profile(path)?;
    read_metaphlan(rank, &mut conn)
}

/// Combine MetaPhlAn profiles into an abundance table at `rank`.
///
/// Applies [read_metaphlan_file] to each path in `paths` and outer-joins the
/// results on the clade names. Columns are labeled with each input path's
/// file name (extension retained, see
/// [sample_label_from_path](sample::sample_label_from_path)) and follow the
/// input order.
///
/// ## Errors
///
/// Errors if reading any single input fails; no partial table is returned.
///
pub fn read_metaphlan_files<P: AsRef<Path>>(
    paths: &[P],
    rank: &str,
) -> Result<AbundanceTable, E> {
    debug!("Combining {} MetaPhlAn profiles at rank {}", paths.len(), rank);

    let mut series: Vec<(String, IndexMap<String, f64>)> = Vec::with_capacity(paths.len());
    for path in paths {
        let values = read_metaphlan_file(path, rank)?;
        series.push((sample_label_from_path(path.as_ref()), values));
    }

    Ok(AbundanceTable::from_series(series))
}

/// Read percentages at `rank` from a CAMI profile file.
///
/// Returns a mapping from taxonomy paths (';'-delimited, see
/// [parser::cami::read_cami]) to the percentage of the rows whose rank column
/// equals `rank` exactly; see [CAMI_DEFAULT_RANK].
///
/// A rank that is not present in the file yields an empty mapping.
///
/// ## Errors
///
/// Errors if the file is missing or unreadable, or if its contents do not
/// match the five-column tab-separated CAMI layout.
///
pub fn read_cami_file<P: AsRef<Path>>(
    path: P,
    rank: &str,
) -> Result<IndexMap<String, f64>, E> {
    let path = path.as_ref();
    debug!("Reading CAMI profile from {}", path.display());

    let mut conn = open_profile(path)?;
    read_cami(rank, &mut conn)
}

/// Combine CAMI profiles into an abundance table at `rank`.
///
/// Applies [read_cami_file] to each path in `paths` and outer-joins the
/// results on the taxonomy paths. Columns are labeled with each input path's
/// file name truncated at the first '.' (see
/// [sample_name_from_path](sample::sample_name_from_path)) and follow the
/// input order.
///
/// ## Errors
///
/// Errors if reading any single input fails; no partial table is returned.
///
pub fn read_cami_files<P: AsRef<Path>>(
    paths: &[P],
    rank: &str,
) -> Result<AbundanceTable, E> {
    debug!("Combining {} CAMI profiles at rank {}", paths.len(), rank);

    let mut series: Vec<(String, IndexMap<String, f64>)> = Vec::with_capacity(paths.len());
    for path in paths {
        let values = read_cami_file(path, rank)?;
        series.push((sample_name_from_path(path.as_ref()), values));
    }

    Ok(AbundanceTable::from_series(series))
}
