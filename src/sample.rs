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
use std::path::Path;

/// Sample label from a profile file path
///
/// Strips the directory components and keeps the extension, so
/// "/data/sample1.tsv" labels the sample "sample1.tsv".
///
pub fn sample_label_from_path(
    path: &Path,
) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Sample name from a profile file path
///
/// Strips the directory components and truncates the file name at the first
/// '.', discarding multi-part extensions: "/data/SRX1.cami.profile" names the
/// sample "SRX1".
///
pub fn sample_name_from_path(
    path: &Path,
) -> String {
    let base = sample_label_from_path(path);
    base.split('.').next().unwrap_or("").to_string()
}
