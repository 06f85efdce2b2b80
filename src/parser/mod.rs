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

// Format specific implementations
pub mod cami;
pub mod metaphlan;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use flate2::read::MultiGzDecoder;

type E = Box<dyn std::error::Error>;

/// A profile row that does not match the expected column layout.
#[derive(Debug, Clone)]
pub struct MalformedProfile {
    pub format: &'static str,
    pub line: usize,
    pub expected: usize,
    pub found: usize,
}

impl std::fmt::Display for MalformedProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} profile line {}: expected {} tab-separated columns, found {}",
            self.format, self.line, self.expected, self.found
        )
    }
}

impl std::error::Error for MalformedProfile {}

/// Open a profile file for reading
///
/// Input with a .gz extension is decompressed transparently.
///
pub fn open_profile(
    path: &Path,
) -> Result<Box<dyn Read>, E> {
    let f = File::open(path)?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    if is_gz {
        Ok(Box::new(MultiGzDecoder::new(f)))
    } else {
        Ok(Box::new(f))
    }
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn malformed_profile_message() {
        use super::MalformedProfile;

        let err = MalformedProfile { format: "metaphlan", line: 3, expected: 4, found: 2 };
        let got = err.to_string();

        assert_eq!(got, "metaphlan profile line 3: expected 4 tab-separated columns, found 2");
    }

    #[test]
    fn open_profile_missing_file_is_an_error() {
        use super::open_profile;
        use std::path::Path;

        let got = open_profile(Path::new("/does/not/exist.tsv"));

        assert!(got.is_err());
    }
}
