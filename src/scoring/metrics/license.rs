//! License compatibility scoring

use crate::scoring::types::RepoDetails;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::collections::HashMap;

// (SPDX id, full name, compatibility)
const LICENSES: [(&str, &str, f64); 36] = [
    ("AFL-3.0", "Academic Free License v3.0", 0.0),
    ("Apache-2.0", "Apache License 2.0", 0.5),
    ("Artistic-2.0", "Artistic License 2.0", 1.0),
    ("BSL-1.0", "Boost Software License 1.0", 1.0),
    ("BSD-2-Clause", "BSD 2-clause Simplified License", 1.0),
    ("BSD-3-Clause", "BSD 3-clause New or Revised License", 1.0),
    ("BSD-3-Clause-Clear", "BSD 3-clause Clear License", 1.0),
    ("BSD-4-Clause", "BSD 4-clause Original or Old License", 0.0),
    ("0BSD", "BSD Zero Clause License", 1.0),
    ("CC", "Creative Commons License Family", 0.0),
    ("CC0-1.0", "Creative Commons Zero v1.0 Universal", 0.0),
    ("CC-BY-4.0", "Creative Commons Attribution 4.0", 0.0),
    ("CC-BY-SA-4.0", "Creative Commons Attribution ShareAlike 4.0", 0.0),
    ("WTFPL", "Do What The F*ck You Want To Public License", 0.5),
    ("ECL-2.0", "Educational Community License v2.0", 0.0),
    ("EPL-1.0", "Eclipse Public License 1.0", 0.0),
    ("EPL-2.0", "Eclipse Public License 2.0", 0.0),
    ("EUPL-1.1", "European Union Public License 1.1", 0.0),
    ("AGPL-3.0", "GNU Affero General Public License v3.0", 0.0),
    ("GPL", "GNU General Public License family", 0.0),
    ("GPL-2.0", "GNU General Public License v2.0", 0.0),
    ("GPL-3.0", "GNU General Public License v3.0", 0.0),
    ("LGPL", "GNU Lesser General Public License family", 0.0),
    ("LGPL-2.1", "GNU Lesser General Public License v2.1", 1.0),
    ("LGPL-3.0", "GNU Lesser General Public License v3.0", 0.0),
    ("ISC", "ISC License", 1.0),
    ("LPPL-1.3c", "LaTeX Project Public License v1.3c", 0.0),
    ("MS-PL", "Microsoft Public License", 0.0),
    ("MIT", "MIT License", 1.0),
    ("MPL-2.0", "Mozilla Public License 2.0", 0.0),
    ("OSL-3.0", "Open Software License 3.0", 0.0),
    ("PostgreSQL", "PostgreSQL License", 1.0),
    ("OFL-1.1", "SIL Open Font License 1.1", 0.0),
    ("NCSA", "University of Illinois/NCSA Open Source License", 1.0),
    ("Unlicense", "The Unlicense", 1.0),
    ("Zlib", "zLib License", 1.0),
];

// Umbrella entries too generic to pick out of free text
const FAMILY_IDS: [&str; 3] = ["CC", "GPL", "LGPL"];

lazy_static! {
    /// Compatibility of known licenses, keyed by SPDX id and by full name.
    ///
    /// Lookups are exact: `mit` or `MIT-0` are unknown and score 0.
    static ref LICENSE_SCORES: HashMap<&'static str, f64> = {
        let mut table = HashMap::with_capacity(LICENSES.len() * 2);
        for (id, name, score) in LICENSES {
            table.insert(id, score);
            table.insert(name, score);
        }
        table
    };

    /// Whole-word, case-insensitive match of any specific SPDX id.
    /// Longer ids come first so `BSD-3-Clause-Clear` wins over `BSD-3-Clause`.
    static ref LICENSE_ID_RE: Result<Regex, regex::Error> = {
        let mut ids: Vec<&str> = LICENSES
            .iter()
            .map(|(id, _, _)| *id)
            .filter(|id| !FAMILY_IDS.contains(id))
            .collect();
        ids.sort_by_key(|id| std::cmp::Reverse(id.len()));
        let alternation = ids
            .iter()
            .map(|id| regex::escape(id))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
    };
}

/// First SPDX id mentioned in free text such as a README, in its canonical
/// spelling.
#[must_use]
pub fn license_from_text(text: &str) -> Option<&'static str> {
    let re = LICENSE_ID_RE.as_ref().ok()?;
    let found = re.find(text)?.as_str();
    LICENSES
        .iter()
        .map(|(id, _, _)| *id)
        .find(|id| id.eq_ignore_ascii_case(found))
}

/// Look up the compatibility score of a license id or name.
///
/// Unknown or missing licenses score 0.
#[must_use]
pub fn license_score(license: Option<&str>) -> f64 {
    license
        .and_then(|id| LICENSE_SCORES.get(id).copied())
        .unwrap_or(0.0)
}

/// Score the license recorded in `details`.
pub fn calculate_license(details: &RepoDetails) -> f64 {
    let score = license_score(details.license.as_deref());
    debug!(
        "{}: license {:?} scores {score}",
        details.full_name(),
        details.license
    );
    score
}
