//! Structural checks on an emitted record.
//!
//! This is stricter than conversion: a converted record keeps verses with
//! some channels empty, while validation requires every field to be present.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::record::{Corpus, Sukta, Verse};

/// Highest mandala number in the corpus.
pub const MAX_MANDALA: u32 = 10;

/// A single problem found in a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    #[error("record must contain at least one mandala")]
    NoMandalas,

    #[error("mandala {0}: number must be between 1 and 10")]
    MandalaOutOfRange(u32),

    #[error("mandala {mandala}, sukta {index}: missing required field \"{field}\"")]
    MissingSuktaField {
        mandala: u32,
        index: usize,
        field: &'static str,
    },

    #[error("mandala {mandala}, sukta {sukta}: must have at least one verse")]
    NoVerses { mandala: u32, sukta: u32 },

    #[error("mandala {mandala}, sukta {sukta}, verse {index}: missing required field \"{field}\"")]
    MissingVerseField {
        mandala: u32,
        sukta: u32,
        index: usize,
        field: &'static str,
    },

    #[error("mandala {mandala}, sukta {sukta}, verse {index}: verse number must be a positive integer")]
    InvalidVerseNumber { mandala: u32, sukta: u32, index: usize },

    #[error("duplicate suktaId found: {0}")]
    DuplicateSuktaId(String),
}

/// Totals plus every issue found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub mandalas: usize,
    pub suktas: usize,
    pub verses: usize,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mandalas: {}, Suktas: {}, Verses: {}",
            self.mandalas, self.suktas, self.verses
        )
    }
}

/// Check a record and collect every issue.
pub fn validate(corpus: &Corpus) -> ValidationReport {
    let mut report = ValidationReport {
        mandalas: corpus.mandalas.len(),
        suktas: corpus.sukta_count(),
        verses: corpus.verse_count(),
        issues: Vec::new(),
    };

    if corpus.mandalas.is_empty() {
        report.issues.push(Issue::NoMandalas);
    }

    let mut seen_ids = HashSet::new();
    for mandala in &corpus.mandalas {
        if !(1..=MAX_MANDALA).contains(&mandala.mandala) {
            report.issues.push(Issue::MandalaOutOfRange(mandala.mandala));
        }

        for (index, sukta) in mandala.suktas.iter().enumerate() {
            check_sukta(mandala.mandala, index + 1, sukta, &mut report.issues);

            if !sukta.sukta_id.is_empty() && !seen_ids.insert(sukta.sukta_id.as_str()) {
                report
                    .issues
                    .push(Issue::DuplicateSuktaId(sukta.sukta_id.clone()));
            }
        }
    }

    report
}

fn check_sukta(mandala: u32, index: usize, sukta: &Sukta, issues: &mut Vec<Issue>) {
    let fields = [
        ("suktaId", sukta.sukta_id.is_empty()),
        ("suktaNumber", sukta.sukta_number == 0),
        ("rsi", sukta.rsi.is_empty()),
        ("deity", sukta.deity.is_empty()),
        ("meter", sukta.meter.is_empty()),
    ];
    for (field, missing) in fields {
        if missing {
            issues.push(Issue::MissingSuktaField {
                mandala,
                index,
                field,
            });
        }
    }

    if sukta.verses.is_empty() {
        issues.push(Issue::NoVerses {
            mandala,
            sukta: sukta.sukta_number,
        });
    }

    for (i, verse) in sukta.verses.iter().enumerate() {
        check_verse(mandala, sukta.sukta_number, i + 1, verse, issues);
    }
}

fn check_verse(mandala: u32, sukta: u32, index: usize, verse: &Verse, issues: &mut Vec<Issue>) {
    if verse.verse_number == 0 {
        issues.push(Issue::InvalidVerseNumber {
            mandala,
            sukta,
            index,
        });
    }

    let fields = [
        ("sanskrit_deva", verse.sanskrit_deva.is_empty()),
        ("transliteration", verse.transliteration.is_empty()),
        ("translation.text", verse.translation.text.is_empty()),
        ("translation.source", verse.translation.source.is_empty()),
        ("translation.license", verse.translation.license.is_empty()),
    ];
    for (field, missing) in fields {
        if missing {
            issues.push(Issue::MissingVerseField {
                mandala,
                sukta,
                index,
                field,
            });
        }
    }
}
