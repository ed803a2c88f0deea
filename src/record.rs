//! The normalized output record.
//!
//! Field order here is the key order of the emitted JSON.

use serde::{Deserialize, Serialize};

/// Attribution attached to every English translation.
pub const TRANSLATION_SOURCE: &str = "R.T.H. Griffith, 1896";
/// License attached to every English translation.
pub const TRANSLATION_LICENSE: &str = "Public Domain";
/// Placeholder for unresolved hymn metadata.
pub const UNKNOWN: &str = "Unknown";

/// Top-level record: one entry per converted book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    pub mandalas: Vec<Mandala>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mandala {
    pub mandala: u32,
    pub suktas: Vec<Sukta>,
}

/// A hymn with its metadata and retained verses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sukta {
    pub sukta_id: String,
    pub sukta_number: u32,
    pub rsi: String,
    pub deity: String,
    pub meter: String,
    pub verses: Vec<Verse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    #[serde(rename = "verseNumber")]
    pub verse_number: u32,
    pub sanskrit_deva: String,
    pub transliteration: String,
    pub translation: Translation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub text: String,
    pub source: String,
    pub license: String,
}

impl Translation {
    /// A Griffith translation with the fixed attribution.
    pub fn griffith(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: TRANSLATION_SOURCE.to_string(),
            license: TRANSLATION_LICENSE.to_string(),
        }
    }
}

impl Verse {
    /// True when every extracted channel is empty.
    pub fn is_empty(&self) -> bool {
        self.sanskrit_deva.is_empty()
            && self.transliteration.is_empty()
            && self.translation.text.is_empty()
    }
}

impl Sukta {
    /// `"<mandala>-<sukta>"`.
    pub fn compose_id(mandala: u32, sukta_number: u32) -> String {
        format!("{mandala}-{sukta_number}")
    }
}

impl Corpus {
    /// Wrap a single book.
    pub fn single(mandala: u32, suktas: Vec<Sukta>) -> Self {
        Self {
            mandalas: vec![Mandala { mandala, suktas }],
        }
    }

    pub fn sukta_count(&self) -> usize {
        self.mandalas.iter().map(|m| m.suktas.len()).sum()
    }

    pub fn verse_count(&self) -> usize {
        self.mandalas
            .iter()
            .flat_map(|m| &m.suktas)
            .map(|s| s.verses.len())
            .sum()
    }

    /// Serialize as 2-space indented JSON with non-ASCII kept literal.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
