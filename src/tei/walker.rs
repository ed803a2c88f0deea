//! Document walk: book → hymns → stanzas → output record.

use std::fmt;

use tracing::{debug, info};

use crate::dom::{NodeId, XmlDocument};
use crate::error::{Error, Result};
use crate::record::{Corpus, Sukta, Translation, UNKNOWN, Verse};
use crate::text::normalize;

use super::channel::Channel;
use super::meter::{MeterLookup, NoMeter};
use super::{
    ATTR_ANA, ATTR_ID, ATTR_LANG, ATTR_TYPE, BOOK_ID_PREFIX, DIV, GROUP_PREFIX, LANG_ENGLISH,
    PARAGRAPH, TYPE_ADDRESSEE, TYPE_BOOK, TYPE_DEDICATION, TYPE_GROUP, TYPE_HYMN, TYPE_STANZA,
};

/// Knobs for a conversion.
pub struct ConvertOptions {
    meter: Box<dyn MeterLookup>,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self {
            meter: Box::new(NoMeter),
        }
    }

    /// Use a custom strategy to resolve hymn meters.
    pub fn with_meter(mut self, lookup: impl MeterLookup + 'static) -> Self {
        self.meter = Box::new(lookup);
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConvertOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertOptions").finish_non_exhaustive()
    }
}

/// Counts gathered during a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub hymns_seen: usize,
    pub stanzas_seen: usize,
    pub hymns_dropped: usize,
    pub stanzas_dropped: usize,
}

/// Result of a walk: the record plus what was skipped to build it.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub corpus: Corpus,
    pub stats: ConversionStats,
}

/// Walk a parsed TEI document and assemble the output record.
///
/// Fails only when no `div[@type='book']` exists. Everything else missing
/// falls back to defaults.
pub fn convert(doc: &XmlDocument, options: &ConvertOptions) -> Result<Conversion> {
    let book = doc
        .find_descendant(doc.document(), |d, id| is_div(d, id, TYPE_BOOK))
        .ok_or_else(Error::book_not_found)?;

    let mandala = mandala_number(doc.attr(book, ATTR_ID));
    info!(mandala, "processing mandala");

    let mut stats = ConversionStats::default();
    let mut suktas = Vec::new();

    for hymn in doc.select_children(book, |d, id| is_div(d, id, TYPE_HYMN)) {
        stats.hymns_seen += 1;
        let sukta_number = sukta_number(doc.attr(hymn, ATTR_ANA), suktas.len() + 1);
        info!(sukta = sukta_number, "processing hymn");

        let meta = HymnMeta::extract(doc, hymn, options.meter.as_ref());

        let mut verses = Vec::new();
        for (position, stanza) in doc
            .select_children(hymn, |d, id| is_div(d, id, TYPE_STANZA))
            .enumerate()
        {
            stats.stanzas_seen += 1;
            let verse = extract_verse(doc, stanza, position as u32 + 1);
            if verse.is_empty() {
                debug!(sukta = sukta_number, verse = verse.verse_number, "dropping empty stanza");
                stats.stanzas_dropped += 1;
                continue;
            }
            verses.push(verse);
        }

        if verses.is_empty() {
            debug!(sukta = sukta_number, "dropping hymn without verses");
            stats.hymns_dropped += 1;
            continue;
        }

        suktas.push(Sukta {
            sukta_id: Sukta::compose_id(mandala, sukta_number),
            sukta_number,
            rsi: meta.rsi,
            deity: meta.deity,
            meter: meta.meter,
            verses,
        });
    }

    Ok(Conversion {
        corpus: Corpus::single(mandala, suktas),
        stats,
    })
}

fn is_div(doc: &XmlDocument, id: NodeId, kind: &str) -> bool {
    doc.matches(id, DIV, &[(ATTR_TYPE, kind)])
}

/// `b10` → 10. Anything else, including a missing id, is mandala 1.
fn mandala_number(xml_id: Option<&str>) -> u32 {
    match xml_id
        .and_then(|id| id.strip_prefix(BOOK_ID_PREFIX))
        .and_then(parse_decimal)
    {
        Some(n) => n,
        None => {
            debug!(?xml_id, "unparsable book id, defaulting to mandala 1");
            1
        }
    }
}

/// Hymn number from an all-digit `ana`, otherwise `next`: one past the
/// number of suktas kept so far.
fn sukta_number(ana: Option<&str>, next: usize) -> u32 {
    ana.and_then(parse_decimal).unwrap_or_else(|| {
        debug!(?ana, next, "hymn order missing, using position");
        next as u32
    })
}

/// Parse a run of ASCII or Devanagari decimal digits.
fn parse_decimal(digits: &str) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0u32, |acc, c| {
        acc.checked_mul(10)?.checked_add(digit_value(c)?)
    })
}

fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        '\u{0966}'..='\u{096F}' => Some(c as u32 - 0x0966),
        _ => None,
    }
}

fn extract_verse(doc: &XmlDocument, stanza: NodeId, verse_number: u32) -> Verse {
    Verse {
        verse_number,
        sanskrit_deva: Channel::Devanagari.extract(doc, stanza),
        transliteration: Channel::Transliteration.extract(doc, stanza),
        translation: Translation::griffith(Channel::Translation.extract(doc, stanza)),
    }
}

#[derive(Debug, PartialEq, Eq)]
struct HymnMeta {
    rsi: String,
    deity: String,
    meter: String,
}

impl HymnMeta {
    fn extract(doc: &XmlDocument, hymn: NodeId, meter: &dyn MeterLookup) -> Self {
        let mut meta = HymnMeta {
            rsi: UNKNOWN.to_string(),
            deity: UNKNOWN.to_string(),
            meter: meter.lookup(doc, hymn).unwrap_or_else(|| UNKNOWN.to_string()),
        };

        let Some(dedication) = doc.find_descendant(hymn, |d, id| is_div(d, id, TYPE_DEDICATION))
        else {
            debug!("hymn has no dedication");
            return meta;
        };

        if let Some(deity) = english_paragraph(doc, dedication, TYPE_ADDRESSEE) {
            meta.deity = deity;
        }
        if let Some(group) = english_paragraph(doc, dedication, TYPE_GROUP) {
            meta.rsi = match group.strip_prefix(GROUP_PREFIX) {
                Some(seer) => seer.to_string(),
                None => group,
            };
        }

        meta
    }
}

/// Normalized text of the first English paragraph inside `div[@type=kind]`.
fn english_paragraph(doc: &XmlDocument, dedication: NodeId, kind: &str) -> Option<String> {
    let section = doc.find_descendant(dedication, |d, id| is_div(d, id, kind))?;
    let paragraph = doc.find_descendant(section, |d, id| {
        d.matches(id, PARAGRAPH, &[(ATTR_LANG, LANG_ENGLISH)])
    })?;
    let text = normalize(Some(&doc.text_content(paragraph)));
    (!text.is_empty()).then_some(text)
}
