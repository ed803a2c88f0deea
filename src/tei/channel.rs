//! Parallel annotation blocks within a stanza.

use crate::dom::{NodeId, XmlDocument};
use crate::text::join_normalized;

use super::{ATTR_LANG, ATTR_SOURCE, LINE, LINE_GROUP};

/// One of the three annotation layers extracted from every stanza.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Devanagari text, Eichler edition.
    Devanagari,
    /// ISO-15919 romanization, Zurich edition.
    Transliteration,
    /// English translation by Griffith.
    Translation,
}

impl Channel {
    pub const ALL: [Channel; 3] = [
        Channel::Devanagari,
        Channel::Transliteration,
        Channel::Translation,
    ];

    /// Value of `xml:lang` on the matching `lg`.
    pub fn language(self) -> &'static str {
        match self {
            Channel::Devanagari => "san-Deva",
            Channel::Transliteration => "san-Latn-x-ISO-15919",
            Channel::Translation => "eng",
        }
    }

    /// Value of `source` on the matching `lg`.
    pub fn provenance(self) -> &'static str {
        match self {
            Channel::Devanagari => "eichler",
            Channel::Transliteration => "zurich",
            Channel::Translation => "griffith",
        }
    }

    /// Extract this channel's text from a stanza.
    pub fn extract(self, doc: &XmlDocument, stanza: NodeId) -> String {
        select_channel(doc, stanza, self.language(), self.provenance())
    }
}

/// Find the first `lg` below `verse` tagged with `language` and `provenance`
/// and join its `l` children into one normalized line.
///
/// Returns an empty string when no block matches. Later duplicates are
/// ignored.
pub fn select_channel(
    doc: &XmlDocument,
    verse: NodeId,
    language: &str,
    provenance: &str,
) -> String {
    let Some(block) = doc.find_descendant(verse, |d, id| {
        d.matches(
            id,
            LINE_GROUP,
            &[(ATTR_LANG, language), (ATTR_SOURCE, provenance)],
        )
    }) else {
        return String::new();
    };

    let lines: Vec<String> = doc
        .select_children(block, |d, id| d.local_name(id) == Some(LINE))
        .map(|line| doc.text_content(line))
        .collect();

    join_normalized(lines.iter().map(String::as_str))
}
