//! # samhita
//!
//! Convert TEI-encoded Rig Veda books into a normalized JSON record.
//!
//! Each stanza of the source carries parallel line groups in several
//! languages and editions. The converter picks three of them (Devanagari,
//! ISO-15919 romanization and Griffith's English translation), joins their
//! lines into single normalized strings, attaches hymn metadata from the
//! dedication, and drops stanzas and hymns that end up empty.
//!
//! ## Quick Start
//!
//! ```no_run
//! use samhita::{ConvertOptions, convert_file};
//!
//! let conversion = convert_file("rv_book_10.tei", "mandala10.json", &ConvertOptions::default())?;
//! println!("{} suktas", conversion.corpus.sukta_count());
//! # Ok::<(), samhita::Error>(())
//! ```
//!
//! ## Working in memory
//!
//! ```
//! use samhita::{ConvertOptions, dom, tei};
//!
//! let doc = dom::parse_str(r#"<TEI><div xml:id="b02" type="book">
//!   <div type="hymn" ana="3"><div type="stanza">
//!     <lg xml:lang="eng" source="griffith"><l>Agni,</l><l>be kind.</l></lg>
//!   </div></div>
//! </div></TEI>"#)?;
//!
//! let corpus = tei::convert(&doc, &ConvertOptions::default())?.corpus;
//! let sukta = &corpus.mandalas[0].suktas[0];
//! assert_eq!(sukta.sukta_id, "2-3");
//! assert_eq!(sukta.verses[0].translation.text, "Agni, be kind.");
//! # Ok::<(), samhita::Error>(())
//! ```

pub mod dom;
pub mod error;
pub mod record;
pub mod tei;
pub mod text;
pub mod util;
pub mod validate;

use std::fs;
use std::path::Path;

pub use error::{Error, Result};
pub use record::{Corpus, Mandala, Sukta, Translation, Verse};
pub use tei::{Conversion, ConversionStats, ConvertOptions, MeterLookup, MetreFeature, NoMeter};
pub use validate::{Issue, ValidationReport, validate};

/// Read and parse a TEI file into memory.
pub fn read_tei(path: impl AsRef<Path>) -> Result<dom::XmlDocument> {
    let bytes = fs::read(path)?;
    dom::parse_bytes(&bytes)
}

/// Serialize a record and write it in one go.
pub fn write_json(path: impl AsRef<Path>, corpus: &Corpus) -> Result<()> {
    let json = corpus.to_json_pretty()?;
    fs::write(path, json)?;
    Ok(())
}

/// Convert a TEI file and write the JSON record.
///
/// The output file is only created once the whole record has been built.
pub fn convert_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<Conversion> {
    let doc = read_tei(input)?;
    let conversion = tei::convert(&doc, options)?;
    write_json(output, &conversion.corpus)?;
    Ok(conversion)
}

/// Load an emitted JSON record and validate it.
pub fn check_file(path: impl AsRef<Path>) -> Result<ValidationReport> {
    let json = fs::read_to_string(path)?;
    let corpus = Corpus::from_json(&json)?;
    Ok(validate(&corpus))
}
