//! TEI corpus vocabulary and extraction.
//!
//! The encoding this crate reads nests `div` elements by `type`:
//!
//! ```text
//! div[@type='book'][@xml:id='b10']
//!   div[@type='hymn'][@ana='5']
//!     div[@type='dedication']
//!       div[@type='addressee']  p[@xml:lang='eng']
//!       div[@type='group']      p[@xml:lang='eng']
//!     div[@type='stanza']
//!       lg[@xml:lang=...][@source=...]
//!         l, l, ...
//! ```

mod channel;
mod meter;
mod walker;

pub use channel::{Channel, select_channel};
pub use meter::{MeterLookup, MetreFeature, NoMeter};
pub use walker::{Conversion, ConversionStats, ConvertOptions, convert};

pub(crate) const DIV: &str = "div";
pub(crate) const LINE_GROUP: &str = "lg";
pub(crate) const LINE: &str = "l";
pub(crate) const PARAGRAPH: &str = "p";

pub(crate) const ATTR_TYPE: &str = "type";
pub(crate) const ATTR_ID: &str = "xml:id";
pub(crate) const ATTR_LANG: &str = "xml:lang";
pub(crate) const ATTR_SOURCE: &str = "source";
pub(crate) const ATTR_ANA: &str = "ana";

pub(crate) const TYPE_BOOK: &str = "book";
pub(crate) const TYPE_HYMN: &str = "hymn";
pub(crate) const TYPE_STANZA: &str = "stanza";
pub(crate) const TYPE_DEDICATION: &str = "dedication";
pub(crate) const TYPE_ADDRESSEE: &str = "addressee";
pub(crate) const TYPE_GROUP: &str = "group";

pub(crate) const LANG_ENGLISH: &str = "eng";

/// Prefix of a book's `xml:id` ahead of its number.
pub(crate) const BOOK_ID_PREFIX: char = 'b';
/// Prefix of group paragraphs ahead of the seer's name.
pub(crate) const GROUP_PREFIX: &str = "Hymns of ";
