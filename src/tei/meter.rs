//! Pluggable meter resolution.
//!
//! The meter of a hymn is not reliably encoded, so lookup is a strategy the
//! caller picks. Returning `None` leaves the meter as `"Unknown"`.

use crate::dom::{NodeId, XmlDocument};
use crate::text::normalize;

/// Resolve the meter of a hymn node.
pub trait MeterLookup {
    fn lookup(&self, doc: &XmlDocument, hymn: NodeId) -> Option<String>;
}

/// Never resolves a meter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMeter;

impl MeterLookup for NoMeter {
    fn lookup(&self, _doc: &XmlDocument, _hymn: NodeId) -> Option<String> {
        None
    }
}

/// Reads `fs[@type='metre_info']//f[@name='metre']` below the hymn.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetreFeature;

impl MeterLookup for MetreFeature {
    fn lookup(&self, doc: &XmlDocument, hymn: NodeId) -> Option<String> {
        let structure =
            doc.find_descendant(hymn, |d, id| d.matches(id, "fs", &[("type", "metre_info")]))?;
        let feature =
            doc.find_descendant(structure, |d, id| d.matches(id, "f", &[("name", "metre")]))?;
        let metre = normalize(Some(&doc.text_content(feature)));
        (!metre.is_empty()).then_some(metre)
    }
}

impl<F> MeterLookup for F
where
    F: Fn(&XmlDocument, NodeId) -> Option<String>,
{
    fn lookup(&self, doc: &XmlDocument, hymn: NodeId) -> Option<String> {
        self(doc, hymn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_str;

    const HYMN: &str = r#"<div type="hymn">
  <fs type="metre_info"><f name="pada_count">3</f><f name="metre">  Gāyatrī </f></fs>
</div>"#;

    #[test]
    fn test_no_meter() {
        let doc = parse_str(HYMN).unwrap();
        assert_eq!(NoMeter.lookup(&doc, doc.root_element().unwrap()), None);
    }

    #[test]
    fn test_metre_feature() {
        let doc = parse_str(HYMN).unwrap();
        assert_eq!(
            MetreFeature.lookup(&doc, doc.root_element().unwrap()),
            Some("Gāyatrī".to_string())
        );
    }

    #[test]
    fn test_metre_feature_absent_or_blank() {
        let doc = parse_str(
            r#"<div type="hymn"><fs type="other"><f name="metre">Triṣṭubh</f></fs></div>"#,
        )
        .unwrap();
        assert_eq!(MetreFeature.lookup(&doc, doc.root_element().unwrap()), None);

        let doc = parse_str(
            r#"<div type="hymn"><fs type="metre_info"><f name="metre"> </f></fs></div>"#,
        )
        .unwrap();
        assert_eq!(MetreFeature.lookup(&doc, doc.root_element().unwrap()), None);
    }

    #[test]
    fn test_closure_lookup() {
        let doc = parse_str(r#"<div type="hymn" n="jagati"/>"#).unwrap();
        let lookup = |d: &XmlDocument, id: NodeId| d.attr(id, "n").map(str::to_string);
        assert_eq!(
            lookup.lookup(&doc, doc.root_element().unwrap()),
            Some("jagati".to_string())
        );
    }
}
