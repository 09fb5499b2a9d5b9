use std::io::BufRead;

use anyhow::Result;
use quick_xml::{events::Event, Reader};

/// The geospatial question types a form field can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoType {
    /// A single position
    Point,

    /// An ordered sequence of positions forming an open line
    Trace,

    /// An ordered sequence of positions forming a closed outline
    Shape,
}

impl GeoType {
    /// Maps a binding `type' attribute to a geo type. Returns [`None`] for
    /// all non-geospatial types.
    pub fn from_binding_type(value: &str) -> Option<Self> {
        match value {
            "geopoint" => Some(GeoType::Point),
            "geotrace" => Some(GeoType::Trace),
            "geoshape" => Some(GeoType::Shape),
            _ => None,
        }
    }
}

/// A form field bound to a geospatial question type
#[derive(Debug, Clone, PartialEq)]
pub struct GeoBinding {
    /// The data node-set path the binding declaration refers to
    pub node_path: String,

    /// The bound geospatial type
    pub geo_type: GeoType,
}

impl GeoBinding {
    /// Returns the tag name the bound values carry in an instance document,
    /// i.e. the last segment of the node-set path
    pub fn tag_name(&self) -> &str {
        self.node_path.rsplit('/').next().unwrap_or(&self.node_path)
    }
}

/// Scans a form definition for `bind' declarations with a geospatial type
/// and returns them in document order. Declarations without a `nodeset'
/// attribute and declarations of any other type are ignored.
pub fn geo_bindings<R: BufRead>(input: R) -> Result<Vec<GeoBinding>> {
    let mut reader = Reader::from_reader(input);

    let mut result = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(s) | Event::Empty(s) => {
                if s.local_name().as_ref() == b"bind" {
                    let geo_type = s
                        .try_get_attribute("type")?
                        .map(|a| a.unescape_value())
                        .transpose()?
                        .and_then(|t| GeoType::from_binding_type(&t));

                    if let Some(geo_type) = geo_type {
                        if let Some(nodeset) = s.try_get_attribute("nodeset")? {
                            result.push(GeoBinding {
                                node_path: nodeset.unescape_value()?.to_string(),
                                geo_type,
                            });
                        }
                    }
                }
            }

            Event::Eof => break,

            _ => {}
        }

        buf.clear();
    }

    Ok(result)
}
