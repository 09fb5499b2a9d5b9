use geo::Point;

pub use self::renderer::GeoRenderer;

pub mod renderer;

use crate::source::Status;

/// Width of rendered polylines in pixels
const POLYLINE_WIDTH: f32 = 6.0;

/// Rendering style of an overlay, derived from the instance status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureStyle {
    /// Green marker or line: the instance is complete
    Green,

    /// Red marker or line: every other status
    Red,
}

impl From<Status> for FeatureStyle {
    fn from(status: Status) -> Self {
        if status == Status::Complete {
            FeatureStyle::Green
        } else {
            FeatureStyle::Red
        }
    }
}

/// A form instance shown on the map
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFeature {
    /// The store's record id
    pub id: i64,

    /// The instance display name
    pub name: String,

    /// Lifecycle status of the instance
    pub status: Status,

    /// Reference URI of the source record
    pub uri: String,
}

impl GeoFeature {
    /// Returns the style derived from the instance status
    pub fn style(&self) -> FeatureStyle {
        self.status.into()
    }
}

/// The popup attached to an overlay, linking back to the source record
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    /// Title: the instance display name
    pub title: String,

    /// Snippet: the record id and the field the value came from
    pub snippet: String,

    /// Uppercased status line
    pub status_text: String,

    /// URI opened by the popup's detail action
    pub uri: String,
}

impl Popup {
    /// Builds the popup for one value of `field_name' on `feature'
    pub fn new(feature: &GeoFeature, field_name: &str) -> Self {
        Self {
            title: feature.name.clone(),
            snippet: format!("ID: {}  ({})", feature.id, field_name),
            status_text: feature.status.as_str().to_uppercase(),
            uri: feature.uri.clone(),
        }
    }
}

/// A map annotation produced by the renderer, layered on top of the active
/// tile layers by the host view
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    /// A single-position marker
    Marker {
        position: Point<f64>,
        style: FeatureStyle,
        popup: Popup,
    },

    /// An ordered line through the vertices of a trace or shape
    Polyline {
        vertices: Vec<Point<f64>>,
        width: f32,
        style: FeatureStyle,
        popup: Popup,
    },
}

impl Overlay {
    /// Returns the popup attached to this overlay
    pub fn popup(&self) -> &Popup {
        match self {
            Overlay::Marker { popup, .. } => popup,
            Overlay::Polyline { popup, .. } => popup,
        }
    }

    /// Returns the rendering style of this overlay
    pub fn style(&self) -> FeatureStyle {
        match self {
            Overlay::Marker { style, .. } => *style,
            Overlay::Polyline { style, .. } => *style,
        }
    }

    /// Iterates over every vertex position of this overlay
    pub fn positions(&self) -> impl Iterator<Item = &Point<f64>> {
        match self {
            Overlay::Marker { position, .. } => std::slice::from_ref(position).iter(),
            Overlay::Polyline { vertices, .. } => vertices.iter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use assertor::{assert_that, EqualityAssertion};

    use super::{FeatureStyle, GeoFeature, Popup};
    use crate::source::Status;

    fn feature(status: Status) -> GeoFeature {
        GeoFeature {
            id: 7,
            name: "Well A".to_string(),
            status,
            uri: "instances/7".to_string(),
        }
    }

    /// Complete maps to green, everything else to red
    #[test]
    fn style_from_status() {
        assert_that!(feature(Status::Complete).style()).is_equal_to(FeatureStyle::Green);
        assert_that!(feature(Status::Incomplete).style()).is_equal_to(FeatureStyle::Red);
        assert_that!(feature(Status::Submitted).style()).is_equal_to(FeatureStyle::Red);
        assert_that!(feature(Status::SubmissionFailed).style()).is_equal_to(FeatureStyle::Red);
    }

    /// The popup carries name, id, field name, and the uppercased status
    #[test]
    fn popup_fields() {
        let popup = Popup::new(&feature(Status::Complete), "location");
        assert_that!(popup.title).is_equal_to("Well A".to_string());
        assert_that!(popup.snippet).is_equal_to("ID: 7  (location)".to_string());
        assert_that!(popup.status_text).is_equal_to("COMPLETE".to_string());
        assert_that!(popup.uri).is_equal_to("instances/7".to_string());
    }
}
