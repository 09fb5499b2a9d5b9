use std::{
    fs::File,
    io::BufReader,
    path::Path,
};

use anyhow::{Context, Result};
use tracing::warn;

use crate::{
    coordinates::{parse_point, parse_vertices, ParseCoordinatesError},
    form::{geo_bindings, GeoBinding, GeoType},
    instance::field_values,
    render::{GeoFeature, Overlay, Popup, POLYLINE_WIDTH},
    source::{FormsSource, InstanceRecord, InstancesSource},
};

/// Renders map overlays for all plotted form instances.
///
/// For every instance the renderer resolves the owning form definition,
/// scans it for geo-typed bindings, extracts the bound values from the
/// instance document, and decodes each value into a marker (point) or a
/// polyline (trace, shape). Instances and values that cannot be processed
/// are logged and skipped; rendering continues for everything else.
pub struct GeoRenderer<'a> {
    forms: &'a dyn FormsSource,
    instances: &'a dyn InstancesSource,
}

impl<'a> GeoRenderer<'a> {
    /// Creates a renderer over the given form and instance sources
    pub fn new(forms: &'a dyn FormsSource, instances: &'a dyn InstancesSource) -> Self {
        Self { forms, instances }
    }

    /// Queries all plotted instances and produces their overlays
    pub fn render(&self) -> Vec<Overlay> {
        let mut result = Vec::new();
        for record in self.instances.plotted_instances() {
            match self.render_instance(&record) {
                Ok(mut overlays) => result.append(&mut overlays),
                Err(err) => warn!("skipping instance {}: {:#}", record.id, err),
            }
        }
        result
    }

    fn render_instance(&self, record: &InstanceRecord) -> Result<Vec<Overlay>> {
        let form_path = self
            .forms
            .form_file(&record.form_id)
            .with_context(|| format!("no form definition for form id `{}'", record.form_id))?;

        let bindings = geo_bindings(open(&form_path)?)
            .with_context(|| format!("unable to parse form `{}'", form_path.display()))?;
        if bindings.is_empty() {
            return Ok(Vec::new());
        }

        let tag_names: Vec<&str> = bindings.iter().map(GeoBinding::tag_name).collect();
        let values = field_values(open(&record.file_path)?, &tag_names).with_context(|| {
            format!("unable to parse instance `{}'", record.file_path.display())
        })?;

        let feature = GeoFeature {
            id: record.id,
            name: record.display_name.clone(),
            status: record.status,
            uri: record.uri.clone(),
        };

        let mut overlays = Vec::new();
        for binding in &bindings {
            let Some(field_values) = values.get(binding.tag_name()) else {
                continue;
            };
            for value in field_values {
                match overlay_for_value(&feature, binding, value) {
                    Ok(Some(overlay)) => overlays.push(overlay),
                    Ok(None) => {}
                    Err(err) => warn!(
                        "skipping malformed value of `{}' in instance {}: {}",
                        binding.tag_name(),
                        record.id,
                        err
                    ),
                }
            }
        }

        Ok(overlays)
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file =
        File::open(path).with_context(|| format!("unable to open `{}'", path.display()))?;
    Ok(BufReader::new(file))
}

/// Builds the overlay for one stored field value. Returns [`None`] for a
/// trace or shape value without vertices.
fn overlay_for_value(
    feature: &GeoFeature,
    binding: &GeoBinding,
    value: &str,
) -> Result<Option<Overlay>, ParseCoordinatesError> {
    let popup = Popup::new(feature, binding.tag_name());

    match binding.geo_type {
        GeoType::Point => Ok(Some(Overlay::Marker {
            position: parse_point(value)?,
            style: feature.style(),
            popup,
        })),

        GeoType::Trace | GeoType::Shape => {
            let vertices = parse_vertices(value)?;
            if vertices.is_empty() {
                return Ok(None);
            }
            Ok(Some(Overlay::Polyline {
                vertices,
                width: POLYLINE_WIDTH,
                style: feature.style(),
                popup,
            }))
        }
    }
}
