use std::path::PathBuf;

use itertools::Itertools;

use super::{FormRecord, FormsSource, InstanceRecord, InstancesSource};

/// A vector-backed implementation of the [`FormsSource`] and
/// [`InstancesSource`] traits. Filtering and ordering happen on query.
#[derive(Debug, Default)]
pub struct MemorySource {
    forms: Vec<FormRecord>,
    instances: Vec<InstanceRecord>,
}

impl MemorySource {
    /// Creates a source over the given form and instance records
    pub fn new(forms: Vec<FormRecord>, instances: Vec<InstanceRecord>) -> Self {
        Self { forms, instances }
    }
}

impl InstancesSource for MemorySource {
    fn plotted_instances(&self) -> Vec<InstanceRecord> {
        self.instances
            .iter()
            .cloned()
            .sorted_by(|a, b| a.display_name.cmp(&b.display_name))
            .collect()
    }
}

impl FormsSource for MemorySource {
    fn form_file(&self, form_id: &str) -> Option<PathBuf> {
        self.forms
            .iter()
            .filter(|f| f.form_id == form_id)
            // versionless definitions sort after versioned ones
            .sorted_by(|a, b| b.version.cmp(&a.version))
            .next()
            .map(|f| f.file_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use assertor::{assert_that, EqualityAssertion, OptionAssertion};

    use super::MemorySource;
    use crate::source::{FormRecord, FormsSource, InstanceRecord, InstancesSource, Status};

    fn instance(id: i64, name: &str, status: Status) -> InstanceRecord {
        InstanceRecord {
            id,
            form_id: "waterpoints".to_string(),
            file_path: PathBuf::from(format!("instances/{id}.xml")),
            display_name: name.to_string(),
            status,
            uri: format!("instances/{id}"),
        }
    }

    fn form(form_id: &str, version: Option<&str>, path: &str) -> FormRecord {
        FormRecord {
            form_id: form_id.to_string(),
            version: version.map(str::to_string),
            file_path: PathBuf::from(path),
        }
    }

    /// Instances of every plotted status come back ordered by display name
    #[test]
    fn instances_ordered_by_display_name() {
        let source = MemorySource::new(
            vec![],
            vec![
                instance(3, "Well C", Status::Submitted),
                instance(1, "Well A", Status::Complete),
                instance(4, "Well D", Status::SubmissionFailed),
                instance(2, "Well B", Status::Incomplete),
            ],
        );

        let names: Vec<String> = source
            .plotted_instances()
            .into_iter()
            .map(|i| i.display_name)
            .collect();
        assert_that!(names).is_equal_to(vec![
            "Well A".to_string(),
            "Well B".to_string(),
            "Well C".to_string(),
            "Well D".to_string(),
        ]);
    }

    /// The newest form version wins when several share a form id
    #[test]
    fn newest_form_version_first() {
        let source = MemorySource::new(
            vec![
                form("waterpoints", Some("1"), "forms/waterpoints_v1.xml"),
                form("waterpoints", Some("2"), "forms/waterpoints_v2.xml"),
                form("wells", Some("9"), "forms/wells.xml"),
            ],
            vec![],
        );

        assert_that!(source.form_file("waterpoints"))
            .is_equal_to(Some(PathBuf::from("forms/waterpoints_v2.xml")));
    }

    /// Versionless definitions sort after versioned ones
    #[test]
    fn versionless_form_sorts_last() {
        let source = MemorySource::new(
            vec![
                form("waterpoints", None, "forms/waterpoints_old.xml"),
                form("waterpoints", Some("1"), "forms/waterpoints_v1.xml"),
            ],
            vec![],
        );

        assert_that!(source.form_file("waterpoints"))
            .is_equal_to(Some(PathBuf::from("forms/waterpoints_v1.xml")));
    }

    /// An unknown form id resolves to nothing
    #[test]
    fn unknown_form_id() {
        let source = MemorySource::new(vec![form("wells", None, "forms/wells.xml")], vec![]);
        assert_that!(source.form_file("waterpoints")).is_none();
    }
}
