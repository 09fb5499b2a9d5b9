use std::{
    fs::{self, File},
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use tracing::warn;

use super::{FormRecord, FormsSource, InstanceRecord, InstancesSource, MemorySource, Status};
use crate::form::form_metadata;

/// A filesystem-backed implementation of the [`FormsSource`] and
/// [`InstancesSource`] traits: form definitions are discovered by scanning a
/// directory, instances are listed in a catalog document.
///
/// The catalog is an XML file of `instance' elements carrying the store
/// columns as attributes:
///
/// ```xml
/// <catalog>
///   <instance id="1" formId="waterpoints" name="Well A"
///             status="complete" path="instances/1.xml" uri="instances/1"/>
/// </catalog>
/// ```
///
/// Relative `path' attributes are resolved against the catalog's directory.
/// Entries with missing attributes or an unknown status are skipped.
#[derive(Debug)]
pub struct DirectorySource {
    inner: MemorySource,
}

impl DirectorySource {
    /// Builds a source from a directory of form definition files and an
    /// instance catalog
    pub fn open(forms_dir: &Path, catalog: &Path) -> Result<Self> {
        let forms = scan_forms(forms_dir)
            .with_context(|| format!("unable to scan forms in `{}'", forms_dir.display()))?;
        let instances = read_catalog(catalog)
            .with_context(|| format!("unable to read catalog `{}'", catalog.display()))?;
        Ok(Self {
            inner: MemorySource::new(forms, instances),
        })
    }
}

impl FormsSource for DirectorySource {
    fn form_file(&self, form_id: &str) -> Option<PathBuf> {
        self.inner.form_file(form_id)
    }
}

impl InstancesSource for DirectorySource {
    fn plotted_instances(&self) -> Vec<InstanceRecord> {
        self.inner.plotted_instances()
    }
}

/// Reads the identity of every form definition file in `dir'. Files that
/// cannot be parsed or that carry no form id are skipped.
fn scan_forms(dir: &Path) -> Result<Vec<FormRecord>> {
    let mut result = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_form = path.is_file()
            && path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("xml"));
        if !is_form {
            continue;
        }

        let metadata = match File::open(&path).map(BufReader::new).map(form_metadata) {
            Ok(Ok(metadata)) => metadata,
            Ok(Err(err)) => {
                warn!("skipping unparseable form `{}': {:#}", path.display(), err);
                continue;
            }
            Err(err) => {
                warn!("skipping unreadable form `{}': {}", path.display(), err);
                continue;
            }
        };

        let Some(form_id) = metadata.form_id else {
            warn!("skipping form without id: `{}'", path.display());
            continue;
        };

        result.push(FormRecord {
            form_id,
            version: metadata.version,
            file_path: path,
        });
    }
    Ok(result)
}

/// Reads all instance records from a catalog document. Invalid entries are
/// skipped.
fn read_catalog(path: &Path) -> Result<Vec<InstanceRecord>> {
    let file = File::open(path)?;
    let base = path.parent().unwrap_or(Path::new("")).to_path_buf();
    read_catalog_from(BufReader::new(file), &base)
}

fn read_catalog_from<R: BufRead>(input: R, base: &Path) -> Result<Vec<InstanceRecord>> {
    let mut reader = Reader::from_reader(input);

    let mut result = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(s) | Event::Empty(s) => {
                if s.local_name().as_ref() == b"instance" {
                    match instance_from_attributes(&s, base) {
                        Ok(record) => result.push(record),
                        Err(err) => warn!("skipping catalog entry: {:#}", err),
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

fn instance_from_attributes(tag: &BytesStart, base: &Path) -> Result<InstanceRecord> {
    let id = required_attr(tag, "id")?
        .parse::<i64>()
        .context("invalid `id' attribute")?;
    let status_text = required_attr(tag, "status")?;
    let status =
        Status::parse(&status_text).with_context(|| format!("unknown status `{status_text}'"))?;

    Ok(InstanceRecord {
        id,
        form_id: required_attr(tag, "formId")?,
        file_path: base.join(required_attr(tag, "path")?),
        display_name: required_attr(tag, "name")?,
        status,
        uri: required_attr(tag, "uri")?,
    })
}

fn required_attr(tag: &BytesStart, name: &str) -> Result<String> {
    let attr = tag
        .try_get_attribute(name)?
        .with_context(|| format!("missing `{name}' attribute"))?;
    Ok(attr.unescape_value()?.to_string())
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use assertor::{assert_that, EqualityAssertion, OptionAssertion, VecAssertion};
    use tempdir::TempDir;

    use super::{read_catalog_from, DirectorySource};
    use crate::source::{FormsSource, InstancesSource, Status};

    const FORM_V1: &str = r#"<model><instance>
        <data id="waterpoints" version="1"><location/></data>
    </instance></model>"#;

    const FORM_V2: &str = r#"<model><instance>
        <data id="waterpoints" version="2"><location/></data>
    </instance></model>"#;

    const CATALOG: &str = r#"<catalog>
        <instance id="2" formId="waterpoints" name="Well B"
                  status="incomplete" path="instances/2.xml" uri="instances/2"/>
        <instance id="1" formId="waterpoints" name="Well A"
                  status="complete" path="instances/1.xml" uri="instances/1"/>
    </catalog>"#;

    fn write_fixture(dir: &Path) {
        fs::create_dir(dir.join("forms")).unwrap();
        fs::write(dir.join("forms/waterpoints_v1.xml"), FORM_V1).unwrap();
        fs::write(dir.join("forms/waterpoints_v2.xml"), FORM_V2).unwrap();
        fs::write(dir.join("forms/notes.txt"), "not a form").unwrap();
        fs::write(dir.join("catalog.xml"), CATALOG).unwrap();
    }

    /// Open a populated fixture and query both traits
    #[test]
    fn open_and_query() {
        let dir = TempDir::new("fieldmap_source").unwrap();
        write_fixture(dir.path());

        let source =
            DirectorySource::open(&dir.path().join("forms"), &dir.path().join("catalog.xml"))
                .unwrap();

        // the newest waterpoints version wins
        assert_that!(source.form_file("waterpoints"))
            .is_equal_to(Some(dir.path().join("forms/waterpoints_v2.xml")));
        assert_that!(source.form_file("wells")).is_none();

        // instances come back ordered by display name, paths resolved
        // against the catalog directory
        let instances = source.plotted_instances();
        assert_that!(instances).has_length(2);
        assert_that!(instances[0].display_name.clone()).is_equal_to("Well A".to_string());
        assert_that!(instances[0].file_path.clone())
            .is_equal_to(dir.path().join("instances/1.xml"));
        assert_that!(instances[1].status).is_equal_to(Status::Incomplete);
    }

    /// Catalog entries with an unknown status or missing attributes are
    /// excluded
    #[test]
    fn invalid_catalog_entries_skipped() {
        let xml = r#"<catalog>
            <instance id="1" formId="w" name="Well A"
                      status="complete" path="1.xml" uri="instances/1"/>
            <instance id="2" formId="w" name="Well B"
                      status="draft" path="2.xml" uri="instances/2"/>
            <instance id="3" formId="w" name="Well C" status="complete"/>
            <instance id="x" formId="w" name="Well D"
                      status="complete" path="4.xml" uri="instances/4"/>
        </catalog>"#;

        let records = read_catalog_from(xml.as_bytes(), Path::new("")).unwrap();
        assert_that!(records).has_length(1);
        assert_that!(records[0].id).is_equal_to(1);
    }

    /// Forms without an id attribute are not indexed
    #[test]
    fn form_without_id_skipped() {
        let dir = TempDir::new("fieldmap_source").unwrap();
        fs::create_dir(dir.path().join("forms")).unwrap();
        fs::write(
            dir.path().join("forms/anonymous.xml"),
            "<model><instance><data/></instance></model>",
        )
        .unwrap();
        fs::write(dir.path().join("catalog.xml"), "<catalog/>").unwrap();

        let source =
            DirectorySource::open(&dir.path().join("forms"), &dir.path().join("catalog.xml"))
                .unwrap();
        assert_that!(source.form_file("anonymous")).is_none();
    }
}
