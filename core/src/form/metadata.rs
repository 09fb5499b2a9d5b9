use std::io::BufRead;

use anyhow::Result;
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

/// Identity of a form definition, read from the root element of its primary
/// instance
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormMetadata {
    /// The form id instances refer to
    pub form_id: Option<String>,

    /// The form version. Newer versions of a form keep the same form id.
    pub version: Option<String>,
}

/// Reads the form id and version from a form definition. Both live on the
/// root element of the form's primary instance, i.e. the first element
/// inside the first `instance' element.
pub fn form_metadata<R: BufRead>(input: R) -> Result<FormMetadata> {
    let mut reader = Reader::from_reader(input);

    let mut buf = Vec::new();
    let mut in_instance = false;
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(s) => {
                if in_instance {
                    return identity_of(&s);
                }
                if s.local_name().as_ref() == b"instance" {
                    in_instance = true;
                }
            }

            Event::Empty(s) => {
                if in_instance {
                    return identity_of(&s);
                }
            }

            Event::Eof => break,

            _ => {}
        }

        buf.clear();
    }

    Ok(FormMetadata::default())
}

fn identity_of(tag: &BytesStart) -> Result<FormMetadata> {
    let form_id = tag
        .try_get_attribute("id")?
        .map(|a| a.unescape_value())
        .transpose()?
        .map(|v| v.to_string());
    let version = tag
        .try_get_attribute("version")?
        .map(|a| a.unescape_value())
        .transpose()?
        .map(|v| v.to_string());
    Ok(FormMetadata { form_id, version })
}
