use std::io::BufRead;

use anyhow::Result;
use quick_xml::{events::Event, Reader};
use rustc_hash::{FxHashMap, FxHashSet};

/// Extracts the stored values of the given fields from an instance document.
/// Collects the text content of every element whose local name is one of
/// `tag_names', keyed by tag name and in document order. Elements may repeat
/// (repeat groups contribute one value each); values that are empty or
/// whitespace-only are dropped.
pub fn field_values<R: BufRead>(
    input: R,
    tag_names: &[&str],
) -> Result<FxHashMap<String, Vec<String>>> {
    let wanted: FxHashSet<&[u8]> = tag_names.iter().map(|t| t.as_bytes()).collect();

    let mut reader = Reader::from_reader(input);
    let mut result: FxHashMap<String, Vec<String>> = FxHashMap::default();
    let mut buf = Vec::new();

    // the currently open matching element and the text collected so far
    let mut open: Option<(String, String)> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(s) => {
                if open.is_none() && wanted.contains(s.local_name().as_ref()) {
                    let name = String::from_utf8_lossy(s.local_name().as_ref()).into_owned();
                    open = Some((name, String::new()));
                }
            }

            Event::Text(t) => {
                if let Some((_, text)) = open.as_mut() {
                    text.push_str(&t.unescape()?);
                }
            }

            Event::End(e) => {
                let closes_open = open
                    .as_ref()
                    .is_some_and(|(name, _)| name.as_bytes() == e.local_name().as_ref());
                if closes_open {
                    let (name, text) = open.take().unwrap();
                    let value = text.trim();
                    if !value.is_empty() {
                        result.entry(name).or_default().push(value.to_string());
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
