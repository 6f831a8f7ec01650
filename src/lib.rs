#![forbid(unsafe_code)]
#![deny(nonstandard_style)]
#![warn(array_into_iter)]
// #![warn(missing_docs)]
#![crate_type = "lib"]

//! [![github]](https://github.com/unisens-rs/unisens_rs)
//!
//! [github]: https://img.shields.io/badge/github-9090ff?style=for-the-badge&logo=github&labelColor=505050
//!

//! Read Unisens recordings
//!
//! [`Unisens format`]: https://www.unisens.org
//!
//! This library decodes recordings in the [`Unisens format`] as written by
//! movisens wearable sensors: a directory holding one XML index
//! (`unisens.xml`) next to one payload file per stream. Payloads are either
//! semicolon-delimited text or flat little-endian binary; all sampled data
//! comes back as i32 regardless of how it was stored.
//!
//! ```no_run
//! use unisens::UnisensFile;
//!
//! let recording = UnisensFile::open("recording/unisens.xml")?;
//! if let Some(ecg) = recording.signal("ecg") {
//!     let millivolts = ecg.scaled();
//!     println!("{} ECG samples", millivolts.len());
//! }
//! # Ok::<(), unisens::UnisensError>(())
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

mod entries;
mod errors;
mod options;
mod parsers;
mod util;

pub use entries::{CustomAttributes, Entry, EventEntry, RootAttributes, SignalEntry, ValuesEntry};
pub use errors::UnisensError;
pub use options::ReadOptions;

use log::warn;
use parsers::index::parse_index;
use parsers::payload::attach_payload;

/// One fully decoded recording.
///
/// Entries are addressable by their top-level name, the part of their id
/// before the first `.` (`ecg.bin` binds as `"ecg"`). If two entries
/// resolve to the same name, the later one in document order wins; the
/// earlier binding is dropped with a warning.
#[derive(Debug)]
pub struct UnisensFile {
    pub root_attributes: RootAttributes,
    pub custom_attributes: CustomAttributes,
    entries: HashMap<String, Entry>,
    /// Bound names in document order, for iteration and display.
    order: Vec<String>,
}

impl UnisensFile {
    /// Decode the container whose index lives at `index_path`, reading the
    /// default catalog of known stream names.
    pub fn open(index_path: impl AsRef<Path>) -> Result<Self, UnisensError> {
        Self::open_with(index_path, &ReadOptions::default())
    }

    /// Decode the container with an explicit [`ReadOptions`]. Payload files
    /// are resolved as siblings of the index.
    pub fn open_with(index_path: impl AsRef<Path>, options: &ReadOptions) -> Result<Self, UnisensError> {
        let index_path = index_path.as_ref();
        let base = index_path.parent().unwrap_or_else(|| Path::new("."));

        let index = parse_index(index_path, options)?;

        let mut entries: HashMap<String, Entry> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for mut entry in index.entries {
            attach_payload(&mut entry, base)?;

            let name = entry.name().to_string();
            let kind = entry.kind();
            if let Some(replaced) = entries.insert(name.clone(), entry) {
                warn!(
                    "Entry {} is shadowed by a later {kind} bound to the same name {name:?}",
                    replaced.id()
                );
                order.retain(|bound| bound != &name);
            }
            order.push(name);
        }

        Ok(Self {
            root_attributes: index.root_attributes,
            custom_attributes: index.custom_attributes,
            entries,
            order,
        })
    }

    /// Look up an entry of any kind by its name.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Look up a signal entry, or None if the name is unbound or bound to
    /// another kind.
    pub fn signal(&self, name: &str) -> Option<&SignalEntry> {
        match self.get(name) {
            Some(Entry::Signal(signal)) => Some(signal),
            Some(Entry::Values(_) | Entry::Event(_)) | None => None,
        }
    }

    pub fn values(&self, name: &str) -> Option<&ValuesEntry> {
        match self.get(name) {
            Some(Entry::Values(values)) => Some(values),
            Some(Entry::Signal(_) | Entry::Event(_)) | None => None,
        }
    }

    pub fn event(&self, name: &str) -> Option<&EventEntry> {
        match self.get(name) {
            Some(Entry::Event(event)) => Some(event),
            Some(Entry::Signal(_) | Entry::Values(_)) | None => None,
        }
    }

    /// Decoded entries in document order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.order.iter().filter_map(|name| self.entries.get(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for UnisensFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "unisens recording {} ({} entries)",
            self.root_attributes.measurement_id.as_deref().unwrap_or("<unnamed>"),
            self.entries.len()
        )?;

        for entry in self.entries() {
            match entry {
                Entry::Signal(s) => writeln!(
                    f,
                    "{: <25} : signal {: >9} samples * {: >2} channels",
                    s.id,
                    s.samples.len() / s.channel_count().max(1),
                    s.channel_count()
                )?,
                Entry::Values(v) => writeln!(
                    f,
                    "{: <25} : values {: >9} samples * {: >2} channels",
                    v.id,
                    v.samples.len() / v.channel_count().max(1),
                    v.channel_count()
                )?,
                Entry::Event(e) => {
                    writeln!(f, "{: <25} : events {: >9} records", e.id, e.times.len())?;
                }
            }
        }

        Ok(())
    }
}

// TESTS

#[cfg(test)]
fn test_file_with(entries_in_order: Vec<Entry>) -> UnisensFile {
    let mut entries = HashMap::new();
    let mut order = Vec::new();
    for entry in entries_in_order {
        let name = entry.name().to_string();
        entries.insert(name.clone(), entry);
        order.push(name);
    }
    UnisensFile {
        root_attributes: RootAttributes::default(),
        custom_attributes: CustomAttributes::default(),
        entries,
        order,
    }
}

#[test]
fn lookup_narrows_by_kind() {
    let file = test_file_with(vec![
        Entry::Signal(SignalEntry::new("ecg.bin".to_string())),
        Entry::Event(EventEntry::new("marker.csv".to_string())),
    ]);

    assert!(file.get("ecg").is_some());
    assert!(file.signal("ecg").is_some());
    assert!(file.values("ecg").is_none());
    assert!(file.event("ecg").is_none());

    assert!(file.event("marker").is_some());
    assert!(file.signal("marker").is_none());

    assert!(file.get("temp").is_none());
}

#[test]
fn entries_iterate_in_document_order() {
    let file = test_file_with(vec![
        Entry::Event(EventEntry::new("marker.csv".to_string())),
        Entry::Signal(SignalEntry::new("ecg.bin".to_string())),
    ]);

    let ids: Vec<&str> = file.entries().map(Entry::id).collect();
    assert_eq!(ids, vec!["marker.csv", "ecg.bin"]);
}
