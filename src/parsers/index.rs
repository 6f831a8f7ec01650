use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use xmltree::{Element, XMLNode};

use crate::entries::{CustomAttributes, Entry, RootAttributes};
use crate::errors::UnisensError;
use crate::options::ReadOptions;
use crate::util::top_level_name;

use super::entry::{event_entry, signal_entry, values_entry};

pub(crate) const UNISENS_NAMESPACE: &str = "http://www.unisens.org/unisens2.0";

pub(crate) struct IndexContents {
    pub(crate) root_attributes: RootAttributes,
    pub(crate) custom_attributes: CustomAttributes,
    /// Descriptors in document order, payloads not yet attached.
    pub(crate) entries: Vec<Entry>,
}

pub(crate) fn parse_index(path: &Path, options: &ReadOptions) -> Result<IndexContents, UnisensError> {
    let file = File::open(path)?;
    let root = Element::parse(BufReader::new(file))?;
    index_contents(&root, options)
}

fn index_contents(root: &Element, options: &ReadOptions) -> Result<IndexContents, UnisensError> {
    if root.namespace.as_deref() != Some(UNISENS_NAMESPACE) {
        return Err(UnisensError::MissingNamespace);
    }

    let mut root_attributes = RootAttributes::default();
    for (key, value) in &root.attributes {
        root_attributes.apply_attribute(key, value)?;
    }

    let custom_attributes = custom_attributes(root);

    let mut entries = Vec::new();
    for element in root.children.iter().filter_map(XMLNode::as_element) {
        if element.namespace.as_deref() != Some(UNISENS_NAMESPACE) {
            continue;
        }

        let kind = match element.name.as_str() {
            "signalEntry" => "signalEntry",
            "valuesEntry" => "valuesEntry",
            "eventEntry" => "eventEntry",
            _ => continue, // customAttributes, context, groups, ...
        };

        // the id is load-bearing: it names the payload file, so an entry
        // without one cannot be decoded even if it were filtered out below
        let id = element
            .attributes
            .get("id")
            .ok_or(UnisensError::MissingId(kind))?
            .clone();

        let name = top_level_name(&id);
        if !options.wants(name) {
            debug!("Skipping {kind} {id:?}, {name:?} is not in the content list");
            continue;
        }

        let entry = match kind {
            "signalEntry" => Entry::Signal(signal_entry(element, id)?),
            "valuesEntry" => Entry::Values(values_entry(element, id)?),
            _ => Entry::Event(event_entry(element, id)?),
        };
        entries.push(entry);
    }

    Ok(IndexContents {
        root_attributes,
        custom_attributes,
        entries,
    })
}

fn custom_attributes(root: &Element) -> CustomAttributes {
    let mut custom = CustomAttributes::default();

    let Some(block) = root
        .children
        .iter()
        .filter_map(XMLNode::as_element)
        .find(|child| child.name == "customAttributes" && child.namespace.as_deref() == Some(UNISENS_NAMESPACE))
    else {
        return custom;
    };

    for attribute in block.children.iter().filter_map(XMLNode::as_element) {
        if attribute.name != "customAttribute" || attribute.namespace.as_deref() != Some(UNISENS_NAMESPACE) {
            continue;
        }
        if let (Some(key), Some(value)) = (attribute.attributes.get("key"), attribute.attributes.get("value")) {
            custom.apply_attribute(key, value);
        }
    }

    custom
}
