use xmltree::{Element, XMLNode};

use crate::entries::{EventEntry, SignalEntry, ValuesEntry};
use crate::errors::UnisensError;

use super::index::UNISENS_NAMESPACE;

pub(super) fn signal_entry(element: &Element, id: String) -> Result<SignalEntry, UnisensError> {
    let mut entry = SignalEntry::new(id);
    for (key, value) in &element.attributes {
        entry.apply_attribute(key, value)?;
    }
    entry.channels = channel_names(element);
    Ok(entry)
}

pub(super) fn values_entry(element: &Element, id: String) -> Result<ValuesEntry, UnisensError> {
    let mut entry = ValuesEntry::new(id);
    for (key, value) in &element.attributes {
        entry.apply_attribute(key, value)?;
    }
    entry.channels = channel_names(element);
    Ok(entry)
}

pub(super) fn event_entry(element: &Element, id: String) -> Result<EventEntry, UnisensError> {
    let mut entry = EventEntry::new(id);
    for (key, value) in &element.attributes {
        entry.apply_attribute(key, value)?;
    }
    Ok(entry)
}

// channel order matters: it defines how the interleaved samples map back to
// channels, so this must follow document order.
fn channel_names(element: &Element) -> Vec<String> {
    element
        .children
        .iter()
        .filter_map(XMLNode::as_element)
        .filter(|child| child.name == "channel" && child.namespace.as_deref() == Some(UNISENS_NAMESPACE))
        .filter_map(|channel| channel.attributes.get("name").cloned())
        .collect()
}
