use crate::errors::UnisensError;
use crate::util::{parse_attr, top_level_name};

/// Container-wide facts taken from the attributes of the index root element.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RootAttributes {
    /// Total duration of the recording in seconds.
    pub duration: Option<f64>,
    pub measurement_id: Option<String>,
    /// Absolute start of the recording, kept verbatim (ISO 8601 in practice).
    pub timestamp_start: Option<String>,
}

impl RootAttributes {
    pub(crate) fn apply_attribute(&mut self, key: &str, value: &str) -> Result<(), UnisensError> {
        match key {
            "duration" => self.duration = Some(parse_attr("duration", value)?),
            "measurementId" => self.measurement_id = Some(value.to_string()),
            "timestampStart" => self.timestamp_start = Some(value.to_string()),
            _ => {} // unknown root attributes are dropped, never an error
        }
        Ok(())
    }
}

/// Free-form subject and sensor metadata from the customAttributes block.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CustomAttributes {
    pub age: Option<String>,
    pub gender: Option<String>,
    pub height: Option<String>,
    pub person_id: Option<String>,
    pub sector_count: Option<String>,
    pub sensor_location: Option<String>,
    pub sensor_serial_number: Option<String>,
    pub sensor_type: Option<String>,
    pub sensor_version: Option<String>,
    pub weight: Option<String>,
}

impl CustomAttributes {
    pub(crate) fn apply_attribute(&mut self, key: &str, value: &str) {
        let value = value.to_string();
        match key {
            "age" => self.age = Some(value),
            "gender" => self.gender = Some(value),
            "height" => self.height = Some(value),
            "personId" => self.person_id = Some(value),
            "sectorCount" => self.sector_count = Some(value),
            "sensorLocation" => self.sensor_location = Some(value),
            "sensorSerialNumber" => self.sensor_serial_number = Some(value),
            "sensorType" => self.sensor_type = Some(value),
            "sensorVersion" => self.sensor_version = Some(value),
            "weight" => self.weight = Some(value),
            _ => {} // schema evolves, old readers must keep working
        }
    }
}

/// A densely, uniformly sampled multi-channel stream.
///
/// Samples of all channels are interleaved in `samples`, so
/// `samples.len()` is always a multiple of `channels.len()` (checked during
/// decode). Regardless of how the payload was stored on disk — delimited
/// text, 16-bit or 32-bit binary — the decoded samples are i32.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SignalEntry {
    /// Payload filename relative to the container, e.g. `ecg.bin`.
    pub id: String,
    pub sample_rate: Option<f64>,
    /// Declared sample width, kept as declared (`int16` or `int32` for
    /// binary payloads).
    pub data_type: Option<String>,
    pub adc_resolution: Option<u32>,
    pub baseline: Option<i32>,
    pub lsb_value: Option<f64>,
    pub unit: Option<String>,
    pub comment: Option<String>,
    pub content_class: Option<String>,
    /// Channel names in document order.
    pub channels: Vec<String>,
    pub samples: Vec<i32>,
}

impl SignalEntry {
    pub(crate) fn new(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub(crate) fn apply_attribute(&mut self, key: &str, value: &str) -> Result<(), UnisensError> {
        match key {
            "sampleRate" => self.sample_rate = Some(parse_attr("sampleRate", value)?),
            "dataType" => self.data_type = Some(value.to_string()),
            "adcResolution" => self.adc_resolution = Some(parse_attr("adcResolution", value)?),
            "baseline" => self.baseline = Some(parse_attr("baseline", value)?),
            "lsbValue" => self.lsb_value = Some(parse_attr("lsbValue", value)?),
            "unit" => self.unit = Some(value.to_string()),
            "comment" => self.comment = Some(value.to_string()),
            "contentClass" => self.content_class = Some(value.to_string()),
            "id" => {} // already set at construction
            _ => {}
        }
        Ok(())
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Raw samples converted to physical units: `(sample - baseline) * lsbValue`.
    /// A missing baseline counts as 0, a missing lsbValue as 1.0.
    pub fn scaled(&self) -> Vec<f64> {
        scale(&self.samples, self.baseline, self.lsb_value)
    }
}

/// A derived or summary stream. Same attribute surface and decode rules as
/// [`SignalEntry`], different semantics.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValuesEntry {
    pub id: String,
    pub sample_rate: Option<f64>,
    pub data_type: Option<String>,
    pub adc_resolution: Option<u32>,
    pub baseline: Option<i32>,
    pub lsb_value: Option<f64>,
    pub unit: Option<String>,
    pub comment: Option<String>,
    pub content_class: Option<String>,
    pub channels: Vec<String>,
    pub samples: Vec<i32>,
}

impl ValuesEntry {
    pub(crate) fn new(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub(crate) fn apply_attribute(&mut self, key: &str, value: &str) -> Result<(), UnisensError> {
        match key {
            "sampleRate" => self.sample_rate = Some(parse_attr("sampleRate", value)?),
            "dataType" => self.data_type = Some(value.to_string()),
            "adcResolution" => self.adc_resolution = Some(parse_attr("adcResolution", value)?),
            "baseline" => self.baseline = Some(parse_attr("baseline", value)?),
            "lsbValue" => self.lsb_value = Some(parse_attr("lsbValue", value)?),
            "unit" => self.unit = Some(value.to_string()),
            "comment" => self.comment = Some(value.to_string()),
            "contentClass" => self.content_class = Some(value.to_string()),
            "id" => {}
            _ => {}
        }
        Ok(())
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn scaled(&self) -> Vec<f64> {
        scale(&self.samples, self.baseline, self.lsb_value)
    }
}

/// A sparse, irregularly timed stream of (timestamp, label) records.
///
/// `times` and `labels` are index-aligned and always equal in length.
/// Record order is the payload file's order; it is never re-sorted.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EventEntry {
    pub id: String,
    /// Nominal rate the timestamps count against.
    pub sample_rate: Option<f64>,
    pub comment_length: Option<u32>,
    pub type_length: Option<u32>,
    /// Timestamps in sample ticks.
    pub times: Vec<i64>,
    pub labels: Vec<String>,
}

impl EventEntry {
    pub(crate) fn new(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub(crate) fn apply_attribute(&mut self, key: &str, value: &str) -> Result<(), UnisensError> {
        match key {
            "sampleRate" => self.sample_rate = Some(parse_attr("sampleRate", value)?),
            "commentLength" => self.comment_length = Some(parse_attr("commentLength", value)?),
            "typeLength" => self.type_length = Some(parse_attr("typeLength", value)?),
            "id" => {}
            _ => {}
        }
        Ok(())
    }
}

fn scale(samples: &[i32], baseline: Option<i32>, lsb_value: Option<f64>) -> Vec<f64> {
    let baseline = i64::from(baseline.unwrap_or(0));
    let lsb = lsb_value.unwrap_or(1.0);
    samples
        .iter()
        .map(|&s| (i64::from(s) - baseline) as f64 * lsb)
        .collect()
}

/// One decoded stream of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Signal(SignalEntry),
    Values(ValuesEntry),
    Event(EventEntry),
}

impl Entry {
    /// The declared id, which doubles as the payload filename.
    pub fn id(&self) -> &str {
        match self {
            Entry::Signal(e) => &e.id,
            Entry::Values(e) => &e.id,
            Entry::Event(e) => &e.id,
        }
    }

    /// The addressable name: the id up to its first `.`, e.g. `ecg` for `ecg.bin`.
    pub fn name(&self) -> &str {
        top_level_name(self.id())
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Entry::Signal(_) => "signalEntry",
            Entry::Values(_) => "valuesEntry",
            Entry::Event(_) => "eventEntry",
        }
    }
}

// TESTS

#[test]
fn unknown_attributes_are_dropped() {
    let mut signal = SignalEntry::new("ecg.bin".to_string());
    signal.apply_attribute("somethingNew", "whatever").unwrap();
    assert_eq!(signal, SignalEntry::new("ecg.bin".to_string()));

    let mut root = RootAttributes::default();
    root.apply_attribute("xsi:schemaLocation", "http://example.org")
        .unwrap();
    assert_eq!(root, RootAttributes::default());

    let mut custom = CustomAttributes::default();
    custom.apply_attribute("shoeSize", "43");
    assert_eq!(custom, CustomAttributes::default());
}

#[test]
fn recognized_attribute_with_garbage_value_fails() {
    let mut signal = SignalEntry::new("ecg.bin".to_string());
    let result = signal.apply_attribute("sampleRate", "often");
    assert!(matches!(
        result,
        Err(UnisensError::BadAttribute { key: "sampleRate", .. })
    ));
}

#[test]
fn scaled_applies_baseline_and_lsb() {
    let mut signal = SignalEntry::new("ecg.bin".to_string());
    signal.baseline = Some(2048);
    signal.lsb_value = Some(0.5);
    signal.samples = vec![2048, 2050, 2044];

    assert_eq!(signal.scaled(), vec![0.0, 1.0, -2.0]);
}

#[test]
fn scaled_defaults_to_identity() {
    let mut values = ValuesEntry::new("hr.csv".to_string());
    values.samples = vec![60, 61];

    assert_eq!(values.scaled(), vec![60.0, 61.0]);
}
