/// Stream names decoded when the caller does not supply their own list.
///
/// This is the catalog of contents movisens recorders are known to write.
const DEFAULT_CONTENTS: &[&str] = &[
    "acc",
    "angularrate",
    "artifact",
    "bpmbxb_live",
    "charging",
    "ecg",
    "hr_live",
    "hrvisvalid_live",
    "hrvrmssd_live",
    "marker",
    "movementacceleration_live",
    "nn_live",
    "nnlist",
    "press",
    "stateofcharge",
    "stepcount_live",
    "temp",
    "tempmean_live",
    "eda",
    "EMG1",
    "EMG2",
    "EMG3",
    "EMG4",
    "EMG5",
    "EMG6",
    "EMG7",
    "EMG8",
    "EEG3",
    "EEG5",
    "ECG6",
    "seizures",
    "m6seizures",
    "m6emgseizures",
    "bicepsseizures",
];

/// What to decode from a container.
///
/// `contents` is the allow-list of addressable stream names; entries whose
/// name is not listed are skipped without their payload ever being opened.
/// Matching is exact and case-sensitive.
///
/// `start` and `duration` describe an analysis window. They are accepted and
/// stored for callers to pass along, but decoding always materializes full
/// streams; no windowing is applied.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    pub contents: Vec<String>,
    /// Window start, `YYYY-MM-DDThh:mm:ss.xxx`. Stored, not applied.
    pub start: Option<String>,
    /// Window length in seconds. Stored, not applied.
    pub duration: Option<f64>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            contents: DEFAULT_CONTENTS.iter().map(|s| (*s).to_string()).collect(),
            start: None,
            duration: None,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default catalog with an explicit allow-list.
    pub fn with_contents<I, S>(contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            contents: contents.into_iter().map(Into::into).collect(),
            start: None,
            duration: None,
        }
    }

    /// Add one more stream name to the allow-list, e.g. for an extra marker
    /// file a study tool wrote next to the recording.
    pub fn add_content(&mut self, name: impl Into<String>) {
        self.contents.push(name.into());
    }

    pub(crate) fn wants(&self, name: &str) -> bool {
        self.contents.iter().any(|c| c == name)
    }
}
