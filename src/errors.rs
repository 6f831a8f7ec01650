//! Errors that can occur when decoding a container
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UnisensError {
    #[error("The index root element is missing the unisens namespace")]
    MissingNamespace,

    #[error("A {0} element has no id attribute")]
    MissingId(&'static str),

    #[error("Payload file {0:?} declared in the index does not exist")]
    MissingPayload(PathBuf),

    #[error("Entry {entry} declares unsupported sample type {declared:?}, expected \"int16\" or \"int32\"")]
    UnsupportedDataType { entry: String, declared: String },

    #[error("Bad record in {file} at line {line}: {reason}")]
    BadRecord {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("Attribute {key}={value:?} did not parse: {reason}")]
    BadAttribute {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Could not parse samples from {0:?}")]
    ParseSamples(PathBuf),

    #[error("{file} holds {samples} samples which is not a multiple of its {channels} channels")]
    ChannelMismatch {
        file: String,
        samples: usize,
        channels: usize,
    },

    #[error(transparent)]
    XMLParseError(#[from] xmltree::ParseError),

    #[error(transparent)]
    IOError(#[from] std::io::Error),
}
