use std::fs;
use std::path::Path;

use log::warn;
use nom::{
    multi::many0,
    number::complete::{le_i16, le_i32},
    IResult,
};

use crate::errors::UnisensError;

use super::payload::payload_io_error;

/// Declared width of one binary sample. Everything decodes to i32 in the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SampleWidth {
    Int16,
    Int32,
}

pub(super) fn sample_width(id: &str, declared: Option<&str>) -> Result<SampleWidth, UnisensError> {
    match declared {
        Some("int16") => Ok(SampleWidth::Int16),
        Some("int32") => Ok(SampleWidth::Int32),
        other => Err(UnisensError::UnsupportedDataType {
            entry: id.to_string(),
            declared: other.unwrap_or("<missing>").to_string(),
        }),
    }
}

// binary payloads are flat little-endian sample sequences with no framing

fn samples_i16(input: &[u8]) -> IResult<&[u8], Vec<i16>> {
    many0(le_i16)(input)
}

fn samples_i32(input: &[u8]) -> IResult<&[u8], Vec<i32>> {
    many0(le_i32)(input)
}

pub(super) fn read_binary_samples(path: &Path, width: SampleWidth) -> Result<Vec<i32>, UnisensError> {
    let bytes = fs::read(path).map_err(payload_io_error(path))?;

    let (rest, samples) = match width {
        SampleWidth::Int16 => {
            let (rest, narrow) =
                samples_i16(&bytes).map_err(|_| UnisensError::ParseSamples(path.to_path_buf()))?;
            (rest, narrow.into_iter().map(i32::from).collect())
        }
        SampleWidth::Int32 => {
            samples_i32(&bytes).map_err(|_| UnisensError::ParseSamples(path.to_path_buf()))?
        }
    };

    if !rest.is_empty() {
        warn!(
            "{} trailing bytes in {} do not form a whole sample",
            rest.len(),
            path.display()
        );
    }

    Ok(samples)
}
