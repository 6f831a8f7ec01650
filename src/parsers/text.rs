use std::fs;
use std::path::Path;

use crate::errors::UnisensError;

use super::payload::payload_io_error;

const DELIMITER: char = ';';

fn bad_record(path: &Path, line: usize, reason: String) -> UnisensError {
    UnisensError::BadRecord {
        file: path.display().to_string(),
        line,
        reason,
    }
}

/// Decode a delimited text payload of a signal or values entry: every
/// `;`-separated field on every non-blank line, flattened in reading order.
pub(super) fn read_delimited_samples(path: &Path) -> Result<Vec<i32>, UnisensError> {
    let content = fs::read_to_string(path).map_err(payload_io_error(path))?;

    let mut samples = Vec::new();
    for (line_index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        for field in line.split(DELIMITER) {
            let value = field.trim().parse::<i32>().map_err(|e| {
                bad_record(path, line_index + 1, format!("field {field:?} is not an integer: {e}"))
            })?;
            samples.push(value);
        }
    }

    Ok(samples)
}

/// Decode an event payload: one `time;label` record per non-blank line.
///
/// Records are split from the right so that a third comment field does not
/// shift the label into the timestamp: `1000;A` and `1000;A;rest` both
/// yield (1000, "A").
pub(super) fn read_event_records(path: &Path) -> Result<(Vec<i64>, Vec<String>), UnisensError> {
    let content = fs::read_to_string(path).map_err(payload_io_error(path))?;

    let mut times = Vec::new();
    let mut labels = Vec::new();
    for (line_index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.rsplitn(3, DELIMITER).collect();
        if fields.len() < 2 {
            return Err(bad_record(
                path,
                line_index + 1,
                format!("expected at least two fields separated by {DELIMITER:?}"),
            ));
        }

        // rsplitn yields fields right to left
        let time_field = fields[fields.len() - 1];
        let label_field = fields[fields.len() - 2];

        let time = time_field.trim().parse::<i64>().map_err(|e| {
            bad_record(
                path,
                line_index + 1,
                format!("timestamp {time_field:?} is not an integer: {e}"),
            )
        })?;

        times.push(time);
        labels.push(label_field.to_string());
    }

    Ok((times, labels))
}
