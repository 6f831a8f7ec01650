use std::io;
use std::path::Path;

use crate::entries::Entry;
use crate::errors::UnisensError;
use crate::util::has_csv_extension;

use super::{binary, text};

/// Read and decode the payload file belonging to `entry`, which lives next
/// to the index in `base`.
///
/// Strategy selection is driven purely by declared metadata: a `.csv` id
/// means delimited text, anything else is a flat binary sequence whose
/// width comes from the declared dataType.
pub(crate) fn attach_payload(entry: &mut Entry, base: &Path) -> Result<(), UnisensError> {
    match entry {
        Entry::Signal(signal) => {
            signal.samples = sampled_payload(
                base,
                &signal.id,
                signal.data_type.as_deref(),
                signal.channel_count(),
            )?;
        }
        Entry::Values(values) => {
            values.samples = sampled_payload(
                base,
                &values.id,
                values.data_type.as_deref(),
                values.channel_count(),
            )?;
        }
        Entry::Event(event) => {
            let (times, labels) = text::read_event_records(&base.join(&event.id))?;
            event.times = times;
            event.labels = labels;
        }
    }
    Ok(())
}

fn sampled_payload(
    base: &Path,
    id: &str,
    data_type: Option<&str>,
    channels: usize,
) -> Result<Vec<i32>, UnisensError> {
    let path = base.join(id);

    let samples = if has_csv_extension(id) {
        text::read_delimited_samples(&path)?
    } else {
        let width = binary::sample_width(id, data_type)?;
        binary::read_binary_samples(&path, width)?
    };

    // interleaved layout: a partial frame means the payload and the declared
    // channels disagree
    if channels > 0 && samples.len() % channels != 0 {
        return Err(UnisensError::ChannelMismatch {
            file: id.to_string(),
            samples: samples.len(),
            channels,
        });
    }

    Ok(samples)
}

pub(super) fn payload_io_error(path: &Path) -> impl FnOnce(io::Error) -> UnisensError + '_ {
    move |e| match e.kind() {
        io::ErrorKind::NotFound => UnisensError::MissingPayload(path.to_path_buf()),
        _ => UnisensError::IOError(e),
    }
}
