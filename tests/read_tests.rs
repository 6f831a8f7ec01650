use std::fs;
use std::path::{Path, PathBuf};

use unisens::{Entry, ReadOptions, UnisensError, UnisensFile};

const NS: &str = "http://www.unisens.org/unisens2.0";

fn write_index(dir: &Path, body: &str) -> PathBuf {
    let index = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<unisens xmlns="{NS}" duration="300.5" measurementId="m2019-04" timestampStart="2019-04-23T09:00:00.000">
{body}
</unisens>"#
    );
    let path = dir.join("unisens.xml");
    fs::write(&path, index).unwrap();
    path
}

fn i16_bytes(values: &[i16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn i32_bytes(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

#[test]
fn read_int16_signal_entry() {
    let dir = tempfile::tempdir().unwrap();
    let index = write_index(
        dir.path(),
        r#"<signalEntry id="ecg.bin" dataType="int16" sampleRate="256" baseline="2048" lsbValue="0.5" unit="mV" adcResolution="12" contentClass="ECG">
            <channel name="ch1"/>
        </signalEntry>"#,
    );
    let raw: Vec<i16> = vec![2048, 2100, 1996, -17];
    fs::write(dir.path().join("ecg.bin"), i16_bytes(&raw)).unwrap();

    let recording = UnisensFile::open(&index).unwrap();

    assert_eq!(recording.root_attributes.duration, Some(300.5));
    assert_eq!(recording.root_attributes.measurement_id.as_deref(), Some("m2019-04"));

    let ecg = recording.signal("ecg").expect("ecg.bin must bind under the name \"ecg\"");
    assert_eq!(ecg.samples, vec![2048, 2100, 1996, -17], "int16 samples must widen to i32 unchanged");
    assert_eq!(ecg.samples.len(), raw.len(), "array length must equal the raw sample count");
    assert_eq!(ecg.sample_rate, Some(256.0));
    assert_eq!(ecg.baseline, Some(2048), "baseline must be preserved as declared");
    assert_eq!(ecg.lsb_value, Some(0.5), "lsbValue must be preserved as declared");
    assert_eq!(ecg.unit.as_deref(), Some("mV"));
    assert_eq!(ecg.adc_resolution, Some(12));
    assert_eq!(ecg.content_class.as_deref(), Some("ECG"));
    assert_eq!(ecg.channels, vec!["ch1".to_string()]);
    assert_eq!(ecg.samples.len() % ecg.channel_count(), 0);
}

#[test]
fn narrow_and_wide_containers_decode_identically() {
    let logical: Vec<i32> = vec![0, 1, -1, 1234, -1234, 32767, -32768];

    let narrow_dir = tempfile::tempdir().unwrap();
    let narrow_index = write_index(
        narrow_dir.path(),
        r#"<signalEntry id="ecg.bin" dataType="int16" sampleRate="256"><channel name="ch1"/></signalEntry>"#,
    );
    let narrow: Vec<i16> = logical.iter().map(|&v| v as i16).collect();
    fs::write(narrow_dir.path().join("ecg.bin"), i16_bytes(&narrow)).unwrap();

    let wide_dir = tempfile::tempdir().unwrap();
    let wide_index = write_index(
        wide_dir.path(),
        r#"<signalEntry id="ecg.bin" dataType="int32" sampleRate="256"><channel name="ch1"/></signalEntry>"#,
    );
    fs::write(wide_dir.path().join("ecg.bin"), i32_bytes(&logical)).unwrap();

    let from_narrow = UnisensFile::open(&narrow_index).unwrap();
    let from_wide = UnisensFile::open(&wide_index).unwrap();

    assert_eq!(
        from_narrow.signal("ecg").unwrap().samples,
        from_wide.signal("ecg").unwrap().samples,
        "narrow and wide payloads of the same values must be indistinguishable after decode"
    );
}

#[test]
fn read_event_entry() {
    let dir = tempfile::tempdir().unwrap();
    let index = write_index(
        dir.path(),
        r#"<eventEntry id="marker.csv" sampleRate="64" typeLength="1" commentLength="0"/>"#,
    );
    fs::write(dir.path().join("marker.csv"), "1000;A\n2500;B\n").unwrap();

    let recording = UnisensFile::open(&index).unwrap();

    let marker = recording.event("marker").expect("marker.csv must bind under the name \"marker\"");
    assert_eq!(marker.times, vec![1000, 2500]);
    assert_eq!(marker.labels, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(marker.times.len(), marker.labels.len());
    assert_eq!(marker.sample_rate, Some(64.0));
    assert_eq!(marker.type_length, Some(1));
}

#[test]
fn read_delimited_values_entry() {
    let dir = tempfile::tempdir().unwrap();
    let index = write_index(
        dir.path(),
        r#"<valuesEntry id="nn_live.csv" sampleRate="64" dataType="int32">
            <channel name="NN"/>
        </valuesEntry>"#,
    );
    fs::write(dir.path().join("nn_live.csv"), "812\n799\n\n804\n").unwrap();

    let recording = UnisensFile::open(&index).unwrap();

    let nn = recording.values("nn_live").unwrap();
    assert_eq!(nn.samples, vec![812, 799, 804]);
    assert_eq!(nn.samples.len() % nn.channel_count(), 0);
}

#[test]
fn multi_channel_csv_signal_keeps_interleaved_layout() {
    let dir = tempfile::tempdir().unwrap();
    let index = write_index(
        dir.path(),
        r#"<signalEntry id="acc.csv" sampleRate="64">
            <channel name="accX"/>
            <channel name="accY"/>
            <channel name="accZ"/>
        </signalEntry>"#,
    );
    fs::write(dir.path().join("acc.csv"), "1;2;3\n4;5;6\n").unwrap();

    let recording = UnisensFile::open(&index).unwrap();

    let acc = recording.signal("acc").unwrap();
    assert_eq!(acc.channels, vec!["accX", "accY", "accZ"]);
    assert_eq!(acc.samples, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(acc.samples.len() % acc.channel_count(), 0);
}

#[test]
fn streams_outside_the_content_list_are_never_read() {
    let dir = tempfile::tempdir().unwrap();
    // secret.bin does not exist on disk. If the decoder tried to read it,
    // the decode would fail with MissingPayload.
    let index = write_index(
        dir.path(),
        r#"<signalEntry id="secret.bin" dataType="int16" sampleRate="256"><channel name="ch1"/></signalEntry>
        <eventEntry id="marker.csv" sampleRate="64"/>"#,
    );
    fs::write(dir.path().join("marker.csv"), "1;A\n").unwrap();

    let recording = UnisensFile::open_with(&index, &ReadOptions::with_contents(["marker"])).unwrap();

    assert!(recording.get("secret").is_none());
    assert!(recording.event("marker").is_some());
    assert_eq!(recording.len(), 1);
}

#[test]
fn missing_payload_fails_naming_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let index = write_index(
        dir.path(),
        r#"<signalEntry id="ecg.bin" dataType="int16" sampleRate="256"><channel name="ch1"/></signalEntry>"#,
    );

    let result = UnisensFile::open(&index);
    match result {
        Err(UnisensError::MissingPayload(path)) => {
            assert_eq!(path, dir.path().join("ecg.bin"), "the error must name the missing file");
        }
        other => panic!("expected MissingPayload, got {other:?}"),
    }
}

#[test]
fn unknown_attributes_and_entries_are_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let index = write_index(
        dir.path(),
        r#"<customAttributes>
            <customAttribute key="personId" value="p007"/>
            <customAttribute key="sensorFirmwareHash" value="abc123"/>
        </customAttributes>
        <context schemaUrl="http://example.org/context"/>
        <signalEntry id="ecg.bin" dataType="int16" sampleRate="256" futureAttribute="yes">
            <channel name="ch1"/>
        </signalEntry>"#,
    );
    fs::write(dir.path().join("ecg.bin"), i16_bytes(&[1, 2])).unwrap();

    let recording = UnisensFile::open(&index).unwrap();

    assert_eq!(recording.custom_attributes.person_id.as_deref(), Some("p007"));
    let ecg = recording.signal("ecg").unwrap();
    assert_eq!(ecg.samples, vec![1, 2]);
}

#[test]
fn name_collision_is_last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let index = write_index(
        dir.path(),
        r#"<signalEntry id="hr_live.bin" dataType="int16" sampleRate="1"><channel name="hr"/></signalEntry>
        <valuesEntry id="hr_live.csv" sampleRate="1"><channel name="hr"/></valuesEntry>"#,
    );
    fs::write(dir.path().join("hr_live.bin"), i16_bytes(&[70, 71])).unwrap();
    fs::write(dir.path().join("hr_live.csv"), "80\n81\n").unwrap();

    let recording = UnisensFile::open(&index).unwrap();

    assert_eq!(recording.len(), 1);
    match recording.get("hr_live") {
        Some(Entry::Values(values)) => assert_eq!(values.samples, vec![80, 81]),
        other => panic!("expected the later valuesEntry to win, got {other:?}"),
    }
}

#[test]
fn unsupported_data_type_fails() {
    let dir = tempfile::tempdir().unwrap();
    let index = write_index(
        dir.path(),
        r#"<signalEntry id="ecg.bin" dataType="float32" sampleRate="256"><channel name="ch1"/></signalEntry>"#,
    );
    fs::write(dir.path().join("ecg.bin"), [0u8; 8]).unwrap();

    let result = UnisensFile::open(&index);
    match result {
        Err(UnisensError::UnsupportedDataType { entry, declared }) => {
            assert_eq!(entry, "ecg.bin");
            assert_eq!(declared, "float32");
        }
        other => panic!("expected UnsupportedDataType, got {other:?}"),
    }
}

#[test]
fn fail_on_malformed_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unisens.xml");
    fs::write(&path, "this is not XML <unisens").unwrap();

    let result = UnisensFile::open(&path);
    assert!(matches!(result, Err(UnisensError::XMLParseError(_))));
}

#[test]
fn display_summarizes_the_container() {
    let dir = tempfile::tempdir().unwrap();
    let index = write_index(
        dir.path(),
        r#"<signalEntry id="ecg.bin" dataType="int16" sampleRate="256"><channel name="ch1"/></signalEntry>
        <eventEntry id="marker.csv" sampleRate="64"/>"#,
    );
    fs::write(dir.path().join("ecg.bin"), i16_bytes(&[1, 2, 3])).unwrap();
    fs::write(dir.path().join("marker.csv"), "1000;A\n").unwrap();

    let recording = UnisensFile::open(&index).unwrap();
    let summary = recording.to_string();

    assert!(summary.contains("m2019-04"), "summary was {summary:?}");
    assert!(summary.contains("ecg.bin"), "summary was {summary:?}");
    assert!(summary.contains("marker.csv"), "summary was {summary:?}");
}
