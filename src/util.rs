use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use crate::errors::UnisensError;

/// The addressable name of an entry: everything before the first `.` of its id.
pub(crate) fn top_level_name(id: &str) -> &str {
    id.split('.').next().unwrap_or(id)
}

/// Ids ending in `.csv` name delimited text payloads, everything else is binary.
pub(crate) fn has_csv_extension(id: &str) -> bool {
    Path::new(id)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

pub(crate) fn parse_attr<T>(key: &'static str, value: &str) -> Result<T, UnisensError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| UnisensError::BadAttribute {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[test]
fn test_top_level_name() {
    assert_eq!(top_level_name("ecg.bin"), "ecg");
    assert_eq!(top_level_name("hrvRmssd_live.csv"), "hrvRmssd_live");
    assert_eq!(top_level_name("noextension"), "noextension");
}

#[test]
fn test_has_csv_extension() {
    assert!(has_csv_extension("marker.csv"));
    assert!(has_csv_extension("MARKER.CSV"));
    assert!(!has_csv_extension("ecg.bin"));
    assert!(!has_csv_extension("csv"));
}

#[test]
fn test_parse_attr() {
    let rate: f64 = parse_attr("sampleRate", " 256 ").unwrap();
    assert!((rate - 256.0).abs() < f64::EPSILON);

    let baseline: Result<i32, _> = parse_attr("baseline", "high");
    assert!(baseline.is_err());
}
