use std::time::Duration;

use chrono_tz::Tz;
use pretty_assertions::assert_eq;
use rstest::rstest;
use studyconnect_client::config::{ClientConfig, parse_log_level, parse_timezone};
use tracing::Level;

#[rstest]
#[case("trace", Level::TRACE)]
#[case("DEBUG", Level::DEBUG)]
#[case(" warn ", Level::WARN)]
#[case("error", Level::ERROR)]
#[case("verbose", Level::INFO)]
#[case("", Level::INFO)]
fn test_parse_log_level(#[case] raw: &str, #[case] expected: Level) {
    assert_eq!(parse_log_level(raw), expected);
}

#[test]
fn test_parse_timezone() {
    assert_eq!(parse_timezone("Asia/Colombo").unwrap(), Tz::Asia__Colombo);
    assert_eq!(parse_timezone(" UTC ").unwrap(), Tz::UTC);

    let err = parse_timezone("Mars/Olympus").unwrap_err();
    assert!(err.to_string().contains("Mars/Olympus"));
}

#[test]
fn test_defaults() {
    let config = ClientConfig::default();

    assert_eq!(config.database_url, None);
    assert_eq!(config.geocoder_url, None);
    assert_eq!(config.timezone, Tz::UTC);
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.storage_dir.to_str(), Some("./storage"));
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
}
