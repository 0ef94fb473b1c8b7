//! Tests for CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;

use batch_replay::{LogFormat, LogLevel, ReplayOptions};

#[test]
fn test_defaults() {
    let args = ["batch_replay", "records.tsv"];
    let options = ReplayOptions::try_parse_from(args).expect("should parse bare invocation");

    assert_eq!(options.input_file, PathBuf::from("records.tsv"));
    assert_eq!(options.config_path, PathBuf::from("config.json"));
    assert!(!options.dry_run);
    assert_eq!(options.sleep_ms, 1);
    assert_eq!(options.timeout_seconds, 30);
    // LogLevel doesn't implement PartialEq, so compare via conversion
    assert_eq!(
        log::LevelFilter::from(options.log_level),
        log::LevelFilter::Info
    );
    match options.log_format {
        LogFormat::Plain => {}
        LogFormat::Json => panic!("default format should be Plain"),
    }
}

#[test]
fn test_all_options() {
    let args = [
        "batch_replay",
        "exports/records.csv",
        "--config",
        "prod.json",
        "--dry-run",
        "--sleep-ms",
        "500",
        "--timeout-seconds",
        "5",
        "--log-level",
        "debug",
        "--log-format",
        "json",
    ];
    let options = ReplayOptions::try_parse_from(args).expect("should parse full invocation");

    assert_eq!(options.input_file, PathBuf::from("exports/records.csv"));
    assert_eq!(options.config_path, PathBuf::from("prod.json"));
    assert!(options.dry_run);
    assert_eq!(options.sleep_ms, 500);
    assert_eq!(options.timeout_seconds, 5);
    assert_eq!(
        log::LevelFilter::from(options.log_level),
        log::LevelFilter::Debug
    );
    match options.log_format {
        LogFormat::Json => {}
        LogFormat::Plain => panic!("format should be Json"),
    }
}

#[test]
fn test_input_file_is_required() {
    let args = ["batch_replay"];
    assert!(ReplayOptions::try_parse_from(args).is_err());
}

#[test]
fn test_rejects_unknown_log_level() {
    let args = ["batch_replay", "records.tsv", "--log-level", "verbose"];
    assert!(ReplayOptions::try_parse_from(args).is_err());
}

#[test]
fn test_rejects_non_numeric_sleep() {
    let args = ["batch_replay", "records.tsv", "--sleep-ms", "fast"];
    assert!(ReplayOptions::try_parse_from(args).is_err());
}

#[test]
fn test_log_level_variants() {
    for (name, expected) in [
        ("error", LogLevel::Error),
        ("warn", LogLevel::Warn),
        ("info", LogLevel::Info),
        ("debug", LogLevel::Debug),
        ("trace", LogLevel::Trace),
    ] {
        let args = ["batch_replay", "records.tsv", "--log-level", name];
        let options = ReplayOptions::try_parse_from(args).expect("level should parse");
        assert_eq!(
            log::LevelFilter::from(options.log_level),
            log::LevelFilter::from(expected),
            "level {:?}",
            name
        );
    }
}
