//! Process logger behaviour through the public facade.

use std::panic::{self, AssertUnwindSafe};

use logkit::{field, Level, Log, LogError, LoggerConfig};

mod common;

use common::{capture, json_config, json_lines, read_dir_lines, serial};

#[test]
fn test_set_level_filters_lower_severities() {
    let _guard = serial();

    for (name, expected) in [
        ("debug", vec!["debug", "info", "warn", "error"]),
        ("info", vec!["info", "warn", "error"]),
        ("warn", vec!["warn", "error"]),
        ("error", vec!["error"]),
    ] {
        let out = capture(json_config(Level::Debug));
        logkit::set_level(name).unwrap();

        logkit::debug("m", &[]);
        logkit::info("m", &[]);
        logkit::warn("m", &[]);
        logkit::error("m", &[]);

        let levels: Vec<String> = json_lines(&out)
            .iter()
            .map(|v| v["level"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(levels, expected, "threshold {name}");
        assert_eq!(logkit::logger::config().level, Some(Level::parse_threshold(name).unwrap()));
    }
}

#[test]
fn test_invalid_level_keeps_previous() {
    let _guard = serial();
    let out = capture(json_config(Level::Debug));
    logkit::set_level("warn").unwrap();

    for bad in ["verbose", "WARN", "panic", "fatal", ""] {
        match logkit::set_level(bad) {
            Err(LogError::InvalidLevel(name)) => assert_eq!(name, bad),
            other => panic!("expected InvalidLevel for {bad:?}, got {other:?}"),
        }
    }

    assert_eq!(logkit::logger::config().level, Some(Level::Warn));
    assert_eq!(logkit::current().level(), Level::Warn);
    logkit::info("hidden", &[]);
    logkit::warn("shown", &[]);
    assert_eq!(json_lines(&out).len(), 1);
}

#[test]
fn test_init_rejects_empty_filename() {
    let err = logkit::init("", "error", 10, 3, false).unwrap_err();
    assert!(matches!(err, LogError::BadFile(_)), "{err}");
}

#[test]
fn test_init_rejects_negative_size_or_backups() {
    let err = logkit::init("/tmp/app.log", "info", -1, 3, false).unwrap_err();
    assert!(matches!(err, LogError::BadSizeOrBackup { max_size_mb: -1, max_backups: 3 }));

    let err = logkit::init("/tmp/app.log", "info", 10, -2, false).unwrap_err();
    assert!(matches!(err, LogError::BadSizeOrBackup { .. }));
}

#[test]
fn test_init_rejects_unknown_level() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let err = logkit::init(path.to_str().unwrap(), "loud", 10, 3, false).unwrap_err();
    assert!(matches!(err, LogError::InvalidLevel(_)));
}

#[test]
fn test_init_empty_level_defaults_to_error() {
    let _guard = serial();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("app.log");

    let log = logkit::init(path.to_str().unwrap(), "", 10, 3, false).unwrap();
    assert_eq!(logkit::logger::config().level, Some(Level::Error));
    assert_eq!(logkit::current().level(), Level::Error);
    assert!(logkit::logger::config().encode_json);

    log.warn("below threshold", &[]);
    log.error("written", &[field::string("component", "db")]);
    log.sync();

    let lines: Vec<serde_json::Value> = read_dir_lines(path.parent().unwrap())
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["msg"], "written");
    assert_eq!(lines[0]["component"], "db");
}

#[test]
fn test_configure_keeps_level_from_set_level() {
    let _guard = serial();
    logkit::set_level("debug").unwrap();

    let out = capture(LoggerConfig {
        encode_json: true,
        ..LoggerConfig::default()
    });
    logkit::debug("after configure", &[]);

    assert_eq!(logkit::current().level(), Level::Debug);
    assert_eq!(logkit::logger::config().level, Some(Level::Debug));
    let lines = json_lines(&out);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["msg"], "after configure");
}

#[test]
fn test_config_and_logger_levels_agree_under_contention() {
    let _guard = serial();
    let out = logkit::sink::MemorySink::new();

    std::thread::scope(|scope| {
        for name in ["debug", "info", "warn", "error"] {
            scope.spawn(move || {
                for _ in 0..50 {
                    logkit::set_level(name).unwrap();
                }
            });
        }
        let console = out.clone();
        scope.spawn(move || {
            for _ in 0..50 {
                logkit::configure_with_console(
                    LoggerConfig::default(),
                    std::sync::Arc::new(console.clone()),
                );
            }
        });
    });

    assert_eq!(logkit::logger::config().level, Some(logkit::current().level()));
}

#[test]
fn test_configure_level_overrides_set_level() {
    let _guard = serial();
    logkit::set_level("debug").unwrap();

    let out = capture(json_config(Level::Warn));
    logkit::info("hidden", &[]);
    logkit::warn("shown", &[]);

    assert_eq!(logkit::current().level(), Level::Warn);
    assert_eq!(json_lines(&out).len(), 1);
}

#[test]
fn test_info_json_line() {
    let _guard = serial();
    let out = capture(json_config(Level::Info));

    logkit::info("started", &[field::int("port", 8080)]);

    let lines = json_lines(&out);
    assert_eq!(lines.len(), 1);
    let v = &lines[0];
    assert_eq!(v["msg"], "started");
    assert_eq!(v["level"], "info");
    assert!(v["timestamp"].as_i64().unwrap() > 0);
    assert_eq!(v["port"], 8080);
}

#[test]
fn test_debug_appends_caller_when_enabled() {
    let _guard = serial();
    let out = capture(logkit::LoggerConfig {
        stack_on_debug: true,
        ..json_config(Level::Debug)
    });

    logkit::debug("via function", &[field::bool("k", true)]);
    let fn_line = line!() - 1;
    Log.debug("via handle", &[]);
    let handle_line = line!() - 1;
    logkit::debugf!("via macro {}", 1);
    let macro_line = line!() - 1;

    let lines = json_lines(&out);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["stacktrace"], format!("{}:{}", file!(), fn_line));
    assert_eq!(lines[0]["k"], true);
    assert_eq!(lines[1]["stacktrace"], format!("{}:{}", file!(), handle_line));
    assert_eq!(
        lines[2]["stacktrace"],
        format!(
            "{}:{}::test_debug_appends_caller_when_enabled:{}",
            file!(),
            module_path!(),
            macro_line
        )
    );
    assert_eq!(lines[2]["msg"], "via macro 1");
}

#[test]
fn test_debug_omits_caller_when_disabled() {
    let _guard = serial();
    let out = capture(json_config(Level::Debug));

    logkit::debug("plain", &[]);

    let lines = json_lines(&out);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].get("stacktrace").is_none());
}

#[test]
fn test_formatted_variants() {
    let _guard = serial();
    let out = capture(json_config(Level::Debug));

    logkit::infof!("listening on {}:{}", "0.0.0.0", 8080);
    logkit::warnf!("slow {}ms", 250);
    logkit::errorf!("failed {x}", x = "twice");
    Log.info_fmt(format_args!("handle {}", 1));

    let msgs: Vec<(String, String)> = json_lines(&out)
        .iter()
        .map(|v| (v["level"].as_str().unwrap().to_string(), v["msg"].as_str().unwrap().to_string()))
        .collect();
    assert_eq!(
        msgs,
        vec![
            ("info".to_string(), "listening on 0.0.0.0:8080".to_string()),
            ("warn".to_string(), "slow 250ms".to_string()),
            ("error".to_string(), "failed twice".to_string()),
            ("info".to_string(), "handle 1".to_string()),
        ]
    );
}

#[test]
fn test_panic_emits_then_unwinds() {
    let _guard = serial();
    let out = capture(json_config(Level::Error));

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        logkit::panic("cannot continue", &[field::int64("job", 7)]);
    }));

    let payload = result.unwrap_err();
    assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("cannot continue"));

    let lines = json_lines(&out);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["level"], "panic");
    assert_eq!(lines[0]["job"], 7);
}

#[test]
fn test_tracing_events_are_redirected() {
    let _guard = serial();
    let out = capture(json_config(Level::Info));
    assert!(logkit::logger::redirect::is_installed());

    tracing::warn!(attempt = 3, "retrying");
    tracing::debug!("filtered out");
    log::warn!("via log crate");
    log::debug!("also filtered out");

    let lines = json_lines(&out);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["msg"], "retrying");
    assert_eq!(lines[0]["level"], "warn");
    assert_eq!(lines[0]["logger"], module_path!());
    assert_eq!(lines[0]["attempt"], 3);

    assert_eq!(lines[1]["msg"], "via log crate");
    assert_eq!(lines[1]["level"], "warn");
    assert_eq!(lines[1]["logger"], module_path!());
    assert!(lines[1].get("log.target").is_none());
}
