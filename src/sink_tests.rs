use std::path::PathBuf;
use std::time::Duration;

use chrono::TimeZone;

use super::*;

fn fixed_line(event: LogEvent) -> LogLine {
    LogLine {
        timestamp: Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap(),
        event,
    }
}

#[test]
fn log_line_format_loaded() {
    let line = fixed_line(LogEvent::Loaded(PathBuf::from("data/x.tif")));
    assert_eq!(line.to_string(), "2024/03/05 14:07:09 | loaded: data/x.tif");
}

#[test]
fn log_line_format_finish() {
    let line = fixed_line(LogEvent::Finish(PathBuf::from("b.csv")));
    assert_eq!(line.to_string(), "2024/03/05 14:07:09 | finish: b.csv");
}

#[test]
fn log_line_format_failure_uses_kind_as_event() {
    let line = fixed_line(LogEvent::Failure {
        kind: "panic",
        path: PathBuf::from("a.txt"),
        message: "bad header".to_string(),
    });
    assert_eq!(
        line.to_string(),
        "2024/03/05 14:07:09 | panic: a.txt: bad header"
    );
    assert!(line.event.is_failure());
}

#[test]
fn log_line_format_start_and_stop() {
    let start = fixed_line(LogEvent::Start(PathBuf::from("incoming")));
    assert_eq!(
        start.to_string(),
        "2024/03/05 14:07:09 | start: scanning incoming"
    );

    let stop = fixed_line(LogEvent::Stopped(StopReason::FileCount { limit: 5 }));
    assert_eq!(
        stop.to_string(),
        "2024/03/05 14:07:09 | stopped: file count budget of 5 exceeded"
    );

    let stop = fixed_line(LogEvent::Stopped(StopReason::ElapsedTime {
        limit: Duration::from_secs(90),
    }));
    assert!(stop.to_string().contains("elapsed time budget of 90s exceeded"));
}

#[test]
fn memory_sink_clones_share_buffer() {
    let sink = MemorySink::new();
    let handle = sink.clone();

    sink.emit(&fixed_line(LogEvent::Loaded(PathBuf::from("a.tif"))));
    sink.emit(&fixed_line(LogEvent::Finish(PathBuf::from("a.tif"))));

    assert_eq!(handle.lines().len(), 2);
    assert_eq!(
        handle.messages(),
        vec![
            "2024/03/05 14:07:09 | loaded: a.tif",
            "2024/03/05 14:07:09 | finish: a.tif",
        ]
    );

    handle.clear();
    assert!(sink.lines().is_empty());
}

#[test]
fn writer_sink_writes_one_line_per_event() {
    let sink = WriterSink::new(Vec::new());

    sink.emit(&fixed_line(LogEvent::Loaded(PathBuf::from("a.tif"))));
    sink.emit(&fixed_line(LogEvent::Finish(PathBuf::from("a.tif"))));

    let written = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(
        written,
        "2024/03/05 14:07:09 | loaded: a.tif\n2024/03/05 14:07:09 | finish: a.tif\n"
    );
}

#[test]
fn log_line_now_is_current() {
    let before = Local::now();
    let line = LogLine::now(LogEvent::Loaded(PathBuf::from("a.tif")));
    assert!(line.timestamp >= before);
}
