//! Tests for the line-oriented driver

use only_three::{GameKind, Mark};
use only_three_cli::{OutputFormat, replay, run_session};
use std::io::Cursor;

fn json_lines(out: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8(out.to_vec())
        .expect("utf8 output")
        .lines()
        .map(|line| serde_json::from_str(line).expect("one JSON object per line"))
        .collect()
}

#[test]
fn test_json_session_until_end_of_input() {
    let input = Cursor::new("0\n3\n1\n4\n2\n");
    let mut out = Vec::new();
    let mut notices = Vec::new();

    let summary = run_session(
        GameKind::OnlyThree,
        OutputFormat::Json,
        input,
        &mut out,
        &mut notices,
    )
    .expect("session runs");

    assert_eq!(*summary.placed(), 5);
    assert_eq!(summary.wins_for(Mark::X), 1);

    let records = json_lines(&out);
    // opening, five placements, restart on close, close
    assert_eq!(records.len(), 8);
    assert_eq!(records[0]["turn"], "X");
    assert_eq!(records[5]["winner"], "X");
    assert_eq!(records[5]["highlights"][0], "WinningLine");
    assert!(records[6]["winner"].is_null());
    assert_eq!(records[7]["closed"], "only-three");

    let notices = String::from_utf8(notices).expect("utf8");
    assert!(notices.starts_with("Only three: Only three figures of each side"));
}

#[test]
fn test_text_session_reports_declines() {
    let input = Cursor::new("center\n\nrestart\n9\nhello\nclose\n4\n");
    let mut out = Vec::new();
    let mut notices = Vec::new();

    let summary = run_session(
        GameKind::OnlyThree,
        OutputFormat::Text,
        input,
        &mut out,
        &mut notices,
    )
    .expect("session runs");

    assert_eq!(*summary.placed(), 1);
    assert_eq!(*summary.declined(), 1);
    assert_eq!(*summary.restarts(), 1);

    let notices = String::from_utf8(notices).expect("utf8");
    assert!(notices.contains("Ignored: Cell 9 is off the board"));
    assert!(notices.contains("Unrecognised command: \"hello\""));

    let out = String::from_utf8(out).expect("utf8");
    assert!(out.contains("0|1|2\n-+-+-\n3|X|5"));
    assert!(out.ends_with("Only three closed\n"));
    // Nothing after `close` is read.
    assert_eq!(out.matches("X to play").count(), 3);
}

#[test]
fn test_replay_reports_winner() {
    let mut out = Vec::new();
    let winner = replay(
        GameKind::OnlyThree,
        OutputFormat::Json,
        &[0, 3, 1, 4, 2],
        &mut out,
    )
    .expect("replay runs");

    assert_eq!(winner, Some(Mark::X));
    assert_eq!(json_lines(&out).len(), 5);
}

#[test]
fn test_replay_skips_declined_cells() {
    let mut out = Vec::new();
    let winner = replay(
        GameKind::OnlyThree,
        OutputFormat::Text,
        &[4, 4, 11, 0],
        &mut out,
    )
    .expect("replay runs");

    assert_eq!(winner, None);
    let out = String::from_utf8(out).expect("utf8");
    assert!(out.ends_with("X: [4]\nO: [0]\nX to play\n\n"));
}
