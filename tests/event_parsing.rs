// tests/event_parsing.rs

use rebuildwatch::errors::RebuildwatchError;
use rebuildwatch::event::{ChangeEvent, ReasonCode};

#[test]
fn parses_path_and_reason() {
    let ev = ChangeEvent::parse_line("client/src/Main.elm Updated", 1).unwrap();
    assert_eq!(ev.path, "client/src/Main.elm");
    assert_eq!(ev.reason, ReasonCode::Updated);
}

#[test]
fn surrounding_whitespace_and_crlf_are_tolerated() {
    let ev = ChangeEvent::parse_line("  a.ml   Modified\r\n", 3).unwrap();
    assert_eq!(ev, ChangeEvent::new("a.ml", ReasonCode::Modified));
}

#[test]
fn unknown_reason_tokens_are_kept_verbatim() {
    let ev = ChangeEvent::parse_line("a.ml AttributeModified", 1).unwrap();
    assert_eq!(ev.reason, ReasonCode::Other("AttributeModified".to_string()));
    assert_eq!(ev.reason.to_string(), "AttributeModified");
}

#[test]
fn reason_display_round_trips_known_tokens() {
    for token in ["Modified", "Created", "Updated", "Removed", "Renamed", "IsDir", "PlatformSpecific"] {
        assert_eq!(ReasonCode::from(token).to_string(), token);
        assert!(!matches!(ReasonCode::from(token), ReasonCode::Other(_)));
    }
}

#[test]
fn wrong_token_counts_are_malformed() {
    for (line, no) in [("", 1), ("only_a_path", 2), ("a b c", 3), ("   ", 4)] {
        match ChangeEvent::parse_line(line, no) {
            Err(RebuildwatchError::MalformedEvent { line_no, .. }) => assert_eq!(line_no, no),
            other => panic!("expected MalformedEvent for {line:?}, got {other:?}"),
        }
    }
}

#[test]
fn malformed_error_message_names_the_line() {
    let err = ChangeEvent::parse_line("x y z", 7).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("line 7"));
    assert!(msg.contains("x y z"));
}
