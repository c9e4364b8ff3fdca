//! Tests for the sink trait and its stock implementations.

use super::{CharSink, SinkEvent, VoidSink};

#[test]
fn string_sink_collects_chars_and_ignores_diagnostics() {
    let mut s = String::new();
    s.emit_char('a');
    s.invalid_char(&[0xFF]);
    s.unsupported_charset(b'A');
    s.emit_char('b');
    assert_eq!(s, "ab");
    assert!(!s.is_mid_escape_replay());
}

#[test]
fn event_sink_records_in_order() {
    let mut events: Vec<SinkEvent> = Vec::new();
    events.emit_char('x');
    events.invalid_char(&[0xC3, 0x28]);
    events.unsupported_charset(b'A');
    assert_eq!(
        events,
        vec![
            SinkEvent::Char('x'),
            SinkEvent::InvalidChar(vec![0xC3, 0x28]),
            SinkEvent::UnsupportedCharset(b'A'),
        ]
    );
}

#[test]
fn mutable_reference_forwards_to_inner_sink() {
    let mut s = String::new();
    {
        let mut r = &mut s;
        r.emit_char('q');
        assert!(!r.is_mid_escape_replay());
    }
    assert_eq!(s, "q");
}

#[test]
fn void_sink_accepts_everything() {
    let mut sink = VoidSink;
    sink.emit_char('a');
    sink.invalid_char(&[0x80]);
    sink.unsupported_charset(b'0');
    assert!(!sink.is_mid_escape_replay());
}

#[test]
fn event_debug_formatting() {
    assert_eq!(format!("{:?}", SinkEvent::Char('a')), "Char('a')");
    assert_eq!(format!("{:?}", SinkEvent::InvalidChar(vec![0xC3, 0x28])), "InvalidChar([C3, 28])");
    assert_eq!(format!("{:?}", SinkEvent::UnsupportedCharset(b'A')), "UnsupportedCharset('A')");
}
