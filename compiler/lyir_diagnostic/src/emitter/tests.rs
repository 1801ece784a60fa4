use super::*;
use crate::LineColumn;
use lyir_ir::SourceId;
use pretty_assertions::assert_eq;

/// Single source named `main.laye`; every in-range location is line 3.
struct OneSource;

impl LocationLookup for OneSource {
    fn source_name(&self, sourceid: SourceId) -> Option<&str> {
        (sourceid == SourceId::new(0)).then_some("main.laye")
    }

    fn line_column(&self, location: Location) -> Option<LineColumn> {
        (location.offset < 100).then(|| LineColumn::new(3, location.offset + 1))
    }
}

fn loc(offset: u32) -> Location {
    Location::new(SourceId::new(0), offset, 1)
}

#[test]
fn test_human_prefix() {
    let prefix = format_prefix(&OneSource, loc(4), Severity::Error, PrefixStyle::default());
    assert_eq!(prefix, "main.laye(3, 5): Error:");
}

#[test]
fn test_byte_position_prefix() {
    let style = PrefixStyle {
        byte_positions: true,
        colors: false,
    };
    let prefix = format_prefix(&OneSource, loc(42), Severity::Note, style);
    assert_eq!(prefix, "main.laye[42]: Note:");
}

#[test]
fn test_unresolved_location_falls_back() {
    let prefix = format_prefix(&OneSource, loc(500), Severity::Warning, PrefixStyle::default());
    assert_eq!(prefix, "main.laye(0, 0): Warning:");
}

#[test]
fn test_unknown_source() {
    let location = Location::new(SourceId::new(9), 0, 0);
    let prefix = format_prefix(&OneSource, location, Severity::Info, PrefixStyle::default());
    assert_eq!(prefix, "<unknown>(0, 0): Info:");
}

#[test]
fn test_location_only() {
    assert_eq!(format_location(&OneSource, loc(1), false), "main.laye(3, 2)");
    assert_eq!(format_location(&OneSource, loc(1), true), "main.laye[1]");
}

#[test]
fn test_colored_tag() {
    let style = PrefixStyle {
        byte_positions: false,
        colors: true,
    };
    let prefix = format_prefix(&OneSource, loc(0), Severity::InternalError, style);
    assert_eq!(
        prefix,
        "main.laye(3, 1): \x1b[35mInternal Compiler Exception:\x1b[0m"
    );
}

#[test]
fn test_shared_buffer_captures_output() {
    let buffer = SharedBuffer::new();
    let mut emitter =
        TerminalEmitter::with_color_mode(buffer.clone(), ColorMode::Never, false);

    emitter.emit("x[0]: Fatal:", &Diagnostic::fatal(loc(0), "stop"));
    assert_eq!(buffer.contents(), "x[0]: Fatal: stop\n");

    buffer.clear();
    assert_eq!(buffer.contents(), "");
}
