//! End-to-end behavior of the compilation context through its public API.

use std::io::Write;

use lyir_diagnostic::{ColorMode, LineColumn, SharedBuffer, TerminalEmitter};
use lyir_ir::target::{X86_64_LINUX, X86_64_WINDOWS};
use lyir_ir::{Location, SourceId, TargetKind};
use lyir_types::{BuiltinType, TypeId};
use lyirc::{CompilerConfig, Context, ResolveError, SourceLoadError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn context(config: CompilerConfig) -> (Context, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let emitter = TerminalEmitter::with_color_mode(buffer.clone(), ColorMode::Never, false);
    (Context::with_emitter(config, Box::new(emitter)), buffer)
}

#[test]
fn same_path_yields_same_id_without_rereading() {
    let (mut ctx, _) = context(CompilerConfig::default());
    let mut file = match tempfile::NamedTempFile::new() {
        Ok(f) => f,
        Err(e) => panic!("tempfile: {e}"),
    };
    if let Err(e) = file.write_all(b"module main;\n") {
        panic!("write: {e}");
    }
    let path = file.path().to_path_buf();

    let Ok(first) = ctx.get_or_add_source_from_file(&path) else {
        panic!("load failed");
    };
    if let Err(e) = std::fs::write(&path, "changed on disk") {
        panic!("rewrite: {e}");
    }
    let Ok(second) = ctx.get_or_add_source_from_file(&path) else {
        panic!("second registration failed");
    };

    assert_eq!(first, second);
    assert_eq!(ctx.sources().len(), 1);
    assert_eq!(ctx.sources().text(first), Some(&b"module main;\n"[..]));
}

#[test]
fn load_failure_carries_os_error() {
    let (mut ctx, _) = context(CompilerConfig::default());
    let dir = match tempfile::tempdir() {
        Ok(d) => d,
        Err(e) => panic!("tempdir: {e}"),
    };

    let result = ctx.get_or_add_source_from_file(dir.path().join("absent.laye"));
    let Err(SourceLoadError::Io { source, .. }) = result else {
        panic!("expected an I/O error");
    };
    assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
    assert!(ctx.sources().is_empty());
}

#[test]
fn line_starts_resolve_to_column_one() {
    let (mut ctx, _) = context(CompilerConfig::default());
    let text = "first\nsecond line\n\nfourth";
    let id = ctx.add_source_from_string("lines.laye", text);

    let mut line = 1;
    let mut line_start = 0u32;
    for (i, byte) in text.bytes().enumerate() {
        let offset = u32::try_from(i).unwrap_or(u32::MAX);
        let resolved = ctx.resolve_location(Location::new(id, offset, 0));
        assert_eq!(resolved, Ok(LineColumn::new(line, offset - line_start + 1)));
        if byte == b'\n' {
            line += 1;
            line_start = offset + 1;
        }
    }

    // The byte right after the first newline begins line 2.
    assert_eq!(
        ctx.resolve_location(Location::new(id, 6, 1)),
        Ok(LineColumn::new(2, 1))
    );
}

#[test]
fn out_of_range_locations_are_rejected() {
    let (mut ctx, _) = context(CompilerConfig::default());
    let id = ctx.add_source_from_string("short", "abcd");

    assert!(matches!(
        ctx.resolve_location(Location::new(id, 4, 0)),
        Err(ResolveError::OutOfRange { .. })
    ));
    assert!(ctx.resolve_location(Location::new(id, 1, 4)).is_err());
    assert!(ctx.resolve_location(Location::new(id, 0, 4)).is_ok());
    assert!(Location::try_new(id, -1, 0).is_err());
    assert!(Location::try_new(id, 0, -2).is_err());
}

#[test]
fn interned_views_survive_block_rollover() {
    let (mut ctx, _) = context(CompilerConfig::new().with_max_interned_string_size(32));

    let first = ctx.intern("anchor");
    let before = ctx.interner().get(first).to_vec();
    for i in 0..2000 {
        ctx.intern(format!("filler-{i}"));
    }

    assert!(ctx.interner().stats().arena.blocks > 1);
    assert_eq!(ctx.interner().get(first), &before[..]);
    assert_eq!(ctx.intern("anchor"), first);
    let last = ctx.intern("filler-1999");
    assert_eq!(ctx.interner().get_str(last), Some("filler-1999"));
}

#[test]
fn builtins_are_identical_within_and_independent_across_contexts() {
    let (a, _) = context(CompilerConfig::default());
    let (b, _) = context(CompilerConfig::default());

    for builtin in BuiltinType::ALL {
        assert!(std::ptr::eq(a.types().builtin(builtin), a.types().get(builtin.id())));
        assert!(!std::ptr::eq(a.types().builtin(builtin), b.types().builtin(builtin)));
        assert_eq!(a.types().builtin(builtin), b.types().builtin(builtin));
    }
    assert_eq!(a.types().get(TypeId::I8_BUFFER).element, TypeId::I8);
}

#[test]
fn error_flag_never_clears() {
    let (mut ctx, _) = context(CompilerConfig::default());
    let id = ctx.add_source_from_string("f", "x");
    let at = Location::point(id, 0);

    ctx.write_info(at, "info");
    ctx.write_note(at, "note");
    ctx.write_warn(at, "warn");
    assert!(!ctx.has_reported_errors());

    ctx.write_error(at, "error");
    assert!(ctx.has_reported_errors());
    for _ in 0..3 {
        ctx.write_info(at, "more info");
        assert!(ctx.has_reported_errors());
    }
}

#[test]
fn target_presets_differ_only_in_long() {
    let (linux, _) = context(CompilerConfig::default());
    let (windows, _) = context(CompilerConfig::new().with_target(TargetKind::X86_64Windows));

    assert!(std::ptr::eq(linux.target(), &X86_64_LINUX));
    assert!(std::ptr::eq(windows.target(), &X86_64_WINDOWS));
    assert_eq!(linux.target().ffi.size_of_long, 64);
    assert_eq!(windows.target().ffi.size_of_long, 32);
    assert_eq!(windows.target().ffi.align_of_long, 32);

    let mut patched = windows.target().ffi;
    patched.size_of_long = 64;
    patched.align_of_long = 64;
    assert_eq!(patched, linux.target().ffi);
    assert_eq!(linux.target().size_of_pointer, windows.target().size_of_pointer);
}

#[test]
fn destroy_releases_everything() {
    let (mut ctx, buffer) = context(CompilerConfig::new().with_max_interned_string_size(64));
    let id = ctx.add_source_from_string("d.laye", "abc");
    ctx.create_dependency_graph();
    ctx.create_dependency_graph();
    ctx.dependencies_mut().add_node(id);
    ctx.intern("name");

    let report = ctx.destroy();

    assert_eq!(report.sources, 1);
    assert_eq!(report.source_bytes, 3);
    assert_eq!(report.dependency_graphs, 3);
    assert_eq!(report.builtin_types, BuiltinType::ALL.len());
    assert_eq!(report.interned_strings, 2);
    assert_eq!(report.string_arena_blocks, 1);
    assert!(!report.had_errors);
    assert_eq!(buffer.contents(), "");
}

#[test]
fn diagnostics_render_against_registered_sources() {
    let (mut ctx, buffer) = context(CompilerConfig::default());
    let id = ctx.add_source_from_string("r.laye", "let a = 1;\nlet b = a +;\n");

    ctx.write_error(Location::new(id, 22, 1), "expected expression");
    ctx.diagnostics_mut().emit_summary();

    assert_eq!(
        buffer.contents(),
        "r.laye(2, 12): Error: expected expression\n\
         error: aborting due to previous error\n"
    );
    assert_eq!(ctx.format_location(Location::point(SourceId::new(7), 0)), "<unknown>(0, 0)");
}

proptest! {
    #[test]
    fn interning_is_stable(words in proptest::collection::vec("[a-z]{0,40}", 1..200)) {
        let (mut ctx, _) = context(CompilerConfig::new().with_max_interned_string_size(24));
        let symbols: Vec<_> = words.iter().map(|w| ctx.intern(w)).collect();

        for (word, sym) in words.iter().zip(&symbols) {
            prop_assert_eq!(ctx.interner().get_str(*sym), Some(word.as_str()));
            prop_assert_eq!(ctx.intern(word), *sym);
        }
    }
}
