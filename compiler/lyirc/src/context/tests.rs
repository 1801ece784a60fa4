use super::*;
use lyir_diagnostic::{ColorMode, SharedBuffer};
use lyir_types::{BuiltinType, TypeId};
use pretty_assertions::assert_eq;

fn captured(config: CompilerConfig) -> (Context, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let emitter = TerminalEmitter::with_color_mode(buffer.clone(), ColorMode::Never, false);
    (Context::with_emitter(config, Box::new(emitter)), buffer)
}

#[test]
fn fresh_context_state() {
    let (ctx, buffer) = captured(CompilerConfig::default());

    assert_eq!(ctx.target().name, "x86_64-linux");
    assert!(ctx.sources().is_empty());
    assert_eq!(ctx.types().len(), BuiltinType::ALL.len());
    assert_eq!(ctx.dependency_graph_count(), 1);
    assert!(ctx.dependencies().is_empty());
    assert!(!ctx.has_reported_errors());
    assert!(!ctx.use_color());
    assert_eq!(buffer.contents(), "");
}

#[test]
fn invalid_config_is_rejected() {
    let config = CompilerConfig::new().with_max_interned_string_size(0);
    let Err(err) = Context::try_new(config) else {
        panic!("zero interned size accepted");
    };
    assert_eq!(err, ConfigError::ZeroInternedSize);
}

#[test]
fn write_functions_format_and_flag() {
    let (mut ctx, buffer) = captured(CompilerConfig::default());
    let id = ctx.add_source_from_string("main.laye", "foo();\nbar();\n");

    ctx.write_info(Location::new(id, 0, 3), "starting");
    ctx.write_warn(Location::new(id, 7, 3), format!("unused `{}`", "bar"));
    assert!(!ctx.has_reported_errors());

    let _proof = ctx.write_error(Location::new(id, 7, 3), "undefined");
    ctx.write_note(Location::new(id, 0, 1), "still reported");
    assert!(ctx.has_reported_errors());

    assert_eq!(
        buffer.contents(),
        "main.laye(1, 1): Info: starting\n\
         main.laye(2, 1): Warning: unused `bar`\n\
         main.laye(2, 1): Error: undefined\n\
         main.laye(1, 1): Note: still reported\n"
    );
}

#[test]
fn fatal_and_ice_set_flag() {
    let (mut ctx, _) = captured(CompilerConfig::default());
    let id = ctx.add_source_from_string("a", "x");
    ctx.write_fatal(Location::point(id, 0), "cannot continue");
    assert!(ctx.has_reported_errors());

    let (mut ctx, buffer) = captured(CompilerConfig::default());
    ctx.write_ice(Location::point(id, 0), "bad state");
    assert!(ctx.has_reported_errors());
    // No source registered in this context: unknown name, unresolved position.
    assert_eq!(
        buffer.contents(),
        "<unknown>(0, 0): Internal Compiler Exception: bad state\n"
    );
}

#[test]
fn byte_position_mode() {
    let (mut ctx, buffer) = captured(CompilerConfig::new().with_byte_positions(true));
    let id = ctx.add_source_from_string("b.laye", "abc\ndef");

    ctx.write_error(Location::new(id, 5, 1), "here");
    assert_eq!(buffer.contents(), "b.laye[5]: Error: here\n");
    assert_eq!(ctx.format_location(Location::new(id, 5, 1)), "b.laye[5]");

    ctx.set_use_byte_positions(false);
    assert_eq!(ctx.format_location(Location::new(id, 5, 1)), "b.laye(2, 2)");
}

#[test]
fn out_of_range_location_prints_zero() {
    let (mut ctx, buffer) = captured(CompilerConfig::default());
    let id = ctx.add_source_from_string("s", "abc");
    ctx.write_warn(Location::new(id, 10, 1), "past the end");
    assert_eq!(buffer.contents(), "s(0, 0): Warning: past the end\n");
}

#[test]
fn color_toggle_wraps_tag() {
    let (mut ctx, buffer) = captured(CompilerConfig::default());
    let id = ctx.add_source_from_string("c", "x");
    ctx.set_use_color(true);
    assert!(ctx.use_color());

    ctx.write_warn(Location::point(id, 0), "w");
    assert_eq!(buffer.contents(), "c(1, 1): \x1b[33mWarning:\x1b[0m w\n");
}

#[test]
fn interning_through_context() {
    let (mut ctx, _) = captured(CompilerConfig::default());
    let a = ctx.intern("main");
    let b = ctx.intern(String::from("main"));
    assert_eq!(a, b);
    assert_eq!(ctx.interner().get_str(a), Some("main"));
}

#[test]
fn module_lists_and_lookup() {
    let (mut ctx, _) = captured(CompilerConfig::default());
    let src = ctx.add_source_from_string("m.laye", "");
    let name = ctx.intern("m");

    assert_eq!(ctx.push_frontend_module(FrontendModule::new(src, name)), 0);
    assert_eq!(ctx.push_ir_module(IrModule::new(name).with_source(src)), 0);

    assert_eq!(ctx.frontend_module_for(src).map(|m| m.name), Some(name));
    assert!(ctx.frontend_module_for(SourceId::new(3)).is_none());
    assert_eq!(ctx.ir_module_named("m").and_then(|m| m.sourceid), Some(src));
    assert!(ctx.ir_module_named("other").is_none());
    // Lookup does not intern.
    assert_eq!(ctx.interner().find("other"), None);
}

#[test]
fn dependency_graphs_are_tracked() {
    let (mut ctx, _) = captured(CompilerConfig::default());
    let a = ctx.add_source_from_string("a", "");
    let b = ctx.add_source_from_string("b", "");
    ctx.dependencies_mut().depends_on(a, b);

    let g = ctx.create_dependency_graph();
    assert_ne!(g, DepGraphId::PRIMARY);
    if let Some(graph) = ctx.dependency_graph_mut(g) {
        graph.add_node(b);
    }

    assert_eq!(ctx.dependencies().edge_count(), 1);
    assert_eq!(ctx.dependency_graph(g).map(DependencyGraph::len), Some(1));
    assert_eq!(ctx.dependency_graph_count(), 2);
}

#[test]
fn set_target_keeps_builtins() {
    let (mut ctx, _) = captured(CompilerConfig::default());
    let before = *ctx.types().get(TypeId::INT);

    ctx.set_target(TargetKind::X86_64Windows);
    assert_eq!(ctx.target().name, "x86_64-windows");
    assert_eq!(ctx.target().ffi.size_of_long, 32);
    assert_eq!(*ctx.types().get(TypeId::INT), before);
    assert!(std::ptr::eq(ctx.types().target(), ctx.target()));
}

#[test]
fn directories_from_config_and_setters() {
    let config = CompilerConfig::new()
        .with_include_directory("include")
        .with_link_library("m");
    let (mut ctx, _) = captured(config);
    ctx.add_include_directory("vendor/include");
    ctx.add_library_directory("/opt/lib");
    ctx.add_link_library("c");

    assert_eq!(
        ctx.include_directories(),
        &[PathBuf::from("include"), PathBuf::from("vendor/include")]
    );
    assert_eq!(ctx.library_directories(), &[PathBuf::from("/opt/lib")]);
    assert_eq!(ctx.link_libraries(), &["m".to_string(), "c".to_string()]);
}

#[test]
fn destroy_accounts_for_everything() {
    let config = CompilerConfig::new()
        .with_max_interned_string_size(16)
        .with_include_directory("inc")
        .with_library_directory("lib")
        .with_link_library("c");
    let (mut ctx, _) = captured(config);

    let src = ctx.add_source_from_string("x.laye", "hello");
    ctx.add_source_from_string("y.laye", "hi");
    let name = ctx.intern("x");
    ctx.intern("a string well past the sixteen byte cap");
    ctx.push_frontend_module(FrontendModule::new(src, name));
    ctx.push_ir_module(IrModule::new(name));
    ctx.types_mut().pointer(TypeId::I8);
    ctx.create_dependency_graph();
    ctx.write_error(Location::point(src, 0), "e");

    let arena_blocks = ctx.interner().stats().arena.blocks;
    let report = ctx.destroy();

    assert_eq!(
        report,
        TeardownReport {
            sources: 2,
            source_bytes: 7,
            frontend_modules: 1,
            ir_modules: 1,
            builtin_types: BuiltinType::ALL.len(),
            derived_types: 1,
            dependency_graphs: 2,
            // empty string, "x", and the oversized one
            interned_strings: 3,
            string_arena_blocks: arena_blocks,
            oversized_strings: 1,
            include_directories: 1,
            library_directories: 1,
            link_libraries: 1,
            had_errors: true,
        }
    );
}
