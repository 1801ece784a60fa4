//! Compilation context.
//!
//! `Context` owns every piece of state a compilation run shares: the
//! target descriptor, the string interner, the type pool with its built-in
//! types, the source registry, produced modules, dependency graphs, and the
//! diagnostic reporter.
//!
//! Lifetime is explicit: build it once with [`Context::new`] and release it
//! with [`Context::destroy`], which consumes it and reports what was freed.

use std::fmt;
use std::path::{Path, PathBuf};

use lyir_diagnostic::{
    format_location, Diagnostic, DiagnosticEmitter, ErrorGuaranteed, LineColumn,
    PrefixStyle, Reporter, Severity, TerminalEmitter,
};
use lyir_ir::{Location, SourceId, StringInterner, Symbol, TargetInfo, TargetKind};
use lyir_types::TypePool;
use tracing::debug;

use crate::config::{CompilerConfig, ConfigError};
use crate::depgraph::{DepGraphId, DependencyGraph};
use crate::module::{FrontendModule, IrModule};
use crate::source::{ResolveError, SourceLoadError, SourceRegistry};

/// What [`Context::destroy`] released.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub sources: usize,
    pub source_bytes: usize,
    pub frontend_modules: usize,
    pub ir_modules: usize,
    pub builtin_types: usize,
    pub derived_types: usize,
    pub dependency_graphs: usize,
    pub interned_strings: usize,
    pub string_arena_blocks: usize,
    pub oversized_strings: usize,
    pub include_directories: usize,
    pub library_directories: usize,
    pub link_libraries: usize,
    /// Final value of the error flag.
    pub had_errors: bool,
}

/// State shared by one compilation run.
pub struct Context {
    target: &'static TargetInfo,
    target_kind: TargetKind,
    interner: StringInterner,
    types: TypePool,
    sources: SourceRegistry,
    reporter: Reporter,
    use_color: bool,

    frontend_modules: Vec<FrontendModule>,
    ir_modules: Vec<IrModule>,
    /// `depgraphs[0]` is the primary graph.
    depgraphs: Vec<DependencyGraph>,

    include_directories: Vec<PathBuf>,
    library_directories: Vec<PathBuf>,
    link_libraries: Vec<String>,
}

impl Context {
    /// Create a context that reports to stderr.
    ///
    /// # Panics
    /// Panics if `config` fails validation. Use [`try_new`](Self::try_new)
    /// to handle that case.
    pub fn new(config: CompilerConfig) -> Self {
        Self::try_new(config).unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_new(config: CompilerConfig) -> Result<Self, ConfigError> {
        let emitter = TerminalEmitter::stderr(config.color, config.stderr_is_tty);
        Self::try_with_emitter(config, Box::new(emitter))
    }

    /// Create a context whose diagnostics go to `emitter`.
    ///
    /// # Panics
    /// Panics if `config` fails validation.
    pub fn with_emitter(config: CompilerConfig, emitter: Box<dyn DiagnosticEmitter + Send>) -> Self {
        Self::try_with_emitter(config, emitter).unwrap_or_else(|e| panic!("{}", e))
    }

    #[tracing::instrument(level = "debug", skip_all, fields(target = %config.target))]
    pub fn try_with_emitter(
        config: CompilerConfig,
        emitter: Box<dyn DiagnosticEmitter + Send>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let use_color = config.use_color();
        let style = PrefixStyle {
            byte_positions: config.use_byte_positions_in_diagnostics,
            colors: use_color,
        };
        let target = config.target.info();

        let context = Context {
            target,
            target_kind: config.target,
            interner: StringInterner::with_max_size(config.max_interned_string_size),
            types: TypePool::new(target, config.type_arena_block_size),
            sources: SourceRegistry::new(),
            reporter: Reporter::new(emitter, style),
            use_color,
            frontend_modules: Vec::new(),
            ir_modules: Vec::new(),
            depgraphs: vec![DependencyGraph::new()],
            include_directories: config.include_directories,
            library_directories: config.library_directories,
            link_libraries: config.link_libraries,
        };

        debug!(
            max_interned = context.interner.max_interned_size(),
            builtins = context.types.len(),
            "context created"
        );
        Ok(context)
    }

    /// Release everything the context owns.
    ///
    /// Sources go first, then modules, types, dependency graphs, and
    /// finally the string arena that names in all of them point into.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn destroy(self) -> TeardownReport {
        let Context {
            target: _,
            target_kind: _,
            interner,
            types,
            mut sources,
            reporter,
            use_color: _,
            frontend_modules,
            ir_modules,
            depgraphs,
            include_directories,
            library_directories,
            link_libraries,
        } = self;

        let mut report = TeardownReport {
            had_errors: reporter.has_reported_errors(),
            ..TeardownReport::default()
        };
        drop(reporter);

        let (count, bytes) = sources.clear();
        report.sources = count;
        report.source_bytes = bytes;
        drop(sources);

        report.frontend_modules = frontend_modules.len();
        drop(frontend_modules);
        report.ir_modules = ir_modules.len();
        drop(ir_modules);

        let type_stats = types.stats();
        report.builtin_types = type_stats.builtins;
        report.derived_types = type_stats.derived;
        drop(types);

        report.dependency_graphs = depgraphs.len();
        drop(depgraphs);

        let strings = interner.stats();
        report.interned_strings = strings.symbols;
        report.string_arena_blocks = strings.arena.blocks;
        report.oversized_strings = strings.oversized;
        drop(interner);

        report.include_directories = include_directories.len();
        report.library_directories = library_directories.len();
        report.link_libraries = link_libraries.len();

        debug!(?report, "context destroyed");
        report
    }

    // === Target ===

    #[inline]
    pub fn target(&self) -> &'static TargetInfo {
        self.target
    }

    pub fn target_kind(&self) -> TargetKind {
        self.target_kind
    }

    /// Switch target presets.
    ///
    /// Built-in types keep the widths they were created with; derived types
    /// requested afterwards are sized for the new target.
    pub fn set_target(&mut self, kind: TargetKind) {
        debug!(from = %self.target_kind, to = %kind, "target changed");
        self.target_kind = kind;
        self.target = kind.info();
        self.types.set_target(self.target);
    }

    // === Sources ===

    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    pub fn sources_mut(&mut self) -> &mut SourceRegistry {
        &mut self.sources
    }

    pub fn get_or_add_source_from_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<SourceId, SourceLoadError> {
        self.sources.get_or_add_from_file(path)
    }

    pub fn add_source_from_string(
        &mut self,
        name: impl Into<String>,
        text: impl Into<Vec<u8>>,
    ) -> SourceId {
        self.sources.add_from_string(name, text)
    }

    pub fn resolve_location(&self, location: Location) -> Result<LineColumn, ResolveError> {
        self.sources.resolve_location(location)
    }

    // === Strings and Types ===

    pub fn intern(&mut self, s: impl AsRef<[u8]>) -> Symbol {
        self.interner.intern(s)
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn types(&self) -> &TypePool {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut TypePool {
        &mut self.types
    }

    // === Diagnostics ===

    pub fn emit(&mut self, diagnostic: &Diagnostic) -> Option<ErrorGuaranteed> {
        self.reporter.emit(diagnostic, &self.sources)
    }

    pub fn write_info(&mut self, location: Location, message: impl Into<String>) {
        self.emit(&Diagnostic::info(location, message));
    }

    pub fn write_note(&mut self, location: Location, message: impl Into<String>) {
        self.emit(&Diagnostic::note(location, message));
    }

    pub fn write_warn(&mut self, location: Location, message: impl Into<String>) {
        self.emit(&Diagnostic::warn(location, message));
    }

    pub fn write_error(&mut self, location: Location, message: impl Into<String>) -> ErrorGuaranteed {
        self.write_at_least_error(Severity::Error, location, message.into())
    }

    pub fn write_fatal(&mut self, location: Location, message: impl Into<String>) -> ErrorGuaranteed {
        self.write_at_least_error(Severity::Fatal, location, message.into())
    }

    /// Report a compiler invariant violation.
    pub fn write_ice(&mut self, location: Location, message: impl Into<String>) -> ErrorGuaranteed {
        self.write_at_least_error(Severity::InternalError, location, message.into())
    }

    fn write_at_least_error(
        &mut self,
        severity: Severity,
        location: Location,
        message: String,
    ) -> ErrorGuaranteed {
        let diagnostic = Diagnostic::new(severity, location, message);
        self.reporter.emit_error(&diagnostic, &self.sources)
    }

    /// `name(line, column)` or `name[offset]`, following the context's
    /// byte-position setting.
    pub fn format_location(&self, location: Location) -> String {
        format_location(&self.sources, location, self.use_byte_positions())
    }

    #[inline]
    pub fn has_reported_errors(&self) -> bool {
        self.reporter.has_reported_errors()
    }

    pub fn diagnostics(&self) -> &Reporter {
        &self.reporter
    }

    pub fn diagnostics_mut(&mut self) -> &mut Reporter {
        &mut self.reporter
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    pub fn set_use_color(&mut self, enabled: bool) {
        self.use_color = enabled;
        let style = self.reporter.style();
        self.reporter.set_style(PrefixStyle {
            colors: enabled,
            ..style
        });
    }

    pub fn use_byte_positions(&self) -> bool {
        self.reporter.style().byte_positions
    }

    pub fn set_use_byte_positions(&mut self, enabled: bool) {
        let style = self.reporter.style();
        self.reporter.set_style(PrefixStyle {
            byte_positions: enabled,
            ..style
        });
    }

    // === Modules ===

    /// Append a front-end module, returning its index.
    pub fn push_frontend_module(&mut self, module: FrontendModule) -> usize {
        self.frontend_modules.push(module);
        self.frontend_modules.len() - 1
    }

    pub fn frontend_modules(&self) -> &[FrontendModule] {
        &self.frontend_modules
    }

    /// Front-end module parsed from `sourceid`.
    pub fn frontend_module_for(&self, sourceid: SourceId) -> Option<&FrontendModule> {
        self.frontend_modules.iter().find(|m| m.sourceid == sourceid)
    }

    /// Append an IR module, returning its index.
    pub fn push_ir_module(&mut self, module: IrModule) -> usize {
        self.ir_modules.push(module);
        self.ir_modules.len() - 1
    }

    pub fn ir_modules(&self) -> &[IrModule] {
        &self.ir_modules
    }

    /// IR module named `name`. Never interns `name`.
    pub fn ir_module_named(&self, name: &str) -> Option<&IrModule> {
        let sym = self.interner.find(name)?;
        self.ir_modules.iter().find(|m| m.name == sym)
    }

    // === Dependency Graphs ===

    /// The primary dependency graph.
    pub fn dependencies(&self) -> &DependencyGraph {
        &self.depgraphs[DepGraphId::PRIMARY.index()]
    }

    pub fn dependencies_mut(&mut self) -> &mut DependencyGraph {
        &mut self.depgraphs[DepGraphId::PRIMARY.index()]
    }

    /// Create a graph owned by this context until teardown.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` graphs are created.
    pub fn create_dependency_graph(&mut self) -> DepGraphId {
        let raw = u32::try_from(self.depgraphs.len())
            .unwrap_or_else(|_| panic!("dependency graph count exceeded {}", u32::MAX));
        self.depgraphs.push(DependencyGraph::new());
        DepGraphId::new(raw)
    }

    pub fn dependency_graph(&self, id: DepGraphId) -> Option<&DependencyGraph> {
        self.depgraphs.get(id.index())
    }

    pub fn dependency_graph_mut(&mut self, id: DepGraphId) -> Option<&mut DependencyGraph> {
        self.depgraphs.get_mut(id.index())
    }

    pub fn dependency_graph_count(&self) -> usize {
        self.depgraphs.len()
    }

    // === Search Paths ===

    pub fn include_directories(&self) -> &[PathBuf] {
        &self.include_directories
    }

    pub fn add_include_directory(&mut self, dir: impl Into<PathBuf>) {
        self.include_directories.push(dir.into());
    }

    pub fn library_directories(&self) -> &[PathBuf] {
        &self.library_directories
    }

    pub fn add_library_directory(&mut self, dir: impl Into<PathBuf>) {
        self.library_directories.push(dir.into());
    }

    pub fn link_libraries(&self) -> &[String] {
        &self.link_libraries
    }

    pub fn add_link_library(&mut self, lib: impl Into<String>) {
        self.link_libraries.push(lib.into());
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("target", &self.target.name)
            .field("sources", &self.sources.len())
            .field("types", &self.types.len())
            .field("strings", &self.interner.len())
            .field("frontend_modules", &self.frontend_modules.len())
            .field("ir_modules", &self.ir_modules.len())
            .field("dependency_graphs", &self.depgraphs.len())
            .field("has_reported_errors", &self.has_reported_errors())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
