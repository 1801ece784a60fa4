//! Lyir compiler context and driver support.
//!
//! [`Context`] is the per-run owner of sources, interned strings, types,
//! modules, dependency graphs, and diagnostics. Front-end and back-end
//! stages take `&mut Context` and check
//! [`has_reported_errors`](Context::has_reported_errors) between phases.

pub mod commands;
pub mod config;
mod context;
pub mod depgraph;
pub mod module;
pub mod source;
mod tracing_setup;

pub use config::{CompilerConfig, ConfigError};
pub use context::{Context, TeardownReport};
pub use depgraph::{DepGraphId, DependencyGraph};
pub use module::{FrontendModule, IrModule};
pub use source::{ResolveError, Source, SourceLoadError, SourceRegistry};
pub use tracing_setup::init_tracing;
