//! Compiler configuration.

use std::path::PathBuf;

use lyir_diagnostic::ColorMode;
use lyir_ir::{TargetKind, DEFAULT_MAX_INTERNED_SIZE};
use thiserror::Error;

/// Default byte budget for type node storage.
pub const DEFAULT_TYPE_ARENA_BLOCK_SIZE: usize = 1024 * 1024;

/// Invalid configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max interned string size must be at least 1 byte")]
    ZeroInternedSize,
}

/// Settings fixed at context creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilerConfig {
    pub target: TargetKind,
    /// Strings at or above this many bytes bypass the string arena.
    pub max_interned_string_size: usize,
    pub type_arena_block_size: usize,
    /// Print `name[offset]` instead of `name(line, column)`.
    pub use_byte_positions_in_diagnostics: bool,
    pub color: ColorMode,
    /// Whether stderr is a terminal; consulted for `ColorMode::Auto`.
    pub stderr_is_tty: bool,
    pub include_directories: Vec<PathBuf>,
    pub library_directories: Vec<PathBuf>,
    pub link_libraries: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            target: TargetKind::default(),
            max_interned_string_size: DEFAULT_MAX_INTERNED_SIZE,
            type_arena_block_size: DEFAULT_TYPE_ARENA_BLOCK_SIZE,
            use_byte_positions_in_diagnostics: false,
            color: ColorMode::Auto,
            stderr_is_tty: false,
            include_directories: Vec::new(),
            library_directories: Vec::new(),
            link_libraries: Vec::new(),
        }
    }
}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetKind) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_max_interned_string_size(mut self, bytes: usize) -> Self {
        self.max_interned_string_size = bytes;
        self
    }

    #[must_use]
    pub fn with_type_arena_block_size(mut self, bytes: usize) -> Self {
        self.type_arena_block_size = bytes;
        self
    }

    #[must_use]
    pub fn with_byte_positions(mut self, enabled: bool) -> Self {
        self.use_byte_positions_in_diagnostics = enabled;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: ColorMode, stderr_is_tty: bool) -> Self {
        self.color = color;
        self.stderr_is_tty = stderr_is_tty;
        self
    }

    #[must_use]
    pub fn with_include_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_directories.push(dir.into());
        self
    }

    #[must_use]
    pub fn with_library_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.library_directories.push(dir.into());
        self
    }

    #[must_use]
    pub fn with_link_library(mut self, lib: impl Into<String>) -> Self {
        self.link_libraries.push(lib.into());
        self
    }

    /// Resolved color flag.
    pub fn use_color(&self) -> bool {
        self.color.should_use_colors(self.stderr_is_tty)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_interned_string_size == 0 {
            return Err(ConfigError::ZeroInternedSize);
        }
        Ok(())
    }
}
