//! Target ABI presets.
//!
//! Sizes and alignments are in bits. The presets are `static` and shared by
//! reference; contexts hold `&'static TargetInfo` and never copy them.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// C primitive layout for FFI.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FfiLayout {
    pub size_of_bool: u16,
    pub size_of_char: u16,
    pub size_of_short: u16,
    pub size_of_int: u16,
    pub size_of_long: u16,
    pub size_of_long_long: u16,
    pub size_of_float: u16,
    pub size_of_double: u16,

    pub align_of_bool: u16,
    pub align_of_char: u16,
    pub align_of_short: u16,
    pub align_of_int: u16,
    pub align_of_long: u16,
    pub align_of_long_long: u16,
    pub align_of_float: u16,
    pub align_of_double: u16,

    pub char_is_signed: bool,
}

/// Immutable per-target ABI description.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TargetInfo {
    /// Preset name, e.g. `x86_64-linux`.
    pub name: &'static str,
    pub ffi: FfiLayout,
    pub size_of_pointer: u16,
    pub align_of_pointer: u16,
}

impl TargetInfo {
    /// Copy of this layout with a different `long` width.
    const fn with_long(self, name: &'static str, bits: u16) -> Self {
        TargetInfo {
            name,
            ffi: FfiLayout {
                size_of_long: bits,
                align_of_long: bits,
                ..self.ffi
            },
            ..self
        }
    }
}

const LP64: TargetInfo = TargetInfo {
    name: "x86_64-linux",
    ffi: FfiLayout {
        size_of_bool: 8,
        size_of_char: 8,
        size_of_short: 16,
        size_of_int: 32,
        size_of_long: 64,
        size_of_long_long: 64,
        size_of_float: 32,
        size_of_double: 64,

        align_of_bool: 8,
        align_of_char: 8,
        align_of_short: 16,
        align_of_int: 32,
        align_of_long: 64,
        align_of_long_long: 64,
        align_of_float: 32,
        align_of_double: 64,

        char_is_signed: true,
    },
    size_of_pointer: 64,
    align_of_pointer: 64,
};

/// 64-bit Linux (LP64).
pub static X86_64_LINUX: TargetInfo = LP64;

/// 64-bit Windows (LLP64): `long` is 32 bits.
pub static X86_64_WINDOWS: TargetInfo = LP64.with_long("x86_64-windows", 32);

/// Error when parsing a target name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown target `{0}` (expected `x86_64-linux` or `x86_64-windows`)")]
pub struct TargetParseError(pub String);

/// Selector for the built-in presets.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum TargetKind {
    /// The process default.
    #[default]
    X86_64Linux,
    X86_64Windows,
}

impl TargetKind {
    pub const ALL: [TargetKind; 2] = [TargetKind::X86_64Linux, TargetKind::X86_64Windows];

    /// The shared preset for this target.
    pub fn info(self) -> &'static TargetInfo {
        match self {
            TargetKind::X86_64Linux => &X86_64_LINUX,
            TargetKind::X86_64Windows => &X86_64_WINDOWS,
        }
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }
}

impl FromStr for TargetKind {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| TargetParseError(s.to_owned()))
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The process-default target preset.
pub fn default_target() -> &'static TargetInfo {
    TargetKind::default().info()
}
