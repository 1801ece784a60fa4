//! Modules produced during a compilation.
//!
//! The context owns both lists; everything else refers to modules by the
//! index returned from the push functions.

use lyir_ir::{SourceId, Symbol};

/// A parsed source-language module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrontendModule {
    pub sourceid: SourceId,
    pub name: Symbol,
    /// Sources this module imports.
    pub imports: Vec<SourceId>,
}

impl FrontendModule {
    pub fn new(sourceid: SourceId, name: Symbol) -> Self {
        FrontendModule {
            sourceid,
            name,
            imports: Vec::new(),
        }
    }
}

/// A lowered IR module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IrModule {
    pub name: Symbol,
    /// Source the module was lowered from, if any.
    pub sourceid: Option<SourceId>,
    /// Names of the functions it defines.
    pub functions: Vec<Symbol>,
}

impl IrModule {
    pub fn new(name: Symbol) -> Self {
        IrModule {
            name,
            sourceid: None,
            functions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_source(mut self, sourceid: SourceId) -> Self {
        self.sourceid = Some(sourceid);
        self
    }
}
