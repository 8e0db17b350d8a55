//! The per-language rendering seam.

use vellum_core::{ArtifactNature, Label};

use crate::model::{ContentDecl, ExportFlags, InterfaceDecl, PropertyDecl};

/// Renders declaration-graph nodes into one language's source text.
///
/// A `None` from any render operation signals a shape the language cannot
/// map; the emitter reports it through the error handler and skips that one
/// declaration, never failing the whole emission.
pub trait PolyglotRenderer {
    /// Nature of the artifacts this renderer produces.
    fn nature(&self) -> ArtifactNature;

    /// File name (extension left to naming strategies) for a module.
    fn file_name(&self, module: &Label) -> String;

    fn render_interface(
        &self,
        interface: &InterfaceDecl,
        exported: bool,
        errors: &dyn EmitErrorHandler,
    ) -> Option<String>;

    fn render_property(&self, property: &PropertyDecl) -> Option<String>;

    fn render_content(
        &self,
        content: &ContentDecl,
        exports: ExportFlags,
        errors: &dyn EmitErrorHandler,
    ) -> Option<String>;
}

/// Receives declaration failures during emission.
pub trait EmitErrorHandler {
    fn report(&self, message: &str);
}

/// Default handler printing failures to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleEmitErrorHandler;

impl EmitErrorHandler for ConsoleEmitErrorHandler {
    fn report(&self, message: &str) {
        eprintln!("{message}");
    }
}
