//! Declarative polyglot code model and emission for Vellum.
//!
//! Callers build a module / interface / property / content graph across
//! independent declaration sites; [`CodeArtifacts::emit`] renders each
//! module through a [`PolyglotRenderer`] and persists the rendered text
//! through a `PersistenceHandler`. Modules resolving to one logical output
//! name merge through the handler's append-on-exists semantics; the code
//! model itself never merges declarations.

mod artifacts;
mod code_text;
mod model;
mod render;
mod typescript;

pub use artifacts::CodeArtifacts;
pub use code_text::CodeText;
pub use model::{
    ContentDecl, ContentPayload, ExportFlags, InterfaceDecl, InterfaceRef, ModuleDecl,
    PropertyDecl, PropertyKind,
};
pub use render::{ConsoleEmitErrorHandler, EmitErrorHandler, PolyglotRenderer};
pub use typescript::{TypeScriptRenderer, typescript};
