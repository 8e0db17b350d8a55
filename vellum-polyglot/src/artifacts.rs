//! The artifact container walking the graph through a persistence handler.

use std::rc::Rc;

use eyre::Result;
use vellum_core::{Content, Context, MutableTextArtifact, TextArtifactOptions, TextValue};
use vellum_persist::{PersistOptions, PersistenceHandler};

use crate::model::ModuleDecl;
use crate::render::{EmitErrorHandler, PolyglotRenderer};

/// Collects module declarations from independent call sites and emits them.
#[derive(Debug, Default)]
pub struct CodeArtifacts {
    modules: Vec<ModuleDecl>,
}

impl CodeArtifacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module, returning it for further declarations.
    pub fn declare_module(&mut self, module: ModuleDecl) -> &mut ModuleDecl {
        let index = self.modules.len();
        self.modules.push(module);
        &mut self.modules[index]
    }

    pub fn modules(&self) -> &[ModuleDecl] {
        &self.modules
    }

    /// Walk every module in declaration order, render its interface and
    /// content declarations, and persist one artifact per module through
    /// `handler`.
    ///
    /// Declarations the renderer cannot map are reported through `errors`
    /// and skipped. Modules whose file names resolve to one logical output
    /// merge through the handler's append-on-exists semantics; pass
    /// `options` with `append_if_exists` set to enable that.
    pub fn emit(
        &self,
        ctx: &Context,
        renderer: &dyn PolyglotRenderer,
        handler: &mut dyn PersistenceHandler,
        errors: &dyn EmitErrorHandler,
        options: Option<&PersistOptions>,
    ) -> Result<()> {
        for module in &self.modules {
            let artifact =
                handler.create_mutable_text_artifact(ctx, TextArtifactOptions::new(renderer.nature()));

            let mut declarations: Vec<String> = Vec::new();
            for interface in module.interfaces() {
                let interface = interface.borrow();
                match renderer.render_interface(&interface, module.exports.exported, errors) {
                    Some(declaration) => declarations.push(declaration),
                    None => errors.report(&format!(
                        "no declaration for interface {} in module {}",
                        interface.name().original(),
                        module.name.original()
                    )),
                }
            }
            for content in module.contents() {
                match renderer.render_content(content, module.exports, errors) {
                    Some(declaration) => declarations.push(declaration),
                    None => errors.report(&format!(
                        "no declaration for content {} in module {}",
                        content.name.original(),
                        module.name.original()
                    )),
                }
            }

            for (index, declaration) in declarations.iter().enumerate() {
                if index > 0 {
                    artifact.append(ctx, Content::from("\n"));
                }
                artifact.append(ctx, Content::from(declaration.as_str()));
            }

            let name = TextValue::from(renderer.file_name(&module.name));
            handler.persist_text_artifact(ctx, &name, Rc::new(artifact), options)?;
        }
        Ok(())
    }
}
