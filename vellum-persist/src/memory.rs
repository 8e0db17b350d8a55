//! In-memory persistence, primarily for tests and previews.

use std::rc::Rc;

use eyre::Result;
use vellum_core::{
    Artifact, AsIs, Context, NamingParams, NamingStrategy, TextArtifact, TextArtifactOptions,
    TextBuffer, TextValue,
};

use crate::error::PersistenceError;
use crate::handler::{PersistOptions, PersistenceHandler};
use crate::result::{PersistenceResult, ResultLog};

/// Persistence handler accumulating results in memory only.
///
/// Runs the full create/append/overwrite decision logic; the logical name
/// stands in for every physical name field. Cannot fail for directory or
/// permission reasons.
pub struct MemoryPersistence {
    logical_naming: Rc<dyn NamingStrategy>,
    log: ResultLog,
}

impl MemoryPersistence {
    pub fn new(logical_naming: Rc<dyn NamingStrategy>) -> Self {
        Self {
            logical_naming,
            log: ResultLog::new(),
        }
    }
}

impl Default for MemoryPersistence {
    fn default() -> Self {
        Self::new(Rc::new(AsIs))
    }
}

impl PersistenceHandler for MemoryPersistence {
    fn results(&self) -> &[PersistenceResult] {
        self.log.results()
    }

    fn result(&self, logical_name: &str) -> Option<&PersistenceResult> {
        self.log.current(logical_name)
    }

    fn create_mutable_text_artifact(
        &self,
        _ctx: &Context,
        options: TextArtifactOptions,
    ) -> TextBuffer {
        TextBuffer::new(options)
    }

    fn persist_text_artifact(
        &mut self,
        ctx: &Context,
        name: &TextValue,
        artifact: Rc<dyn TextArtifact>,
        options: Option<&PersistOptions>,
    ) -> Result<Option<PersistenceResult>> {
        let as_artifact: &dyn Artifact = &*artifact;
        let logical_naming = options
            .and_then(|options| options.logical_naming.clone())
            .unwrap_or_else(|| self.logical_naming.clone());
        let logical_name = logical_naming.name(
            ctx,
            &NamingParams {
                artifact: as_artifact,
                suggested_name: name,
                file_index: self.log.file_index(),
            },
        );

        let append_requested = options.is_some_and(|options| options.append_if_exists);
        if append_requested && self.log.current(&logical_name).is_some() {
            let fragment = artifact.text_fragment(ctx);
            let delim = options.and_then(|options| options.append_delim.as_deref());
            let appended = self.log.append(&logical_name, &fragment, delim, artifact);
            return Ok(appended.cloned());
        }

        let record = PersistenceResult {
            original_name: name.clone(),
            logical_name: logical_name.clone(),
            physical_name: logical_name.clone(),
            physical_abs: logical_name.clone(),
            physical_rel: logical_name,
            text: artifact.text(ctx),
            artifacts: vec![artifact],
            overwrote: Vec::new(),
        };
        Ok(Some(self.log.record(record).clone()))
    }

    fn handle_error(
        &self,
        ctx: &Context,
        name: &TextValue,
        _artifact: &dyn TextArtifact,
        error: &PersistenceError,
    ) {
        eprintln!("[{}] {} ({})", error.code(), error, name.resolve(ctx));
    }
}
