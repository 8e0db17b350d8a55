//! Console-echoing persistence.

use std::rc::Rc;

use eyre::Result;
use vellum_core::{Context, TextArtifact, TextArtifactOptions, TextBuffer, TextValue};

use crate::error::PersistenceError;
use crate::handler::{PersistOptions, PersistenceHandler};
use crate::result::{PersistenceResult, ResultLog};

/// Persistence handler echoing every artifact's full text to stdout while
/// recording results like the in-memory backend.
///
/// The logical name is the resolved suggested name; no naming strategy is
/// applied.
#[derive(Default)]
pub struct ConsolePersistence {
    log: ResultLog,
}

impl ConsolePersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceHandler for ConsolePersistence {
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
        println!("{}", artifact.text(ctx));

        let logical_name = name.resolve(ctx);
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
