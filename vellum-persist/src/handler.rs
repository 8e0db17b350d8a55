//! The persistence-handler contract shared by every backend.

use std::rc::Rc;

use eyre::Result;
use vellum_core::{Context, NamingStrategy, TextArtifact, TextArtifactOptions, TextBuffer, TextValue};

use crate::error::PersistenceError;
use crate::result::PersistenceResult;

/// Request-level options for a single persist call.
#[derive(Default)]
pub struct PersistOptions {
    /// Merge into an existing record under the same logical name instead of
    /// overwriting it.
    pub append_if_exists: bool,
    /// Separator placed between the existing text and an appended fragment.
    pub append_delim: Option<String>,
    /// Override the handler's logical naming strategy for this call.
    pub logical_naming: Option<Rc<dyn NamingStrategy>>,
    /// Override the handler's physical naming strategy for this call.
    pub physical_naming: Option<Rc<dyn NamingStrategy>>,
    /// Unix permission bits applied after a successful filesystem write.
    pub mode: Option<u32>,
}

impl PersistOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_if_exists(mut self) -> Self {
        self.append_if_exists = true;
        self
    }

    pub fn with_append_delim(mut self, delim: impl Into<String>) -> Self {
        self.append_delim = Some(delim.into());
        self
    }

    pub fn with_logical_naming(mut self, strategy: Rc<dyn NamingStrategy>) -> Self {
        self.logical_naming = Some(strategy);
        self
    }

    pub fn with_physical_naming(mut self, strategy: Rc<dyn NamingStrategy>) -> Self {
        self.physical_naming = Some(strategy);
        self
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }
}

/// Notification passed to a persistence reporter after every persist call.
#[derive(Debug)]
pub enum PersistenceEvent<'a> {
    /// A persist call completed (possibly simulated under dry-run).
    Persisted(&'a PersistenceResult),
    /// A plain notice, e.g. a dry-run path-creation message.
    Notice(&'a str),
}

pub type PersistenceReporter = Box<dyn Fn(&Context, PersistenceEvent<'_>)>;

pub type PersistenceErrorCallback =
    Box<dyn Fn(&Context, &TextValue, &dyn TextArtifact, &PersistenceError)>;

/// Reporter printing one line per persisted artifact.
pub fn console_reporter() -> PersistenceReporter {
    Box::new(|_, event| match event {
        PersistenceEvent::Persisted(result) => {
            println!("{} ({})", result.physical_rel, result.disposition());
        }
        PersistenceEvent::Notice(notice) => println!("{notice}"),
    })
}

/// Stateful persistence orchestrator.
///
/// Backends share one decision procedure; only the side effects differ:
/// filesystem writes, in-memory accumulation, or console echo. One handler
/// instance owns one result log; callers sharing a logical output stream
/// share the handler.
pub trait PersistenceHandler {
    /// Ordered log of every result this handler recorded.
    fn results(&self) -> &[PersistenceResult];

    /// Current record for a logical name, if any.
    fn result(&self, logical_name: &str) -> Option<&PersistenceResult>;

    /// Factory for a fresh, empty mutable text artifact.
    fn create_mutable_text_artifact(
        &self,
        ctx: &Context,
        options: TextArtifactOptions,
    ) -> TextBuffer;

    /// Resolve naming, decide create/append/overwrite, perform or simulate
    /// the write, and record the provenance result.
    ///
    /// Classified failures are routed through
    /// [`PersistenceHandler::handle_error`] and yield `Ok(None)`;
    /// unclassified I/O failures propagate.
    fn persist_text_artifact(
        &mut self,
        ctx: &Context,
        name: &TextValue,
        artifact: Rc<dyn TextArtifact>,
        options: Option<&PersistOptions>,
    ) -> Result<Option<PersistenceResult>>;

    /// Route a classified failure to the configured callback, else stderr.
    fn handle_error(
        &self,
        ctx: &Context,
        name: &TextValue,
        artifact: &dyn TextArtifact,
        error: &PersistenceError,
    );
}
