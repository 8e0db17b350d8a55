//! Provenance records and the slot-based result log.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use vellum_core::{TextArtifact, TextValue};

/// Provenance record for one logical output: final names, accumulated text,
/// every contributing artifact, and the chain of records it replaced.
#[derive(Clone)]
pub struct PersistenceResult {
    /// The suggested name as the caller supplied it.
    pub original_name: TextValue,
    /// De-duplication key for merge/overwrite decisions.
    pub logical_name: String,
    /// Backend-specific identifier derived from the logical name.
    pub physical_name: String,
    pub physical_abs: String,
    pub physical_rel: String,
    /// Accumulated text across every contribution.
    pub text: String,
    /// Every artifact that contributed, in persist order.
    pub artifacts: Vec<Rc<dyn TextArtifact>>,
    /// Prior records this one replaced, oldest first. Append-only: an
    /// overwrite extends the chain with the replaced record, never discards.
    pub overwrote: Vec<PersistenceResult>,
}

impl PersistenceResult {
    /// True when more than one artifact contributed (append merge).
    pub fn was_appended(&self) -> bool {
        self.artifacts.len() > 1
    }

    pub fn overwrote_existing(&self) -> bool {
        !self.overwrote.is_empty()
    }

    /// One-word disposition used by reporters.
    pub fn disposition(&self) -> &'static str {
        if self.was_appended() {
            "append"
        } else if self.overwrote_existing() {
            "overwrote"
        } else {
            "new"
        }
    }
}

impl fmt::Debug for PersistenceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistenceResult")
            .field("logical_name", &self.logical_name)
            .field("physical_name", &self.physical_name)
            .field("physical_rel", &self.physical_rel)
            .field("text", &self.text)
            .field("artifacts", &self.artifacts.len())
            .field("overwrote", &self.overwrote)
            .finish()
    }
}

/// Ordered result log plus the logical-name index, shared by every backend.
///
/// A logical name owns exactly one slot. Appends and overwrites mutate that
/// slot in place, so a holder of "the N-th result" keeps observing the
/// current record for that logical output.
#[derive(Debug, Default)]
pub struct ResultLog {
    results: Vec<PersistenceResult>,
    index: IndexMap<String, usize>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[PersistenceResult] {
        &self.results
    }

    /// Current record for a logical name.
    pub fn current(&self, logical_name: &str) -> Option<&PersistenceResult> {
        self.index
            .get(logical_name)
            .map(|slot| &self.results[*slot])
    }

    /// Count of results recorded so far; feeds naming-strategy params.
    pub fn file_index(&self) -> usize {
        self.results.len()
    }

    /// Record a fresh result. A new logical name appends a slot; an existing
    /// one has its slot replaced in place, with the prior record and its own
    /// chain folded into the new record's `overwrote` list.
    pub fn record(&mut self, mut result: PersistenceResult) -> &PersistenceResult {
        match self.index.get(&result.logical_name).copied() {
            Some(slot) => {
                let prior = self.results[slot].clone();
                result.overwrote = prior.overwrote.clone();
                result.overwrote.push(prior);
                self.results[slot] = result;
                &self.results[slot]
            }
            None => {
                let slot = self.results.len();
                self.index.insert(result.logical_name.clone(), slot);
                self.results.push(result);
                &self.results[slot]
            }
        }
    }

    /// Extend an existing slot with an appended fragment and its artifact.
    pub fn append(
        &mut self,
        logical_name: &str,
        fragment: &str,
        delim: Option<&str>,
        artifact: Rc<dyn TextArtifact>,
    ) -> Option<&PersistenceResult> {
        let slot = self.index.get(logical_name).copied()?;
        let result = &mut self.results[slot];
        if let Some(delim) = delim {
            result.text.push_str(delim);
        }
        result.text.push_str(fragment);
        result.artifacts.push(artifact);
        Some(&self.results[slot])
    }
}
