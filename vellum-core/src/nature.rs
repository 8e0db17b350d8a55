//! Artifact-kind descriptors.

use crate::text::TextValue;

/// Describes the kind of a text artifact: its name, the file extensions it
/// claims, and an optional preamble shared by all artifacts of that kind.
#[derive(Debug, Clone)]
pub struct ArtifactNature {
    name: String,
    default_extension: String,
    alternate_extensions: Vec<String>,
    default_preamble: Option<TextValue>,
}

impl ArtifactNature {
    /// Create a nature with a name and default file extension.
    pub fn new(name: impl Into<String>, default_extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_extension: default_extension.into(),
            alternate_extensions: Vec::new(),
            default_preamble: None,
        }
    }

    /// Register an alternate file extension.
    pub fn with_alternate(mut self, extension: impl Into<String>) -> Self {
        self.alternate_extensions.push(extension.into());
        self
    }

    /// Set the preamble artifacts of this kind carry by default.
    pub fn with_preamble(mut self, preamble: impl Into<TextValue>) -> Self {
        self.default_preamble = Some(preamble.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_extension(&self) -> &str {
        &self.default_extension
    }

    pub fn alternate_extensions(&self) -> &[String] {
        &self.alternate_extensions
    }

    pub fn default_preamble(&self) -> Option<&TextValue> {
        self.default_preamble.as_ref()
    }
}
