//! Document-kind natures and artifacts for Vellum.
//!
//! Provides the Markdown and JSON natures plus [`MarkdownArtifact`], a
//! mutable text artifact carrying YAML frontmatter that renders ahead of the
//! body in full text but never in fragments.

use std::cell::RefCell;

use serde_yaml::Mapping;
use vellum_core::{Artifact, ArtifactNature, Content, Context, MutableTextArtifact, TextArtifact};

/// The Markdown artifact kind.
pub fn markdown() -> ArtifactNature {
    ArtifactNature::new("Markdown", ".md").with_alternate(".markdown")
}

/// The JSON artifact kind.
pub fn json() -> ArtifactNature {
    ArtifactNature::new("JSON", ".json")
}

/// Insertion-ordered frontmatter map.
pub type Frontmatter = Mapping;

/// A Markdown document with optional YAML frontmatter.
///
/// The frontmatter behaves as the preamble: `text` renders it between
/// `---` fences ahead of the body, `text_fragment` omits it so appended
/// contributions never duplicate it.
#[derive(Debug)]
pub struct MarkdownArtifact {
    nature: ArtifactNature,
    frontmatter: Frontmatter,
    buffer: RefCell<String>,
}

impl MarkdownArtifact {
    pub fn new() -> Self {
        Self {
            nature: markdown(),
            frontmatter: Frontmatter::new(),
            buffer: RefCell::new(String::new()),
        }
    }

    /// Set a frontmatter entry, builder style.
    pub fn with_frontmatter(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_yaml::Value>,
    ) -> Self {
        self.set_frontmatter(key, value);
        self
    }

    /// Insert or replace a frontmatter entry.
    pub fn set_frontmatter(&mut self, key: impl Into<String>, value: impl Into<serde_yaml::Value>) {
        self.frontmatter
            .insert(serde_yaml::Value::String(key.into()), value.into());
    }

    pub fn frontmatter(&self) -> &Frontmatter {
        &self.frontmatter
    }
}

impl Default for MarkdownArtifact {
    fn default() -> Self {
        Self::new()
    }
}

impl Artifact for MarkdownArtifact {
    fn as_text(&self) -> Option<&dyn TextArtifact> {
        Some(self)
    }
}

impl TextArtifact for MarkdownArtifact {
    fn nature(&self) -> &ArtifactNature {
        &self.nature
    }

    fn text(&self, _ctx: &Context) -> String {
        let body = self.buffer.borrow();
        if self.frontmatter.is_empty() {
            return body.clone();
        }
        match serde_yaml::to_string(&self.frontmatter) {
            Ok(yaml) => format!("---\n{yaml}---\n{body}"),
            // an unserializable frontmatter degrades to the bare body
            Err(_) => body.clone(),
        }
    }

    fn text_fragment(&self, _ctx: &Context) -> String {
        self.buffer.borrow().clone()
    }
}

impl MutableTextArtifact for MarkdownArtifact {
    fn append(&self, ctx: &Context, content: Content) {
        let mut buffer = self.buffer.borrow_mut();
        match content {
            Content::Literal(text) => buffer.push_str(&text),
            Content::Rendered(render) => render(ctx, &mut *buffer),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use vellum_core::TextValue;
    use vellum_persist::{MemoryPersistence, PersistenceHandler};

    use super::*;

    #[test]
    fn test_natures() {
        assert_eq!(markdown().default_extension(), ".md");
        assert_eq!(json().default_extension(), ".json");
        assert!(json().default_preamble().is_none());
    }

    #[test]
    fn test_frontmatter_renders_between_fences() {
        let ctx = Context::new();
        let mut artifact = MarkdownArtifact::new();
        artifact.set_frontmatter("property1", "string");
        artifact.set_frontmatter("Property 2", 100);
        artifact.append(&ctx, "Markdown content".into());

        let text = artifact.text(&ctx);
        assert!(text.starts_with("---\n"));
        assert!(text.contains("property1: string"));
        assert!(text.contains("Property 2: 100"));
        assert!(text.ends_with("---\nMarkdown content"));
    }

    #[test]
    fn test_empty_frontmatter_renders_body_only() {
        let ctx = Context::new();
        let artifact = MarkdownArtifact::new();
        artifact.append(&ctx, "just text".into());
        assert_eq!(artifact.text(&ctx), "just text");
    }

    #[test]
    fn test_fragment_omits_frontmatter() {
        let ctx = Context::new();
        let artifact = MarkdownArtifact::new().with_frontmatter("title", "Notes");
        artifact.append(&ctx, "body".into());
        assert_eq!(artifact.text_fragment(&ctx), "body");
    }

    #[test]
    fn test_persists_through_a_handler() {
        let ctx = Context::new();
        let mut ph = MemoryPersistence::default();
        let artifact = MarkdownArtifact::new().with_frontmatter("title", "Notes");
        artifact.append(&ctx, "Markdown content\n".into());

        let result = ph
            .persist_text_artifact(&ctx, &TextValue::from("test.md"), Rc::new(artifact), None)
            .unwrap()
            .expect("recorded");

        assert_eq!(ph.results().len(), 1);
        assert!(result.text.starts_with("---\n"));
        assert!(result.text.contains("title: Notes"));
        assert!(result.text.ends_with("Markdown content\n"));
    }
}
