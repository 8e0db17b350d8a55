//! Artifact capability traits and the default mutable text buffer.

use std::cell::RefCell;

use crate::context::Context;
use crate::nature::ArtifactNature;
use crate::text::{Content, TextValue};

/// Any entity capable of producing persisted output.
///
/// `as_text` is the single boundary where an object is checked for text
/// capability; callers never probe structure beyond this.
pub trait Artifact {
    fn as_text(&self) -> Option<&dyn TextArtifact> {
        None
    }
}

/// An artifact that renders to text.
pub trait TextArtifact: Artifact {
    fn nature(&self) -> &ArtifactNature;

    /// Full content, preamble-prefixed when one is configured on the
    /// artifact or inherited from its nature.
    fn text(&self, ctx: &Context) -> String;

    /// Content without the preamble; the form appended when merging into
    /// already-persisted output.
    fn text_fragment(&self, ctx: &Context) -> String;
}

/// A text artifact accepting incremental content.
pub trait MutableTextArtifact: TextArtifact {
    fn append(&self, ctx: &Context, content: Content);
}

/// Options for constructing mutable text artifacts.
#[derive(Debug, Clone)]
pub struct TextArtifactOptions {
    pub nature: ArtifactNature,
    pub preamble: Option<TextValue>,
}

impl TextArtifactOptions {
    pub fn new(nature: ArtifactNature) -> Self {
        Self {
            nature,
            preamble: None,
        }
    }

    /// Override the nature's default preamble for this artifact.
    pub fn with_preamble(mut self, preamble: impl Into<TextValue>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }
}

/// Default mutable text artifact backed by an in-memory buffer.
#[derive(Debug)]
pub struct TextBuffer {
    options: TextArtifactOptions,
    buffer: RefCell<String>,
}

impl TextBuffer {
    pub fn new(options: TextArtifactOptions) -> Self {
        Self {
            options,
            buffer: RefCell::new(String::new()),
        }
    }

    pub fn options(&self) -> &TextArtifactOptions {
        &self.options
    }

    // preamble precedence: artifact option, else nature default
    fn preamble(&self, ctx: &Context) -> Option<String> {
        self.options
            .preamble
            .as_ref()
            .or_else(|| self.options.nature.default_preamble())
            .map(|preamble| preamble.resolve(ctx))
    }
}

impl Artifact for TextBuffer {
    fn as_text(&self) -> Option<&dyn TextArtifact> {
        Some(self)
    }
}

impl TextArtifact for TextBuffer {
    fn nature(&self) -> &ArtifactNature {
        &self.options.nature
    }

    fn text(&self, ctx: &Context) -> String {
        match self.preamble(ctx) {
            Some(preamble) => preamble + &self.buffer.borrow(),
            None => self.buffer.borrow().clone(),
        }
    }

    fn text_fragment(&self, _ctx: &Context) -> String {
        self.buffer.borrow().clone()
    }
}

impl MutableTextArtifact for TextBuffer {
    fn append(&self, ctx: &Context, content: Content) {
        let mut buffer = self.buffer.borrow_mut();
        match content {
            Content::Literal(text) => buffer.push_str(&text),
            Content::Rendered(render) => render(ctx, &mut *buffer),
        }
    }
}
