//! Lazy text values and the writer-function content mode.

use std::fmt;
use std::rc::Rc;

use crate::context::Context;

/// A text value that is either a literal or a producer resolved against a
/// [`Context`] at the point of use.
///
/// Every "name" and "preamble" parameter in Vellum accepts this shape.
/// Resolution is always an explicit, pure call; nothing resolves implicitly.
#[derive(Clone)]
pub enum TextValue {
    Literal(String),
    Deferred(Rc<dyn Fn(&Context) -> String>),
}

impl TextValue {
    /// Build a deferred value from a producer function.
    pub fn deferred(producer: impl Fn(&Context) -> String + 'static) -> Self {
        Self::Deferred(Rc::new(producer))
    }

    /// Resolve to a concrete string.
    pub fn resolve(&self, ctx: &Context) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::Deferred(producer) => producer(ctx),
        }
    }
}

impl From<&str> for TextValue {
    fn from(text: &str) -> Self {
        Self::Literal(text.to_string())
    }
}

impl From<String> for TextValue {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

impl fmt::Debug for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Abstract append-text capability handed to renderers.
pub trait TextSink {
    fn write_text(&mut self, text: &str);
}

impl TextSink for String {
    fn write_text(&mut self, text: &str) {
        self.push_str(text);
    }
}

/// A deferred content producer, invoked inline with the destination sink at
/// the point of appending.
pub type Renderer = Box<dyn Fn(&Context, &mut dyn TextSink)>;

/// Content accepted by mutable text artifacts: a literal or a deferred
/// renderer.
pub enum Content {
    Literal(String),
    Rendered(Renderer),
}

impl Content {
    /// Build deferred content from a renderer function.
    pub fn rendered(renderer: impl Fn(&Context, &mut dyn TextSink) + 'static) -> Self {
        Self::Rendered(Box::new(renderer))
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Literal(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Rendered(_) => f.write_str("Rendered(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_resolution() {
        let value = TextValue::from("report");
        assert_eq!(value.resolve(&Context::new()), "report");
    }

    #[test]
    fn test_deferred_resolution_reads_context() {
        let value = TextValue::deferred(|ctx| {
            format!("{}-summary", ctx.get("project").unwrap_or("unknown"))
        });
        let ctx = Context::new().with("project", "atlas");
        assert_eq!(value.resolve(&ctx), "atlas-summary");
        // resolution is pure; calling again yields the same output
        assert_eq!(value.resolve(&ctx), "atlas-summary");
    }

    #[test]
    fn test_renderer_writes_into_sink() {
        let content = Content::rendered(|_, sink| sink.write_text("generated"));
        let mut sink = String::new();
        match content {
            Content::Rendered(render) => render(&Context::new(), &mut sink),
            Content::Literal(_) => unreachable!(),
        }
        assert_eq!(sink, "generated");
    }
}
