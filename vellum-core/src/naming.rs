//! Naming strategies resolving suggested artifact names to final names.

use std::path::Path;
use std::rc::Rc;

use crate::artifact::Artifact;
use crate::context::Context;
use crate::text::TextValue;

/// Inputs available to a naming strategy.
pub struct NamingParams<'a> {
    pub artifact: &'a dyn Artifact,
    pub suggested_name: &'a TextValue,
    /// Count of results already recorded by the calling handler.
    pub file_index: usize,
}

/// Resolves a suggested artifact name to a final name.
///
/// Strategies are total and side-effect free. A persist call applies the
/// logical and the physical strategy with identical params, so repeated
/// application over the same inputs must yield the same output.
///
/// Composition is by wrapping: a strategy takes another strategy as a
/// constructor argument and transforms its result.
pub trait NamingStrategy {
    fn name(&self, ctx: &Context, params: &NamingParams<'_>) -> String;
}

fn has_extension(name: &str) -> bool {
    Path::new(name).extension().is_some()
}

/// Resolves the suggested name and returns it unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsIs;

impl NamingStrategy for AsIs {
    fn name(&self, ctx: &Context, params: &NamingParams<'_>) -> String {
        params.suggested_name.resolve(ctx)
    }
}

/// Appends a configured extension when the resolved name has none.
pub struct DefaultExtension {
    extension: TextValue,
}

impl DefaultExtension {
    pub fn new(extension: impl Into<TextValue>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

impl NamingStrategy for DefaultExtension {
    fn name(&self, ctx: &Context, params: &NamingParams<'_>) -> String {
        let resolved = params.suggested_name.resolve(ctx);
        if has_extension(&resolved) {
            resolved
        } else {
            resolved + &self.extension.resolve(ctx)
        }
    }
}

/// Appends the artifact nature's default extension when the resolved name
/// has none; degrades to a fallback strategy for artifacts without text
/// capability.
#[derive(Default)]
pub struct NatureExtension {
    fallback: Option<Rc<dyn NamingStrategy>>,
}

impl NatureExtension {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strategy applied when the artifact is not a text artifact
    /// (default: [`AsIs`]).
    pub fn with_fallback(fallback: Rc<dyn NamingStrategy>) -> Self {
        Self {
            fallback: Some(fallback),
        }
    }
}

impl NamingStrategy for NatureExtension {
    fn name(&self, ctx: &Context, params: &NamingParams<'_>) -> String {
        let Some(text) = params.artifact.as_text() else {
            return match &self.fallback {
                Some(fallback) => fallback.name(ctx, params),
                None => AsIs.name(ctx, params),
            };
        };
        let resolved = params.suggested_name.resolve(ctx);
        if has_extension(&resolved) {
            resolved
        } else {
            resolved + text.nature().default_extension()
        }
    }
}

/// Supplies the sequence number for [`SequencePrefix`].
pub type SequenceSupplier = Box<dyn Fn(&Context, &NamingParams<'_>) -> usize>;

/// Formats a sequence number into its prefix text.
pub type SequenceFormatter = Box<dyn Fn(usize) -> String>;

/// Wraps another strategy and prepends a formatted sequence number followed
/// by an underscore.
///
/// Defaults: the running file index as the sequence source, zero-padded to
/// three digits.
pub struct SequencePrefix {
    inner: Rc<dyn NamingStrategy>,
    supplier: SequenceSupplier,
    formatter: SequenceFormatter,
}

impl SequencePrefix {
    pub fn new(inner: Rc<dyn NamingStrategy>) -> Self {
        Self {
            inner,
            supplier: Box::new(|_, params| params.file_index),
            formatter: Box::new(|sequence| format!("{sequence:03}")),
        }
    }

    /// Offset the running file index by `start`.
    pub fn starting_at(mut self, start: usize) -> Self {
        self.supplier = Box::new(move |_, params| start + params.file_index);
        self
    }

    pub fn with_supplier(
        mut self,
        supplier: impl Fn(&Context, &NamingParams<'_>) -> usize + 'static,
    ) -> Self {
        self.supplier = Box::new(supplier);
        self
    }

    pub fn with_formatter(mut self, formatter: impl Fn(usize) -> String + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }
}

impl NamingStrategy for SequencePrefix {
    fn name(&self, ctx: &Context, params: &NamingParams<'_>) -> String {
        let inner = self.inner.name(ctx, params);
        let sequence = (self.supplier)(ctx, params);
        format!("{}_{}", (self.formatter)(sequence), inner)
    }
}

/// True when `name` is only an extension: it starts with `.` and is not a
/// relative-path marker such as `./` or `.\`.
pub fn name_is_just_an_extension(name: &str) -> bool {
    name.starts_with('.') && !(name.starts_with("./") || name.starts_with(".\\"))
}

/// When `dest` is only an extension, the final name is `basename(source)`
/// with `dest` appended; otherwise the suggested name resolves as-is.
pub fn append_source_extension(
    source: impl Into<String>,
    dest: impl Into<String>,
) -> Rc<dyn NamingStrategy> {
    struct AppendSourceExtension {
        name: String,
    }

    impl NamingStrategy for AppendSourceExtension {
        fn name(&self, _ctx: &Context, _params: &NamingParams<'_>) -> String {
            self.name.clone()
        }
    }

    let source = source.into();
    let dest = dest.into();
    if name_is_just_an_extension(&dest) {
        let basename = Path::new(&source)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.clone());
        Rc::new(AppendSourceExtension {
            name: basename + &dest,
        })
    } else {
        Rc::new(AsIs)
    }
}
