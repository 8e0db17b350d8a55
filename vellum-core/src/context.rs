//! Ambient context threaded through rendering and naming.

use indexmap::IndexMap;

/// Key/value context resolved against by deferred text values, renderers,
/// and naming strategies at the point of use.
///
/// Replaces ambient global configuration: anything a deferred producer needs
/// travels here, explicitly.
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: IndexMap<String, String>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Insert or replace a property.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a property.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let ctx = Context::new().with("project", "vellum");
        assert_eq!(ctx.get("project"), Some("vellum"));
        assert_eq!(ctx.get("missing"), None);
    }

    #[test]
    fn test_set_replaces() {
        let mut ctx = Context::new().with("env", "dev");
        ctx.set("env", "prod");
        assert_eq!(ctx.get("env"), Some("prod"));
    }
}
