//! TypeScript renderer for the declaration graph.
//!
//! Mapping: interfaces render as `export interface` blocks (PascalCase
//! names, camelCase properties, 2-space indent); content renders as `const`
//! or `let` bindings whose literals are derived from the JSON payload, with
//! `DateTime`-typed string values revived as `new Date("...")` according to
//! the bound interface.

use serde_json::Value;
use vellum_core::{ArtifactNature, Label};

use crate::code_text::CodeText;
use crate::model::{
    ContentDecl, ContentPayload, ExportFlags, InterfaceDecl, InterfaceRef, PropertyDecl,
    PropertyKind,
};
use crate::render::{EmitErrorHandler, PolyglotRenderer};

/// Nature of emitted TypeScript artifacts.
pub fn typescript() -> ArtifactNature {
    ArtifactNature::new("TypeScript", ".ts").with_alternate(".tsx")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptRenderer;

impl TypeScriptRenderer {
    pub fn new() -> Self {
        Self
    }

    fn type_name(&self, kind: &PropertyKind) -> Option<String> {
        match kind {
            PropertyKind::Text => Some("string".to_string()),
            PropertyKind::Number => Some("number".to_string()),
            PropertyKind::Boolean => Some("boolean".to_string()),
            PropertyKind::DateTime => Some("Date".to_string()),
            // defer to the referenced interface's own name
            PropertyKind::Object(interface) => Some(interface.borrow().name().pascal()),
            PropertyKind::Collection(element) => Some(format!("{}[]", self.type_name(element)?)),
            PropertyKind::Unsupported => None,
        }
    }

    fn value_expr(&self, value: &Value, kind: Option<&PropertyKind>) -> String {
        match (value, kind) {
            (Value::String(_), Some(PropertyKind::DateTime)) => format!("new Date({value})"),
            (Value::Array(items), _) => {
                let element_kind = match kind {
                    Some(PropertyKind::Collection(element)) => Some(element.as_ref()),
                    _ => None,
                };
                let rendered: Vec<String> = items
                    .iter()
                    .map(|item| self.value_expr(item, element_kind))
                    .collect();
                format!("[{}]", rendered.join(", "))
            }
            (Value::Object(map), _) => {
                let interface = match kind {
                    Some(PropertyKind::Object(interface)) => Some(interface),
                    _ => None,
                };
                let entries: Vec<String> = map
                    .iter()
                    .map(|(key, value)| {
                        let label = Label::guess(key.as_str());
                        let nested = interface.and_then(|interface| property_kind(interface, &label));
                        format!(
                            "{}: {}",
                            object_key(&label),
                            self.value_expr(value, nested.as_ref())
                        )
                    })
                    .collect();
                if entries.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{ {} }}", entries.join(", "))
                }
            }
            _ => value.to_string(),
        }
    }

    fn emit_record(
        &self,
        code: &mut CodeText,
        map: &serde_json::Map<String, Value>,
        interface: Option<&InterfaceRef>,
    ) {
        for (key, value) in map {
            let label = Label::guess(key.as_str());
            let kind = interface.and_then(|interface| property_kind(interface, &label));
            code.line(&format!(
                "{}: {},",
                object_key(&label),
                self.value_expr(value, kind.as_ref())
            ));
        }
    }
}

impl PolyglotRenderer for TypeScriptRenderer {
    fn nature(&self) -> ArtifactNature {
        typescript()
    }

    fn file_name(&self, module: &Label) -> String {
        module.kebab()
    }

    fn render_interface(
        &self,
        interface: &InterfaceDecl,
        exported: bool,
        errors: &dyn EmitErrorHandler,
    ) -> Option<String> {
        let export = if exported { "export " } else { "" };
        let name = interface.name().pascal();
        let mut code = CodeText::new();
        if interface.properties().is_empty() {
            code.line(&format!("{export}interface {name} {{}}"));
            return Some(code.into_text());
        }
        code.open(&format!("{export}interface {name} {{"));
        for property in interface.properties() {
            match self.render_property(property) {
                Some(declaration) => {
                    code.line(&declaration);
                }
                None => errors.report(&format!(
                    "no TypeScript type for property {} in interface {}",
                    property.name.original(),
                    interface.name().original()
                )),
            }
        }
        code.close("}");
        Some(code.into_text())
    }

    fn render_property(&self, property: &PropertyDecl) -> Option<String> {
        let type_name = self.type_name(&property.kind)?;
        Some(format!("{}: {};", property.name.camel(), type_name))
    }

    fn render_content(
        &self,
        content: &ContentDecl,
        exports: ExportFlags,
        _errors: &dyn EmitErrorHandler,
    ) -> Option<String> {
        let binding = content.name.camel();
        let type_name = content
            .interface
            .as_ref()
            .map(|interface| interface.borrow().name().pascal());
        let annotation = match (&content.payload, &type_name) {
            (ContentPayload::Record(_), Some(name)) => format!(": {name}"),
            (ContentPayload::Records(_), Some(name)) => format!(": {name}[]"),
            _ => String::new(),
        };
        let keyword = if content.mutable { "let" } else { "const" };
        let export = if exports.exported && !exports.default_export {
            "export "
        } else {
            ""
        };
        let header = format!("{export}{keyword} {binding}{annotation} = ");

        let mut code = CodeText::new();
        match &content.payload {
            ContentPayload::Record(value) => {
                let Value::Object(map) = value else {
                    return None;
                };
                code.open(&format!("{header}{{"));
                self.emit_record(&mut code, map, content.interface.as_ref());
                code.close("};");
            }
            ContentPayload::Records(values) => {
                if values.iter().any(|value| !value.is_object()) {
                    return None;
                }
                let record_kind = content.interface.clone().map(PropertyKind::Object);
                code.open(&format!("{header}["));
                for value in values {
                    code.line(&format!(
                        "{},",
                        self.value_expr(value, record_kind.as_ref())
                    ));
                }
                code.close("];");
            }
        }
        if exports.default_export {
            code.line(&format!("export default {binding};"));
        }
        Some(code.into_text())
    }
}

fn property_kind(interface: &InterfaceRef, label: &Label) -> Option<PropertyKind> {
    interface
        .borrow()
        .properties()
        .iter()
        .find(|property| property.name.camel() == label.camel())
        .map(|property| property.kind.clone())
}

fn object_key(label: &Label) -> String {
    let camel = label.camel();
    if is_identifier(&camel) {
        camel
    } else {
        Value::String(camel).to_string()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct CollectingErrors(RefCell<Vec<String>>);

    impl EmitErrorHandler for CollectingErrors {
        fn report(&self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    fn person() -> InterfaceRef {
        let mut interface = InterfaceDecl::new(Label::guess("Person"));
        interface
            .declare_property(PropertyDecl::new(
                Label::guess("First Name"),
                PropertyKind::Text,
            ))
            .declare_property(PropertyDecl::new(Label::guess("Age"), PropertyKind::Number))
            .declare_property(PropertyDecl::new(
                Label::guess("Birth Date"),
                PropertyKind::DateTime,
            ));
        interface.into_ref()
    }

    #[test]
    fn test_interface_rendering() {
        let errors = CollectingErrors::default();
        let rendered = TypeScriptRenderer::new()
            .render_interface(&person().borrow(), true, &errors)
            .expect("renderable");
        assert_eq!(
            rendered,
            "export interface Person {\n  firstName: string;\n  age: number;\n  birthDate: Date;\n}\n"
        );
        assert!(errors.0.borrow().is_empty());
    }

    #[test]
    fn test_empty_interface() {
        let errors = CollectingErrors::default();
        let empty = InterfaceDecl::new(Label::guess("Empty"));
        let rendered = TypeScriptRenderer::new()
            .render_interface(&empty, false, &errors)
            .expect("renderable");
        assert_eq!(rendered, "interface Empty {}\n");
    }

    #[test]
    fn test_unsupported_property_reported_and_skipped() {
        let errors = CollectingErrors::default();
        let mut interface = InterfaceDecl::new(Label::guess("Partial"));
        interface
            .declare_property(PropertyDecl::new(Label::guess("Ok"), PropertyKind::Text))
            .declare_property(PropertyDecl::new(
                Label::guess("Bad"),
                PropertyKind::Unsupported,
            ));
        let rendered = TypeScriptRenderer::new()
            .render_interface(&interface, true, &errors)
            .expect("renderable");
        assert!(rendered.contains("ok: string;"));
        assert!(!rendered.contains("bad"));
        assert_eq!(errors.0.borrow().len(), 1);
        assert!(errors.0.borrow()[0].contains("Bad"));
    }

    #[test]
    fn test_interface_reference_property() {
        let address = InterfaceDecl::new(Label::guess("Postal Address")).into_ref();
        let property = PropertyDecl::new(
            Label::guess("Home"),
            PropertyKind::Object(address.clone()),
        );
        let rendered = TypeScriptRenderer::new()
            .render_property(&property)
            .expect("renderable");
        assert_eq!(rendered, "home: PostalAddress;");

        let list = PropertyDecl::new(
            Label::guess("Addresses"),
            PropertyKind::Collection(Box::new(PropertyKind::Object(address))),
        );
        assert_eq!(
            TypeScriptRenderer::new().render_property(&list).unwrap(),
            "addresses: PostalAddress[];"
        );
    }

    #[test]
    fn test_record_content_with_date_revival() {
        let errors = CollectingErrors::default();
        let content = ContentDecl::new(
            Label::guess("sample"),
            ContentPayload::Record(json!({
                "First Name": "Ada",
                "Age": 36,
                "Birth Date": "1815-12-10",
            })),
        )
        .bound_to(person());
        let rendered = TypeScriptRenderer::new()
            .render_content(&content, ExportFlags::default(), &errors)
            .expect("renderable");
        assert_eq!(
            rendered,
            "export const sample: Person = {\n  firstName: \"Ada\",\n  age: 36,\n  birthDate: new Date(\"1815-12-10\"),\n};\n"
        );
    }

    #[test]
    fn test_records_content_renders_array_literal() {
        let errors = CollectingErrors::default();
        let content = ContentDecl::new(
            Label::guess("people"),
            ContentPayload::Records(vec![
                json!({"First Name": "Ada", "Age": 36}),
                json!({"First Name": "Alan", "Age": 41}),
            ]),
        )
        .bound_to(person());
        let rendered = TypeScriptRenderer::new()
            .render_content(&content, ExportFlags::default(), &errors)
            .expect("renderable");
        assert_eq!(
            rendered,
            "export const people: Person[] = [\n  { firstName: \"Ada\", age: 36 },\n  { firstName: \"Alan\", age: 41 },\n];\n"
        );
    }

    #[test]
    fn test_non_object_record_is_unsupported() {
        let errors = CollectingErrors::default();
        let content = ContentDecl::new(
            Label::guess("broken"),
            ContentPayload::Record(json!("not a record")),
        );
        assert!(
            TypeScriptRenderer::new()
                .render_content(&content, ExportFlags::default(), &errors)
                .is_none()
        );
    }

    #[test]
    fn test_mutable_and_default_export_wrapping() {
        let errors = CollectingErrors::default();
        let content = ContentDecl::new(
            Label::guess("state"),
            ContentPayload::Record(json!({"count": 0})),
        )
        .mutable();
        let flags = ExportFlags {
            exported: true,
            default_export: true,
        };
        let rendered = TypeScriptRenderer::new()
            .render_content(&content, flags, &errors)
            .expect("renderable");
        assert_eq!(
            rendered,
            "let state = {\n  count: 0,\n};\nexport default state;\n"
        );
    }

    #[test]
    fn test_quoted_object_keys() {
        let label = Label::guess("2 Fast");
        assert_eq!(object_key(&label), "\"2Fast\"");
        assert_eq!(object_key(&Label::guess("First Name")), "firstName");
    }
}
