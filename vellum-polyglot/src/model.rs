//! The declaration graph: modules, interfaces, properties, content.
//!
//! The graph is build-time only: it is walked once during emission and then
//! discarded, or fed unchanged into a different renderer or handler.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use vellum_core::Label;

/// Shared handle to an interface, so properties and content in any module
/// can reference an interface declared elsewhere.
pub type InterfaceRef = Rc<RefCell<InterfaceDecl>>;

/// A named interface with an ordered property sequence.
///
/// Properties render in declaration order, never sorted.
#[derive(Debug)]
pub struct InterfaceDecl {
    name: Label,
    properties: Vec<PropertyDecl>,
}

impl InterfaceDecl {
    pub fn new(name: Label) -> Self {
        Self {
            name,
            properties: Vec::new(),
        }
    }

    /// Wrap for sharing across modules and property references.
    pub fn into_ref(self) -> InterfaceRef {
        Rc::new(RefCell::new(self))
    }

    /// Append a property, chainable.
    pub fn declare_property(&mut self, property: PropertyDecl) -> &mut Self {
        self.properties.push(property);
        self
    }

    pub fn name(&self) -> &Label {
        &self.name
    }

    pub fn properties(&self) -> &[PropertyDecl] {
        &self.properties
    }
}

/// A property declaration: a name plus its value kind.
#[derive(Debug, Clone)]
pub struct PropertyDecl {
    pub name: Label,
    pub kind: PropertyKind,
}

impl PropertyDecl {
    pub fn new(name: Label, kind: PropertyKind) -> Self {
        Self { name, kind }
    }
}

/// The value kind of a property: a primitive tag, a reference to another
/// interface (nested or recursive composition), or a collection thereof.
#[derive(Clone)]
pub enum PropertyKind {
    Text,
    Number,
    Boolean,
    DateTime,
    Object(InterfaceRef),
    Collection(Box<PropertyKind>),
    /// A shape no renderer is expected to map; renders as a reported,
    /// skipped declaration.
    Unsupported,
}

impl fmt::Debug for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("Text"),
            Self::Number => f.write_str("Number"),
            Self::Boolean => f.write_str("Boolean"),
            Self::DateTime => f.write_str("DateTime"),
            Self::Object(interface) => match interface.try_borrow() {
                Ok(interface) => write!(f, "Object({})", interface.name().original()),
                Err(_) => f.write_str("Object(<borrowed>)"),
            },
            Self::Collection(element) => write!(f, "Collection({element:?})"),
            Self::Unsupported => f.write_str("Unsupported"),
        }
    }
}

/// Content payload: one structured record or an ordered sequence of them.
///
/// Records are expected to structurally match the bound interface's
/// properties; this is not enforced, rendering is best-effort.
#[derive(Debug, Clone)]
pub enum ContentPayload {
    Record(serde_json::Value),
    Records(Vec<serde_json::Value>),
}

impl ContentPayload {
    /// Capture a serializable value as a single structured record.
    pub fn record<T: Serialize>(value: &T) -> serde_json::Result<Self> {
        Ok(Self::Record(serde_json::to_value(value)?))
    }

    /// Capture an ordered sequence of serializable records.
    pub fn records<T: Serialize>(values: impl IntoIterator<Item = T>) -> serde_json::Result<Self> {
        let records = values
            .into_iter()
            .map(|value| serde_json::to_value(&value))
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(Self::Records(records))
    }
}

/// A content declaration: a named value bound (optionally) to an interface.
#[derive(Debug)]
pub struct ContentDecl {
    pub name: Label,
    pub interface: Option<InterfaceRef>,
    pub payload: ContentPayload,
    /// Declare with `let` instead of `const`.
    pub mutable: bool,
}

impl ContentDecl {
    pub fn new(name: Label, payload: ContentPayload) -> Self {
        Self {
            name,
            interface: None,
            payload,
            mutable: false,
        }
    }

    /// Bind the payload to an interface for typed declaration rendering.
    pub fn bound_to(mut self, interface: InterfaceRef) -> Self {
        self.interface = Some(interface);
        self
    }

    pub fn mutable(mut self) -> Self {
        self.mutable = true;
        self
    }
}

/// Module-level flags controlling declaration wrapping.
#[derive(Debug, Clone, Copy)]
pub struct ExportFlags {
    pub exported: bool,
    pub default_export: bool,
}

impl Default for ExportFlags {
    fn default() -> Self {
        Self {
            exported: true,
            default_export: false,
        }
    }
}

/// A named module collecting interface and content declarations.
///
/// Mutable only before emission; declaration order is emission order.
#[derive(Debug)]
pub struct ModuleDecl {
    pub name: Label,
    pub exports: ExportFlags,
    interfaces: Vec<InterfaceRef>,
    contents: Vec<ContentDecl>,
}

impl ModuleDecl {
    pub fn new(name: Label) -> Self {
        Self {
            name,
            exports: ExportFlags::default(),
            interfaces: Vec::new(),
            contents: Vec::new(),
        }
    }

    /// Drop the `export` wrapping for this module's declarations.
    pub fn private(mut self) -> Self {
        self.exports.exported = false;
        self
    }

    /// Re-export each content binding as the module's default export.
    pub fn with_default_export(mut self) -> Self {
        self.exports.default_export = true;
        self
    }

    /// Register an interface and hand the shared reference back for
    /// chaining and property references.
    pub fn declare_interface(&mut self, interface: InterfaceRef) -> InterfaceRef {
        self.interfaces.push(interface.clone());
        interface
    }

    /// Register a content declaration, returning it for inline reference.
    pub fn declare_content(&mut self, content: ContentDecl) -> &ContentDecl {
        let index = self.contents.len();
        self.contents.push(content);
        &self.contents[index]
    }

    pub fn interfaces(&self) -> &[InterfaceRef] {
        &self.interfaces
    }

    pub fn contents(&self) -> &[ContentDecl] {
        &self.contents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_order_preserved() {
        let mut interface = InterfaceDecl::new(Label::guess("Person"));
        interface
            .declare_property(PropertyDecl::new(Label::guess("Zeta"), PropertyKind::Text))
            .declare_property(PropertyDecl::new(Label::guess("Alpha"), PropertyKind::Number));

        let names: Vec<String> = interface
            .properties()
            .iter()
            .map(|property| property.name.camel())
            .collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[test]
    fn test_interface_shared_across_modules() {
        let person = InterfaceDecl::new(Label::guess("Person")).into_ref();
        let mut a = ModuleDecl::new(Label::guess("a"));
        let mut b = ModuleDecl::new(Label::guess("b"));
        a.declare_interface(person.clone());
        b.declare_interface(person.clone());

        person
            .borrow_mut()
            .declare_property(PropertyDecl::new(Label::guess("Name"), PropertyKind::Text));

        assert_eq!(a.interfaces()[0].borrow().properties().len(), 1);
        assert_eq!(b.interfaces()[0].borrow().properties().len(), 1);
    }

    #[test]
    fn test_payload_from_serializable_rows() {
        #[derive(Serialize)]
        struct Row {
            #[serde(rename = "First Name")]
            first_name: &'static str,
            age: u32,
        }

        let payload = ContentPayload::record(&Row {
            first_name: "Grace",
            age: 36,
        })
        .expect("serializable");
        match payload {
            ContentPayload::Record(value) => {
                assert_eq!(value["First Name"], "Grace");
                assert_eq!(value["age"], 36);
            }
            ContentPayload::Records(_) => unreachable!(),
        }

        let rows = ContentPayload::records([
            Row {
                first_name: "Grace",
                age: 36,
            },
            Row {
                first_name: "Alan",
                age: 41,
            },
        ])
        .expect("serializable");
        match rows {
            ContentPayload::Records(values) => assert_eq!(values.len(), 2),
            ContentPayload::Record(_) => unreachable!(),
        }
    }

    #[test]
    fn test_recursive_property_reference() {
        let node = InterfaceDecl::new(Label::guess("Tree Node")).into_ref();
        node.borrow_mut().declare_property(PropertyDecl::new(
            Label::guess("Child"),
            PropertyKind::Object(node.clone()),
        ));
        let binding = node.borrow();
        let kind = &binding.properties()[0].kind;
        assert_eq!(format!("{kind:?}"), "Object(Tree Node)");
    }
}
