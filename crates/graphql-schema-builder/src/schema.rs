//! The schema object graph produced by a build.

pub const QUERY: &str = "Query";
pub const MUTATION: &str = "Mutation";

pub const ID: &str = "ID";
pub const STRING: &str = "String";
pub const INT: &str = "Int";
pub const FLOAT: &str = "Float";
pub const BOOLEAN: &str = "Boolean";
pub const ANY: &str = "Any";
pub const MAP: &str = "Map";
pub const TIME: &str = "Time";

/// Appended to object names (and custom field types) of the input side of a type.
pub const INPUT_SUFFIX: &str = "Input";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Type,
    Interface,
    Input,
    Scalar,
    Enum,
}

impl ObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Type => "type",
            ObjectKind::Interface => "interface",
            ObjectKind::Input => "input",
            ObjectKind::Scalar => "scalar",
            ObjectKind::Enum => "enum",
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SchemaObject {
    pub name: String,
    /// Qualified host type the object binds back to.
    pub model: Option<String>,
    pub kind: ObjectKind,
    pub fields: Vec<SchemaField>,
    pub methods: Vec<SchemaMethod>,
    pub enum_values: Vec<String>,
}

impl SchemaObject {
    pub(crate) fn new(name: impl Into<String>, model: Option<String>, kind: ObjectKind) -> Self {
        SchemaObject {
            name: name.into(),
            model,
            kind,
            fields: Vec::new(),
            methods: Vec::new(),
            enum_values: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&SchemaMethod> {
        self.methods.iter().find(|method| method.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct SchemaField {
    pub name: String,
    pub r#type: String,
    pub nullable: bool,
    pub is_array: bool,
    pub element_nullable: bool,
    /// Number of list wrappers, only non zero for arrays.
    pub nest_depth: usize,
    /// The type refers to an object of the schema rather than a built-in scalar.
    pub is_custom_type: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SchemaMethod {
    pub name: String,
    pub parameters: Vec<SchemaField>,
    pub return_value: SchemaField,
}
