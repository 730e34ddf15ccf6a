//! The host type system, as seen by the schema builder.
//!
//! A [`TypeSource`] hands out read-only [`Type`] records addressed by [`TypeId`]. The builder
//! never mutates a source and never holds on to it beyond a single build.

mod display;
mod package;

pub use display::{TypeDisplay, display_type};
pub use package::Package;

use std::fmt;

/// Oracle over a fully loaded package of the host program.
pub trait TypeSource {
    /// Import path of the package the schema roots are declared in.
    fn package_path(&self) -> &str;

    /// Find a named type declared at package level in [`package_path`](Self::package_path).
    fn lookup(&self, name: &str) -> Option<TypeId>;

    /// Named types declared in the package, in declaration order.
    fn declared_types(&self) -> Vec<TypeId>;

    fn ty(&self, id: TypeId) -> &Type;

    /// Package level constants, in declaration order.
    fn constants(&self) -> &[Constant];

    /// Does a value of this type carry the request-scoped cancellation context?
    fn is_context(&self, id: TypeId) -> bool;

    /// Does a value of this type represent a failure outcome?
    fn is_error(&self, id: TypeId) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TypeId(u32);

impl From<usize> for TypeId {
    fn from(index: usize) -> Self {
        TypeId(index as u32)
    }
}

impl From<TypeId> for usize {
    fn from(id: TypeId) -> Self {
        id.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    Named(NamedType),
    Struct(StructType),
    Interface(InterfaceType),
    Basic { basic: BasicKind },
    Pointer { elem: TypeId },
    Slice { elem: TypeId },
    Array { elem: TypeId, len: u64 },
    Map { key: TypeId, value: TypeId },
    Func(Signature),
    Chan { elem: TypeId },
}

impl Type {
    /// Every type id this record points at, named types included.
    pub(crate) fn references(&self) -> Vec<TypeId> {
        match self {
            Type::Named(named) => std::iter::once(named.underlying)
                .chain(named.methods.iter().flat_map(|method| method.signature.references()))
                .collect(),
            Type::Struct(strct) => strct.fields.iter().map(|field| field.r#type).collect(),
            Type::Interface(interface) => interface
                .methods
                .iter()
                .flat_map(|method| method.signature.references())
                .collect(),
            Type::Basic { .. } => Vec::new(),
            Type::Pointer { elem } | Type::Slice { elem } | Type::Array { elem, .. } | Type::Chan { elem } => {
                vec![*elem]
            }
            Type::Map { key, value } => vec![*key, *value],
            Type::Func(signature) => signature.references().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NamedType {
    pub name: String,
    /// Import path of the declaring package. `None` for universe types such as `error`.
    #[serde(default)]
    pub package: Option<String>,
    pub underlying: TypeId,
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl NamedType {
    /// `path/to/package.Name`, the reference used to bind schema objects back to host types.
    pub fn qualified_name(&self) -> String {
        match &self.package {
            Some(package) => format!("{package}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StructType {
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Field {
    pub name: String,
    pub r#type: TypeId,
    /// Raw struct tag text, e.g. `graphql-schema:"renamed" json:"x"`.
    #[serde(default)]
    pub tag: String,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InterfaceType {
    #[serde(default)]
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(flatten)]
    pub signature: Signature,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub params: Vec<Var>,
    #[serde(default)]
    pub results: Vec<Var>,
}

impl Signature {
    fn references(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.params.iter().chain(&self.results).map(|var| var.r#type)
    }
}

/// A parameter or a result of a signature.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Var {
    #[serde(default)]
    pub name: String,
    pub r#type: TypeId,
}

impl Var {
    pub fn new(name: impl Into<String>, r#type: TypeId) -> Self {
        Var {
            name: name.into(),
            r#type,
        }
    }

    pub fn unnamed(r#type: TypeId) -> Self {
        Var::new(String::new(), r#type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    UnsafePointer,
}

impl BasicKind {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            BasicKind::Int
                | BasicKind::Int8
                | BasicKind::Int16
                | BasicKind::Int32
                | BasicKind::Int64
                | BasicKind::Uint
                | BasicKind::Uint8
                | BasicKind::Uint16
                | BasicKind::Uint32
                | BasicKind::Uint64
                | BasicKind::Uintptr
        )
    }

    /// Spelling in the host language.
    pub fn as_str(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::String => "string",
            BasicKind::UnsafePointer => "unsafe.Pointer",
        }
    }
}

/// A package level constant declaration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Constant {
    pub name: String,
    pub r#type: TypeId,
    pub value: ConstValue,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ConstValue {
    Bool(bool),
    Int(i64),
    /// Unsigned values past `i64::MAX`.
    Uint(u64),
    Float(f64),
    String(String),
}

impl fmt::Display for ConstValue {
    /// The exact literal, strings quoted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Bool(value) => write!(f, "{value}"),
            ConstValue::Int(value) => write!(f, "{value}"),
            ConstValue::Uint(value) => write!(f, "{value}"),
            ConstValue::Float(value) => write!(f, "{value}"),
            ConstValue::String(value) => write!(f, "{value:?}"),
        }
    }
}

/// Exported identifiers start with an uppercase letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
