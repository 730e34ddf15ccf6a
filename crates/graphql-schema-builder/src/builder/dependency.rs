use super::{
    BuildContext,
    members::{ContextRule, schema_field, schema_method},
};
use crate::{
    BuildError, FieldDirective, ScalarMapping,
    enums::enum_of,
    schema::{ANY, INPUT_SUFFIX, MAP, MUTATION, ObjectKind, QUERY, SchemaObject},
    source::{InterfaceType, NamedType, StructType, TypeId, is_exported},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RootKind {
    Query,
    Mutation,
}

impl RootKind {
    fn object_name(self) -> &'static str {
        match self {
            RootKind::Query => QUERY,
            RootKind::Mutation => MUTATION,
        }
    }
}

/// A schema object that is referenced but not resolved yet.
#[derive(Debug, Clone)]
pub(crate) enum Dependency<'a> {
    Root {
        named: &'a NamedType,
        kind: RootKind,
    },
    Struct {
        named: &'a NamedType,
        strct: &'a StructType,
    },
    Interface {
        named: &'a NamedType,
        interface: &'a InterfaceType,
    },
    Scalar(ScalarRef<'a>),
    /// The input side of a type, reached through a method parameter.
    Input(Box<Dependency<'a>>),
}

#[derive(Debug, Clone)]
pub(crate) enum ScalarRef<'a> {
    /// A host type with a built-in scalar mapping.
    Mapped {
        named: &'a NamedType,
        mapping: &'a ScalarMapping,
    },
    /// A named basic type, either an enum or a custom scalar.
    Named { id: TypeId, named: &'a NamedType },
    Map,
    Any,
}

/// The object a dependency resolves to, and what that object depends on in turn.
pub(crate) struct Expansion<'a> {
    pub object: SchemaObject,
    pub dependencies: Vec<Dependency<'a>>,
}

impl<'a> Dependency<'a> {
    pub fn is_custom_type(&self) -> bool {
        match self {
            Dependency::Struct { .. } | Dependency::Interface { .. } => true,
            Dependency::Root { .. } | Dependency::Scalar(_) => false,
            Dependency::Input(inner) => inner.is_custom_type(),
        }
    }

    pub fn into_input(self) -> Self {
        match self {
            Dependency::Input(_) => self,
            other => Dependency::Input(Box::new(other)),
        }
    }

    /// Name of the object this dependency expands to, known without expanding it.
    pub fn object_name(&self) -> String {
        match self {
            Dependency::Root { kind, .. } => kind.object_name().to_owned(),
            Dependency::Struct { named, .. } | Dependency::Interface { named, .. } => named.name.clone(),
            Dependency::Scalar(scalar) => match scalar {
                ScalarRef::Mapped { mapping, .. } => mapping.scalar.clone(),
                ScalarRef::Named { named, .. } => named.name.clone(),
                ScalarRef::Map => MAP.to_owned(),
                ScalarRef::Any => ANY.to_owned(),
            },
            Dependency::Input(inner) => match inner.as_ref() {
                Dependency::Struct { named, .. } | Dependency::Interface { named, .. } => {
                    format!("{}{INPUT_SUFFIX}", named.name)
                }
                other => other.object_name(),
            },
        }
    }

    /// Human readable reference used in logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            Dependency::Root { named, kind } => {
                format!("{} root {}", kind.object_name().to_lowercase(), named.qualified_name())
            }
            Dependency::Struct { named, .. } => format!("struct {}", named.qualified_name()),
            Dependency::Interface { named, .. } => format!("interface {}", named.qualified_name()),
            Dependency::Scalar(ScalarRef::Mapped { named, .. } | ScalarRef::Named { named, .. }) => {
                format!("scalar {}", named.qualified_name())
            }
            Dependency::Scalar(ScalarRef::Map) => format!("scalar {MAP}"),
            Dependency::Scalar(ScalarRef::Any) => format!("scalar {ANY}"),
            Dependency::Input(inner) => format!("input {}", inner.describe()),
        }
    }

    pub fn expand(&self, ctx: &BuildContext<'a>) -> Result<Expansion<'a>, BuildError> {
        match self {
            Dependency::Root { named, kind } => expand_root(ctx, *named, *kind),
            Dependency::Struct { named, strct } => expand_struct(ctx, *named, *strct, true),
            Dependency::Interface { named, interface } => expand_interface(ctx, *named, *interface),
            Dependency::Scalar(scalar) => Ok(Expansion {
                object: expand_scalar(ctx, scalar),
                dependencies: Vec::new(),
            }),
            Dependency::Input(inner) => expand_input(ctx, inner),
        }
    }
}

fn expand_root<'a>(ctx: &BuildContext<'a>, named: &'a NamedType, kind: RootKind) -> Result<Expansion<'a>, BuildError> {
    let mut object = SchemaObject::new(kind.object_name(), Some(named.qualified_name()), ObjectKind::Type);
    let mut dependencies = Vec::new();

    for method in named.methods.iter().filter(|method| is_exported(&method.name)) {
        let (method, method_dependencies) =
            schema_method(ctx, method, ContextRule::Required).map_err(|err| err.in_method(&method.name))?;
        object.methods.push(method);
        dependencies.extend(method_dependencies);
    }

    if object.methods.is_empty() {
        return Err(BuildError::NoMethodsInRoot(named.qualified_name()));
    }

    Ok(Expansion { object, dependencies })
}

fn expand_struct<'a>(
    ctx: &BuildContext<'a>,
    named: &'a NamedType,
    strct: &'a StructType,
    with_methods: bool,
) -> Result<Expansion<'a>, BuildError> {
    let mut object = SchemaObject::new(named.name.clone(), Some(named.qualified_name()), ObjectKind::Type);
    let mut dependencies = Vec::new();

    for field in strct.fields.iter().filter(|field| is_exported(&field.name)) {
        let directive =
            FieldDirective::from_tag(&field.tag, &ctx.options.tag_key).map_err(|err| err.in_field(&field.name))?;

        let rename = match directive {
            FieldDirective::Skip => continue,
            FieldDirective::Keep => None,
            FieldDirective::Rename(name) => Some(name),
        };

        let (mut output, dependency) =
            schema_field(ctx, &field.name, field.r#type).map_err(|err| err.in_field(&field.name))?;
        if let Some(name) = rename {
            output.name = name;
        }

        tracing::trace!("{}.{}: {}", named.name, field.name, output.r#type);

        object.fields.push(output);
        dependencies.extend(dependency);
    }

    if with_methods {
        let rule = if ctx.options.require_context_on_object_methods {
            ContextRule::Required
        } else {
            ContextRule::Optional
        };

        for method in named.methods.iter().filter(|method| is_exported(&method.name)) {
            let (method, method_dependencies) =
                schema_method(ctx, method, rule).map_err(|err| err.in_method(&method.name))?;
            object.methods.push(method);
            dependencies.extend(method_dependencies);
        }
    }

    Ok(Expansion { object, dependencies })
}

fn expand_interface<'a>(
    ctx: &BuildContext<'a>,
    named: &'a NamedType,
    interface: &'a InterfaceType,
) -> Result<Expansion<'a>, BuildError> {
    let mut object = SchemaObject::new(named.name.clone(), Some(named.qualified_name()), ObjectKind::Interface);
    let mut dependencies = Vec::new();

    for method in interface.methods.iter().filter(|method| is_exported(&method.name)) {
        let (method, method_dependencies) =
            schema_method(ctx, method, ContextRule::Optional).map_err(|err| err.in_method(&method.name))?;
        object.methods.push(method);
        dependencies.extend(method_dependencies);
    }

    Ok(Expansion { object, dependencies })
}

fn expand_scalar(ctx: &BuildContext<'_>, scalar: &ScalarRef<'_>) -> SchemaObject {
    match scalar {
        ScalarRef::Mapped { mapping, .. } => {
            SchemaObject::new(mapping.scalar.clone(), mapping.model.clone(), ObjectKind::Scalar)
        }
        ScalarRef::Named { id, named } => match enum_of(ctx.source, *id) {
            Some(enm) => {
                let mut object = SchemaObject::new(enm.name, Some(enm.model), ObjectKind::Enum);
                object.enum_values = enm.keys.into_iter().map(|key| key.name).collect();
                object
            }
            None => SchemaObject::new(named.name.clone(), Some(named.qualified_name()), ObjectKind::Scalar),
        },
        ScalarRef::Map => SchemaObject::new(MAP, None, ObjectKind::Scalar),
        ScalarRef::Any => SchemaObject::new(ANY, None, ObjectKind::Scalar),
    }
}

fn expand_input<'a>(ctx: &BuildContext<'a>, inner: &Dependency<'a>) -> Result<Expansion<'a>, BuildError> {
    let Expansion { mut object, dependencies } = match inner {
        // Input objects have no resolvers.
        Dependency::Struct { named, strct } => expand_struct(ctx, *named, *strct, false)?,
        Dependency::Interface { named, .. } => {
            return Err(BuildError::UnsupportedType(format!(
                "interface {} cannot be used as an input",
                named.qualified_name()
            )));
        }
        other => other.expand(ctx)?,
    };

    if object.kind == ObjectKind::Type {
        object.kind = ObjectKind::Input;
        object.name.push_str(INPUT_SUFFIX);
        for field in object.fields.iter_mut().filter(|field| field.is_custom_type) {
            field.r#type.push_str(INPUT_SUFFIX);
        }
    }

    Ok(Expansion {
        object,
        dependencies: dependencies.into_iter().map(Dependency::into_input).collect(),
    })
}
