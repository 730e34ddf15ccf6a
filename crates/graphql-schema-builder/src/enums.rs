//! Enumerations: named basic types together with the constants declared for them.
//!
//! ```go
//! type Status string
//!
//! const (
//!     StatusActive   = Status("active")
//!     StatusArchived = Status("archived")
//! )
//! ```
//!
//! becomes the enum `Status` with the values `Active` and `Archived`.

use crate::source::{Type, TypeId, TypeSource};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EnumType {
    pub name: String,
    pub model: String,
    pub keys: Vec<EnumKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EnumKey {
    /// Identifier of the constant in the host program.
    pub host_name: String,
    /// Constant identifier without the type name prefix.
    pub name: String,
    /// Exact literal of the constant value.
    pub value: String,
}

/// The enum backed by `id`, if it is a named basic type with at least one constant.
pub fn enum_of(source: &dyn TypeSource, id: TypeId) -> Option<EnumType> {
    let Type::Named(named) = source.ty(id) else {
        return None;
    };
    if !matches!(source.ty(named.underlying), Type::Basic { .. }) {
        return None;
    }

    let keys: Vec<EnumKey> = source
        .constants()
        .iter()
        .filter(|constant| constant.r#type == id)
        .map(|constant| EnumKey {
            host_name: constant.name.clone(),
            name: constant
                .name
                .strip_prefix(named.name.as_str())
                .unwrap_or(&constant.name)
                .to_owned(),
            value: constant.value.to_string(),
        })
        .collect();

    if keys.is_empty() {
        return None;
    }

    Some(EnumType {
        name: named.name.clone(),
        model: named.qualified_name(),
        keys,
    })
}

/// Every enum declared in the package, in declaration order.
pub fn enums(source: &dyn TypeSource) -> Vec<EnumType> {
    source
        .declared_types()
        .into_iter()
        .filter_map(|id| enum_of(source, id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{BasicKind, ConstValue, Package};
    use pretty_assertions::assert_eq;

    #[test]
    fn keys_in_declaration_order() {
        let mut package = Package::new("example.com/models");
        let status = package.declare("Status");
        package.define(status, Type::Basic {
            basic: BasicKind::String,
        });
        package.add_constant("StatusArchived", status, ConstValue::String("archived".to_owned()));
        package.add_constant("StatusActive", status, ConstValue::String("active".to_owned()));
        package.add_constant("DefaultStatus", status, ConstValue::String("active".to_owned()));

        let status = enum_of(&package, status).unwrap();

        assert_eq!(
            status,
            EnumType {
                name: "Status".to_owned(),
                model: "example.com/models.Status".to_owned(),
                keys: vec![
                    EnumKey {
                        host_name: "StatusArchived".to_owned(),
                        name: "Archived".to_owned(),
                        value: "\"archived\"".to_owned(),
                    },
                    EnumKey {
                        host_name: "StatusActive".to_owned(),
                        name: "Active".to_owned(),
                        value: "\"active\"".to_owned(),
                    },
                    EnumKey {
                        host_name: "DefaultStatus".to_owned(),
                        name: "DefaultStatus".to_owned(),
                        value: "\"active\"".to_owned(),
                    },
                ],
            }
        );
    }

    #[test]
    fn only_named_basic_types_with_constants() {
        let mut package = Package::new("example.com/models");
        let level = package.declare("Level");
        package.define(level, Type::Basic { basic: BasicKind::Int });
        package.add_constant("LevelLow", level, ConstValue::Int(0));
        package.add_constant("LevelHigh", level, ConstValue::Int(10));

        let no_constants = package.declare("Email");
        package.define(no_constants, Type::Basic {
            basic: BasicKind::String,
        });

        // Constants of a struct type do not make it an enum.
        package.declare("User");

        let names: Vec<_> = enums(&package).into_iter().map(|enm| enm.name).collect();
        assert_eq!(names, vec!["Level".to_owned()]);
        assert_eq!(enum_of(&package, level).unwrap().keys[1].value, "10");
    }
}
