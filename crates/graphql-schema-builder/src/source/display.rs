use super::{Signature, Type, TypeId, TypeSource};
use std::fmt::{self, Write as _};

/// Render a type handle with host language syntax, e.g. `map[string]string` or `**string`.
pub fn display_type(source: &dyn TypeSource, id: TypeId) -> TypeDisplay<'_> {
    TypeDisplay { source, id }
}

pub struct TypeDisplay<'a> {
    source: &'a dyn TypeSource,
    id: TypeId,
}

impl TypeDisplay<'_> {
    fn nested(&self, id: TypeId) -> Self {
        TypeDisplay {
            source: self.source,
            id,
        }
    }

    fn write_signature(&self, signature: &Signature, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('(')?;
        for (idx, param) in signature.params.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", self.nested(param.r#type))?;
        }
        f.write_char(')')?;

        match signature.results.as_slice() {
            [] => Ok(()),
            [result] => write!(f, " {}", self.nested(result.r#type)),
            results => {
                f.write_str(" (")?;
                for (idx, result) in results.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", self.nested(result.r#type))?;
                }
                f.write_char(')')
            }
        }
    }
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source.ty(self.id) {
            Type::Named(named) => f.write_str(&named.qualified_name()),
            Type::Struct(strct) => {
                f.write_str("struct{")?;
                for (idx, field) in strct.fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{} {}", field.name, self.nested(field.r#type))?;
                }
                f.write_char('}')
            }
            Type::Interface(interface) => {
                f.write_str("interface{")?;
                for (idx, method) in interface.methods.iter().enumerate() {
                    if idx > 0 {
                        f.write_str("; ")?;
                    }
                    f.write_str(&method.name)?;
                    self.write_signature(&method.signature, f)?;
                }
                f.write_char('}')
            }
            Type::Basic { basic } => f.write_str(basic.as_str()),
            Type::Pointer { elem } => write!(f, "*{}", self.nested(*elem)),
            Type::Slice { elem } => write!(f, "[]{}", self.nested(*elem)),
            Type::Array { elem, len } => write!(f, "[{len}]{}", self.nested(*elem)),
            Type::Map { key, value } => write!(f, "map[{}]{}", self.nested(*key), self.nested(*value)),
            Type::Func(signature) => {
                f.write_str("func")?;
                self.write_signature(signature, f)
            }
            Type::Chan { elem } => write!(f, "chan {}", self.nested(*elem)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{BasicKind, Package, Var};

    #[test]
    fn host_syntax() {
        let mut package = Package::new("example.com/models");
        let string = package.basic(BasicKind::String);
        let pointer = package.pointer(string);
        let double_pointer = package.pointer(pointer);
        let map = package.map(string, string);
        let func = package.add(Type::Func(Signature::default()));
        let returning = package.add(Type::Func(Signature {
            params: vec![Var::unnamed(string), Var::unnamed(map)],
            results: vec![Var::unnamed(string), Var::unnamed(pointer)],
        }));
        let user = package.declare("User");
        let users = package.slice(user);

        assert_eq!(display_type(&package, double_pointer).to_string(), "**string");
        assert_eq!(display_type(&package, map).to_string(), "map[string]string");
        assert_eq!(display_type(&package, func).to_string(), "func()");
        assert_eq!(
            display_type(&package, returning).to_string(),
            "func(string, map[string]string) (string, *string)"
        );
        assert_eq!(display_type(&package, users).to_string(), "[]example.com/models.User");
    }
}
