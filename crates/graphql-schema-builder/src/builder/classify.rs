use super::{BuildContext, Dependency, ScalarRef};
use crate::{
    BuildError,
    schema::{ANY, BOOLEAN, FLOAT, INT, MAP, STRING},
    source::{BasicKind, Type, TypeId, display_type},
};

/// The schema type name of a normalized core type, plus the object it depends on.
pub(crate) fn classify<'a>(
    ctx: &BuildContext<'a>,
    core: TypeId,
) -> Result<(String, Option<Dependency<'a>>), BuildError> {
    let source = ctx.source;
    let unsupported = || BuildError::UnsupportedType(display_type(source, core).to_string());

    match source.ty(core) {
        Type::Named(named) => {
            if let Some(mapping) = ctx.options.scalars.get(&named.qualified_name()) {
                let dependency = Dependency::Scalar(ScalarRef::Mapped { named, mapping });
                return Ok((mapping.scalar.clone(), Some(dependency)));
            }

            let dependency = match source.ty(named.underlying) {
                Type::Struct(strct) => Dependency::Struct { named, strct },
                Type::Basic { .. } => Dependency::Scalar(ScalarRef::Named { id: core, named }),
                Type::Interface(interface) => Dependency::Interface { named, interface },
                _ => return Err(unsupported()),
            };
            Ok((named.name.clone(), Some(dependency)))
        }
        Type::Basic { basic } => {
            let scalar = match basic {
                BasicKind::String => STRING,
                kind if kind.is_integer() => INT,
                BasicKind::Float64 => FLOAT,
                BasicKind::Bool => BOOLEAN,
                _ => return Err(unsupported()),
            };
            Ok((scalar.to_owned(), None))
        }
        Type::Map { key, value } if is_string(ctx, *key) && is_any(ctx, *value) => {
            Ok((MAP.to_owned(), Some(Dependency::Scalar(ScalarRef::Map))))
        }
        Type::Interface(interface) if interface.methods.is_empty() => {
            Ok((ANY.to_owned(), Some(Dependency::Scalar(ScalarRef::Any))))
        }
        Type::Map { .. }
        | Type::Interface(_)
        | Type::Struct(_)
        | Type::Pointer { .. }
        | Type::Slice { .. }
        | Type::Array { .. }
        | Type::Func(_)
        | Type::Chan { .. } => Err(unsupported()),
    }
}

fn is_string(ctx: &BuildContext<'_>, id: TypeId) -> bool {
    matches!(ctx.source.ty(id), Type::Basic {
        basic: BasicKind::String
    })
}

/// The unnamed empty interface.
fn is_any(ctx: &BuildContext<'_>, id: TypeId) -> bool {
    matches!(ctx.source.ty(id), Type::Interface(interface) if interface.methods.is_empty())
}
