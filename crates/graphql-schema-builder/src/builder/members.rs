use super::{
    BuildContext, Dependency,
    classify::classify,
    normalize::normalize,
    signature::{validate_resolver, validate_results},
};
use crate::{
    BuildError,
    naming::to_lower_camel_case,
    schema::{ID, INPUT_SUFFIX, STRING, SchemaField, SchemaMethod},
    source::{Method, TypeId, display_type},
};

/// Whether a method must take a context as its first parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContextRule {
    Required,
    /// A leading context is still skipped when present.
    Optional,
}

/// Describe a value of type `ty` declared as `identifier`, named in lowerCamelCase.
pub(crate) fn schema_field<'a>(
    ctx: &BuildContext<'a>,
    identifier: &str,
    ty: TypeId,
) -> Result<(SchemaField, Option<Dependency<'a>>), BuildError> {
    let shape = normalize(ctx.source, ty);
    // Report the declared type, not the core left after peeling wrappers.
    let (mut r#type, dependency) = classify(ctx, shape.core).map_err(|err| match err {
        BuildError::UnsupportedType(_) => BuildError::UnsupportedType(display_type(ctx.source, ty).to_string()),
        other => other,
    })?;

    if identifier == ID && r#type == STRING {
        r#type = ID.to_owned();
    }

    let field = SchemaField {
        name: to_lower_camel_case(identifier),
        r#type,
        nullable: shape.nullable,
        is_array: shape.is_array,
        element_nullable: shape.element_nullable,
        nest_depth: shape.nest_depth,
        is_custom_type: dependency.as_ref().is_some_and(Dependency::is_custom_type),
    };

    Ok((field, dependency))
}

/// Describe a resolver method. Dependencies of the return value come first, then those of the
/// parameters as inputs.
pub(crate) fn schema_method<'a>(
    ctx: &BuildContext<'a>,
    method: &'a Method,
    rule: ContextRule,
) -> Result<(SchemaMethod, Vec<Dependency<'a>>), BuildError> {
    let signature = &method.signature;
    match rule {
        ContextRule::Required => validate_resolver(ctx.source, signature)?,
        ContextRule::Optional => validate_results(ctx.source, signature)?,
    }

    let mut dependencies = Vec::new();

    let Some(result) = signature.results.first() else {
        return Err(BuildError::InvalidReturnSignature);
    };
    let (mut return_value, dependency) = schema_field(ctx, &result.name, result.r#type)?;
    if method.name == ID && return_value.r#type == STRING {
        return_value.r#type = ID.to_owned();
    }
    dependencies.extend(dependency);

    let skip_context = signature
        .params
        .first()
        .is_some_and(|first| ctx.source.is_context(first.r#type));

    let mut parameters = Vec::new();
    for (idx, param) in signature.params.iter().enumerate().skip(usize::from(skip_context)) {
        let name = if param.name.is_empty() {
            format!("param{idx}")
        } else {
            param.name.clone()
        };

        let (mut parameter, dependency) =
            schema_field(ctx, &param.name, param.r#type).map_err(|err| err.in_field(&name))?;
        parameter.name = name;
        if parameter.is_custom_type {
            parameter.r#type.push_str(INPUT_SUFFIX);
        }

        parameters.push(parameter);
        dependencies.extend(dependency.map(Dependency::into_input));
    }

    let method = SchemaMethod {
        name: to_lower_camel_case(&method.name),
        parameters,
        return_value,
    };

    Ok((method, dependencies))
}
