use crate::{
    BuildError,
    source::{Signature, TypeSource},
};

/// Resolver methods take a context first and return `(value)` or `(value, error)`.
pub(crate) fn validate_resolver(source: &dyn TypeSource, signature: &Signature) -> Result<(), BuildError> {
    match signature.params.first() {
        Some(first) if source.is_context(first.r#type) => (),
        _ => return Err(BuildError::FirstParamMustBeContext),
    }

    validate_results(source, signature)
}

pub(crate) fn validate_results(source: &dyn TypeSource, signature: &Signature) -> Result<(), BuildError> {
    let value = match signature.results.as_slice() {
        [] => return Err(BuildError::InvalidReturnSignature),
        [value] => value,
        [value, error] => {
            if !source.is_error(error.r#type) {
                return Err(BuildError::SecondReturnMustBeError);
            }
            value
        }
        _ => return Err(BuildError::InvalidReturnSignature),
    };

    // `func() error` has nothing to expose.
    if source.is_error(value.r#type) {
        return Err(BuildError::InvalidReturnSignature);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ErrorKind,
        source::{BasicKind, Package, Var},
    };
    use rstest::rstest;

    #[derive(Clone, Copy, Debug)]
    enum Slot {
        Context,
        Error,
        String,
    }

    fn check(params: &[Slot], results: &[Slot]) -> Result<(), ErrorKind> {
        let mut package = Package::new("example.com/models");
        let string = package.basic(BasicKind::String);
        let context = package.context_type().unwrap();
        let error = package.error_type().unwrap();
        let var = |slot: &Slot| {
            Var::unnamed(match slot {
                Slot::Context => context,
                Slot::Error => error,
                Slot::String => string,
            })
        };

        let signature = Signature {
            params: params.iter().map(var).collect(),
            results: results.iter().map(var).collect(),
        };

        validate_resolver(&package, &signature).map_err(|err| err.kind())
    }

    #[rstest]
    #[case(&[Slot::Context], &[Slot::String])]
    #[case(&[Slot::Context], &[Slot::String, Slot::Error])]
    #[case(&[Slot::Context, Slot::String, Slot::String], &[Slot::String, Slot::Error])]
    fn accepted(#[case] params: &[Slot], #[case] results: &[Slot]) {
        assert_eq!(check(params, results), Ok(()));
    }

    #[rstest]
    #[case(&[], &[Slot::String], ErrorKind::FirstParamMustBeContext)]
    #[case(&[Slot::String], &[Slot::String], ErrorKind::FirstParamMustBeContext)]
    #[case(&[Slot::String, Slot::Context], &[Slot::String], ErrorKind::FirstParamMustBeContext)]
    #[case(&[Slot::Context], &[], ErrorKind::InvalidReturnSignature)]
    #[case(&[Slot::Context], &[Slot::String, Slot::String], ErrorKind::SecondReturnMustBeError)]
    #[case(&[Slot::Context], &[Slot::String, Slot::String, Slot::Error], ErrorKind::InvalidReturnSignature)]
    #[case(&[Slot::Context], &[Slot::Error], ErrorKind::InvalidReturnSignature)]
    // The context check runs first.
    #[case(&[], &[], ErrorKind::FirstParamMustBeContext)]
    fn rejected(#[case] params: &[Slot], #[case] results: &[Slot], #[case] expected: ErrorKind) {
        assert_eq!(check(params, results), Err(expected));
    }
}
