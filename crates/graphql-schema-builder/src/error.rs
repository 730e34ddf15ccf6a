use std::{io, path::PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("unsupported type: {0}")]
    UnsupportedType(String),
    #[error("no query root: the package does not declare a struct named '{0}'")]
    NoQueryRoot(String),
    #[error("root type '{0}' has no exported methods")]
    NoMethodsInRoot(String),
    #[error("the first parameter must be a context")]
    FirstParamMustBeContext,
    #[error("a method must return a value, optionally followed by an error")]
    InvalidReturnSignature,
    #[error("the second return value must be an error")]
    SecondReturnMustBeError,
    #[error("malformed struct tag `{tag}` while looking up key '{key}'")]
    MalformedDirective { tag: String, key: String },
    #[error("cannot parse type source: {0}")]
    SourceSyntax(String),
    #[error("type source not found at {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("could not read type source at {}: {source}", path.display())]
    SourceRead { path: PathBuf, source: io::Error },
    #[error("field '{field}': {source}")]
    Field { field: String, source: Box<BuildError> },
    #[error("method '{method}': {source}")]
    Method { method: String, source: Box<BuildError> },
    #[error("while resolving {dependency}: {source}")]
    Dependency {
        dependency: String,
        source: Box<BuildError>,
    },
}

/// Root cause of a [`BuildError`], ignoring the field, method and dependency context around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedType,
    NoQueryRoot,
    NoMethodsInRoot,
    FirstParamMustBeContext,
    InvalidReturnSignature,
    SecondReturnMustBeError,
    MalformedDirective,
    SourceSyntaxError,
    SourceNotFound,
    SourceRead,
}

impl BuildError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::UnsupportedType(_) => ErrorKind::UnsupportedType,
            BuildError::NoQueryRoot(_) => ErrorKind::NoQueryRoot,
            BuildError::NoMethodsInRoot(_) => ErrorKind::NoMethodsInRoot,
            BuildError::FirstParamMustBeContext => ErrorKind::FirstParamMustBeContext,
            BuildError::InvalidReturnSignature => ErrorKind::InvalidReturnSignature,
            BuildError::SecondReturnMustBeError => ErrorKind::SecondReturnMustBeError,
            BuildError::MalformedDirective { .. } => ErrorKind::MalformedDirective,
            BuildError::SourceSyntax(_) => ErrorKind::SourceSyntaxError,
            BuildError::SourceNotFound(_) => ErrorKind::SourceNotFound,
            BuildError::SourceRead { .. } => ErrorKind::SourceRead,
            BuildError::Field { source, .. }
            | BuildError::Method { source, .. }
            | BuildError::Dependency { source, .. } => source.kind(),
        }
    }

    pub(crate) fn in_field(self, field: &str) -> Self {
        BuildError::Field {
            field: field.to_owned(),
            source: Box::new(self),
        }
    }

    pub(crate) fn in_method(self, method: &str) -> Self {
        BuildError::Method {
            method: method.to_owned(),
            source: Box::new(self),
        }
    }

    pub(crate) fn in_dependency(self, dependency: String) -> Self {
        BuildError::Dependency {
            dependency,
            source: Box::new(self),
        }
    }
}
