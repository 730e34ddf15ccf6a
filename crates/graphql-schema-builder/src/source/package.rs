use super::*;
use crate::BuildError;
use std::{fs, io, path::Path};

pub(crate) const CONTEXT_TYPE_NAME: &str = "context.Context";
pub(crate) const ERROR_TYPE_NAME: &str = "error";
pub(crate) const TIME_TYPE_NAME: &str = "time.Time";

/// Methods making up the context capability.
const CONTEXT_METHODS: &[&str] = &["Deadline", "Done", "Err", "Value"];
/// Methods making up the error capability.
const ERROR_METHODS: &[&str] = &["Error"];

/// An in-memory package of the host program.
///
/// Built either programmatically, or deserialized from the JSON dump produced by a host side
/// introspection tool:
///
/// ```json
/// {
///   "path": "example.com/models",
///   "types": [
///     { "kind": "named", "name": "Query", "package": "example.com/models", "underlying": 1 },
///     { "kind": "struct", "fields": [] }
///   ],
///   "constants": []
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Package {
    path: String,
    #[serde(default)]
    types: Vec<Type>,
    #[serde(default)]
    constants: Vec<Constant>,
}

impl Package {
    /// An empty package that already knows the standard `context.Context`, `error` and
    /// `time.Time` types.
    pub fn new(path: impl Into<String>) -> Self {
        let mut package = Package {
            path: path.into(),
            types: Vec::new(),
            constants: Vec::new(),
        };
        package.add_prelude();
        package
    }

    pub fn from_json_str(json: &str) -> Result<Self, BuildError> {
        let package: Package = serde_json::from_str(json).map_err(|err| BuildError::SourceSyntax(err.to_string()))?;
        package.validate()?;
        Ok(package)
    }

    /// Load a JSON package dump from disk.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let json = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => BuildError::SourceNotFound(path.to_owned()),
            _ => BuildError::SourceRead {
                path: path.to_owned(),
                source,
            },
        })?;

        tracing::debug!("Loaded type source from {}", path.display());

        Self::from_json_str(&json)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn add(&mut self, ty: Type) -> TypeId {
        self.types.push(ty);
        TypeId::from(self.types.len() - 1)
    }

    pub fn basic(&mut self, basic: BasicKind) -> TypeId {
        self.add(Type::Basic { basic })
    }

    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        self.add(Type::Pointer { elem })
    }

    pub fn slice(&mut self, elem: TypeId) -> TypeId {
        self.add(Type::Slice { elem })
    }

    pub fn map(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.add(Type::Map { key, value })
    }

    /// The empty interface.
    pub fn any(&mut self) -> TypeId {
        self.add(Type::Interface(InterfaceType::default()))
    }

    /// Declare a named type in this package. Its underlying type is an empty struct until
    /// [`define`](Self::define) is called, which lets declarations refer to each other.
    pub fn declare(&mut self, name: &str) -> TypeId {
        let package = self.path.clone();
        self.declare_in(Some(&package), name)
    }

    /// Declare a named type of another package (`None` for the universe scope).
    pub fn declare_in(&mut self, package: Option<&str>, name: &str) -> TypeId {
        let underlying = self.add(Type::Struct(StructType::default()));
        self.add(Type::Named(NamedType {
            name: name.to_owned(),
            package: package.map(str::to_owned),
            underlying,
            methods: Vec::new(),
        }))
    }

    /// Set the underlying type of a declared named type. Ignored for any other type.
    pub fn define(&mut self, named: TypeId, underlying: Type) {
        let Type::Named(named_type) = &self[named] else {
            tracing::warn!("Cannot define {named}, it is not a named type");
            return;
        };
        let slot = usize::from(named_type.underlying);
        self.types[slot] = underlying;
    }

    /// Attach a method to a named type. Ignored for any other type.
    pub fn add_method(&mut self, named: TypeId, method: Method) {
        let Type::Named(named_type) = &mut self.types[usize::from(named)] else {
            tracing::warn!("Cannot add method {} to {named}, it is not a named type", method.name);
            return;
        };
        named_type.methods.push(method);
    }

    pub fn add_constant(&mut self, name: &str, r#type: TypeId, value: ConstValue) {
        self.constants.push(Constant {
            name: name.to_owned(),
            r#type,
            value,
        });
    }

    pub fn context_type(&self) -> Option<TypeId> {
        self.lookup_qualified(CONTEXT_TYPE_NAME)
    }

    pub fn error_type(&self) -> Option<TypeId> {
        self.lookup_qualified(ERROR_TYPE_NAME)
    }

    pub fn time_type(&self) -> Option<TypeId> {
        self.lookup_qualified(TIME_TYPE_NAME)
    }

    pub fn lookup_qualified(&self, qualified_name: &str) -> Option<TypeId> {
        self.named_types()
            .find(|(_, named)| named.qualified_name() == qualified_name)
            .map(|(id, _)| id)
    }

    fn named_types(&self) -> impl Iterator<Item = (TypeId, &NamedType)> {
        self.types.iter().enumerate().filter_map(|(idx, ty)| match ty {
            Type::Named(named) => Some((TypeId::from(idx), named)),
            _ => None,
        })
    }

    fn add_prelude(&mut self) {
        let string = self.basic(BasicKind::String);
        let bool = self.basic(BasicKind::Bool);
        let any = self.any();

        let context = self.declare_in(Some("context"), "Context");
        let time = self.declare_in(Some("time"), "Time");
        let error = self.declare_in(None, "error");
        let deadline_result = self.pointer(time);

        let context_methods = vec![
            method("Deadline", vec![], vec![Var::unnamed(deadline_result), Var::unnamed(bool)]),
            method("Done", vec![], vec![]),
            method("Err", vec![], vec![Var::unnamed(error)]),
            method("Value", vec![Var::new("key", any)], vec![Var::unnamed(any)]),
        ];
        self.define(context, Type::Interface(InterfaceType {
            methods: context_methods,
        }));
        self.define(error, Type::Interface(InterfaceType {
            methods: vec![method("Error", vec![], vec![Var::unnamed(string)])],
        }));
    }

    /// Names of the methods callable on a value of this type.
    fn method_set(&self, id: TypeId) -> Vec<&str> {
        match &self[id] {
            Type::Named(named) => {
                let mut methods: Vec<&str> = named.methods.iter().map(|method| method.name.as_str()).collect();
                if let Type::Interface(interface) = &self[named.underlying] {
                    methods.extend(interface.methods.iter().map(|method| method.name.as_str()));
                }
                methods
            }
            Type::Interface(interface) => interface.methods.iter().map(|method| method.name.as_str()).collect(),
            Type::Pointer { elem } if matches!(self[*elem], Type::Named(_)) => self.method_set(*elem),
            _ => Vec::new(),
        }
    }

    fn implements(&self, id: TypeId, capability: &[&str]) -> bool {
        let methods = self.method_set(id);
        capability.iter().all(|required| methods.contains(required))
    }

    /// Reject dumps a build could not traverse: dangling ids, named types whose underlying type
    /// is itself named, and cycles that do not go through a named type.
    fn validate(&self) -> Result<(), BuildError> {
        for (idx, ty) in self.types.iter().enumerate() {
            for reference in ty.references() {
                if usize::from(reference) >= self.types.len() {
                    return Err(BuildError::SourceSyntax(format!(
                        "type #{idx} refers to the undefined type {reference}"
                    )));
                }
            }

            if let Type::Named(named) = ty {
                if matches!(self[named.underlying], Type::Named(_)) {
                    return Err(BuildError::SourceSyntax(format!(
                        "the underlying type of {} is a named type",
                        named.qualified_name()
                    )));
                }
            }
        }

        for constant in &self.constants {
            if usize::from(constant.r#type) >= self.types.len() {
                return Err(BuildError::SourceSyntax(format!(
                    "constant {} refers to the undefined type {}",
                    constant.name, constant.r#type
                )));
            }
        }

        self.check_unnamed_cycles()
    }

    fn check_unnamed_cycles(&self) -> Result<(), BuildError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.types.len()];

        for start in 0..self.types.len() {
            if marks[start] != Mark::Unvisited || matches!(self.types[start], Type::Named(_)) {
                continue;
            }

            // Explicit stack of (type, remaining references) to stay clear of deep recursion.
            let mut stack = vec![(start, self.unnamed_references(start))];
            marks[start] = Mark::InProgress;

            while let Some((current, remaining)) = stack.last_mut() {
                let current = *current;
                let Some(next) = remaining.pop() else {
                    marks[current] = Mark::Done;
                    stack.pop();
                    continue;
                };

                match marks[next] {
                    Mark::Done => (),
                    Mark::InProgress => {
                        return Err(BuildError::SourceSyntax(format!(
                            "type #{next} contains itself without going through a named type"
                        )));
                    }
                    Mark::Unvisited => {
                        marks[next] = Mark::InProgress;
                        stack.push((next, self.unnamed_references(next)));
                    }
                }
            }
        }

        Ok(())
    }

    fn unnamed_references(&self, idx: usize) -> Vec<usize> {
        self.types[idx]
            .references()
            .into_iter()
            .map(usize::from)
            .filter(|reference| !matches!(self.types[*reference], Type::Named(_)))
            .collect()
    }
}

fn method(name: &str, params: Vec<Var>, results: Vec<Var>) -> Method {
    Method {
        name: name.to_owned(),
        signature: Signature { params, results },
    }
}

impl std::ops::Index<TypeId> for Package {
    type Output = Type;

    fn index(&self, index: TypeId) -> &Type {
        &self.types[usize::from(index)]
    }
}

impl TypeSource for Package {
    fn package_path(&self) -> &str {
        &self.path
    }

    fn lookup(&self, name: &str) -> Option<TypeId> {
        self.named_types()
            .find(|(_, named)| named.name == name && named.package.as_deref() == Some(self.path.as_str()))
            .map(|(id, _)| id)
    }

    fn declared_types(&self) -> Vec<TypeId> {
        self.named_types()
            .filter(|(_, named)| named.package.as_deref() == Some(self.path.as_str()))
            .map(|(id, _)| id)
            .collect()
    }

    fn ty(&self, id: TypeId) -> &Type {
        &self[id]
    }

    fn constants(&self) -> &[Constant] {
        &self.constants
    }

    fn is_context(&self, id: TypeId) -> bool {
        match &self[id] {
            Type::Named(named) if named.qualified_name() == CONTEXT_TYPE_NAME => true,
            _ => self.implements(id, CONTEXT_METHODS),
        }
    }

    fn is_error(&self, id: TypeId) -> bool {
        match &self[id] {
            Type::Named(named) if named.qualified_name() == ERROR_TYPE_NAME => true,
            _ => self.implements(id, ERROR_METHODS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn prelude_capabilities() {
        let mut package = Package::new("example.com/models");
        let context = package.context_type().unwrap();
        let error = package.error_type().unwrap();
        let string = package.basic(BasicKind::String);

        assert!(package.is_context(context));
        assert!(!package.is_context(error));
        assert!(package.is_error(error));
        assert!(!package.is_error(string));
        assert!(package.time_type().is_some());
    }

    #[test]
    fn capabilities_are_structural() {
        let mut package = Package::new("example.com/models");
        let string = package.basic(BasicKind::String);

        // type MyContext interface { context.Context; Extra() }
        let context = package.context_type().unwrap();
        let Type::Named(context_named) = &package[context] else {
            unreachable!()
        };
        let Type::Interface(context_interface) = package[context_named.underlying].clone() else {
            unreachable!()
        };
        let my_context = package.declare("MyContext");
        let mut methods = context_interface.methods;
        methods.push(method("Extra", vec![], vec![]));
        package.define(my_context, Type::Interface(InterfaceType { methods }));

        // type NotFound struct{}; func (*NotFound) Error() string
        let not_found = package.declare("NotFound");
        package.add_method(not_found, method("Error", vec![], vec![Var::unnamed(string)]));
        let not_found_pointer = package.pointer(not_found);

        assert!(package.is_context(my_context));
        assert!(package.is_error(not_found));
        assert!(package.is_error(not_found_pointer));
        assert!(!package.is_context(not_found_pointer));
    }

    #[test]
    fn lookup_only_sees_the_package_scope() {
        let mut package = Package::new("example.com/models");
        let query = package.declare("Query");

        assert_eq!(package.lookup("Query"), Some(query));
        assert_eq!(package.lookup("Context"), None);
        assert_eq!(package.lookup("error"), None);
        assert_eq!(package.declared_types(), vec![query]);
    }

    #[test]
    fn json_roundtrip_keeps_ids() {
        let mut package = Package::new("example.com/models");
        let query = package.declare("Query");
        let json = serde_json::to_string(&package).unwrap();

        let loaded = Package::from_json_str(&json).unwrap();
        assert_eq!(loaded.lookup("Query"), Some(query));
        assert_eq!(loaded, package);
    }

    #[test]
    fn dangling_reference() {
        let json = r#"{
            "path": "example.com/models",
            "types": [{ "kind": "pointer", "elem": 7 }]
        }"#;

        let err = Package::from_json_str(json).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SourceSyntaxError);
        insta::assert_snapshot!(err, @"cannot parse type source: type #0 refers to the undefined type #7");
    }

    #[test]
    fn unnamed_cycle() {
        let json = r#"{
            "path": "example.com/models",
            "types": [
                { "kind": "pointer", "elem": 1 },
                { "kind": "slice", "elem": 0 }
            ]
        }"#;

        let err = Package::from_json_str(json).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SourceSyntaxError);
    }

    #[test]
    fn cycle_through_named_type_is_fine() {
        let mut package = Package::new("example.com/models");
        let node = package.declare("Node");
        let next = package.pointer(node);
        package.define(node, Type::Struct(StructType {
            fields: vec![Field {
                name: "Next".to_owned(),
                r#type: next,
                tag: String::new(),
            }],
        }));

        let json = serde_json::to_string(&package).unwrap();
        assert!(Package::from_json_str(&json).is_ok());
    }

    #[test]
    fn malformed_json() {
        let err = Package::from_json_str("{ \"path\": ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SourceSyntaxError);
    }
}
