//! Walks the host type graph from the schema roots and collects one schema object per reachable
//! type.
//!
//! Types are discovered through a FIFO worklist of [`Dependency`] values. Every dependency knows
//! the name of the object it resolves to, which is the deduplication key: a dependency whose
//! object was already emitted is dropped without being expanded, so cyclic type graphs terminate.

mod classify;
mod dependency;
mod members;
mod normalize;
mod signature;

use std::collections::VecDeque;

use indexmap::IndexMap;

use crate::{
    BuildError, BuildOptions,
    schema::SchemaObject,
    source::{Type, TypeSource},
};

use dependency::{Dependency, Expansion, RootKind, ScalarRef};

pub(crate) struct BuildContext<'a> {
    pub(crate) source: &'a dyn TypeSource,
    pub(crate) options: &'a BuildOptions,
}

impl<'a> BuildContext<'a> {
    pub(crate) fn new(source: &'a dyn TypeSource, options: &'a BuildOptions) -> Self {
        BuildContext { source, options }
    }

    pub(crate) fn build(self) -> Result<Vec<SchemaObject>, BuildError> {
        let query_name = &self.options.root_query_name;
        let query = self
            .root(query_name, RootKind::Query)
            .ok_or_else(|| BuildError::NoQueryRoot(query_name.clone()))?;

        let mut worklist = VecDeque::from([query]);
        match self.root(&self.options.root_mutation_name, RootKind::Mutation) {
            Some(mutation) => worklist.push_back(mutation),
            None => tracing::debug!("No mutation root named '{}'", self.options.root_mutation_name),
        }

        let mut objects: IndexMap<String, SchemaObject> = IndexMap::new();

        while let Some(dependency) = worklist.pop_front() {
            let name = dependency.object_name();
            if objects.contains_key(&name) {
                tracing::trace!("Skipping {}, '{name}' is already resolved", dependency.describe());
                continue;
            }

            tracing::debug!("Resolving {} as '{name}'", dependency.describe());

            let Expansion { object, dependencies } = dependency
                .expand(&self)
                .map_err(|err| err.in_dependency(dependency.describe()))?;
            debug_assert_eq!(object.name, name);

            objects.insert(name, object);
            worklist.extend(dependencies);
        }

        tracing::info!("Resolved {} schema objects", objects.len());

        Ok(objects.into_values().collect())
    }

    /// A root is a struct declared in the package under the configured name.
    fn root(&self, name: &str, kind: RootKind) -> Option<Dependency<'a>> {
        let source = self.source;
        let id = source.lookup(name)?;
        let Type::Named(named) = source.ty(id) else {
            return None;
        };

        match source.ty(named.underlying) {
            Type::Struct(_) => Some(Dependency::Root { named, kind }),
            _ => None,
        }
    }
}
