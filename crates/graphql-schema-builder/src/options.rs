use indexmap::IndexMap;

pub const DEFAULT_TAG_KEY: &str = "graphql-schema";

/// Knobs of a single build.
///
/// Deserializable so front ends can read it from a configuration file:
///
/// ```toml
/// root_query_name = "Query"
/// tag_key = "graphql-schema"
///
/// [scalars."time.Time"]
/// scalar = "Time"
///
/// [scalars."github.com/google/uuid.UUID"]
/// scalar = "UUID"
/// model = "github.com/99designs/gqlgen/graphql.UUID"
/// ```
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
    pub root_query_name: String,
    pub root_mutation_name: String,
    /// Struct tag key carrying field directives.
    pub tag_key: String,
    /// Host types mapped onto a schema scalar, keyed by qualified name.
    pub scalars: IndexMap<String, ScalarMapping>,
    /// Whether methods of non-root structs must take a context as first parameter.
    pub require_context_on_object_methods: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScalarMapping {
    pub scalar: String,
    /// Model reference emitted on the scalar. Scalars known to the code generator have none.
    #[serde(default)]
    pub model: Option<String>,
}

impl ScalarMapping {
    pub fn new(scalar: impl Into<String>) -> Self {
        ScalarMapping {
            scalar: scalar.into(),
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            root_query_name: crate::schema::QUERY.to_owned(),
            root_mutation_name: crate::schema::MUTATION.to_owned(),
            tag_key: DEFAULT_TAG_KEY.to_owned(),
            scalars: IndexMap::from([("time.Time".to_owned(), ScalarMapping::new(crate::schema::TIME))]),
            require_context_on_object_methods: true,
        }
    }
}

impl BuildOptions {
    pub fn with_root_query_name(mut self, name: impl Into<String>) -> Self {
        self.root_query_name = name.into();
        self
    }

    pub fn with_root_mutation_name(mut self, name: impl Into<String>) -> Self {
        self.root_mutation_name = name.into();
        self
    }

    pub fn with_tag_key(mut self, key: impl Into<String>) -> Self {
        self.tag_key = key.into();
        self
    }

    /// Register (or replace) a built-in scalar mapping.
    pub fn with_scalar(mut self, qualified_name: impl Into<String>, mapping: ScalarMapping) -> Self {
        self.scalars.insert(qualified_name.into(), mapping);
        self
    }

    pub fn with_require_context_on_object_methods(mut self, require: bool) -> Self {
        self.require_context_on_object_methods = require;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let options: BuildOptions = serde_json::from_str(r#"{ "root_query_name": "RootQuery" }"#).unwrap();

        assert_eq!(options.root_query_name, "RootQuery");
        assert_eq!(options.root_mutation_name, "Mutation");
        assert_eq!(options.tag_key, "graphql-schema");
        assert_eq!(options.scalars["time.Time"], ScalarMapping::new("Time"));
        assert!(options.require_context_on_object_methods);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<BuildOptions>(r#"{ "root": "Query" }"#).is_err());
    }
}
