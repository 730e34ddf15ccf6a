//! Derive a GraphQL schema from the types of a host program.
//!
//! The host package declares a `Query` struct (and optionally a `Mutation` struct) whose exported
//! methods are the root resolvers. Every type reachable from them through method results,
//! parameters and struct fields becomes a schema object:
//!
//! ```
//! use graphql_schema_builder::{BuildOptions, ObjectKind, build, source::*};
//!
//! let mut package = Package::new("example.com/models");
//! let context = package.context_type().unwrap();
//! let string = package.basic(BasicKind::String);
//! let query = package.declare("Query");
//! package.add_method(query, Method {
//!     name: "Hello".to_owned(),
//!     signature: Signature {
//!         params: vec![Var::new("ctx", context)],
//!         results: vec![Var::unnamed(string)],
//!     },
//! });
//!
//! let objects = build(&package, &BuildOptions::default()).unwrap();
//! assert_eq!(objects[0].name, "Query");
//! assert_eq!(objects[0].kind, ObjectKind::Type);
//! assert_eq!(objects[0].methods[0].name, "hello");
//! ```

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod builder;
mod directive;
mod enums;
mod error;
mod naming;
mod options;
mod render;
mod schema;
pub mod source;

pub use directive::{FieldDirective, parse_field_tag};
pub use enums::{EnumKey, EnumType, enum_of, enums};
pub use error::{BuildError, ErrorKind};
pub use naming::{to_lower_camel_case, to_snake_case, tokenize};
pub use options::{BuildOptions, DEFAULT_TAG_KEY, ScalarMapping};
pub use render::render_sdl;
pub use schema::*;

use source::TypeSource;

/// Resolve the schema objects reachable from the roots of `source`, roots first, then in order
/// of discovery.
pub fn build(source: &dyn TypeSource, options: &BuildOptions) -> Result<Vec<SchemaObject>, BuildError> {
    builder::BuildContext::new(source, options).build()
}
