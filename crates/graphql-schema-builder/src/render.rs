//! GraphQL SDL for gqlgen, with every object bound back to its host type through `@goModel`.

use std::fmt::{self, Display, Write as _};

use crate::schema::{ObjectKind, SchemaField, SchemaMethod, SchemaObject};

const INDENT: &str = "  ";

const HEADER: &str = r#"# GENERATED BY gen-graphql-schema
directive @goModel(
  model: String
  models: [String!]
) on OBJECT | INPUT_OBJECT | SCALAR | ENUM | INTERFACE | UNION
"#;

pub fn render_sdl(objects: &[SchemaObject]) -> String {
    Renderer { objects }.to_string()
}

struct Renderer<'a> {
    objects: &'a [SchemaObject],
}

impl Display for Renderer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(HEADER)?;

        for object in self.objects {
            f.write_char('\n')?;
            render_object(object, f)?;
        }

        Ok(())
    }
}

fn render_object(object: &SchemaObject, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let keyword = match object.kind {
        ObjectKind::Scalar => {
            f.write_str("scalar ")?;
            f.write_str(&object.name)?;
            render_model(object, f)?;
            return f.write_char('\n');
        }
        // gqlgen cannot generate an interface without implementations.
        ObjectKind::Type | ObjectKind::Interface => "type",
        ObjectKind::Input => "input",
        ObjectKind::Enum => "enum",
    };

    write!(f, "{keyword} {}", object.name)?;
    render_model(object, f)?;
    f.write_str(" {\n")?;

    for value in &object.enum_values {
        writeln!(f, "{INDENT}{value}")?;
    }

    for field in &object.fields {
        writeln!(f, "{INDENT}{}: {}", field.name, FieldType(field))?;
    }

    for method in &object.methods {
        render_method(method, f)?;
    }

    f.write_str("}\n")
}

fn render_model(object: &SchemaObject, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &object.model {
        Some(model) => write!(f, " @goModel(model: {model:?})"),
        None => Ok(()),
    }
}

fn render_method(method: &SchemaMethod, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if method.parameters.is_empty() {
        return writeln!(f, "{INDENT}{}: {}", method.name, FieldType(&method.return_value));
    }

    writeln!(f, "{INDENT}{}(", method.name)?;

    let last = method.parameters.len() - 1;
    for (idx, parameter) in method.parameters.iter().enumerate() {
        let separator = if idx == last { "" } else { "," };
        writeln!(f, "{INDENT}{INDENT}{}: {}{separator}", parameter.name, FieldType(parameter))?;
    }

    writeln!(f, "{INDENT}): {}", FieldType(&method.return_value))
}

/// `[[T!]]!` and friends.
struct FieldType<'a>(&'a SchemaField);

impl Display for FieldType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.0;

        if field.is_array {
            for _ in 0..field.nest_depth {
                f.write_char('[')?;
            }
            f.write_str(&field.r#type)?;
            if !field.element_nullable {
                f.write_char('!')?;
            }
            for _ in 0..field.nest_depth {
                f.write_char(']')?;
            }
        } else {
            f.write_str(&field.r#type)?;
        }

        if !field.nullable {
            f.write_char('!')?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, r#type: &str) -> SchemaField {
        SchemaField {
            name: name.to_owned(),
            r#type: r#type.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn field_types() {
        let scalar = field("a", "String");
        let optional = SchemaField {
            nullable: true,
            ..field("a", "String")
        };
        let list = SchemaField {
            nullable: true,
            is_array: true,
            element_nullable: true,
            nest_depth: 1,
            ..field("a", "String")
        };
        let nested = SchemaField {
            nullable: true,
            is_array: true,
            nest_depth: 2,
            ..field("a", "Int")
        };

        assert_eq!(FieldType(&scalar).to_string(), "String!");
        assert_eq!(FieldType(&optional).to_string(), "String");
        assert_eq!(FieldType(&list).to_string(), "[String]");
        assert_eq!(FieldType(&nested).to_string(), "[[Int!]]");
    }

    #[test]
    fn all_object_kinds() {
        let mut query = SchemaObject::new("Query", Some("example.com/models.Query".to_owned()), ObjectKind::Type);
        query.methods = vec![
            SchemaMethod {
                name: "viewer".to_owned(),
                parameters: Vec::new(),
                return_value: field("", "User"),
            },
            SchemaMethod {
                name: "search".to_owned(),
                parameters: vec![field("text", "String"), field("filter", "FilterInput")],
                return_value: SchemaField {
                    nullable: true,
                    is_array: true,
                    nest_depth: 1,
                    ..field("", "User")
                },
            },
        ];

        let mut node = SchemaObject::new("Node", Some("example.com/models.Node".to_owned()), ObjectKind::Interface);
        node.methods = vec![SchemaMethod {
            name: "id".to_owned(),
            parameters: Vec::new(),
            return_value: field("", "ID"),
        }];

        let mut filter = SchemaObject::new(
            "FilterInput",
            Some("example.com/models.Filter".to_owned()),
            ObjectKind::Input,
        );
        filter.fields = vec![field("since", "Time")];

        let mut status = SchemaObject::new("Status", Some("example.com/models.Status".to_owned()), ObjectKind::Enum);
        status.enum_values = vec!["Active".to_owned(), "Archived".to_owned()];

        let objects = vec![
            query,
            node,
            filter,
            status,
            SchemaObject::new("Time", None, ObjectKind::Scalar),
            SchemaObject::new("Email", Some("example.com/models.Email".to_owned()), ObjectKind::Scalar),
        ];

        insta::assert_snapshot!(render_sdl(&objects), @r#"
        # GENERATED BY gen-graphql-schema
        directive @goModel(
          model: String
          models: [String!]
        ) on OBJECT | INPUT_OBJECT | SCALAR | ENUM | INTERFACE | UNION

        type Query @goModel(model: "example.com/models.Query") {
          viewer: User!
          search(
            text: String!,
            filter: FilterInput!
          ): [User!]
        }

        type Node @goModel(model: "example.com/models.Node") {
          id: ID!
        }

        input FilterInput @goModel(model: "example.com/models.Filter") {
          since: Time!
        }

        enum Status @goModel(model: "example.com/models.Status") {
          Active
          Archived
        }

        scalar Time

        scalar Email @goModel(model: "example.com/models.Email")
        "#);
    }
}
