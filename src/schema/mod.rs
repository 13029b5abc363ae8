//! Type descriptors for the externally visible quote schema.
//!
//! This is the contract a query engine binds to: field names, argument
//! names, declared types and nullability. Dispatch in `resolver` checks
//! incoming invocations against it before any coercion happens.

use std::fmt;

/// Declared type of a field or argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Int,
    String,
    DateTime,
    Object(&'static str),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    pub fn non_null(inner: TypeRef) -> Self {
        TypeRef::NonNull(Box::new(inner))
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Int => write!(f, "Int"),
            TypeRef::String => write!(f, "String"),
            TypeRef::DateTime => write!(f, "DateTime"),
            TypeRef::Object(name) => write!(f, "{}", name),
            TypeRef::List(inner) => write!(f, "[{}]", inner),
            TypeRef::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}

/// Root operation an invocation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Query => write!(f, "query"),
            OperationKind::Mutation => write!(f, "mutation"),
        }
    }
}

impl std::str::FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "query" => Ok(OperationKind::Query),
            "mutation" => Ok(OperationKind::Mutation),
            _ => Err(format!("Invalid operation: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDescriptor {
    pub name: &'static str,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub ty: TypeRef,
    pub description: Option<&'static str>,
    pub args: Vec<ArgumentDescriptor>,
}

impl FieldDescriptor {
    fn new(name: &'static str, ty: TypeRef) -> Self {
        Self {
            name,
            ty,
            description: None,
            args: Vec::new(),
        }
    }

    fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    fn arg(mut self, name: &'static str, ty: TypeRef) -> Self {
        self.args.push(ArgumentDescriptor { name, ty });
        self
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentDescriptor> {
        self.args.iter().find(|a| a.name == name)
    }

    /// Arguments that must be supplied with a non-null value.
    pub fn required_args(&self) -> impl Iterator<Item = &ArgumentDescriptor> {
        self.args.iter().filter(|a| a.ty.is_non_null())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDescriptor {
    pub name: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl ObjectDescriptor {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// The full schema: the `Quote` object plus the query and mutation roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub quote: ObjectDescriptor,
    pub query: ObjectDescriptor,
    pub mutation: ObjectDescriptor,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    pub fn new() -> Self {
        let quote_ty = || TypeRef::Object("Quote");

        let quote = ObjectDescriptor {
            name: "Quote",
            fields: vec![
                FieldDescriptor::new("id", TypeRef::Int),
                FieldDescriptor::new("text", TypeRef::String),
                FieldDescriptor::new("author", TypeRef::String),
                FieldDescriptor::new("tags", TypeRef::list(TypeRef::String)),
                FieldDescriptor::new("created_at", TypeRef::DateTime),
            ],
        };

        let query = ObjectDescriptor {
            name: "Query",
            fields: vec![
                FieldDescriptor::new("quote", quote_ty())
                    .describe("Get quote by id")
                    .arg("id", TypeRef::Int),
                FieldDescriptor::new("list", TypeRef::list(quote_ty()))
                    .describe("Get all the quotes"),
            ],
        };

        let mutation = ObjectDescriptor {
            name: "Mutation",
            fields: vec![
                FieldDescriptor::new("create", quote_ty())
                    .describe("Create a new quote")
                    .arg("text", TypeRef::non_null(TypeRef::String))
                    .arg("author", TypeRef::String)
                    .arg("tags", TypeRef::list(TypeRef::String)),
                FieldDescriptor::new("update", quote_ty())
                    .describe("Update a quote by id")
                    .arg("id", TypeRef::non_null(TypeRef::Int))
                    .arg("text", TypeRef::String)
                    .arg("author", TypeRef::String)
                    .arg("tags", TypeRef::list(TypeRef::String))
                    .arg("created_at", TypeRef::DateTime),
                FieldDescriptor::new("delete", quote_ty())
                    .describe("Delete a quote by id")
                    .arg("id", TypeRef::non_null(TypeRef::Int)),
            ],
        };

        Self {
            quote,
            query,
            mutation,
        }
    }

    pub fn root(&self, kind: OperationKind) -> &ObjectDescriptor {
        match kind {
            OperationKind::Query => &self.query,
            OperationKind::Mutation => &self.mutation,
        }
    }

    pub fn field(&self, kind: OperationKind, name: &str) -> Option<&FieldDescriptor> {
        self.root(kind).field(name)
    }

    /// Render the schema in SDL form.
    pub fn to_sdl(&self) -> String {
        let mut out = String::from("scalar DateTime\n");
        for object in [&self.quote, &self.query, &self.mutation] {
            out.push('\n');
            write_object(&mut out, object);
        }
        out.push_str("\nschema {\n  query: Query\n  mutation: Mutation\n}\n");
        out
    }
}

fn write_object(out: &mut String, object: &ObjectDescriptor) {
    out.push_str(&format!("type {} {{\n", object.name));
    for field in &object.fields {
        if let Some(description) = field.description {
            out.push_str(&format!("  \"{}\"\n", description));
        }
        out.push_str("  ");
        out.push_str(field.name);
        if !field.args.is_empty() {
            let args: Vec<String> = field
                .args
                .iter()
                .map(|a| format!("{}: {}", a.name, a.ty))
                .collect();
            out.push_str(&format!("({})", args.join(", ")));
        }
        out.push_str(&format!(": {}\n", field.ty));
    }
    out.push_str("}\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_display() {
        assert_eq!(TypeRef::list(TypeRef::String).to_string(), "[String]");
        assert_eq!(TypeRef::non_null(TypeRef::Int).to_string(), "Int!");
        assert_eq!(TypeRef::Object("Quote").to_string(), "Quote");
    }

    #[test]
    fn test_create_requires_only_text() {
        let schema = Schema::new();
        let create = schema.field(OperationKind::Mutation, "create").unwrap();
        let required: Vec<_> = create.required_args().map(|a| a.name).collect();
        assert_eq!(required, vec!["text"]);
        assert!(!create.argument("author").unwrap().ty.is_non_null());
        assert!(!create.argument("tags").unwrap().ty.is_non_null());
    }

    #[test]
    fn test_update_and_delete_require_id() {
        let schema = Schema::new();
        for name in ["update", "delete"] {
            let field = schema.field(OperationKind::Mutation, name).unwrap();
            let required: Vec<_> = field.required_args().map(|a| a.name).collect();
            assert_eq!(required, vec!["id"], "field {}", name);
        }
    }

    #[test]
    fn test_query_fields_are_not_mutations() {
        let schema = Schema::new();
        assert!(schema.field(OperationKind::Query, "quote").is_some());
        assert!(schema.field(OperationKind::Query, "list").is_some());
        assert!(schema.field(OperationKind::Query, "create").is_none());
        assert!(schema.field(OperationKind::Mutation, "list").is_none());
    }

    #[test]
    fn test_quote_object_fields() {
        let schema = Schema::new();
        let names: Vec<_> = schema.quote.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["id", "text", "author", "tags", "created_at"]);
        assert_eq!(schema.quote.field("created_at").unwrap().ty, TypeRef::DateTime);
    }

    #[test]
    fn test_sdl_rendering() {
        let sdl = Schema::new().to_sdl();
        assert!(sdl.contains("scalar DateTime"));
        assert!(sdl.contains("create(text: String!, author: String, tags: [String]): Quote"));
        assert!(sdl.contains("delete(id: Int!): Quote"));
        assert!(sdl.contains("list: [Quote]"));
    }

    #[test]
    fn test_operation_kind_parse() {
        assert_eq!("Query".parse::<OperationKind>(), Ok(OperationKind::Query));
        assert_eq!("mutation".parse::<OperationKind>(), Ok(OperationKind::Mutation));
        assert!("subscription".parse::<OperationKind>().is_err());
    }
}
