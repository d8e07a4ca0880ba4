use graphql_parser::schema::{Definition, Document, Type, TypeDefinition as SdlType, TypeExtension};
use std::collections::HashMap;

/// Reference to a field's type, possibly wrapped in list / non-null modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Unwrap all modifiers down to the named type.
    pub fn named_type(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.named_type(),
        }
    }
}

impl<'a> From<&Type<'a, String>> for TypeRef {
    fn from(ty: &Type<'a, String>) -> Self {
        match ty {
            Type::NamedType(name) => TypeRef::Named(name.clone()),
            Type::ListType(inner) => TypeRef::List(Box::new(TypeRef::from(inner.as_ref()))),
            Type::NonNullType(inner) => TypeRef::NonNull(Box::new(TypeRef::from(inner.as_ref()))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    pub type_ref: TypeRef,
}

/// An object type and its fields, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
}

/// Lookup from object-type name to its definition.
///
/// Only object types are indexed. Scalars, enums, interfaces, unions and input
/// objects are absent, which is what makes a field of those types a leaf.
#[derive(Debug, Clone, Default)]
pub struct TypeIndex {
    types: HashMap<String, TypeDefinition>,
}

impl TypeIndex {
    pub fn from_document(doc: &Document<'_, String>) -> Self {
        let mut index = TypeIndex::default();

        for def in &doc.definitions {
            if let Definition::TypeDefinition(SdlType::Object(obj)) = def {
                index.types.insert(
                    obj.name.clone(),
                    TypeDefinition {
                        name: obj.name.clone(),
                        fields: obj.fields.iter().map(field_definition).collect(),
                    },
                );
            }
        }

        // `extend type` blocks append to an already declared object type.
        for def in &doc.definitions {
            if let Definition::TypeExtension(TypeExtension::Object(ext)) = def {
                match index.types.get_mut(&ext.name) {
                    Some(existing) => existing
                        .fields
                        .extend(ext.fields.iter().map(field_definition)),
                    None => {
                        tracing::debug!("Ignoring extension of undeclared type {}", ext.name);
                    }
                }
            }
        }

        index
    }

    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn field_definition(field: &graphql_parser::schema::Field<'_, String>) -> FieldDefinition {
    FieldDefinition {
        name: field.name.clone(),
        type_ref: TypeRef::from(&field.field_type),
    }
}
