//! Query and mutation field contributions.
//!
//! A [`FieldContribution`] is a field definition registered by a schema module
//! for one of the root types. Contributions are plain values: they can be
//! cloned, compared and rewritten before being materialised into an
//! async-graphql [`Field`] during root assembly.

use std::fmt;
use std::sync::Arc;

use async_graphql::dynamic::{Field, FieldFuture, InputValue, ResolverContext, TypeRef};

/// Shared resolver function of a contributed field.
pub type FieldResolverFn =
    Arc<dyn for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync>;

/// Declared output type of a contributed field.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputType {
    /// Unresolved forward reference by type name.
    ///
    /// Resolved against the full type set when the schema is built, and
    /// subject to type renames.
    Reference(String),

    /// Concrete type, possibly wrapped in list or non-null modifiers.
    Resolved(TypeRef),
}

impl OutputType {
    /// Creates a forward reference to the named type.
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }

    /// Creates a concrete output type.
    pub fn resolved(ty: impl Into<TypeRef>) -> Self {
        Self::Resolved(ty.into())
    }

    /// Returns the referenced type name if this is a forward reference.
    pub fn reference_name(&self) -> Option<&str> {
        match self {
            Self::Reference(name) => Some(name),
            Self::Resolved(_) => None,
        }
    }

    /// Converts to the async-graphql type reference used in the schema.
    pub fn to_type_ref(&self) -> TypeRef {
        match self {
            Self::Reference(name) => TypeRef::named(name.clone()),
            Self::Resolved(ty) => ty.clone(),
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference(name) => write!(f, "&{name}"),
            Self::Resolved(ty) => write!(f, "{ty}"),
        }
    }
}

/// Argument accepted by a contributed field.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentDefinition {
    pub name: String,
    pub ty: TypeRef,
    pub description: Option<String>,
}

impl ArgumentDefinition {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn to_input_value(&self) -> InputValue {
        let input = InputValue::new(self.name.clone(), self.ty.clone());
        match &self.description {
            Some(description) => input.description(description.clone()),
            None => input,
        }
    }
}

/// A named, typed field contributed to the Query or Mutation root.
///
/// Two contributions are equal when every attribute matches and they share
/// the same resolver instance.
///
/// # Example
///
/// ```ignore
/// let field = FieldContribution::new("getUser", OutputType::reference("UserRef"), |ctx| {
///     FieldFuture::new(async move { Ok(Some(Value::Null)) })
/// })
/// .argument(ArgumentDefinition::new("id", TypeRef::named_nn(TypeRef::ID)));
/// ```
#[derive(Clone)]
pub struct FieldContribution {
    name: String,
    output: OutputType,
    description: Option<String>,
    arguments: Vec<ArgumentDefinition>,
    resolver: FieldResolverFn,
}

impl FieldContribution {
    /// Creates a field contribution with the given resolver.
    pub fn new<F>(name: impl Into<String>, output: OutputType, resolver: F) -> Self
    where
        F: for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            output,
            description: None,
            arguments: Vec::new(),
            resolver: Arc::new(resolver),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn argument(mut self, argument: ArgumentDefinition) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn output(&self) -> &OutputType {
        &self.output
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn arguments(&self) -> &[ArgumentDefinition] {
        &self.arguments
    }

    /// Returns a copy of this field pointing at a different output type.
    ///
    /// Name, description, arguments and the resolver instance are preserved.
    #[must_use]
    pub fn with_output(&self, output: OutputType) -> Self {
        Self {
            output,
            ..self.clone()
        }
    }

    /// Materialises the contribution as an async-graphql field.
    pub fn to_field(&self) -> Field {
        let resolver = Arc::clone(&self.resolver);
        let mut field = Field::new(self.name.clone(), self.output.to_type_ref(), move |ctx| {
            resolver(ctx)
        });
        if let Some(description) = &self.description {
            field = field.description(description.clone());
        }
        for argument in &self.arguments {
            field = field.argument(argument.to_input_value());
        }
        field
    }
}

impl PartialEq for FieldContribution {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.output == other.output
            && self.description == other.description
            && self.arguments == other.arguments
            && Arc::ptr_eq(&self.resolver, &other.resolver)
    }
}

impl fmt::Debug for FieldContribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldContribution")
            .field("name", &self.name)
            .field("output", &self.output)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::Value;

    fn null_field(name: &str, output: OutputType) -> FieldContribution {
        FieldContribution::new(name, output, |_| FieldFuture::new(async { Ok(Some(Value::Null)) }))
    }

    #[test]
    fn test_reference_name() {
        assert_eq!(OutputType::reference("UserRef").reference_name(), Some("UserRef"));
        assert_eq!(
            OutputType::resolved(TypeRef::named_nn(TypeRef::STRING)).reference_name(),
            None
        );
    }

    #[test]
    fn test_to_type_ref() {
        assert_eq!(
            OutputType::reference("User").to_type_ref(),
            TypeRef::named("User")
        );
        let list = TypeRef::named_nn_list_nn("User");
        assert_eq!(OutputType::resolved(list.clone()).to_type_ref(), list);
    }

    #[test]
    fn test_with_output_preserves_everything_else() {
        let field = null_field("getUser", OutputType::reference("UserRef"))
            .description("Fetch a user")
            .argument(ArgumentDefinition::new("id", TypeRef::named_nn(TypeRef::ID)));

        let renamed = field.with_output(OutputType::reference("User"));

        assert_eq!(renamed.name(), "getUser");
        assert_eq!(renamed.description_text(), Some("Fetch a user"));
        assert_eq!(renamed.arguments(), field.arguments());
        assert_eq!(renamed.output(), &OutputType::reference("User"));
        assert_ne!(renamed, field);
        assert_eq!(renamed.with_output(OutputType::reference("UserRef")), field);
    }

    #[test]
    fn test_equality_requires_same_resolver() {
        let a = null_field("ping", OutputType::resolved(TypeRef::named(TypeRef::STRING)));
        let b = null_field("ping", OutputType::resolved(TypeRef::named(TypeRef::STRING)));

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_debug_omits_resolver() {
        let field = null_field("ping", OutputType::reference("Pong"));
        let debug = format!("{field:?}");
        assert!(debug.contains("ping"));
        assert!(debug.contains("Pong"));
    }
}
