//! Error types for the dependency injection container.

use thiserror::Error;

/// Dependency injection errors
///
/// Represents the failures that can occur while binding services or
/// resolving an object graph from a [`Container`](crate::Container).
///
/// # Examples
///
/// ```rust
/// use diydi::{Container, DiError, Resolver};
///
/// trait Clock: Send + Sync {}
///
/// let container = Container::new();
/// match container.get_instance::<dyn Clock>() {
///     Err(DiError::DependencyResolution(name)) => assert_eq!(name, "Clock"),
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use diydi::DiError;
///
/// let already_bound = DiError::AlreadyBound("IName".to_string());
/// let circular = DiError::Circular(vec!["A".into(), "B".into(), "A".into()]);
///
/// assert_eq!(already_bound.to_string(), "IName already bound");
/// assert_eq!(circular.to_string(), "Circular dependency: A -> B -> A");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiError {
    /// The service identifier already has a binding in this container
    #[error("{0} already bound")]
    AlreadyBound(String),
    /// Some identifier along the resolution chain has no binding
    #[error("{0} not found")]
    DependencyResolution(String),
    /// Binding would close a dependency cycle (includes path)
    #[error("Circular dependency: {}", .0.join(" -> "))]
    Circular(Vec<String>),
    /// Maximum resolution depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// Stored handle did not have the requested type
    #[error("Type mismatch for: {0}")]
    TypeMismatch(String),
}

impl DiError {
    /// Returns true for errors raised while declaring bindings.
    pub fn is_binding_error(&self) -> bool {
        matches!(self, DiError::AlreadyBound(_) | DiError::Circular(_))
    }
}

/// Result type for DI operations
///
/// A convenience alias for `Result<T, DiError>` used throughout diydi.
pub type DiResult<T> = Result<T, DiError>;
