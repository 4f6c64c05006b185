//! Core traits for the dependency injection container.

mod dependency;
mod injectable;
mod resolver;

pub use dependency::{Dependencies, Dependency, Named};
pub use injectable::{Implements, Injectable};
pub use resolver::{Resolver, ResolverCore};
