//! Resolver context for nested resolution.

use crate::error::DiResult;
use crate::key::ServiceKey;
use crate::registration::AnyArc;
use crate::traits::ResolverCore;
use crate::Container;

/// Context handed to a binding's constructor while it resolves its
/// dependencies.
///
/// It forwards to the owning [`Container`] and tracks how deeply nested the
/// current resolution is, so a runaway chain fails with
/// [`DiError::DepthExceeded`](crate::DiError::DepthExceeded) instead of
/// exhausting the stack.
pub struct ResolverContext<'a> {
    container: &'a Container,
    depth: usize,
}

impl<'a> ResolverContext<'a> {
    pub(crate) fn new(container: &'a Container, depth: usize) -> Self {
        Self { container, depth }
    }

    /// Nesting depth of the resolution this context belongs to; zero for
    /// the service requested by the caller.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn container(&self) -> &'a Container {
        self.container
    }
}

impl ResolverCore for ResolverContext<'_> {
    fn resolve_any(&self, key: &ServiceKey) -> DiResult<AnyArc> {
        self.container.resolve_at(key, self.depth + 1)
    }
}
