//! Service identifiers for the dependency injection container.

use std::any::TypeId;
use std::fmt;

/// Key for service storage and lookup.
///
/// A service identifier is the pair of a nominal type (usually a trait
/// object such as `dyn Greeter`) and an optional qualifying tag. Two keys
/// are equal iff both the type and the tag match, which is what allows the
/// same interface to be bound several times under different tags.
///
/// # Examples
///
/// ```rust
/// use diydi::ServiceKey;
///
/// trait Name: Send + Sync {}
///
/// let plain = ServiceKey::of::<dyn Name>();
/// let primary = ServiceKey::named::<dyn Name>("primary");
///
/// assert_ne!(plain, primary);
/// assert_eq!(primary.untagged(), plain);
/// assert_eq!(plain.display_name(), "Name");
/// assert_eq!(primary.to_string(), "Name@primary");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ServiceKey {
    type_id: TypeId,
    type_name: &'static str,
    tag: Option<&'static str>,
}

impl ServiceKey {
    /// Untagged identifier for `I`.
    #[inline]
    pub fn of<I: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<I>(),
            type_name: std::any::type_name::<I>(),
            tag: None,
        }
    }

    /// Identifier for `I` qualified by `tag`.
    #[inline]
    pub fn named<I: ?Sized + 'static>(tag: &'static str) -> Self {
        Self {
            tag: Some(tag),
            ..Self::of::<I>()
        }
    }

    /// Identifier for `I` qualified by the marker type `Q`.
    #[inline]
    pub fn qualified<I: ?Sized + 'static, Q: Qualifier>() -> Self {
        Self::named::<I>(Q::NAME)
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Full `std::any::type_name` of the identified type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn tag(&self) -> Option<&'static str> {
        self.tag
    }

    pub fn is_named(&self) -> bool {
        self.tag.is_some()
    }

    /// The same identifier with the tag removed.
    pub fn untagged(&self) -> Self {
        Self { tag: None, ..*self }
    }

    /// Human-readable type name without module paths or a leading `dyn`.
    pub fn display_name(&self) -> String {
        display_type_name(self.type_name)
    }
}

impl PartialEq for ServiceKey {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.tag == other.tag
    }
}

impl Eq for ServiceKey {}

// The name is derived from the TypeId, so it stays out of the hash.
impl std::hash::Hash for ServiceKey {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.tag.hash(state);
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            Some(tag) => write!(f, "{}@{}", self.display_name(), tag),
            None => f.write_str(&self.display_name()),
        }
    }
}

/// Type-level tag used to declare qualified dependencies.
///
/// Implement it on a zero-sized marker type, or use the [`qualifier!`]
/// macro:
///
/// ```rust
/// use diydi::{qualifier, Qualifier};
///
/// qualifier!(pub Primary = "primary");
///
/// assert_eq!(Primary::NAME, "primary");
/// ```
///
/// [`qualifier!`]: crate::qualifier
pub trait Qualifier: Send + Sync + 'static {
    const NAME: &'static str;
}

/// Declares a zero-sized [`Qualifier`] marker type.
#[macro_export]
macro_rules! qualifier {
    ($vis:vis $name:ident = $tag:expr) => {
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $name;

        impl $crate::Qualifier for $name {
            const NAME: &'static str = $tag;
        }
    };
}

/// Strips module paths from a `std::any::type_name` result.
///
/// Generic arguments are shortened too, so
/// `app::Factory<dyn app::Greeter, alloc::string::String>` becomes
/// `Factory<dyn Greeter, String>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_alphanumeric() || c == '_' {
            segment.push(c);
        } else if c == ':' && chars.peek() == Some(&':') {
            // `segment` was a path component
            chars.next();
            segment.clear();
        } else {
            out.push_str(&segment);
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(&segment);
    out
}

/// [`short_type_name`] with a leading `dyn ` removed.
pub fn display_type_name(full: &str) -> String {
    let short = short_type_name(full);
    match short.strip_prefix("dyn ") {
        Some(rest) => rest.to_string(),
        None => short,
    }
}
