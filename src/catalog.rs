//! Recognized commit types.

use std::fmt;
use std::ops::Deref;

/// A commit type, e.g. `feat`, compared case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Type<'a>(unicase::UniCase<&'a str>);

impl<'a> Type<'a> {
    /// Wrap a type name.
    pub const fn new(value: &'a str) -> Self {
        Type(unicase::UniCase::unicode(value))
    }

    /// Access `str` representation
    pub fn as_str(&self) -> &'a str {
        self.0.into_inner()
    }
}

/// Common commit types
impl Type<'static> {
    /// Commit type when introducing new features (correlates with `minor` in semver)
    pub const FEAT: Type<'static> = Type::new("feat");
    /// Commit type when patching a bug (correlates with `patch` in semver)
    pub const FIX: Type<'static> = Type::new("fix");
    /// Possible commit type when reverting changes.
    pub const REVERT: Type<'static> = Type::new("revert");
    /// Possible commit type for changing documentation.
    pub const DOCS: Type<'static> = Type::new("docs");
    /// Possible commit type for changing code style.
    pub const STYLE: Type<'static> = Type::new("style");
    /// Possible commit type for refactoring code structure.
    pub const REFACTOR: Type<'static> = Type::new("refactor");
    /// Possible commit type for performance optimizations.
    pub const PERF: Type<'static> = Type::new("perf");
    /// Possible commit type for addressing tests.
    pub const TEST: Type<'static> = Type::new("test");
    /// Possible commit type for other things.
    pub const CHORE: Type<'static> = Type::new("chore");

    pub(crate) const COMMON: [Type<'static>; 9] = [
        Type::FEAT,
        Type::FIX,
        Type::REVERT,
        Type::DOCS,
        Type::STYLE,
        Type::REFACTOR,
        Type::PERF,
        Type::TEST,
        Type::CHORE,
    ];
}

impl Deref for Type<'_> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl PartialEq<&'_ str> for Type<'_> {
    fn eq(&self, other: &&str) -> bool {
        *self == Type::new(*other)
    }
}

impl fmt::Display for Type<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The commit types a project accepts.
///
/// Insertion order is kept for display; names differing only by case are
/// stored once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCatalog<'a> {
    types: Vec<Type<'a>>,
}

impl<'a> TypeCatalog<'a> {
    /// A catalog without any types.
    pub const fn empty() -> Self {
        Self { types: Vec::new() }
    }

    /// Add a type, returning `false` if it was already known.
    pub fn insert(&mut self, ty: Type<'a>) -> bool {
        if self.types.contains(&ty) {
            return false;
        }
        self.types.push(ty);
        true
    }

    /// Whether `name` is one of the known types, ignoring case.
    pub fn contains(&self, name: &str) -> bool {
        self.types.iter().any(|ty| ty == &name)
    }

    /// Iterate the known types in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Type<'a>> + '_ {
        self.types.iter().copied()
    }

    /// Number of known types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are known.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeCatalog<'static> {
    fn default() -> Self {
        Type::COMMON.into_iter().collect()
    }
}

impl<'a> FromIterator<Type<'a>> for TypeCatalog<'a> {
    fn from_iter<T: IntoIterator<Item = Type<'a>>>(iter: T) -> Self {
        let mut catalog = Self::empty();
        for ty in iter {
            catalog.insert(ty);
        }
        catalog
    }
}

impl<'a> FromIterator<&'a str> for TypeCatalog<'a> {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        iter.into_iter().map(Type::new).collect()
    }
}

impl fmt::Display for TypeCatalog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ty) in self.types.iter().enumerate() {
            if 0 < i {
                f.write_str(", ")?;
            }
            write!(f, "{ty}")?;
        }
        Ok(())
    }
}
