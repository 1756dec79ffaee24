//! Validator settings.

use crate::catalog::{Type, TypeCatalog};

/// Column the header may not extend past by default.
pub const DEFAULT_MAX_HEADER_LENGTH: usize = 50;

/// Settings for [`Validator`](crate::Validator) and message rendering.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    max_header_length: usize,
    types: Vec<String>,
}

impl Config {
    /// The last column a header token may end on.
    pub fn max_header_length(&self) -> usize {
        self.max_header_length
    }

    /// Recognized commit type names.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Replace the header length limit.
    pub fn with_max_header_length(mut self, max_header_length: usize) -> Self {
        self.max_header_length = max_header_length;
        self
    }

    /// Replace the recognized commit types.
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    /// The recognized types, ready for [`describe`](crate::describe).
    pub fn catalog(&self) -> TypeCatalog<'_> {
        self.types.iter().map(String::as_str).collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_header_length: DEFAULT_MAX_HEADER_LENGTH,
            types: Type::COMMON
                .iter()
                .map(|ty| ty.as_str().to_owned())
                .collect(),
        }
    }
}
