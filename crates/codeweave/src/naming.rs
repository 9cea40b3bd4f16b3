//! Identifier naming conventions

use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase, ToTitleCase};
use serde::{Deserialize, Serialize};

/// Naming convention applied by [`CodeWriter::write_named`](crate::CodeWriter::write_named)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Naming {
    /// Unchanged
    #[default]
    Default,
    /// lowercase
    Lower,
    /// UPPERCASE
    Upper,
    /// camelCase
    Camel,
    /// PascalCase
    Pascal,
    /// Title Case
    Title,
    /// snake_case
    Snake,
    /// kebab-case
    Kebab,
    /// _camelCase, as used for private fields
    Field,
}

impl Naming {
    /// Convert `input` to this convention
    pub fn apply(self, input: &str) -> String {
        match self {
            Naming::Default => input.to_string(),
            Naming::Lower => input.to_lowercase(),
            Naming::Upper => input.to_uppercase(),
            Naming::Camel => input.to_lower_camel_case(),
            Naming::Pascal => input.to_pascal_case(),
            Naming::Title => input.to_title_case(),
            Naming::Snake => input.to_snake_case(),
            Naming::Kebab => input.to_kebab_case(),
            Naming::Field => format!("_{}", input.to_lower_camel_case()),
        }
    }
}
