//! Placeholders for values of types the receiver cannot resolve.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The language a serialized value originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    /// The cross-language format.
    Xlang,
    Java,
    Python,
    Cpp,
    Go,
    Javascript,
    Rust,
}

impl Language {
    pub const ALL: [Self; 7] = [
        Self::Xlang,
        Self::Java,
        Self::Python,
        Self::Cpp,
        Self::Go,
        Self::Javascript,
        Self::Rust,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Xlang => "XLANG",
            Self::Java => "JAVA",
            Self::Python => "PYTHON",
            Self::Cpp => "CPP",
            Self::Go => "GO",
            Self::Javascript => "JAVASCRIPT",
            Self::Rust => "RUST",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown [`Language`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language {0:?}")]
pub struct ParseLanguageError(String);

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLanguageError(s.to_owned()))
    }
}

/// Stands in for a value whose type isn't registered on the receiving side.
///
/// It remembers where the value came from so it can be written back out
/// unchanged. Nothing about it is validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpaqueObject {
    language: Language,
    class_name: String,
    ordinal: i32,
}

impl OpaqueObject {
    #[must_use]
    pub fn new(language: Language, class_name: impl Into<String>, ordinal: i32) -> Self {
        Self {
            language,
            class_name: class_name.into(),
            ordinal,
        }
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The registration ordinal of the type on the sending side.
    #[must_use]
    pub const fn ordinal(&self) -> i32 {
        self.ordinal
    }
}

impl fmt::Display for OpaqueObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.language, self.class_name, self.ordinal)
    }
}

/// Shorthand for [`OpaqueObject::new`].
#[must_use]
pub fn opaque_object(language: Language, class_name: impl Into<String>, ordinal: i32) -> OpaqueObject {
    OpaqueObject::new(language, class_name, ordinal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_language() {
        for language in Language::ALL {
            let lower = language.name().to_ascii_lowercase();
            assert_eq!(lower.parse(), Ok(language), "lowercase {language}");
            assert_eq!(language.to_string().parse(), Ok(language), "display {language}");
        }

        assert_eq!(
            "Kotlin".parse::<Language>(),
            Err(ParseLanguageError("Kotlin".to_owned())),
            "unknown language"
        );
    }

    #[test]
    fn display() {
        let obj = opaque_object(Language::Java, "com.example.Point", 7);
        assert_eq!(obj.to_string(), "JAVA:com.example.Point#7", "display format");
    }
}
