//! Define the reserved keyword vocabulary for the balsa language.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical spellings,
//! categories and provenance.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Builtin simple type names (`int`, `string`, ...) are reserved words too. They carry
//!   [`KeywordCategory::SimpleType`] so the parser can treat them as type descriptors.
//! - `check`/`checkpanic` are keywords that behave as prefix operators in expressions. Their
//!   binding strength is the unary tier of [`crate::lang::operators::Precedence`].
//!
//! ## Examples
//! ```rust
//! use balsa_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("record"), Some(KeywordId::Record));
//! assert!(keywords::is_simple_type(KeywordId::Int));
//! assert!(!keywords::is_simple_type(KeywordId::Record));
//! ```

use super::registry::{Since, Stability};

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeywordId {
    // Visibility / qualifiers
    Public,
    Private,
    Remote,
    Abstract,
    Client,

    // Definitions / declarations
    Function,
    Returns,
    External,
    Type,
    Record,
    Object,

    // Imports
    Import,
    Version,
    As,

    // Control flow / statements
    If,
    Else,
    While,
    Return,
    Check,
    Checkpanic,

    // Literals
    True,
    False,
    Null,

    // Simple types
    Int,
    Float,
    Decimal,
    String,
    Boolean,
    Byte,
    Any,
    Anydata,
    Json,
}

/// High-level grouping for documentation and tooling.
///
/// ## Notes
/// - Categories are metadata only; they do not enforce parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Qualifier,
    Definition,
    Import,
    ControlFlow,
    Literal,
    SimpleType,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Visibility / qualifiers
    info(KeywordId::Public, "public", KeywordCategory::Qualifier),
    info(KeywordId::Private, "private", KeywordCategory::Qualifier),
    info(KeywordId::Remote, "remote", KeywordCategory::Qualifier),
    info(KeywordId::Abstract, "abstract", KeywordCategory::Qualifier),
    info(KeywordId::Client, "client", KeywordCategory::Qualifier),
    // Definitions / declarations
    info(KeywordId::Function, "function", KeywordCategory::Definition),
    info(KeywordId::Returns, "returns", KeywordCategory::Definition),
    info(KeywordId::External, "external", KeywordCategory::Definition),
    info(KeywordId::Type, "type", KeywordCategory::Definition),
    info(KeywordId::Record, "record", KeywordCategory::Definition),
    info(KeywordId::Object, "object", KeywordCategory::Definition),
    // Imports
    info(KeywordId::Import, "import", KeywordCategory::Import),
    info(KeywordId::Version, "version", KeywordCategory::Import),
    info(KeywordId::As, "as", KeywordCategory::Import),
    // Control flow / statements
    info(KeywordId::If, "if", KeywordCategory::ControlFlow),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow),
    info(KeywordId::Check, "check", KeywordCategory::ControlFlow),
    info(KeywordId::Checkpanic, "checkpanic", KeywordCategory::ControlFlow),
    // Literals
    info(KeywordId::True, "true", KeywordCategory::Literal),
    info(KeywordId::False, "false", KeywordCategory::Literal),
    info(KeywordId::Null, "null", KeywordCategory::Literal),
    // Simple types
    info(KeywordId::Int, "int", KeywordCategory::SimpleType),
    info(KeywordId::Float, "float", KeywordCategory::SimpleType),
    info(KeywordId::Decimal, "decimal", KeywordCategory::SimpleType),
    info(KeywordId::String, "string", KeywordCategory::SimpleType),
    info(KeywordId::Boolean, "boolean", KeywordCategory::SimpleType),
    info(KeywordId::Byte, "byte", KeywordCategory::SimpleType),
    info(KeywordId::Any, "any", KeywordCategory::SimpleType),
    info(KeywordId::Anydata, "anydata", KeywordCategory::SimpleType),
    info(KeywordId::Json, "json", KeywordCategory::SimpleType),
];

/// Canonical spelling.
///
/// ## Parameters
/// - `id`: Keyword identifier.
///
/// ## Returns
/// - The canonical spelling for `id`.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
///
/// ## Parameters
/// - `id`: Keyword identifier.
///
/// ## Returns
/// - The keyword's [`KeywordCategory`].
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return whether `id` names a builtin simple type (`int`, `string`, `json`, ...).
pub fn is_simple_type(id: KeywordId) -> bool {
    category(id) == KeywordCategory::SimpleType
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Parameters
/// - `s`: Candidate keyword spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling matches this registry.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        since: Since(1, 0),
        stability: Stability::Stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_keyword_round_trips_through_its_spelling() {
        for k in KEYWORDS {
            assert_eq!(from_str(k.canonical), Some(k.id), "{}", k.canonical);
        }
    }

    #[test]
    fn spellings_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for k in KEYWORDS {
            assert!(seen.insert(k.canonical), "duplicate keyword spelling {}", k.canonical);
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(from_str("Function"), None);
        assert_eq!(from_str("IMPORT"), None);
    }

    #[test]
    fn simple_types_are_categorised() {
        for id in [KeywordId::Int, KeywordId::Json, KeywordId::Anydata, KeywordId::Byte] {
            assert!(is_simple_type(id));
        }
        assert!(!is_simple_type(KeywordId::Check));
    }
}
