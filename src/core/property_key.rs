use crate::core::SymbolData;
use crate::core::{Collect, Gc};

/// Sentinel that opens the engine-internal key namespace. Keys starting
/// with it are never visible to any public enumeration or introspection
/// operation.
pub(crate) const HIDDEN_KEY_PREFIX: char = '\u{ffff}';

#[derive(Clone, Debug, Collect)]
#[collect(no_drop)]
pub enum PropertyKey<'gc> {
    String(String),
    Symbol(Gc<'gc, SymbolData>),
}

impl<'gc> PropertyKey<'gc> {
    /// Key in the reserved internal namespace (`'\u{ffff}' + name`).
    pub(crate) fn hidden(name: &str) -> Self {
        PropertyKey::String(format!("{HIDDEN_KEY_PREFIX}{name}"))
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, PropertyKey::String(s) if s.starts_with(HIDDEN_KEY_PREFIX))
    }

    /// The canonical array index for this key, if any. Symbol keys never
    /// parse as indices: symbols are a distinct variant, not tagged
    /// strings, so they cannot leak index or length-like properties even
    /// when their description looks numeric.
    pub fn array_index(&self) -> Option<u32> {
        match self {
            PropertyKey::String(s) => {
                let parsed = s.parse::<u64>().ok()?;
                if parsed.to_string() == *s && parsed <= 4294967294u64 {
                    Some(parsed as u32)
                } else {
                    None
                }
            }
            PropertyKey::Symbol(_) => None,
        }
    }
}

impl<'gc> From<&str> for PropertyKey<'gc> {
    fn from(s: &str) -> Self {
        PropertyKey::String(s.to_string())
    }
}

impl<'gc> From<String> for PropertyKey<'gc> {
    fn from(s: String) -> Self {
        PropertyKey::String(s)
    }
}

impl<'gc> From<&String> for PropertyKey<'gc> {
    fn from(s: &String) -> Self {
        PropertyKey::String(s.clone())
    }
}

impl<'gc> From<Gc<'gc, SymbolData>> for PropertyKey<'gc> {
    fn from(sym: Gc<'gc, SymbolData>) -> Self {
        PropertyKey::Symbol(sym)
    }
}

impl<'gc> PartialEq for PropertyKey<'gc> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropertyKey::String(s1), PropertyKey::String(s2)) => s1 == s2,
            (PropertyKey::Symbol(sym1), PropertyKey::Symbol(sym2)) => Gc::ptr_eq(*sym1, *sym2),
            _ => false,
        }
    }
}

impl<'gc> Eq for PropertyKey<'gc> {}

impl<'gc> std::hash::Hash for PropertyKey<'gc> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            PropertyKey::String(s) => {
                0u8.hash(state);
                s.hash(state);
            }
            PropertyKey::Symbol(sym) => {
                1u8.hash(state);
                Gc::as_ptr(*sym).hash(state);
            }
        }
    }
}

impl<'gc> std::fmt::Display for PropertyKey<'gc> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyKey::String(s) => write!(f, "{}", s),
            PropertyKey::Symbol(sym) => write!(f, "[symbol {:p}]", Gc::as_ptr(*sym)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_keys_carry_the_sentinel() {
        let key = PropertyKey::hidden("value");
        assert!(key.is_hidden());
        assert!(!PropertyKey::from("value").is_hidden());
    }

    #[test]
    fn canonical_index_detection() {
        assert_eq!(PropertyKey::from("0").array_index(), Some(0));
        assert_eq!(PropertyKey::from("42").array_index(), Some(42));
        assert_eq!(PropertyKey::from("042").array_index(), None);
        assert_eq!(PropertyKey::from("4294967295").array_index(), None);
        assert_eq!(PropertyKey::from("length").array_index(), None);
    }
}
