// GraphQL name handling
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CoreError, Result};

const NAME_PATTERN: &str = r"^[_A-Za-z][_0-9A-Za-z]*$";

static NAME_RE: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(NAME_PATTERN));

fn name_regex() -> Result<&'static Regex> {
    NAME_RE
        .as_ref()
        .map_err(|e| CoreError::RegexError(e.clone()))
}

/// Returns true if `name` is a valid GraphQL name.
pub fn is_valid_type_name(name: &str) -> bool {
    validate_type_name(name).is_ok()
}

/// Validates a type name against the GraphQL name grammar.
///
/// Names starting with `__` are reserved for introspection and rejected.
pub fn validate_type_name(name: &str) -> Result<()> {
    if name.starts_with("__") || !name_regex()?.is_match(name) {
        return Err(CoreError::invalid_type_name(name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["User", "_internal", "QueryType", "V2Widget", "a"] {
            assert!(validate_type_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "2Fast", "user-profile", "with space", "__Schema", "Ünicode"] {
            assert!(validate_type_name(name).is_err(), "{name} should be invalid");
        }
        assert!(!is_valid_type_name("my.Type"));
    }

    #[test]
    fn test_regex_compiled_once_across_threads() {
        let addresses: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| std::ptr::from_ref(name_regex().unwrap()) as usize))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
