//! Name-pattern-driven access derivation.
//!
//! When a method declares no explicit access level, the emitted access is
//! derived from the member's source name. The mapping is a small, pure
//! function of `(member name, declaring class name)`:
//!
//! | pattern | derived access |
//! |---|---|
//! | `_ClassName__attr` (name-mangled private) | `Private` |
//! | `__dunder__` (leading and trailing double underscore) | `Public` |
//! | `_name` (single leading underscore, not dunder) | `Protected` |
//! | anything else | `Public` |

use crate::metadata::signature::Access;

/// Derives the access level of a member from its name.
///
/// `class_name` is the simple name of the declaring class; it is needed to
/// recognize the name-mangled private form `_ClassName__attr`.
///
/// # Examples
///
/// ```rust
/// use clasp::metadata::signature::Access;
/// use clasp::metadata::synthesis::access_from_name;
///
/// assert_eq!(access_from_name("call", "Sample"), Access::Public);
/// assert_eq!(access_from_name("_helper", "Sample"), Access::Protected);
/// assert_eq!(access_from_name("__init__", "Sample"), Access::Public);
/// assert_eq!(access_from_name("_Sample__secret", "Sample"), Access::Private);
/// ```
#[must_use]
pub fn access_from_name(name: &str, class_name: &str) -> Access {
    if is_mangled_private(name, class_name) {
        Access::Private
    } else if name.starts_with("__") && name.ends_with("__") {
        Access::Public
    } else if name.starts_with('_') {
        Access::Protected
    } else {
        Access::Public
    }
}

/// True for the name-mangled private form `_ClassName__attr`.
fn is_mangled_private(name: &str, class_name: &str) -> bool {
    let Some(rest) = name.strip_prefix('_') else {
        return false;
    };
    let Some(attr) = rest.strip_prefix(class_name).and_then(|r| r.strip_prefix("__")) else {
        return false;
    };
    !attr.is_empty() && attr.chars().all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_are_public() {
        assert_eq!(access_from_name("call", "Sample"), Access::Public);
        assert_eq!(access_from_name("returnZero", "Sample"), Access::Public);
    }

    #[test]
    fn dunder_names_are_public() {
        assert_eq!(access_from_name("__init__", "Sample"), Access::Public);
        assert_eq!(access_from_name("__call__", "Sample"), Access::Public);
    }

    #[test]
    fn single_leading_underscore_is_protected() {
        assert_eq!(access_from_name("_helper", "Sample"), Access::Protected);
        assert_eq!(access_from_name("_run_once", "Sample"), Access::Protected);
    }

    #[test]
    fn mangled_names_are_private() {
        assert_eq!(access_from_name("_Sample__secret", "Sample"), Access::Private);
        assert_eq!(access_from_name("_Sample__do_it", "Sample"), Access::Private);
    }

    #[test]
    fn mangling_must_match_the_declaring_class() {
        // Mangled against a different class: falls through to the single
        // leading underscore rule.
        assert_eq!(access_from_name("_Other__secret", "Sample"), Access::Protected);
    }

    #[test]
    fn mangled_form_requires_an_attribute() {
        assert_eq!(access_from_name("_Sample__", "Sample"), Access::Protected);
    }
}
