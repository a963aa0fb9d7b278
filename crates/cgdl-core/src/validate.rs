//! Identifier grammar shared by class names, node labels and edge endpoints.
//!
//! An identifier may not be blank, and may not contain two adjacent
//! non-alphanumeric characters unless one of them is a space, hyphen or
//! apostrophe. `"Hello, world"`, `"O'Brien"` and `"multi-word"` pass;
//! `"bad::label"` and `"what?!"` do not. Alphanumeric means any Unicode
//! letter or digit, not just ASCII.

use thiserror::Error;

const ALLOWED_NON_ALNUM: [char; 3] = [' ', '-', '\''];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("Value may not be empty.")]
    Empty,
    #[error("Contains forbidden consecutive non-alphanumeric characters.")]
    ForbiddenDigraph { first: char, second: char },
}

/// Checks a class name or label against the identifier grammar.
///
/// # Errors
///
/// Returns [`IdentifierError::Empty`] for blank input and
/// [`IdentifierError::ForbiddenDigraph`] for the first offending pair.
pub fn validate_class_or_label(value: &str) -> Result<(), IdentifierError> {
    if value.trim().is_empty() {
        return Err(IdentifierError::Empty);
    }
    match find_forbidden_digraph(value) {
        Some((first, second)) => Err(IdentifierError::ForbiddenDigraph { first, second }),
        None => Ok(()),
    }
}

#[must_use]
pub fn has_forbidden_digraph(value: &str) -> bool {
    find_forbidden_digraph(value).is_some()
}

fn find_forbidden_digraph(value: &str) -> Option<(char, char)> {
    let mut chars = value.chars().peekable();
    while let Some(first) = chars.next() {
        let Some(&second) = chars.peek() else {
            break;
        };
        if !first.is_alphanumeric()
            && !second.is_alphanumeric()
            && !ALLOWED_NON_ALNUM.contains(&first)
            && !ALLOWED_NON_ALNUM.contains(&second)
        {
            return Some((first, second));
        }
    }
    None
}
