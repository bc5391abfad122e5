//! Minecraft identity primitives.
//!
//! Both values arrive from an unauthenticated plugin endpoint, so the shapes
//! are checked before any lookup touches storage.

use uuid::Uuid;

/// Validate a Minecraft username: 3–16 characters of `[A-Za-z0-9_]`.
/// Mojang has never issued names outside this shape.
pub fn validate_mc_username(name: &str) -> bool {
    if name.len() < 3 || name.len() > 16 {
        return false;
    }
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse a Minecraft UUID in canonical form: 32 hex digits with optional
/// hyphens, case-insensitive. Returns `None` for anything else.
///
/// The plugin sends whichever form the server API handed it, so both
/// `069a79f4-44e9-4726-a5be-fca90e38aaf5` and the undashed variant must
/// parse to the same value.
pub fn parse_mc_uuid(raw: &str) -> Option<Uuid> {
    let trimmed = raw.trim();
    match trimmed.len() {
        // hyphenated (36) and simple (32) forms only; Uuid::parse_str also
        // accepts urn: and braced forms, which are not valid plugin input.
        32 | 36 => Uuid::parse_str(trimmed).ok(),
        _ => None,
    }
}
