//! Entity identifiers.

use uuid::Uuid;

/// Generates a random (v4) identifier.
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}

/// True if `id` parses as a UUID.
pub fn is_uuid(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}
