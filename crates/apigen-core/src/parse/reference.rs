/// Prefix every schema reference is expected to carry.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Trailing name segment of a JSON-pointer-style reference.
///
/// `#/components/schemas/User` → `User`. Resolution is purely textual.
pub fn ref_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}
