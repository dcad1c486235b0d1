//! Recipient string classification

use alloy::primitives::Address;

/// Shape of a user-entered recipient string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientKind {
    /// Literal chain address; no external call needed
    Address(Address),
    /// Domain-style name to resolve through the registry
    Name(String),
    /// Matches neither shape; rejected without any external call
    Invalid,
}

/// Classify a recipient string.
///
/// A literal address is the fixed `0x` prefix plus 40 hex characters.
/// Any string containing a `.` separator is treated as a resolvable
/// name — registries serve many TLDs, not just `.eth`.
pub fn classify_recipient(input: &str) -> RecipientKind {
    let trimmed = input.trim();

    if trimmed.len() == 42 && trimmed.starts_with("0x") {
        match trimmed.parse::<Address>() {
            Ok(address) => return RecipientKind::Address(address),
            Err(_) => return RecipientKind::Invalid,
        }
    }

    if trimmed.contains('.') && !trimmed.starts_with('.') && !trimmed.ends_with('.') {
        return RecipientKind::Name(trimmed.to_string());
    }

    RecipientKind::Invalid
}
