//! Main-recipient resolution for copy entries.

use super::RecipientEntry;

/// Placeholder written into `header_to` of every Cc/Bcc entry.
pub const MAIN_RECIPIENT_PLACEHOLDER: &str = "%mainRecipient%";

/// Substring replaced on resolution.
///
/// This is one character shorter than [`MAIN_RECIPIENT_PLACEHOLDER`], so a
/// resolved `header_to` keeps a trailing `%` (`main@example.com%`). Receivers
/// of the existing wire format rely on that exact value.
pub const MAIN_RECIPIENT_TOKEN: &str = "%mainRecipient";

/// Returns the email of the first entry without a routing header.
pub(crate) fn main_recipient(entries: &[RecipientEntry]) -> Option<&str> {
    entries
        .iter()
        .find(|e| !e.is_copy())
        .map(|e| e.address().email())
}

/// Points every copy entry's routing header at the main recipient.
///
/// Without a main recipient the token is replaced by an empty string. Entries
/// that were already resolved no longer contain the token and are left as is.
pub(crate) fn resolve_copy_recipients(entries: &mut [RecipientEntry]) {
    let main = main_recipient(entries).unwrap_or_default().to_string();
    let copies = entries.iter().filter(|e| e.is_copy()).count();

    if main.is_empty() && copies > 0 {
        tracing::warn!(copies, "No main recipient; copy entries resolve to an empty address");
    }

    for entry in entries.iter_mut() {
        if let Some(header_to) = entry.header_to.as_mut() {
            if header_to.contains(MAIN_RECIPIENT_TOKEN) {
                *header_to = header_to.replace(MAIN_RECIPIENT_TOKEN, &main);
            }
        }
    }

    tracing::debug!(main = %main, copies, "Resolved copy recipients");
}
