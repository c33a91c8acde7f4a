//! Type-state markers for the recipient lifecycle.
//!
//! A store starts out `Building`: recipients can be added and copy entries
//! still carry the main-recipient placeholder. Resolving it is the only way
//! to reach `Resolved`, where routing headers point at the main recipient.

/// Marker type for a store that still accepts recipients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Building;

/// Marker type for a store whose copy entries have been resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolved;
