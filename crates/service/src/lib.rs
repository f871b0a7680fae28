//! Service layer providing the catalog's business rules on top of models.
//! - Store accessors (`repository`) hide the storage client behind traits.
//! - Services enforce required fields, partial updates and category links.
//! - Failures surface as `ServiceError`; the HTTP layer turns them into envelopes.

pub mod errors;
pub mod category;
pub mod product;
#[cfg(test)]
pub mod test_support;

/// Result of a delete by primary key. Removing nothing is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(u64),
    Missing,
}

impl DeleteOutcome {
    pub fn from_affected(rows: u64) -> Self {
        if rows > 0 { Self::Deleted(rows) } else { Self::Missing }
    }
}

/// Blank strings (empty or whitespace only) count as absent in partial
/// updates, so a stored name can never become blank.
pub(crate) fn supplied(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
