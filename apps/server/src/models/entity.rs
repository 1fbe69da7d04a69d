//! Base record shared by every persisted entity.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

/// Server-controlled bookkeeping carried by every stored entity.
///
/// The store owns these values: they are populated on insert, refreshed on update and
/// never taken from request bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Audit {
    pub version: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A persisted record with a store-assigned identifier and mutable business fields.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Type name used in logs, errors and metric labels.
    const NAME: &'static str;
    /// Table holding the rows.
    const TABLE: &'static str;
    /// Path segment under `/api`.
    const COLLECTION: &'static str;
    /// Business columns, in the order the store binds them.
    const COLUMNS: &'static [&'static str];

    /// `None` until the store assigned one.
    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: Option<i64>);

    fn audit(&self) -> &Audit;

    fn audit_mut(&mut self) -> &mut Audit;

    /// Copies the business fields of `changes` onto `self`.
    ///
    /// Identifier and audit fields of `self` are left untouched.
    fn apply_changes(&mut self, changes: &Self);
}

/// Identity equality: two entities are equal iff both identifiers are set and equal.
pub fn same_identity(a: Option<i64>, b: Option<i64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}
