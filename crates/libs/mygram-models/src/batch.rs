//! Batched lookups for display enrichment.
//!
//! Listing photos or comments needs the owner (and for comments the
//! parent photo) of every row. [`BatchLoad`] fetches all of them with a
//! single `id = ANY(..)` query and returns a lookup table keyed by id.

use std::collections::{BTreeSet, HashMap};

use crate::db::connection::DbConnection;
use crate::prelude::*;

/// Records that can be fetched in bulk by primary key.
pub trait BatchLoad: Sized {
    /// Primary key of a record.
    fn key(&self) -> i64;

    /// Fetches the live records among `ids`. Unknown and soft-deleted ids
    /// are absent from the result.
    fn fetch_many(ids: &[i64], connection: &DbConnection) -> Result<Vec<Self>>;

    /// Fetches the live records among `ids` keyed by id.
    fn load_many<I>(ids: I, connection: &DbConnection) -> Result<HashMap<i64, Self>>
    where
        I: IntoIterator<Item = i64>,
    {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(Self::fetch_many(&ids, connection)?
            .into_iter()
            .map(|record| (record.key(), record))
            .collect())
    }
}

/// Deduplicated, sorted ids.
pub fn unique_ids<I>(ids: I) -> Vec<i64>
where
    I: IntoIterator<Item = i64>,
{
    ids.into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_deduplicated() {
        assert_eq!(unique_ids([3, 1, 3, 2, 1]), vec![1, 2, 3]);
        assert!(unique_ids(Vec::<i64>::new()).is_empty());
    }
}
