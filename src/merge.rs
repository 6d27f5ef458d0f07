//! The merge engine: intersection of two candidate sets.
//!
//! Merging is what drives negotiation toward a single representation per
//! link. Each successful merge replaces two sets with one holding their
//! common candidates, and transplants every owner of both inputs onto the
//! result. Endpoints never observe an intermediate state: by the time
//! `merge` returns, each former owner of either input references the
//! merged set, and the inputs are gone.

use crate::error::{NegotiationError, Result};
use crate::set::{FormatRegistry, FormatSet, SetId, SlotId};
use smallvec::SmallVec;
use tracing::debug;

impl FormatRegistry {
    /// Merge two candidate sets into one holding their intersection.
    ///
    /// The intersection walks the first set's candidates in order and
    /// keeps each one that also occurs in the second, so the result's
    /// order (and any duplicates) follow the first operand. Quadratic in
    /// the list lengths, which stay in the tens in practice.
    ///
    /// Merging a set with itself returns it unchanged. Otherwise, on
    /// success every owner of either input is rewritten to reference the
    /// result, reference counts add, and both inputs are destroyed.
    ///
    /// # Errors
    ///
    /// [`NegotiationError::NoCommonFormat`] when the intersection is
    /// empty. Neither input is touched: both sets, their candidates, and
    /// all of their owners remain exactly as they were, and the caller is
    /// still responsible for detaching them.
    pub fn merge(&mut self, a: SetId, b: SetId) -> Result<SetId> {
        if a == b {
            self.get(a)?;
            return Ok(a);
        }

        let (left, right) = (self.get(a)?.candidates(), self.get(b)?.candidates());
        let mut common = Vec::new();
        common.try_reserve_exact(left.len().min(right.len()))?;
        for &code in left {
            for &other in right {
                if code == other {
                    common.push(code);
                    break;
                }
            }
        }

        if common.is_empty() {
            debug!(%a, %b, "merge failed: no common format");
            return Err(NegotiationError::NoCommonFormat {
                left: left.to_vec(),
                right: right.to_vec(),
            });
        }

        // Take both inputs out of the arena, then retarget every owner of
        // either onto the result before the inputs are dropped. No slot is
        // observable between those two steps: they happen within this call,
        // and the driver never interleaves operations on one set.
        let first = self.remove_set(a)?;
        let second = self.remove_set(b)?;
        let mut owners: SmallVec<[SlotId; 4]> = SmallVec::new();
        owners.reserve(first.owner_count() + second.owner_count());
        owners.extend(first.owners().iter().copied());
        owners.extend(second.owners().iter().copied());
        let merged = self.insert_set(FormatSet::with_owners(common, owners));
        for &slot in first.owners().iter().chain(second.owners().iter()) {
            *self.slot_entry(slot)? = Some(merged);
        }

        debug!(%a, %b, %merged, "merged candidate sets");
        Ok(merged)
    }
}
