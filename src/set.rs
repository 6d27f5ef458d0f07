//! Shared candidate sets and their reference bookkeeping.
//!
//! A [`FormatSet`] holds the candidate codes still acceptable for one
//! dimension of one or more link endpoints. Endpoints do not hold the set
//! directly; they hold an owner slot ([`SlotId`]) whose current target is
//! tracked by the [`FormatRegistry`]. The set keeps the list of slots that
//! reference it, so a merge can rewrite every referencing endpoint in one
//! pass without the endpoints taking any action.
//!
//! Both sets and slots are handles into the registry's arenas. The handle
//! indirection is what lets many endpoints transparently come to share one
//! set: rewriting a slot's table entry retargets the endpoint that holds
//! the slot, wherever it lives.
//!
//! # Ownership invariants
//!
//! - A set's owner list length is its reference count.
//! - Every slot in a set's owner list points back at that set, and every
//!   slot pointing at a set appears in its owner list exactly once.
//! - A set whose last owner detaches is removed from the registry.

use crate::error::{NegotiationError, Result};
use crate::format::FormatCode;
use smallvec::SmallVec;
use std::collections::HashMap;
use tracing::trace;

/// Handle to a live [`FormatSet`] in a [`FormatRegistry`].
///
/// Stale after the set is merged away or its last owner detaches; using a
/// stale handle yields [`NegotiationError::SetNotFound`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SetId(u32);

impl std::fmt::Display for SetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "set#{}", self.0)
    }
}

/// Handle to an owner slot: one external location (a link endpoint's
/// format-set field) that can reference at most one [`FormatSet`].
///
/// The slot's identity is stable across merges; only its target changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u32);

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// A shared candidate set for one negotiable dimension.
///
/// Candidates are opaque integer codes; their meaning comes from the
/// dimension the set was built for (see [`crate::format`]). The list keeps
/// producer order and duplicates: negotiation never sorts or deduplicates.
#[derive(Debug, Default)]
pub struct FormatSet {
    candidates: Vec<FormatCode>,
    owners: SmallVec<[SlotId; 4]>,
}

impl FormatSet {
    pub(crate) fn with_owners(
        candidates: Vec<FormatCode>,
        owners: SmallVec<[SlotId; 4]>,
    ) -> Self {
        Self { candidates, owners }
    }

    /// The candidate codes, in producer order.
    #[inline]
    pub fn candidates(&self) -> &[FormatCode] {
        &self.candidates
    }

    /// The slots currently referencing this set.
    #[inline]
    pub fn owners(&self) -> &[SlotId] {
        &self.owners
    }

    /// Number of owners (the reference count).
    #[inline]
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }
}

/// Arena owning every live candidate set and owner slot.
///
/// All negotiation state flows through one registry: sets are created
/// here, slots attach and detach here, and [`FormatRegistry::merge`]
/// collapses sets here. The registry is single-threaded by design; the
/// driver guarantees no two operations touch the same set concurrently.
#[derive(Debug, Default)]
pub struct FormatRegistry {
    sets: HashMap<SetId, FormatSet>,
    slots: HashMap<SlotId, Option<SetId>>,
    next_set: u32,
    next_slot: u32,
}

impl FormatRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live candidate sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Is the registry empty of live sets?
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Does this handle refer to a live set?
    pub fn contains(&self, set: SetId) -> bool {
        self.sets.contains_key(&set)
    }

    pub(crate) fn insert_set(&mut self, set: FormatSet) -> SetId {
        let id = SetId(self.next_set);
        self.next_set += 1;
        self.sets.insert(id, set);
        id
    }

    pub(crate) fn get(&self, set: SetId) -> Result<&FormatSet> {
        self.sets.get(&set).ok_or(NegotiationError::SetNotFound(set))
    }

    pub(crate) fn remove_set(&mut self, set: SetId) -> Result<FormatSet> {
        self.sets
            .remove(&set)
            .ok_or(NegotiationError::SetNotFound(set))
    }

    pub(crate) fn slot_entry(&mut self, slot: SlotId) -> Result<&mut Option<SetId>> {
        self.slots
            .get_mut(&slot)
            .ok_or(NegotiationError::SlotNotFound(slot))
    }

    // ========================================================================
    // Set construction
    // ========================================================================

    /// Build a set from a literal candidate list.
    ///
    /// Order and duplicates are preserved. An empty list builds an empty
    /// set, which can never merge successfully.
    pub fn from_list(&mut self, codes: &[FormatCode]) -> Result<SetId> {
        let mut candidates = Vec::new();
        candidates.try_reserve_exact(codes.len())?;
        candidates.extend_from_slice(codes);
        Ok(self.insert_set(FormatSet {
            candidates,
            owners: SmallVec::new(),
        }))
    }

    /// Append one candidate to `set`, allocating the set if absent.
    ///
    /// Mirrors the accumulation pattern used when a node declares its
    /// acceptable formats one at a time: the first append creates the set.
    pub fn add_format(&mut self, set: &mut Option<SetId>, code: FormatCode) -> Result<()> {
        let id = match *set {
            Some(id) => id,
            None => {
                let id = self.insert_set(FormatSet::default());
                *set = Some(id);
                id
            }
        };
        let entry = self
            .sets
            .get_mut(&id)
            .ok_or(NegotiationError::SetNotFound(id))?;
        entry.candidates.try_reserve(1)?;
        entry.candidates.push(code);
        Ok(())
    }

    /// The candidate codes of a live set, in producer order.
    pub fn candidates(&self, set: SetId) -> Result<&[FormatCode]> {
        Ok(self.get(set)?.candidates())
    }

    /// The slots currently referencing a live set.
    pub fn owners(&self, set: SetId) -> Result<&[SlotId]> {
        Ok(self.get(set)?.owners())
    }

    /// Reference count of a live set.
    pub fn owner_count(&self, set: SetId) -> Result<usize> {
        Ok(self.get(set)?.owner_count())
    }

    // ========================================================================
    // Owner slots
    // ========================================================================

    /// Create a new, empty owner slot.
    ///
    /// One slot per link endpoint; the slot lives until
    /// [`FormatRegistry::destroy_slot`].
    pub fn create_slot(&mut self) -> SlotId {
        let id = SlotId(self.next_slot);
        self.next_slot += 1;
        self.slots.insert(id, None);
        id
    }

    /// Destroy an owner slot.
    ///
    /// The slot must be detached first; destroying an attached slot is a
    /// contract violation and fails with [`NegotiationError::SlotInUse`].
    pub fn destroy_slot(&mut self, slot: SlotId) -> Result<()> {
        match self.slots.get(&slot) {
            None => Err(NegotiationError::SlotNotFound(slot)),
            Some(Some(_)) => Err(NegotiationError::SlotInUse(slot)),
            Some(None) => {
                self.slots.remove(&slot);
                Ok(())
            }
        }
    }

    /// What a slot currently references, if anything.
    pub fn slot_target(&self, slot: SlotId) -> Result<Option<SetId>> {
        self.slots
            .get(&slot)
            .copied()
            .ok_or(NegotiationError::SlotNotFound(slot))
    }

    /// Attach `slot` to `set`: the slot references the set and the set
    /// counts the slot among its owners.
    ///
    /// The slot must currently be empty (detach first when retargeting).
    pub fn attach(&mut self, set: SetId, slot: SlotId) -> Result<()> {
        match self.slots.get(&slot) {
            None => return Err(NegotiationError::SlotNotFound(slot)),
            Some(Some(_)) => return Err(NegotiationError::SlotOccupied(slot)),
            Some(None) => {}
        }
        let entry = self
            .sets
            .get_mut(&set)
            .ok_or(NegotiationError::SetNotFound(set))?;
        entry.owners.push(slot);
        let refs = entry.owners.len();
        self.slots.insert(slot, Some(set));
        trace!(%set, %slot, refs, "attached owner slot");
        Ok(())
    }

    /// Detach `slot` from whatever set it references.
    ///
    /// No-op when the slot is already empty. Detaching the last owner
    /// destroys the set; any handle to it becomes stale.
    pub fn detach(&mut self, slot: SlotId) -> Result<()> {
        let entry = self.slot_entry(slot)?;
        let Some(set) = entry.take() else {
            return Ok(());
        };
        let fmts = self
            .sets
            .get_mut(&set)
            .ok_or(NegotiationError::SetNotFound(set))?;
        // Linear scan: fan-out per set is bounded by graph degree.
        if let Some(idx) = fmts.owners.iter().position(|&s| s == slot) {
            fmts.owners.remove(idx);
        }
        let remaining = fmts.owners.len();
        trace!(%set, %slot, refs = remaining, "detached owner slot");
        if remaining == 0 {
            self.sets.remove(&set);
        }
        Ok(())
    }

    /// Move ownership identity from `old` to `new` without touching the
    /// reference count or the set itself.
    ///
    /// Used when a link endpoint is relocated but its accepted-format
    /// domain is unchanged. If `old` is empty, or is not actually listed
    /// among the target set's owners, this is a no-op. `new` must be an
    /// empty slot.
    pub fn transfer(&mut self, old: SlotId, new: SlotId) -> Result<()> {
        match self.slots.get(&new) {
            None => return Err(NegotiationError::SlotNotFound(new)),
            Some(Some(_)) => return Err(NegotiationError::SlotOccupied(new)),
            Some(None) => {}
        }
        let Some(set) = self.slot_target(old)? else {
            return Ok(());
        };
        let fmts = self
            .sets
            .get_mut(&set)
            .ok_or(NegotiationError::SetNotFound(set))?;
        let Some(idx) = fmts.owners.iter().position(|&s| s == old) else {
            return Ok(());
        };
        fmts.owners[idx] = new;
        self.slots.insert(new, Some(set));
        self.slots.insert(old, None);
        trace!(%set, %old, %new, "transferred owner slot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_list_preserves_order_and_duplicates() {
        let mut reg = FormatRegistry::new();
        let set = reg.from_list(&[3, 1, 3, 2]).unwrap();
        assert_eq!(reg.candidates(set).unwrap(), &[3, 1, 3, 2]);
        assert_eq!(reg.owner_count(set).unwrap(), 0);
    }

    #[test]
    fn test_add_format_lazily_allocates() {
        let mut reg = FormatRegistry::new();
        let mut set = None;
        reg.add_format(&mut set, 7).unwrap();
        reg.add_format(&mut set, 9).unwrap();
        let id = set.unwrap();
        assert_eq!(reg.candidates(id).unwrap(), &[7, 9]);
    }

    #[test]
    fn test_attach_detach_restores_count() {
        let mut reg = FormatRegistry::new();
        let set = reg.from_list(&[1, 2]).unwrap();
        let a = reg.create_slot();
        let b = reg.create_slot();
        reg.attach(set, a).unwrap();
        reg.attach(set, b).unwrap();
        assert_eq!(reg.owner_count(set).unwrap(), 2);

        reg.detach(b).unwrap();
        assert_eq!(reg.owner_count(set).unwrap(), 1);
        assert_eq!(reg.slot_target(b).unwrap(), None);
        assert_eq!(reg.slot_target(a).unwrap(), Some(set));
    }

    #[test]
    fn test_attach_occupied_slot_fails() {
        let mut reg = FormatRegistry::new();
        let set = reg.from_list(&[1]).unwrap();
        let other = reg.from_list(&[2]).unwrap();
        let slot = reg.create_slot();
        reg.attach(set, slot).unwrap();
        assert!(matches!(
            reg.attach(other, slot),
            Err(NegotiationError::SlotOccupied(_))
        ));
    }

    #[test]
    fn test_last_detach_destroys_set() {
        let mut reg = FormatRegistry::new();
        let set = reg.from_list(&[1, 2]).unwrap();
        let slot = reg.create_slot();
        reg.attach(set, slot).unwrap();
        reg.detach(slot).unwrap();
        assert!(!reg.contains(set));
        assert!(matches!(
            reg.candidates(set),
            Err(NegotiationError::SetNotFound(_))
        ));
    }

    #[test]
    fn test_detach_empty_slot_is_noop() {
        let mut reg = FormatRegistry::new();
        let slot = reg.create_slot();
        reg.detach(slot).unwrap();
        assert_eq!(reg.slot_target(slot).unwrap(), None);
    }

    #[test]
    fn test_transfer_moves_identity_without_count_change() {
        let mut reg = FormatRegistry::new();
        let set = reg.from_list(&[5]).unwrap();
        let old = reg.create_slot();
        let new = reg.create_slot();
        reg.attach(set, old).unwrap();

        reg.transfer(old, new).unwrap();
        assert_eq!(reg.owner_count(set).unwrap(), 1);
        assert_eq!(reg.slot_target(old).unwrap(), None);
        assert_eq!(reg.slot_target(new).unwrap(), Some(set));
        assert_eq!(reg.owners(set).unwrap(), &[new]);
    }

    #[test]
    fn test_transfer_from_empty_slot_is_noop() {
        let mut reg = FormatRegistry::new();
        let old = reg.create_slot();
        let new = reg.create_slot();
        reg.transfer(old, new).unwrap();
        assert_eq!(reg.slot_target(new).unwrap(), None);
    }

    #[test]
    fn test_destroy_slot_requires_detach() {
        let mut reg = FormatRegistry::new();
        let set = reg.from_list(&[1]).unwrap();
        let slot = reg.create_slot();
        reg.attach(set, slot).unwrap();
        assert!(matches!(
            reg.destroy_slot(slot),
            Err(NegotiationError::SlotInUse(_))
        ));
        reg.detach(slot).unwrap();
        reg.destroy_slot(slot).unwrap();
        assert!(matches!(
            reg.slot_target(slot),
            Err(NegotiationError::SlotNotFound(_))
        ));
    }
}
