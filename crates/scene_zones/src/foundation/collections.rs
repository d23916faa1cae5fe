//! Specialized collection types

use smallvec::SmallVec;

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Handle into the object/zone membership table
    pub struct ZoneListHandle;
}

/// Number of zone IDs stored inline before spilling to the heap
pub const INLINE_ZONES: usize = 8;

/// Small inline list of zone IDs
pub type ZoneIdList = SmallVec<[u32; INLINE_ZONES]>;
