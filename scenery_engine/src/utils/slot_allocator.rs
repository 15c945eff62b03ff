/// Hands out sequential `u32` slot indices up to a fixed capacity.
///
/// Texture slots map one-to-one onto texture units, so indices are never
/// recycled individually: the only way to get slots back is `reset()`.
///
/// # Example
///
/// ```ignore
/// let mut alloc = SlotAllocator::with_capacity(2);
/// let a = alloc.alloc();  // Some(0)
/// let b = alloc.alloc();  // Some(1)
/// let c = alloc.alloc();  // None (exhausted)
/// alloc.reset();
/// let d = alloc.alloc();  // Some(0)
/// ```
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    next_id: u32,
    capacity: u32,
}

impl SlotAllocator {
    /// Create an allocator that can hand out `capacity` slots
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            next_id: 0,
            capacity: u32::try_from(capacity).unwrap_or(u32::MAX),
        }
    }

    /// Allocate the next slot index, or `None` when every slot is taken
    pub fn alloc(&mut self) -> Option<u32> {
        if self.is_full() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        Some(id)
    }

    /// Return every slot to the pool
    pub fn reset(&mut self) {
        self.next_id = 0;
    }

    /// Give back the most recently allocated slot
    ///
    /// Used when the work the slot was reserved for fails.
    pub fn release_last(&mut self) {
        self.next_id = self.next_id.saturating_sub(1);
    }

    /// Number of currently allocated slots
    pub fn len(&self) -> u32 {
        self.next_id
    }

    /// Maximum number of slots
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Number of slots still available
    pub fn remaining(&self) -> u32 {
        self.capacity - self.next_id
    }

    /// Whether every slot is allocated
    pub fn is_full(&self) -> bool {
        self.next_id >= self.capacity
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "slot_allocator_tests.rs"]
mod tests;
