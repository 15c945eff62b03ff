//! Internal utilities

mod slot_allocator;

pub use slot_allocator::SlotAllocator;
