//! Handle types for arena storage
//!
//! Scene nodes and deferred tasks are stored in slot maps so that stale
//! handles are detected by generation instead of aliasing a reused slot.

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a node (container or object) stored in a [`Scene`](crate::scene::Scene)
    pub struct NodeId;

    /// Handle to a scheduled deferred task
    pub struct TaskId;
}
