//! Transit-sequence editing.
//!
//! The editor owns the ordered list of transit stops for one trip while an
//! operator rearranges it. [`sequence`] holds the list semantics (the
//! order-equals-index invariant and the replace-all save payload);
//! [`sessions`] keeps live sequences addressable across requests.

pub mod sequence;
pub mod sessions;

pub use sequence::{
    EntryKey, LoadedTransit, NewEntry, PointSnapshot, SavedTransit, TransitEntry, TransitSequence,
};
pub use sessions::{EditorSessions, SessionConfig, SharedSequence};
