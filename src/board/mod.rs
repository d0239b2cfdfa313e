//! Board state manager: state, persistence, drag resolution and gating

pub mod drag;
pub mod entitlement;
pub mod persistence;
pub mod state;
pub mod stats;
pub mod store;

pub use drag::{resolve_drop, DragController, DragItem, DropOutcome};
pub use entitlement::{Gated, GatedAction, UpgradePrompt};
pub use persistence::{MemoryBackend, PersistError, RedbBackend, StateBackend};
pub use state::{BoardState, PersistedBlob};
pub use stats::{weekly_trends, BoardStats, DayTrend};
pub use store::{BoardStore, ColumnRemoval, SubscriptionId};
