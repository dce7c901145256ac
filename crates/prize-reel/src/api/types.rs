use serde::Serialize;

use crate::prize::{BulkPrize, Prize};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// How a play is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    /// One animated reel per ticket.
    Animated,
    /// Ticket count exceeds the reel capacity: draw everything at once.
    Bulk,
}

/// Notification from the engine to the hosting page.
/// Queued during `tick`/`spin` and drained by the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RevealEvent {
    /// An animated spin began.
    SpinStarted,
    /// The last reel stopped. One prize per reel, in reel order.
    SpinCompleted { results: Vec<Prize> },
    /// A bulk play finished drawing.
    BulkPrizesGenerated { results: Vec<BulkPrize> },
    /// Whether there is a result set for the page to lay out.
    ResultsChanged { has_results: bool },
}
