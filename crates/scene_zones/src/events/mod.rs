//! Zoning change notifications
//!
//! Observers register for the event types they care about and are called
//! synchronously when the manager fires one. A handler returning `true`
//! consumes the event and stops delivery to later handlers.

use std::collections::HashMap;

use crate::scene::{ObjectId, AABB};
use crate::zones::ZoneRange;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoningEventType {
    /// Membership was recomputed over an area
    ZoningChanged,
    /// A zone space received a range of zone IDs
    ZonesRegistered,
    /// A zone space released its zone IDs
    ZonesUnregistered,
    /// The zone ID space was compacted
    ZonesCompacted,
}

/// Event fired by the zone manager
#[derive(Debug, Clone, PartialEq)]
pub enum ZoningEvent {
    /// Objects in `area` were rezoned
    ZoningChanged {
        /// Area that was rescanned
        area: AABB,
        /// Number of active zones after the update
        active_zones: u32,
    },
    /// `space` now owns `range`
    ZonesRegistered {
        /// The zone space
        space: ObjectId,
        /// Its newly allocated range
        range: ZoneRange,
    },
    /// `space` gave back `range`
    ZonesUnregistered {
        /// The zone space
        space: ObjectId,
        /// The range it held
        range: ZoneRange,
    },
    /// Zone IDs were reassigned to remove holes
    ZonesCompacted {
        /// Allocated zone count before compaction
        allocated_before: u32,
        /// Allocated zone count after compaction
        allocated_after: u32,
    },
}

impl ZoningEvent {
    /// Type of this event
    pub fn event_type(&self) -> ZoningEventType {
        match self {
            Self::ZoningChanged { .. } => ZoningEventType::ZoningChanged,
            Self::ZonesRegistered { .. } => ZoningEventType::ZonesRegistered,
            Self::ZonesUnregistered { .. } => ZoningEventType::ZonesUnregistered,
            Self::ZonesCompacted { .. } => ZoningEventType::ZonesCompacted,
        }
    }
}

/// Zoning event handler trait
/// Returns true if event was consumed (stops forwarding)
pub trait ZoningEventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &ZoningEvent) -> bool;
}

impl<F> ZoningEventHandler for F
where
    F: FnMut(&ZoningEvent) -> bool,
{
    fn on_event(&mut self, event: &ZoningEvent) -> bool {
        self(event)
    }
}

/// Handler registry with immediate delivery
#[derive(Default)]
pub struct ZoningSignal {
    handlers: HashMap<ZoningEventType, Vec<Box<dyn ZoningEventHandler>>>,
}

impl ZoningSignal {
    /// Create a signal with no handlers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a specific event type
    pub fn register_handler(&mut self, event_type: ZoningEventType, handler: Box<dyn ZoningEventHandler>) {
        self.handlers.entry(event_type).or_default().push(handler);
    }

    /// Deliver an event to the handlers registered for its type
    /// Stops on first handler that returns true (consumed)
    pub fn fire(&mut self, event: &ZoningEvent) {
        if let Some(handlers) = self.handlers.get_mut(&event.event_type()) {
            for handler in handlers.iter_mut() {
                if handler.on_event(event) {
                    break;
                }
            }
        }
    }

    /// Number of handlers registered for an event type
    pub fn num_handlers(&self, event_type: ZoningEventType) -> usize {
        self.handlers.get(&event_type).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for ZoningSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoningSignal")
            .field("event_types", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
