//! Status reporting trait

use crate::coordinator::StatusSnapshot;

/// Receiver for status snapshots
///
/// The firmware forwards snapshots to the serial console; tests collect
/// them. Delivery is best effort, a sink that cannot keep up may drop.
pub trait StatusSink {
    /// Deliver one snapshot
    fn report(&mut self, snapshot: &StatusSnapshot);
}
