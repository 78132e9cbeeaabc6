//! Lock-free control mailbox between a control thread and the renderer.
//!
//! The mailbox is a one-slot `crossbeam-channel`. The control thread posts
//! [`ControlUpdate`]s through a [`ControlSender`]; the renderer takes at most
//! one pending update per block through a [`ControlReceiver`] without
//! blocking or allocating.
//!
//! If the slot is still occupied when a new update is posted, the sender
//! pulls the stale record back out, merges the new fields over it, and
//! posts the merged record. The renderer therefore always sees the latest
//! value of every field sent since its last block.
//!
//! ```rust
//! use pulse2_synth::{ControlUpdate, Waveform, control_channel};
//!
//! let (tx, rx) = control_channel();
//! tx.post(ControlUpdate { osc1_kind: Some(Waveform::Square), ..Default::default() });
//! tx.post(ControlUpdate { sync: Some(true), ..Default::default() });
//!
//! let update = rx.take().unwrap();
//! assert_eq!(update.osc1_kind, Some(Waveform::Square));
//! assert_eq!(update.sync, Some(true));
//! assert!(rx.take().is_none());
//! ```

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};

use crate::control::ControlUpdate;

/// Create a connected sender/receiver pair with a single pending slot.
pub fn control_channel() -> (ControlSender, ControlReceiver) {
    let (tx, rx) = bounded(1);
    let sender = ControlSender {
        tx,
        reclaim: rx.clone(),
    };
    (sender, ControlReceiver { rx })
}

/// What happened to a posted update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Posted {
    /// The slot was empty; the update is pending as sent.
    Queued,
    /// An undelivered update was waiting; the two were merged.
    Merged,
    /// The update had no fields and was dropped.
    Empty,
}

/// Producer half, owned by the control thread.
///
/// Not `Clone`: the mailbox has exactly one producer.
#[derive(Debug)]
pub struct ControlSender {
    tx: Sender<ControlUpdate>,
    /// Lets the producer take back a stale update to merge it.
    reclaim: Receiver<ControlUpdate>,
}

impl ControlSender {
    /// Post an update without blocking.
    ///
    /// Never fails: if the renderer has gone away the update simply
    /// stays pending.
    pub fn post(&self, update: ControlUpdate) -> Posted {
        if update.is_empty() {
            return Posted::Empty;
        }

        let mut outcome = Posted::Queued;
        let mut next = update;
        loop {
            match self.tx.try_send(next) {
                Ok(()) => return outcome,
                Err(TrySendError::Full(rejected)) => {
                    next = rejected;
                    // The renderer may drain the slot between the two calls,
                    // in which case there is nothing to merge and we retry.
                    if let Ok(mut stale) = self.reclaim.try_recv() {
                        stale.merge(&next);
                        next = stale;
                        outcome = Posted::Merged;

                        #[cfg(feature = "tracing")]
                        tracing::debug!(
                            fields = next.len(),
                            "merged with undelivered control update"
                        );
                    }
                }
                // Unreachable while `reclaim` is alive; kept for exhaustiveness.
                Err(TrySendError::Disconnected(_)) => return outcome,
            }
        }
    }

    /// `true` if an update is waiting for the renderer.
    pub fn is_pending(&self) -> bool {
        !self.tx.is_empty()
    }
}

/// Consumer half, owned by the renderer.
#[derive(Debug)]
pub struct ControlReceiver {
    rx: Receiver<ControlUpdate>,
}

impl ControlReceiver {
    /// Take the pending update, if any. Never blocks.
    #[inline]
    pub fn take(&self) -> Option<ControlUpdate> {
        self.rx.try_recv().ok()
    }
}
