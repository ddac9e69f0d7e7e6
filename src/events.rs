//! Results of work that finishes off the tick thread.
//!
//! Relocations and border reports complete whenever the server or the
//! network gets around to it. They post an [`Event`] here instead of acting
//! directly, and the cycle picks events up on its next tick, so their
//! follow-ups never overlap with the cycle itself.

use crate::host::OccupantId;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Relocated { occupant: OccupantId, success: bool },
    /// HTTP status of a border report, or why it never got one.
    Reported(Result<u16, String>),
}

#[derive(Debug, Clone)]
pub struct Mailbox(mpsc::UnboundedSender<Event>);

#[derive(Debug)]
pub struct Events(mpsc::UnboundedReceiver<Event>);

pub fn channel() -> (Mailbox, Events) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Mailbox(tx), Events(rx))
}

impl Mailbox {
    pub fn post(&self, event: Event) {
        // receiver only goes away on shutdown, late events can be dropped
        if self.0.send(event).is_err() {
            log::trace!("event posted after shutdown");
        }
    }
    pub fn completion(&self, occupant: OccupantId) -> Completion {
        Completion { occupant, mailbox: self.clone() }
    }
}

impl Events {
    /// Next event already waiting, without blocking.
    pub fn try_next(&mut self) -> Option<Event> {
        self.0.try_recv().ok()
    }
    pub async fn next(&mut self) -> Option<Event> {
        self.0.recv().await
    }
}

/// Handed to [`crate::Host::relocate`] to report how the move went.
#[derive(Debug)]
#[must_use = "the relocation never reports back unless completed"]
pub struct Completion {
    occupant: OccupantId,
    mailbox: Mailbox,
}
impl Completion {
    pub fn occupant(&self) -> OccupantId {
        self.occupant
    }
    pub fn complete(self, success: bool) {
        self.mailbox.post(Event::Relocated { occupant: self.occupant, success });
    }
}
