//! Event channel implementation using crossbeam-channel.
//!
//! Connects the pipeline to whatever front end is listening (the CLI
//! progress bar, or nothing at all).

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use super::{CopyEvent, DedupEvent, Event, PipelineEvent, PipelinePhase, ScanEvent};

/// Sends events from the pipeline.
///
/// Cloneable and thread-safe. Sending never fails: with no receiver
/// attached the events are silently discarded, so progress reporting
/// stays optional.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Send a raw event
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }

    /// Report a scan-phase event
    pub fn scan(&self, event: ScanEvent) {
        self.send(Event::Scan(event));
    }

    /// Report a dedup-phase event
    pub fn dedup(&self, event: DedupEvent) {
        self.send(Event::Dedup(event));
    }

    /// Report a copy-phase event
    pub fn copy(&self, event: CopyEvent) {
        self.send(Event::Copy(event));
    }

    /// Report a pipeline lifecycle event
    pub fn pipeline(&self, event: PipelineEvent) {
        self.send(Event::Pipeline(event));
    }

    /// Report a phase transition
    pub fn phase(&self, phase: PipelinePhase) {
        self.pipeline(PipelineEvent::PhaseChanged { phase });
    }
}

/// Receives pipeline events.
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Block until the next event is received
    pub fn recv(&self) -> Option<Event> {
        self.inner.recv().ok()
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&self) -> Option<Event> {
        self.inner.try_recv().ok()
    }

    /// Returns an iterator over received events
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

/// A channel connecting the pipeline to a front end.
pub struct EventChannel;

impl EventChannel {
    /// Create a new unbounded event channel.
    ///
    /// The default choice: events are small and cheap to queue.
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }

    /// Create a bounded event channel with the specified capacity,
    /// for consumers that want backpressure.
    pub fn bounded(capacity: usize) -> (EventSender, EventReceiver) {
        let (sender, receiver) = bounded(capacity);
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// A no-op event sender for runs without progress reporting.
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}
