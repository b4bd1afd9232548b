// nmimgr/src/selftest/doubles.rs

//! # Host Doubles
//!
//! A registrar and a platform that record what nmimgr asks of the host. They
//! are usable both from the in-kernel self tests and from host unit tests.

use crate::nmi::{
    AttachError, Disposition, EventCode, HandlerPriority, NmiClass, NmiFrame, NmiHandlerFn,
    NmiPlatform, NmiRegistrar, MAX_CLASSES,
};
use arrayvec::ArrayVec;
use core::sync::atomic::{AtomicUsize, Ordering};

const NO_CPU: usize = usize::MAX;

/// Platform counting dumps and halts. A halt panics with `halt: <reason>`
/// so callers can observe it with an unwinding harness.
pub struct RecordingPlatform {
    dumps: AtomicUsize,
    halts: AtomicUsize,
    last_dump_cpu: AtomicUsize,
}

impl RecordingPlatform {
    pub const fn new() -> Self {
        Self {
            dumps: AtomicUsize::new(0),
            halts: AtomicUsize::new(0),
            last_dump_cpu: AtomicUsize::new(NO_CPU),
        }
    }

    pub fn dumps(&self) -> usize {
        self.dumps.load(Ordering::Relaxed)
    }

    pub fn halts(&self) -> usize {
        self.halts.load(Ordering::Relaxed)
    }

    /// CPU of the most recent dumped frame.
    pub fn last_dump_cpu(&self) -> Option<usize> {
        match self.last_dump_cpu.load(Ordering::Relaxed) {
            NO_CPU => None,
            cpu => Some(cpu),
        }
    }
}

impl Default for RecordingPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl NmiPlatform for RecordingPlatform {
    fn dump_context(&self, frame: &NmiFrame) {
        self.dumps.fetch_add(1, Ordering::Relaxed);
        self.last_dump_cpu.store(frame.cpu, Ordering::Relaxed);
    }

    fn halt(&self, reason: &str) -> ! {
        self.halts.fetch_add(1, Ordering::Relaxed);
        panic!("halt: {}", reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrarEvent {
    Attached(NmiClass),
    Detached(NmiClass),
}

const EVENT_LOG_CAPACITY: usize = 32;

/// Registrar for a fixed list of classes that keeps the registered entry
/// points so NMIs can be delivered through them.
pub struct MockRegistrar {
    classes: &'static [NmiClass],
    attached: ArrayVec<NmiClass, MAX_CLASSES>,
    handlers: ArrayVec<NmiHandlerFn, MAX_CLASSES>,
    events: ArrayVec<RegistrarEvent, EVENT_LOG_CAPACITY>,
    failure: Option<(usize, AttachError)>,
    register_calls: usize,
    spurious_releases: usize,
}

impl MockRegistrar {
    pub fn new(classes: &'static [NmiClass]) -> Self {
        Self {
            classes,
            attached: ArrayVec::new(),
            handlers: ArrayVec::new(),
            events: ArrayVec::new(),
            failure: None,
            register_calls: 0,
            spurious_releases: 0,
        }
    }

    /// Makes the `call`-th `register` (counting from zero) fail with `err`.
    pub fn failing_at(mut self, call: usize, err: AttachError) -> Self {
        self.failure = Some((call, err));
        self.register_calls = 0;
        self
    }

    pub fn clear_failure(&mut self) {
        self.failure = None;
        self.register_calls = 0;
    }

    /// Successful registrations and releases, oldest first.
    pub fn events(&self) -> &[RegistrarEvent] {
        &self.events
    }

    /// Currently attached classes, in attach order.
    pub fn attached(&self) -> &[NmiClass] {
        &self.attached
    }

    /// Releases of classes that were not attached.
    pub fn spurious_releases(&self) -> usize {
        self.spurious_releases
    }

    /// Delivers an NMI the way the host would: through the entry point
    /// registered for `class`. `None` when nothing is attached to it.
    pub fn deliver(&self, class: NmiClass, code: EventCode, frame: &NmiFrame) -> Option<Disposition> {
        let slot = self.attached.iter().position(|&c| c == class)?;
        Some((self.handlers[slot])(class, code, frame))
    }

    fn record(&mut self, event: RegistrarEvent) {
        let _ = self.events.try_push(event);
    }
}

impl NmiRegistrar for MockRegistrar {
    fn classes(&self) -> &'static [NmiClass] {
        self.classes
    }

    fn register(
        &mut self,
        class: NmiClass,
        handler: NmiHandlerFn,
        _priority: HandlerPriority,
        _name: &'static str,
    ) -> Result<(), AttachError> {
        let call = self.register_calls;
        self.register_calls += 1;

        if let Some((at, err)) = self.failure {
            if at == call {
                return Err(err);
            }
        }
        if self.attached.contains(&class) {
            return Err(AttachError::Busy(class));
        }
        if self.attached.is_full() {
            return Err(AttachError::TooManyClasses);
        }

        self.attached.push(class);
        self.handlers.push(handler);
        self.record(RegistrarEvent::Attached(class));
        Ok(())
    }

    fn unregister(&mut self, class: NmiClass, _name: &'static str) {
        match self.attached.iter().position(|&c| c == class) {
            Some(slot) => {
                self.attached.remove(slot);
                self.handlers.remove(slot);
                self.record(RegistrarEvent::Detached(class));
            }
            None => self.spurious_releases += 1,
        }
    }
}
