// nmimgr/src/nmi/infrastructure/registration.rs

//! # Registration Manager
//!
//! Attaches one entry point to every interrupt class a registrar exposes,
//! all or nothing, and detaches them in reverse order.

use crate::nmi::ds::{AttachError, HandlerPriority, NmiHandlerFn, RegistrationHandle, MAX_CLASSES};
use crate::nmi::infrastructure::di::traits::NmiRegistrar;
use crate::{nmi_notice, nmi_warn};
use arrayvec::ArrayVec;

pub struct RegistrationManager<R: NmiRegistrar> {
    registrar: R,
    handler: NmiHandlerFn,
    name: &'static str,
    /// Held handles, in acquisition order.
    handles: ArrayVec<RegistrationHandle, MAX_CLASSES>,
}

impl<R: NmiRegistrar> RegistrationManager<R> {
    pub fn new(registrar: R, handler: NmiHandlerFn, name: &'static str) -> Self {
        Self {
            registrar,
            handler,
            name,
            handles: ArrayVec::new(),
        }
    }

    /// Claims every class of the registrar, in the registrar's order.
    ///
    /// On the first refusal every class attached by this call is detached
    /// again, newest first, and the refusal is returned. Calling it while
    /// handles are held fails with [`AttachError::AlreadyAttached`] and
    /// changes nothing.
    pub fn attach_all(&mut self) -> Result<(), AttachError> {
        if !self.handles.is_empty() {
            return Err(AttachError::AlreadyAttached);
        }

        let classes = self.registrar.classes();
        if classes.len() > MAX_CLASSES {
            return Err(AttachError::TooManyClasses);
        }

        for &class in classes {
            // Registered first: nmimgr only manages a specific list and
            // passes every other code on.
            let result = self
                .registrar
                .register(class, self.handler, HandlerPriority::First, self.name);

            if let Err(err) = result {
                nmi_warn!("Unable to register {}: {}", class, err);
                self.detach_all();
                return Err(err);
            }

            self.handles.push(RegistrationHandle::new(class, self.name));
            nmi_notice!("Registered handler for {}", class);
        }

        Ok(())
    }

    /// Releases every held handle, newest first. A no-op when nothing is
    /// attached.
    pub fn detach_all(&mut self) {
        while let Some(handle) = self.handles.pop() {
            self.registrar.unregister(handle.class(), handle.name());
            nmi_notice!("Unregistered handler for {}", handle.class());
        }
    }

    pub fn is_attached(&self) -> bool {
        !self.handles.is_empty()
    }

    /// Held handles in acquisition order.
    pub fn handles(&self) -> &[RegistrationHandle] {
        &self.handles
    }

    pub fn registrar(&self) -> &R {
        &self.registrar
    }
}

impl<R: NmiRegistrar> Drop for RegistrationManager<R> {
    fn drop(&mut self) {
        self.detach_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nmi::ds::{Disposition, EventCode, NmiClass, NmiFrame, HANDLER_CLASSES, NOTIFIER_CLASSES};
    use crate::selftest::doubles::{MockRegistrar, RegistrarEvent::*};

    fn pass(_: NmiClass, _: EventCode, _: &NmiFrame) -> Disposition {
        Disposition::Continue
    }

    #[test]
    fn attaches_every_class_in_order() {
        let mut registrar = MockRegistrar::new(HANDLER_CLASSES);
        let mut manager = RegistrationManager::new(&mut registrar, pass, "test");
        assert_eq!(manager.attach_all(), Ok(()));
        assert!(manager.is_attached());
        let held: Vec<_> = manager.handles().iter().map(|h| h.class()).collect();
        assert_eq!(held, HANDLER_CLASSES);
        assert!(manager.handles().iter().all(|h| h.name() == "test"));
        drop(manager);

        assert_eq!(
            registrar.events(),
            [
                Attached(NmiClass::Unknown),
                Attached(NmiClass::Serr),
                Attached(NmiClass::IoCheck),
                Detached(NmiClass::IoCheck),
                Detached(NmiClass::Serr),
                Detached(NmiClass::Unknown),
            ]
        );
        assert!(registrar.attached().is_empty());
    }

    #[test]
    fn failure_rolls_back_in_reverse_order() {
        for k in 0..HANDLER_CLASSES.len() {
            let failing = HANDLER_CLASSES[k];
            let mut registrar = MockRegistrar::new(HANDLER_CLASSES).failing_at(k, AttachError::Busy(failing));
            let mut manager = RegistrationManager::new(&mut registrar, pass, "test");

            assert_eq!(manager.attach_all(), Err(AttachError::Busy(failing)));
            assert!(!manager.is_attached());
            drop(manager);

            let attached = HANDLER_CLASSES[..k].iter().map(|&c| Attached(c));
            let detached = HANDLER_CLASSES[..k].iter().rev().map(|&c| Detached(c));
            let expected: Vec<_> = attached.chain(detached).collect();
            assert_eq!(registrar.events(), expected.as_slice(), "failing at {}", k);
            assert!(registrar.attached().is_empty());
        }
    }

    #[test]
    fn failed_attach_leaves_manager_reusable() {
        let mut registrar = MockRegistrar::new(HANDLER_CLASSES)
            .failing_at(2, AttachError::InvalidClass(NmiClass::IoCheck));
        {
            let mut manager = RegistrationManager::new(&mut registrar, pass, "test");
            assert!(manager.attach_all().is_err());
        }
        registrar.clear_failure();
        let mut manager = RegistrationManager::new(&mut registrar, pass, "test");
        assert_eq!(manager.attach_all(), Ok(()));
        assert_eq!(manager.handles().len(), 3);
    }

    #[test]
    fn detach_all_twice_releases_once() {
        let mut registrar = MockRegistrar::new(NOTIFIER_CLASSES);
        let mut manager = RegistrationManager::new(&mut registrar, pass, "test");
        manager.attach_all().unwrap();
        manager.detach_all();
        manager.detach_all();
        drop(manager);
        assert_eq!(registrar.events(), [Attached(NmiClass::Unknown), Detached(NmiClass::Unknown)]);
        assert_eq!(registrar.spurious_releases(), 0);
    }

    #[test]
    fn second_attach_is_refused_without_side_effects() {
        let mut registrar = MockRegistrar::new(NOTIFIER_CLASSES);
        let mut manager = RegistrationManager::new(&mut registrar, pass, "test");
        manager.attach_all().unwrap();
        assert_eq!(manager.attach_all(), Err(AttachError::AlreadyAttached));
        assert_eq!(manager.handles().len(), 1);
        assert_eq!(manager.registrar().attached(), [NmiClass::Unknown]);
    }

    #[test]
    fn oversized_class_list_is_refused() {
        const TOO_MANY: &[NmiClass] = &[
            NmiClass::Local,
            NmiClass::Unknown,
            NmiClass::Serr,
            NmiClass::IoCheck,
            NmiClass::Unknown,
        ];
        let mut registrar = MockRegistrar::new(TOO_MANY);
        let mut manager = RegistrationManager::new(&mut registrar, pass, "test");
        assert_eq!(manager.attach_all(), Err(AttachError::TooManyClasses));
        drop(manager);
        assert!(registrar.events().is_empty());
    }
}
