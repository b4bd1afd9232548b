// nmimgr/src/nmi/infrastructure/di/container.rs

//! # NMI Module Container
//!
//! `NmiModule` ties the pieces together for one load/unload cycle: the
//! category table built from the parameters, the globally installed
//! classifier and the registration manager holding the host hooks.

use super::traits::{NmiPlatform, NmiRegistrar};
use super::{install, nmi_entry, uninstall};
use crate::nmi::api::{build_table, EventParams, LoadPolicy};
use crate::nmi::ds::LoadError;
use crate::nmi::infrastructure::classifier::Classifier;
use crate::nmi::infrastructure::registration::RegistrationManager;
use crate::{nmi_notice, nmi_warn, NAME, VERSION};

/// A loaded nmimgr instance. Dropping it detaches every class and removes
/// the classifier.
pub struct NmiModule<R: NmiRegistrar> {
    registration: RegistrationManager<R>,
}

impl<R: NmiRegistrar> NmiModule<R> {
    /// Builds the category table, installs the classifier and claims every
    /// class of `registrar`.
    ///
    /// The classifier is installed before the first class is attached so no
    /// delivered NMI finds it missing. On failure nothing stays installed or
    /// attached and the host keeps running without NMI management.
    pub fn load(
        params: &EventParams<'_>,
        policy: LoadPolicy,
        platform: &'static dyn NmiPlatform,
        registrar: R,
    ) -> Result<Self, LoadError> {
        nmi_notice!("Loaded module v{}", VERSION);

        let table = build_table(params, policy)?;
        if let Err(err) = install(Classifier::new(table, platform)) {
            nmi_warn!("NMI management not available: {}", err);
            return Err(err);
        }

        let mut registration = RegistrationManager::new(registrar, nmi_entry, NAME);
        if let Err(err) = registration.attach_all() {
            nmi_warn!("NMI management not available: {}", err);
            uninstall();
            return Err(err.into());
        }

        Ok(Self { registration })
    }

    /// Detaches every class and removes the classifier.
    pub fn unload(self) {
        drop(self);
    }

    pub fn registration(&self) -> &RegistrationManager<R> {
        &self.registration
    }
}

impl<R: NmiRegistrar> Drop for NmiModule<R> {
    fn drop(&mut self) {
        self.registration.detach_all();
        uninstall();
        nmi_notice!("Unloaded module");
    }
}
