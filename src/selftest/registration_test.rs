// nmimgr/src/selftest/registration_test.rs

use super::doubles::{MockRegistrar, RegistrarEvent::*};
use super::{TestCase, TestResult, TestRunner};
use crate::nmi::{AttachError, Disposition, EventCode, NmiClass, NmiFrame, RegistrationManager, HANDLER_CLASSES};

fn pass(_: NmiClass, _: EventCode, _: &NmiFrame) -> Disposition {
    Disposition::Continue
}

fn test_attach_and_detach() -> TestResult {
    let mut registrar = MockRegistrar::new(HANDLER_CLASSES);
    let attached = {
        let mut manager = RegistrationManager::new(&mut registrar, pass, "selftest");
        manager.attach_all().is_ok() && manager.handles().len() == HANDLER_CLASSES.len()
    };
    TestResult::check(
        attached
            && registrar.attached().is_empty()
            && registrar.events()
                == [
                    Attached(NmiClass::Unknown),
                    Attached(NmiClass::Serr),
                    Attached(NmiClass::IoCheck),
                    Detached(NmiClass::IoCheck),
                    Detached(NmiClass::Serr),
                    Detached(NmiClass::Unknown),
                ],
    )
}

fn test_rollback() -> TestResult {
    let mut registrar =
        MockRegistrar::new(HANDLER_CLASSES).failing_at(2, AttachError::Busy(NmiClass::IoCheck));
    let result = {
        let mut manager = RegistrationManager::new(&mut registrar, pass, "selftest");
        manager.attach_all()
    };
    TestResult::check(
        result == Err(AttachError::Busy(NmiClass::IoCheck))
            && registrar.attached().is_empty()
            && registrar.spurious_releases() == 0
            && registrar.events()
                == [
                    Attached(NmiClass::Unknown),
                    Attached(NmiClass::Serr),
                    Detached(NmiClass::Serr),
                    Detached(NmiClass::Unknown),
                ],
    )
}

fn test_delivery_reaches_handler() -> TestResult {
    let mut registrar = MockRegistrar::new(HANDLER_CLASSES);
    let mut manager = RegistrationManager::new(&mut registrar, pass, "selftest");
    if manager.attach_all().is_err() {
        return TestResult::Fail;
    }
    let host = manager.registrar();
    TestResult::check(
        host.deliver(NmiClass::Serr, 1, &NmiFrame::new()) == Some(Disposition::Continue)
            && host.deliver(NmiClass::Local, 1, &NmiFrame::new()).is_none(),
    )
}

const REGISTRATION_TESTS: &[TestCase] = &[
    TestCase {
        name: "attach_and_detach",
        func: test_attach_and_detach,
        description: "Every class is claimed in order and released in reverse",
    },
    TestCase {
        name: "rollback",
        func: test_rollback,
        description: "A refused class releases the ones already claimed",
    },
    TestCase {
        name: "delivery_reaches_handler",
        func: test_delivery_reaches_handler,
        description: "Only claimed classes reach the entry point",
    },
];

pub fn run_registration_tests(runner: &mut TestRunner) {
    runner.run_suite("Registration", REGISTRATION_TESTS);
}
