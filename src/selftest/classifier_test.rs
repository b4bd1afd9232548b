// nmimgr/src/selftest/classifier_test.rs

use super::doubles::RecordingPlatform;
use super::{TestCase, TestResult, TestRunner};
use crate::nmi::{
    parse_event_list, Category, CategoryTable, Classifier, Disposition, NmiClass, NmiFrame, ParseError,
};

fn sample_table() -> Result<CategoryTable, ParseError> {
    Ok(CategoryTable::empty()
        .with(Category::Ignore, parse_event_list("99")?)
        .with(Category::Debug, parse_event_list("5,16")?)
        .with(Category::Drop, parse_event_list("5")?)
        .with(Category::Panic, parse_event_list("0-12,99")?))
}

fn test_precedence() -> TestResult {
    let table = match sample_table() {
        Ok(table) => table,
        Err(_) => return TestResult::Fail,
    };
    let ignored = table.decide(99);
    let dropped = table.decide(5);
    let halted = table.decide(7);
    let passed = table.decide(200);
    TestResult::check(
        ignored.disposition == Disposition::Suppressed
            && ignored.category == Some(Category::Ignore)
            && dropped.disposition == Disposition::Suppressed
            && dropped.dump
            && halted.disposition == Disposition::Halt
            && passed.disposition == Disposition::Continue
            && passed.category.is_none(),
    )
}

fn test_classify_without_halt() -> TestResult {
    let table = match sample_table() {
        Ok(table) => table,
        Err(_) => return TestResult::Fail,
    };
    let platform = RecordingPlatform::new();
    let classifier = Classifier::new(table, &platform);
    let frame = NmiFrame::on_cpu(1);

    let results = [
        classifier.classify(NmiClass::Unknown, 99, &frame),
        classifier.classify(NmiClass::Serr, 5, &frame),
        classifier.classify(NmiClass::IoCheck, 16, &frame),
    ];
    TestResult::check(
        results == [Disposition::Suppressed, Disposition::Suppressed, Disposition::Continue]
            && platform.dumps() == 2
            && platform.last_dump_cpu() == Some(1)
            && platform.halts() == 0,
    )
}

/// The halt path stops the machine; it is only exercised by the unit tests.
fn test_classify_halt() -> TestResult {
    TestResult::Skip
}

const CLASSIFIER_TESTS: &[TestCase] = &[
    TestCase {
        name: "precedence",
        func: test_precedence,
        description: "Ignore beats Drop beats Panic, Debug only adds a dump",
    },
    TestCase {
        name: "classify_without_halt",
        func: test_classify_without_halt,
        description: "Suppressed and unmanaged codes return with the right dumps",
    },
    TestCase {
        name: "classify_halt",
        func: test_classify_halt,
        description: "Panic codes halt the system",
    },
];

pub fn run_classifier_tests(runner: &mut TestRunner) {
    runner.run_suite("Classifier", CLASSIFIER_TESTS);
}
