// nmimgr/src/nmi/infrastructure/classifier.rs

//! # Category Table and Classifier
//!
//! The table holds one event set per category and answers the pure routing
//! question; the classifier wraps it with the observable side effects (log
//! lines, diagnostic dump, halt) and is what runs on the interrupt path.

use crate::nmi::collections::EventSet;
use crate::nmi::ds::{Category, Decision, Disposition, EventCode, NmiClass, NmiFrame};
use crate::nmi::infrastructure::di::traits::NmiPlatform;
use crate::{nmi_emerg, nmi_notice};

/// One immutable event set per category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTable {
    sets: [EventSet; Category::COUNT],
}

impl CategoryTable {
    /// A table where every category is empty.
    pub const fn empty() -> Self {
        Self {
            sets: [EventSet::new(), EventSet::new(), EventSet::new(), EventSet::new()],
        }
    }

    /// Returns the table with `category` replaced by `set`.
    pub fn with(mut self, category: Category, set: EventSet) -> Self {
        self.sets[category.index()] = set;
        self
    }

    pub fn set(&self, category: Category) -> &EventSet {
        &self.sets[category.index()]
    }

    /// Routes `code` without side effects.
    ///
    /// Evaluation order is Ignore, Debug, Drop, Panic. Ignore short-circuits
    /// everything, Debug only flags a dump and falls through, and the first
    /// routing category that matches decides the disposition.
    pub fn decide(&self, code: EventCode) -> Decision {
        if self.set(Category::Ignore).contains(code) {
            return Decision {
                disposition: Disposition::Suppressed,
                category: Some(Category::Ignore),
                dump: false,
            };
        }

        let dump = self.set(Category::Debug).contains(code);

        let (disposition, category) = if self.set(Category::Drop).contains(code) {
            (Disposition::Suppressed, Some(Category::Drop))
        } else if self.set(Category::Panic).contains(code) {
            (Disposition::Halt, Some(Category::Panic))
        } else {
            (Disposition::Continue, None)
        };

        Decision {
            disposition,
            category,
            dump,
        }
    }

    /// Codes configured in more than one routing category, with the category
    /// that wins and the one it shadows.
    pub fn overlaps(&self) -> impl Iterator<Item = (EventCode, Category, Category)> + '_ {
        const PAIRS: [(Category, Category); 3] = [
            (Category::Ignore, Category::Drop),
            (Category::Ignore, Category::Panic),
            (Category::Drop, Category::Panic),
        ];
        PAIRS.into_iter().flat_map(move |(winner, shadowed)| {
            self.set(winner)
                .intersection(self.set(shadowed))
                .map(move |code| (code, winner, shadowed))
        })
    }
}

/// The dispatcher bound to a table and a platform.
pub struct Classifier<'p> {
    table: CategoryTable,
    platform: &'p dyn NmiPlatform,
}

impl<'p> Classifier<'p> {
    pub fn new(table: CategoryTable, platform: &'p dyn NmiPlatform) -> Self {
        Self { table, platform }
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    /// Handles one NMI delivered on `class` with reason `code`.
    ///
    /// Returns [`Disposition::Suppressed`] for ignored and dropped codes and
    /// [`Disposition::Continue`] for codes nmimgr does not manage. Codes in
    /// the panic set call [`NmiPlatform::halt`] and never return.
    pub fn classify(&self, class: NmiClass, code: EventCode, frame: &NmiFrame) -> Disposition {
        let decision = self.table.decide(code);
        if decision.is_silent() {
            return decision.disposition;
        }

        nmi_notice!(
            "Handling new NMI type:{} event:{:#04x} ({}) on CPU {}",
            class, code, code, frame.cpu
        );

        if decision.dump {
            nmi_notice!("Debug NMI event:{:#04x} ({})", code, code);
            self.platform.dump_context(frame);
        }

        match decision.disposition {
            Disposition::Suppressed => {
                nmi_notice!("Drop NMI event:{:#04x} ({})", code, code);
                Disposition::Suppressed
            }
            Disposition::Halt => {
                nmi_emerg!("Panic on event:{:#04x} ({})", code, code);
                self.platform.halt("Hit explicit panic")
            }
            Disposition::Continue => {
                nmi_notice!("Unmanaged NMI event:{:#04x} ({}), let it pass", code, code);
                Disposition::Continue
            }
        }
    }
}
