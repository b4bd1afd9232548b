// nmimgr/src/nmi/api.rs

//! # Public API for the NMI Subsystem
//!
//! Configuration input (the four event lists and the load policy) and the
//! functions that turn it into a loaded module.

use crate::nmi::ds::{Category, LoadError};
use crate::nmi::infrastructure::classifier::CategoryTable;
use crate::nmi::infrastructure::di::container::NmiModule;
use crate::nmi::infrastructure::di::traits::{NmiPlatform, NmiRegistrar};
use crate::nmi::infrastructure::parser::parse_event_list;
use crate::{nmi_err, nmi_info, nmi_notice, nmi_warn, NAME};

/// The raw event lists, one optional range list per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventParams<'a> {
    lists: [Option<&'a str>; Category::COUNT],
}

impl<'a> EventParams<'a> {
    /// No list for any category.
    pub const fn new() -> Self {
        Self {
            lists: [None; Category::COUNT],
        }
    }

    /// Returns the parameters with the list of `category` set to `list`.
    pub fn with(mut self, category: Category, list: &'a str) -> Self {
        self.lists[category.index()] = Some(list);
        self
    }

    pub fn get(&self, category: Category) -> Option<&'a str> {
        self.lists[category.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(Option::is_none)
    }

    /// Collects `nmimgr.events_<category>=<list>` words from a kernel
    /// command line. Other words are ignored; a key given twice keeps its
    /// last value.
    pub fn from_cmdline(cmdline: &'a str) -> Self {
        let mut params = Self::new();
        for word in cmdline.split_ascii_whitespace() {
            let assignment = match word.strip_prefix(NAME).and_then(|rest| rest.strip_prefix('.')) {
                Some(assignment) => assignment,
                None => continue,
            };
            if let Some((key, list)) = assignment.split_once('=') {
                if let Some(category) = Category::from_param_name(key) {
                    params = params.with(category, list);
                }
            }
        }
        params
    }
}

/// What to do with a list that does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParamErrorPolicy {
    /// Log the error, leave the category empty and keep loading.
    #[default]
    Skip,
    /// Fail the load before anything is attached.
    Abort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadPolicy {
    pub on_invalid_param: ParamErrorPolicy,
}

impl LoadPolicy {
    pub const fn strict() -> Self {
        Self {
            on_invalid_param: ParamErrorPolicy::Abort,
        }
    }
}

/// Parses every configured list into a category table.
///
/// Lists are parsed independently: one bad list never prevents the others
/// from loading unless the policy says to abort. Codes present in more than
/// one routing category are reported; precedence settles them at run time.
pub fn build_table(params: &EventParams<'_>, policy: LoadPolicy) -> Result<CategoryTable, LoadError> {
    let mut table = CategoryTable::empty();

    for category in Category::ALL {
        let list = match params.get(category) {
            Some(list) => list,
            None => continue,
        };
        nmi_info!("{}: {}", category, list);

        match parse_event_list(list) {
            Ok(set) => {
                nmi_notice!("Loaded {} ({} codes): {}", category, set.len(), set);
                table = table.with(category, set);
            }
            Err(err) => {
                nmi_err!("Invalid input '{}' for {}: {}", list, category, err);
                if policy.on_invalid_param == ParamErrorPolicy::Abort {
                    return Err(LoadError::InvalidParam(category, err));
                }
            }
        }
    }

    for (code, winner, shadowed) in table.overlaps() {
        nmi_warn!(
            "Event {:#04x} is listed in {} and {}, {} takes precedence",
            code, winner, shadowed, winner
        );
    }

    Ok(table)
}

/// Loads the module: see [`NmiModule::load`].
pub fn load<R: NmiRegistrar>(
    params: &EventParams<'_>,
    policy: LoadPolicy,
    platform: &'static dyn NmiPlatform,
    registrar: R,
) -> Result<NmiModule<R>, LoadError> {
    NmiModule::load(params, policy, platform, registrar)
}

/// Unloads `module`: every class is detached before the classifier goes.
pub fn unload<R: NmiRegistrar>(module: NmiModule<R>) {
    module.unload()
}
