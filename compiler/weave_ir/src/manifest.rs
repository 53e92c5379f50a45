//! The declarative wiring table.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Reserved section mapping application names to their entry specs.
pub const APPS_SECTION: &str = "apps";

/// Wiring table: section name to ordered `(slot, spec)` pairs.
///
/// Sections keyed by a reference spec declare the slots of that item;
/// the reserved [`APPS_SECTION`] maps each application name to the spec of
/// its entry item.
///
/// The JSON form is an object of arrays of two-element arrays:
///
/// ```json
/// {
///   "apps": [["demo", "github.com/acme/demo/app.App"]],
///   "github.com/acme/demo/app.App": [["Name", "\"demo\""]]
/// }
/// ```
#[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    sections: FxHashMap<String, Vec<(String, String)>>,
}

impl Manifest {
    pub fn new() -> Self {
        Manifest::default()
    }

    /// Declared slots of `key`, in declaration order.
    pub fn section(&self, key: &str) -> Option<&[(String, String)]> {
        self.sections.get(key).map(Vec::as_slice)
    }

    /// The `apps` section, if present.
    pub fn apps(&self) -> Option<&[(String, String)]> {
        self.section(APPS_SECTION)
    }

    /// Entry spec of the named application.
    pub fn entry_spec(&self, application: &str) -> Option<&str> {
        self.apps()?
            .iter()
            .find(|(name, _)| name == application)
            .map(|(_, spec)| spec.as_str())
    }

    /// Replace or create a section. Test and tooling helper.
    pub fn set_section(
        &mut self,
        key: impl Into<String>,
        slots: Vec<(String, String)>,
    ) {
        self.sections.insert(key.into(), slots);
    }
}
