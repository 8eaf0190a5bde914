/// Per-call response shaping configuration.
///
/// `flat_one` collapses single-key wrapper objects (`{select: [...]}`
/// becomes `[...]`, and a single-table result loses its table wrapper).
/// `get_first` additionally collapses sequence results to their first
/// element.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Settings {
    pub flat_one: bool,
    pub get_first: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            flat_one: true,
            get_first: false,
        }
    }
}

impl Settings {
    /// Applies a partial override on top of this layer. Precedence is
    /// strictly by field: an override field that is `None` keeps this
    /// layer's value.
    pub fn with(&self, overrides: &SettingsOverride) -> Self {
        Self {
            flat_one: overrides.flat_one.unwrap_or(self.flat_one),
            get_first: overrides.get_first.unwrap_or(self.get_first),
        }
    }
}

/// A partial [`Settings`] layer: instance-level or per-call overrides that
/// only replace the fields they set.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SettingsOverride {
    pub flat_one: Option<bool>,
    pub get_first: Option<bool>,
}
