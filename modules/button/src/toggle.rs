//! Switching between the primary and alternate display format.

use crate::click::ClickButton;
use tracing::debug;
use waybutton_rs_core::ConfigView;

/// Config key naming the button that flips formats.
pub const ALT_CLICK_KEY: &str = "format-alt-click";

/// Config key holding the alternate format.
pub const ALT_FORMAT_KEY: &str = "format-alt";

/// Which format a module is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleState {
    pub alternate: bool,
    pub active_format: String,
}

/// Tracks the alternate-format flag of one module.
///
/// The active format is always either the primary format captured at
/// construction or the configured `format-alt`.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use waybutton_rs_button::{ClickButton, FormatToggle};
/// use waybutton_rs_core::ConfigView;
///
/// let config = json!({ "format-alt": "{percentage}%", "format-alt-click": 3 });
/// let view = ConfigView::new(&config);
/// let mut toggle = FormatToggle::new("{icon}");
///
/// assert!(toggle.on_click(view, ClickButton::Secondary));
/// assert_eq!(toggle.active_format(), "{percentage}%");
/// assert!(!toggle.on_click(view, ClickButton::Primary));
/// assert!(toggle.on_click(view, ClickButton::Secondary));
/// assert_eq!(toggle.active_format(), "{icon}");
/// ```
#[derive(Debug, Clone)]
pub struct FormatToggle {
    primary: String,
    state: ToggleState,
}

impl FormatToggle {
    #[must_use]
    pub fn new(primary: impl Into<String>) -> Self {
        let primary = primary.into();
        Self {
            state: ToggleState {
                alternate: false,
                active_format: primary.clone(),
            },
            primary,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ToggleState {
        &self.state
    }

    #[must_use]
    pub fn active_format(&self) -> &str {
        &self.state.active_format
    }

    #[must_use]
    pub const fn is_alternate(&self) -> bool {
        self.state.alternate
    }

    #[must_use]
    pub fn primary_format(&self) -> &str {
        &self.primary
    }

    /// React to a click. Returns whether the click was the toggle trigger.
    ///
    /// Only a click from the button configured in `format-alt-click` flips
    /// the flag; any other click leaves the state untouched.
    pub fn on_click(&mut self, config: ConfigView<'_>, button: ClickButton) -> bool {
        let Some(trigger) = config.get(ALT_CLICK_KEY).as_uint() else {
            return false;
        };
        if u64::from(button.code()) != trigger {
            return false;
        }

        self.state.alternate = !self.state.alternate;
        self.state.active_format = match config.get(ALT_FORMAT_KEY).as_str() {
            Some(alt) if self.state.alternate => alt.to_owned(),
            _ => self.primary.clone(),
        };
        debug!(
            alternate = self.state.alternate,
            format = %self.state.active_format,
            "toggled format"
        );
        true
    }
}
