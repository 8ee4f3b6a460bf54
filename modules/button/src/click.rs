//! Click identity, click actions and routing.

use crate::toggle::FormatToggle;
use std::fmt;
use tracing::debug;
use waybutton_rs_core::{ButtonError, ConfigView};

/// Pointer button that produced a click.
///
/// Codes follow the X11/GDK numbering Waybar configs use in
/// `format-alt-click`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickButton {
    /// Button 1
    Primary,
    /// Button 2
    Middle,
    /// Button 3
    Secondary,
    /// Button 8
    Backward,
    /// Button 9
    Forward,
    /// Any other button code
    Other(u32),
}

impl ClickButton {
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        match code {
            1 => Self::Primary,
            2 => Self::Middle,
            3 => Self::Secondary,
            8 => Self::Backward,
            9 => Self::Forward,
            other => Self::Other(other),
        }
    }

    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Primary => 1,
            Self::Middle => 2,
            Self::Secondary => 3,
            Self::Backward => 8,
            Self::Forward => 9,
            Self::Other(code) => code,
        }
    }

    /// Config key of the command bound to this button, if it has one.
    #[must_use]
    pub const fn action_key(self) -> Option<&'static str> {
        match self {
            Self::Primary => Some("on-click"),
            Self::Middle => Some("on-click-middle"),
            Self::Secondary => Some("on-click-right"),
            Self::Backward => Some("on-click-backward"),
            Self::Forward => Some("on-click-forward"),
            Self::Other(_) => None,
        }
    }
}

impl From<u32> for ClickButton {
    fn from(code: u32) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for ClickButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Middle => f.write_str("middle"),
            Self::Secondary => f.write_str("secondary"),
            Self::Backward => f.write_str("backward"),
            Self::Forward => f.write_str("forward"),
            Self::Other(code) => write!(f, "button {code}"),
        }
    }
}

impl std::str::FromStr for ClickButton {
    type Err = ButtonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "primary" => Ok(Self::Primary),
            "middle" => Ok(Self::Middle),
            "right" | "secondary" => Ok(Self::Secondary),
            "backward" | "back" => Ok(Self::Backward),
            "forward" => Ok(Self::Forward),
            other => other
                .parse::<u32>()
                .map(Self::from_code)
                .map_err(|_| ButtonError::invalid_input("Unknown mouse button", s)),
        }
    }
}

/// A single click delivered to a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub button: ClickButton,
}

impl ClickEvent {
    #[must_use]
    pub const fn new(button: ClickButton) -> Self {
        Self { button }
    }

    /// Activation of the widget without pointer details, treated as button 1.
    #[must_use]
    pub const fn press() -> Self {
        Self::new(ClickButton::Primary)
    }
}

/// Command configured for `button`, if any.
#[must_use]
pub fn click_action<'a>(config: ConfigView<'a>, button: ClickButton) -> Option<&'a str> {
    button.action_key().and_then(|key| config.get(key).as_str())
}

/// Whether a module with this config accepts clicks at all.
///
/// True when any click command or `format-alt` is configured, or when the
/// module itself asks for clicks.
#[must_use]
pub fn is_clickable(config: ConfigView<'_>, enable_click: bool) -> bool {
    const BUTTONS: [ClickButton; 5] = [
        ClickButton::Primary,
        ClickButton::Middle,
        ClickButton::Backward,
        ClickButton::Forward,
        ClickButton::Secondary,
    ];

    enable_click
        || config.get(crate::toggle::ALT_FORMAT_KEY).is_string()
        || BUTTONS
            .iter()
            .any(|button| click_action(config, *button).is_some())
}

/// Generic click handling that runs after the format toggle.
///
/// `action` is the command configured for the clicked button, if any.
pub trait ClickHandler {
    fn handle_click(&mut self, event: &ClickEvent, action: Option<&str>);
}

impl<F> ClickHandler for F
where
    F: FnMut(&ClickEvent, Option<&str>),
{
    fn handle_click(&mut self, event: &ClickEvent, action: Option<&str>) {
        self(event, action);
    }
}

/// What happened to a routed click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The module is not clickable; nothing ran.
    Ignored,
    /// The click reached the generic handler.
    Handled {
        /// Whether the click also flipped the display format.
        toggled: bool,
    },
}

/// Dispatches clicks to the format toggle and the generic handler.
///
/// Clickability is decided once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickRouter {
    interactive: bool,
}

impl ClickRouter {
    #[must_use]
    pub fn new(config: ConfigView<'_>, enable_click: bool) -> Self {
        Self {
            interactive: is_clickable(config, enable_click),
        }
    }

    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Route one click: toggle first, then always the generic handler.
    pub fn route<H: ClickHandler + ?Sized>(
        &self,
        event: &ClickEvent,
        config: ConfigView<'_>,
        toggle: &mut FormatToggle,
        handler: &mut H,
    ) -> ClickOutcome {
        if !self.interactive {
            debug!(button = %event.button, "click on non-interactive module ignored");
            return ClickOutcome::Ignored;
        }

        let toggled = toggle.on_click(config, event.button);
        handler.handle_click(event, click_action(config, event.button));
        debug!(button = %event.button, toggled, "routed click");
        ClickOutcome::Handled { toggled }
    }
}
