//! Clickable button module for waybutton-rs.
//!
//! A button module is a status-bar segment whose label is rendered from a
//! format string, decorated with an icon picked from `format-icons`, styled
//! through the classes named in `states`, and switched to `format-alt` when
//! the button configured in `format-alt-click` is pressed.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use waybutton_rs_button::{ButtonModule, ButtonOptions, Reading};
//! use waybutton_rs_core::{ModuleConfig, WaybarOutput};
//!
//! let config = ModuleConfig::from_value(json!({
//!     "format": "{icon} {percentage}%",
//!     "format-icons": ["low", "high"],
//!     "states": { "critical": 90 },
//! }))?;
//! let module = ButtonModule::new(config, ButtonOptions::new("cpu"));
//!
//! let mut output = WaybarOutput::default();
//! module.update(&Reading::new(95), &mut output);
//! assert_eq!(output.text, "high 95%");
//! assert!(output.has_class("critical"));
//! # Ok::<(), waybutton_rs_core::ButtonError>(())
//! ```

pub mod button;
pub mod click;
pub mod icon;
pub mod input;
pub mod settings;
pub mod state;
pub mod toggle;

pub use button::{ButtonModule, Reading};
pub use click::{ClickButton, ClickEvent, ClickHandler, ClickOutcome, ClickRouter};
pub use icon::IconResolver;
pub use input::InputEvent;
pub use settings::{ButtonOptions, LabelLayout};
pub use state::{Classification, StateClassifier, StateThreshold};
pub use toggle::{FormatToggle, ToggleState};
