//! # waybutton-rs-core
//!
//! Core library for waybutton-rs, shared by clickable status-bar segments
//! that speak Waybar's custom-module protocol.
//!
//! ## Features
//!
//! - **Configuration view** - Forgiving, typed reads over Waybar's JSON module config
//! - **Configuration loading** - JSON or RON module config files from the XDG config dir
//! - **Render sink** - The `set_text`/`add_tag`/`remove_tag` surface a module draws to
//! - **Waybar JSON output format** - A render sink that serializes to Waybar's protocol
//! - **Error handling** - Typed errors for the fallible outer surface
//!
//! ## Quick Start
//!
//! ```rust
//! use waybutton_rs_core::{RenderSink, WaybarOutput};
//!
//! let mut output = WaybarOutput::default();
//! output.set_text("  42%");
//! output.add_tag("warning");
//! output.add_tag("warning");
//!
//! assert_eq!(output.class, vec!["warning".to_owned()]);
//! ```

pub mod config;
pub mod error;

pub use config::{ConfigView, ModuleConfig};
pub use error::{ButtonError, Result};

use serde::Serialize;

/// Drawing surface of a module.
///
/// Everything a button module does to its widget goes through these three
/// calls. Tag operations describe a set: adding a tag twice or removing an
/// absent tag is a no-op.
pub trait RenderSink {
    /// Replace the label text.
    fn set_text(&mut self, text: &str);

    /// Add a style tag (a CSS class in Waybar terms).
    fn add_tag(&mut self, tag: &str);

    /// Remove a style tag.
    fn remove_tag(&mut self, tag: &str);
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn set_text(&mut self, text: &str) {
        (**self).set_text(text);
    }

    fn add_tag(&mut self, tag: &str) {
        (**self).add_tag(tag);
    }

    fn remove_tag(&mut self, tag: &str) {
        (**self).remove_tag(tag);
    }
}

/// Standard Waybar output format compliant with Waybar's JSON protocol.
///
/// Doubles as a [`RenderSink`]: tags become entries of the `class` array,
/// kept in insertion order.
///
/// # Examples
///
/// ```rust
/// use waybutton_rs_core::WaybarOutput;
///
/// let output = WaybarOutput::new("50%".to_string())
///     .with_tooltip("Volume: 50%")
///     .with_class("muted")
///     .with_percentage(50);
/// ```
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct WaybarOutput {
    /// The main text to display in the bar
    pub text: String,
    /// Optional tooltip text shown on hover
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// CSS classes applied to the module
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub class: Vec<String>,
    /// Optional percentage value for progress indicators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<u16>,
}

impl WaybarOutput {
    /// Create a new WaybarOutput with just the required text field.
    #[must_use]
    pub const fn new(text: String) -> Self {
        Self {
            text,
            tooltip: None,
            class: Vec::new(),
            percentage: None,
        }
    }

    /// Add a tooltip to this output.
    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Add a CSS class to this output.
    #[must_use]
    pub fn with_class(mut self, class: impl AsRef<str>) -> Self {
        self.add_tag(class.as_ref());
        self
    }

    /// Add a percentage value to this output.
    #[must_use]
    pub fn with_percentage(mut self, percentage: u16) -> Self {
        self.percentage = Some(percentage);
        self
    }

    /// Set the percentage on this output (mutable version).
    pub fn set_percentage(&mut self, percentage: u16) {
        self.percentage = Some(percentage);
    }

    /// Whether a CSS class is currently applied.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.class.iter().any(|c| c == class)
    }
}

impl RenderSink for WaybarOutput {
    fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    fn add_tag(&mut self, tag: &str) {
        if !self.has_class(tag) {
            self.class.push(tag.to_owned());
        }
    }

    fn remove_tag(&mut self, tag: &str) {
        self.class.retain(|c| c != tag);
    }
}

/// Utility functions for formatting module text.
pub mod format {
    /// Substitute `{name}` placeholders in a format template.
    ///
    /// Placeholders without a matching argument are left as written, and
    /// `{{` / `}}` produce literal braces.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waybutton_rs_core::format;
    ///
    /// let text = format::render("{icon} {percentage}%", &[("icon", "V"), ("percentage", "42")]);
    /// assert_eq!(text, "V 42%");
    ///
    /// let text = format::render("{unknown} {{literal}}", &[]);
    /// assert_eq!(text, "{unknown} {literal}");
    /// ```
    #[must_use]
    pub fn render(template: &str, args: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find(['{', '}']) {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];

            if let Some(after) = tail.strip_prefix("{{") {
                out.push('{');
                rest = after;
                continue;
            }
            if let Some(after) = tail.strip_prefix("}}") {
                out.push('}');
                rest = after;
                continue;
            }
            if let Some(end) = tail.find('}').filter(|_| tail.starts_with('{')) {
                let name = &tail[1..end];
                if let Some((_, value)) = args.iter().find(|(key, _)| *key == name) {
                    out.push_str(value);
                    rest = &tail[end + 1..];
                    continue;
                }
            }

            // Unmatched brace or unknown placeholder: keep the brace verbatim.
            out.push_str(&tail[..1]);
            rest = &tail[1..];
        }

        out.push_str(rest);
        out
    }

    /// Limit `text` to `max_chars` characters, ending with an ellipsis when cut.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waybutton_rs_core::format;
    ///
    /// assert_eq!(format::ellipsize("battery", 4), "bat…");
    /// assert_eq!(format::ellipsize("bat", 4), "bat");
    /// ```
    #[must_use]
    pub fn ellipsize(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            return text.to_owned();
        }
        if max_chars == 0 {
            return String::new();
        }
        let mut cut: String = text.chars().take(max_chars - 1).collect();
        cut.push('…');
        cut
    }

    /// Pad `text` with trailing spaces up to `min_chars` characters.
    #[must_use]
    pub fn pad_to_width(text: &str, min_chars: usize) -> String {
        let len = text.chars().count();
        if len >= min_chars {
            return text.to_owned();
        }
        let mut padded = String::with_capacity(text.len() + (min_chars - len));
        padded.push_str(text);
        padded.extend(std::iter::repeat(' ').take(min_chars - len));
        padded
    }
}
