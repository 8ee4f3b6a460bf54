//! Construction-time settings of a button module.
//!
//! These are read once when the module is built: the primary format, the
//! update interval and the label layout hints.

use std::time::Duration;
use waybutton_rs_core::{format, ConfigView};

/// Interval used for `"interval": "once"`, long enough to never fire.
pub const ONCE_INTERVAL: Duration = Duration::from_secs(100_000_000);

/// Defaults a concrete module passes when it builds its button.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonOptions {
    /// Widget name, also used in log output.
    pub name: String,
    /// Instance id; added as a style tag when non-empty.
    pub id: String,
    /// Format used when the config has no `format` string.
    pub format: String,
    /// Interval used when the config has no usable `interval`.
    pub interval: Duration,
    /// Ellipsize the label even without `max-length`.
    pub ellipsize: bool,
    /// Accept clicks even without click-related config.
    pub enable_click: bool,
}

impl Default for ButtonOptions {
    fn default() -> Self {
        Self {
            name: "button".to_owned(),
            id: String::new(),
            format: "{}".to_owned(),
            interval: Duration::from_secs(60),
            ellipsize: false,
            enable_click: false,
        }
    }
}

impl ButtonOptions {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_ellipsize(mut self, ellipsize: bool) -> Self {
        self.ellipsize = ellipsize;
        self
    }

    #[must_use]
    pub fn with_enable_click(mut self, enable_click: bool) -> Self {
        self.enable_click = enable_click;
        self
    }
}

/// `format` from the config when it is a string, else `default`.
#[must_use]
pub fn primary_format(config: ConfigView<'_>, default: &str) -> String {
    config.get("format").as_str().unwrap_or(default).to_owned()
}

/// Update interval from `interval`: whole seconds, or `"once"`.
#[must_use]
pub fn update_interval(config: ConfigView<'_>, default: Duration) -> Duration {
    let interval = config.get("interval");
    if interval.as_str() == Some("once") {
        return ONCE_INTERVAL;
    }
    interval.as_uint().map_or(default, Duration::from_secs)
}

/// How the label should be laid out by whatever draws it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelLayout {
    /// Maximum width in characters (`max-length`).
    pub max_width_chars: Option<usize>,
    /// Minimum width in characters (`min-length`).
    pub min_width_chars: Option<usize>,
    /// Cut overlong text at the end with an ellipsis.
    pub ellipsize: bool,
    /// Keep the label on a single line.
    pub single_line: bool,
    /// Rotation in degrees (`rotate`).
    pub angle: u32,
    /// Horizontal alignment, 0.0 to 1.0.
    pub xalign: Option<f32>,
    /// Vertical alignment, used instead of `xalign` for 90/270 rotations.
    pub yalign: Option<f32>,
}

impl LabelLayout {
    /// Read layout hints from the module config.
    #[must_use]
    pub fn from_config(config: ConfigView<'_>, ellipsize: bool) -> Self {
        let mut layout = Self::default();

        if let Some(max) = config.get("max-length").as_uint() {
            layout.max_width_chars = Some(to_chars(max));
            layout.ellipsize = true;
            layout.single_line = true;
        } else if ellipsize {
            layout.ellipsize = true;
            layout.single_line = true;
        }

        layout.min_width_chars = config.get("min-length").as_uint().map(to_chars);
        layout.angle = config
            .get("rotate")
            .as_uint()
            .and_then(|angle| u32::try_from(angle).ok())
            .unwrap_or(0);

        if let Some(align) = config.get("align").as_float() {
            #[allow(clippy::cast_possible_truncation)]
            let align = align as f32;
            if layout.is_vertical() {
                layout.yalign = Some(align);
            } else {
                layout.xalign = Some(align);
            }
        }

        layout
    }

    /// Whether the label is rotated onto its side.
    #[must_use]
    pub const fn is_vertical(&self) -> bool {
        self.angle == 90 || self.angle == 270
    }

    /// Apply the width limits to plain text, for sinks that cannot size labels.
    #[must_use]
    pub fn fit(&self, text: &str) -> String {
        let text = match self.max_width_chars {
            Some(max) if self.ellipsize => format::ellipsize(text, max),
            _ => text.to_owned(),
        };
        match self.min_width_chars {
            Some(min) => format::pad_to_width(&text, min),
            None => text,
        }
    }
}

fn to_chars(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primary_format() {
        let config = json!({ "format": "{icon}" });
        assert_eq!(primary_format(ConfigView::new(&config), "{}"), "{icon}");

        let config = json!({ "format": ["not", "a", "string"] });
        assert_eq!(primary_format(ConfigView::new(&config), "{}"), "{}");
    }

    #[test]
    fn test_update_interval() {
        let default = Duration::from_secs(30);

        let config = json!({ "interval": 5 });
        assert_eq!(update_interval(ConfigView::new(&config), default), Duration::from_secs(5));

        let config = json!({ "interval": "once" });
        assert_eq!(update_interval(ConfigView::new(&config), default), ONCE_INTERVAL);

        let config = json!({ "interval": "twice" });
        assert_eq!(update_interval(ConfigView::new(&config), default), default);

        let config = json!({ "interval": -1 });
        assert_eq!(update_interval(ConfigView::new(&config), default), default);

        let config = json!({});
        assert_eq!(update_interval(ConfigView::new(&config), default), default);
    }

    #[test]
    fn test_layout_max_length() {
        let config = json!({ "max-length": 5, "min-length": 3 });
        let layout = LabelLayout::from_config(ConfigView::new(&config), false);

        assert_eq!(layout.max_width_chars, Some(5));
        assert_eq!(layout.min_width_chars, Some(3));
        assert!(layout.ellipsize);
        assert!(layout.single_line);
        assert_eq!(layout.fit("battery"), "batt…");
        assert_eq!(layout.fit("a"), "a  ");
    }

    #[test]
    fn test_layout_requested_ellipsize() {
        let config = json!({});
        let layout = LabelLayout::from_config(ConfigView::new(&config), true);
        assert!(layout.ellipsize);
        assert_eq!(layout.max_width_chars, None);
        assert_eq!(layout.fit("unchanged text"), "unchanged text");

        let layout = LabelLayout::from_config(ConfigView::new(&config), false);
        assert_eq!(layout, LabelLayout::default());
    }

    #[test]
    fn test_layout_alignment_follows_rotation() {
        let config = json!({ "rotate": 90, "align": 0.25 });
        let layout = LabelLayout::from_config(ConfigView::new(&config), false);
        assert!(layout.is_vertical());
        assert_eq!(layout.yalign, Some(0.25));
        assert_eq!(layout.xalign, None);

        let config = json!({ "rotate": 180, "align": 1 });
        let layout = LabelLayout::from_config(ConfigView::new(&config), false);
        assert_eq!(layout.angle, 180);
        assert_eq!(layout.xalign, Some(1.0));
        assert_eq!(layout.yalign, None);
    }

    #[test]
    fn test_options_builder() {
        let options = ButtonOptions::new("backlight")
            .with_id("laptop")
            .with_format("{percentage}%")
            .with_interval(Duration::from_secs(2))
            .with_enable_click(true);

        assert_eq!(options.name, "backlight");
        assert_eq!(options.id, "laptop");
        assert_eq!(options.format, "{percentage}%");
        assert_eq!(options.interval, Duration::from_secs(2));
        assert!(options.enable_click);
        assert!(!options.ellipsize);
    }
}
