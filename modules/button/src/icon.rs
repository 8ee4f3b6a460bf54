//! Icon selection from the `format-icons` table.
//!
//! The table comes in three shapes:
//!
//! - a single string: always that icon
//! - an array: one icon per equal-width bucket of the percentage scale
//! - an object: category name to string or array, with a `"default"` entry

use waybutton_rs_core::ConfigView;

/// Config key holding the icon table.
pub const ICONS_KEY: &str = "format-icons";

/// Category used when no requested category is present in the table.
pub const DEFAULT_CATEGORY: &str = "default";

/// Scale used when the caller passes a maximum of zero.
pub const DEFAULT_SCALE_MAX: u16 = 100;

/// Picks icons out of a module's `format-icons` table.
///
/// Resolution is a pure read and always yields a token; anything missing or
/// of the wrong shape resolves to the empty string.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use waybutton_rs_button::IconResolver;
/// use waybutton_rs_core::ConfigView;
///
/// let config = json!({
///     "format-icons": { "default": ["low", "mid", "high"], "charging": "plug" }
/// });
/// let icons = IconResolver::from_config(ConfigView::new(&config));
///
/// assert_eq!(icons.resolve(10, "", 0), "low");
/// assert_eq!(icons.resolve(99, "", 0), "high");
/// assert_eq!(icons.resolve(99, "charging", 0), "plug");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IconResolver<'a> {
    table: ConfigView<'a>,
}

impl<'a> IconResolver<'a> {
    /// Build a resolver over the `format-icons` entry of a module config.
    #[must_use]
    pub fn from_config(config: ConfigView<'a>) -> Self {
        Self {
            table: config.get(ICONS_KEY),
        }
    }

    /// Resolve with at most one category; an empty category means "none".
    #[must_use]
    pub fn resolve(&self, percentage: u16, category: &str, max: u16) -> &'a str {
        if category.is_empty() {
            self.resolve_any::<&str>(percentage, &[], max)
        } else {
            self.resolve_any(percentage, &[category], max)
        }
    }

    /// Resolve using the first category of `categories` the table knows about.
    ///
    /// A category counts when its name is non-empty and its entry is a
    /// non-empty string or a non-empty array. When none does, the `"default"`
    /// entry is used.
    #[must_use]
    pub fn resolve_any<S: AsRef<str>>(&self, percentage: u16, categories: &[S], max: u16) -> &'a str {
        let mut icons = self.table;

        if icons.is_object() {
            let category = categories
                .iter()
                .map(AsRef::<str>::as_ref)
                .find(|key| !key.is_empty() && has_icons(icons.get(key)))
                .unwrap_or(DEFAULT_CATEGORY);
            icons = icons.get(category);
        }

        if let Some(tokens) = icons.as_array() {
            if tokens.is_empty() {
                return "";
            }
            icons = icons.index(bucket_index(percentage, tokens.len(), max));
        }

        icons.as_str().unwrap_or("")
    }
}

fn has_icons(entry: ConfigView<'_>) -> bool {
    entry.as_str().is_some_and(|icon| !icon.is_empty())
        || entry.as_array().is_some_and(|icons| !icons.is_empty())
}

/// Index of the bucket `percentage` falls into when `[0, max]` is split into
/// `size` equal-width buckets.
///
/// A `max` of zero means a scale of 100. Values past the end of the scale
/// land in the last bucket. When there are more buckets than scale units the
/// bucket width truncates to zero and the last index is returned.
///
/// `size` must be at least 1.
#[must_use]
pub fn bucket_index(percentage: u16, size: usize, max: u16) -> usize {
    let last = size.saturating_sub(1);
    let effective_max = if max == 0 { DEFAULT_SCALE_MAX } else { max };
    let width = usize::from(effective_max) / size.max(1);
    if width == 0 {
        return last;
    }
    (usize::from(percentage) / width).min(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn resolver(config: &Value) -> IconResolver<'_> {
        IconResolver::from_config(ConfigView::new(config))
    }

    #[test]
    fn test_missing_or_malformed_table() {
        let config = json!({});
        assert_eq!(resolver(&config).resolve(50, "", 0), "");

        let config = json!({ "format-icons": 42 });
        assert_eq!(resolver(&config).resolve(50, "warning", 0), "");

        let config = json!({ "format-icons": [] });
        assert_eq!(resolver(&config).resolve(50, "", 0), "");

        let config = json!({ "format-icons": [1, 2] });
        assert_eq!(resolver(&config).resolve(50, "", 0), "");
    }

    #[test]
    fn test_plain_string_table() {
        let config = json!({ "format-icons": "X" });
        let icons = resolver(&config);
        assert_eq!(icons.resolve(0, "", 0), "X");
        assert_eq!(icons.resolve(u16::MAX, "whatever", u16::MAX), "X");
    }

    #[test]
    fn test_array_buckets() {
        let config = json!({ "format-icons": ["0", "1", "2", "3", "4"] });
        let icons = resolver(&config);

        assert_eq!(icons.resolve(0, "", 0), "0");
        assert_eq!(icons.resolve(19, "", 0), "0");
        assert_eq!(icons.resolve(20, "", 0), "1");
        assert_eq!(icons.resolve(79, "", 0), "3");
        assert_eq!(icons.resolve(80, "", 0), "4");
        assert_eq!(icons.resolve(100, "", 0), "4");
        assert_eq!(icons.resolve(500, "", 0), "4");

        // Explicit scale: 5 buckets of 200 over 1000.
        assert_eq!(icons.resolve(399, "", 1000), "1");
        assert_eq!(icons.resolve(400, "", 1000), "2");
    }

    #[test]
    fn test_bucket_index_matches_formula_and_is_monotonic() {
        for size in [1usize, 2, 4, 5, 10, 20, 25, 50, 100] {
            let width = 100 / size;
            let mut previous = 0;
            for percentage in 0u16..=300 {
                let idx = bucket_index(percentage, size, 0);
                assert_eq!(idx, (usize::from(percentage) / width).min(size - 1));
                assert!(idx >= previous, "index went backwards at {percentage}");
                previous = idx;
            }
        }
    }

    #[test]
    fn test_more_icons_than_scale_units_uses_last() {
        assert_eq!(bucket_index(0, 150, 0), 149);
        assert_eq!(bucket_index(7, 11, 10), 10);
        assert_eq!(bucket_index(7, 10, 10), 7);
    }

    #[test]
    fn test_category_selection() {
        let config = json!({ "format-icons": { "default": "A", "warning": "B" } });
        let icons = resolver(&config);

        assert_eq!(icons.resolve_any(0, &["warning", "default"], 0), "B");
        assert_eq!(icons.resolve_any(0, &["critical", "default"], 0), "A");
        assert_eq!(icons.resolve_any(0, &["critical"], 0), "A");
        assert_eq!(icons.resolve_any::<&str>(0, &[], 0), "A");
        assert_eq!(icons.resolve(0, "warning", 0), "B");
        assert_eq!(icons.resolve(0, "", 0), "A");
    }

    #[test]
    fn test_category_order_and_skipping() {
        let config = json!({
            "format-icons": {
                "default": ["d0", "d1"],
                "charging": ["c0", "c1"],
                "plugged": "P",
                "broken": 3,
                "": "empty-key"
            }
        });
        let icons = resolver(&config);

        assert_eq!(icons.resolve_any(90, &["plugged", "charging"], 0), "P");
        assert_eq!(icons.resolve_any(90, &["charging", "plugged"], 0), "c1");
        assert_eq!(icons.resolve_any(10, &["broken", "charging"], 0), "c0");
        assert_eq!(icons.resolve_any(10, &["", "broken"], 0), "d0");

        let owned = vec!["missing".to_owned(), "plugged".to_owned()];
        assert_eq!(icons.resolve_any(10, owned.as_slice(), 0), "P");
    }

    #[test]
    fn test_empty_category_entries_fall_back_to_default() {
        let config = json!({ "format-icons": { "warning": [], "low": "", "default": "A" } });
        let icons = resolver(&config);

        assert_eq!(icons.resolve(0, "warning", 0), "A");
        assert_eq!(icons.resolve(0, "low", 0), "A");
        assert_eq!(icons.resolve_any(0, &["warning", "low"], 0), "A");
    }

    #[test]
    fn test_object_without_default() {
        let config = json!({ "format-icons": { "warning": "B" } });
        let icons = resolver(&config);
        assert_eq!(icons.resolve(0, "critical", 0), "");
        assert_eq!(icons.resolve(0, "warning", 0), "B");
    }
}
