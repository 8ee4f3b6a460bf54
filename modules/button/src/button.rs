//! The clickable button module.

use crate::click::{ClickButton, ClickEvent, ClickHandler, ClickOutcome, ClickRouter};
use crate::icon::IconResolver;
use crate::settings::{self, ButtonOptions, LabelLayout};
use crate::state::StateClassifier;
use crate::toggle::FormatToggle;
use std::time::Duration;
use tracing::debug;
use waybutton_rs_core::{format, ConfigView, ModuleConfig, RenderSink};

/// Values a module renders on one update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reading {
    /// Value used for icon buckets and the `{percentage}` placeholder.
    pub percentage: u16,
    /// Scale of `percentage`; zero means 100.
    pub max: u16,
    /// Value classified against `states`.
    pub value: u8,
    /// Compare with `<=` instead of `>=` when classifying.
    pub lesser: bool,
    /// Icon categories to try, in order.
    pub categories: Vec<String>,
}

impl Reading {
    /// A reading whose state value follows the percentage, saturating at 255.
    #[must_use]
    pub fn new(percentage: u16) -> Self {
        Self {
            percentage,
            value: u8::try_from(percentage).unwrap_or(u8::MAX),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max(mut self, max: u16) -> Self {
        self.max = max;
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: u8) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_lesser(mut self, lesser: bool) -> Self {
        self.lesser = lesser;
        self
    }

    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the percentage and the state value derived from it.
    pub fn set_percentage(&mut self, percentage: u16) {
        self.percentage = percentage;
        self.value = u8::try_from(percentage).unwrap_or(u8::MAX);
    }
}

/// A status-bar segment with a label, icons, states and an alt-format toggle.
///
/// The module never talks to a toolkit directly; it draws through a
/// [`RenderSink`] and receives clicks as [`ClickEvent`]s.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use waybutton_rs_button::{ButtonModule, ButtonOptions, ClickButton, ClickEvent, Reading};
/// use waybutton_rs_core::{ModuleConfig, WaybarOutput};
///
/// let config = ModuleConfig::from_value(json!({
///     "format": "{icon} {percentage}%",
///     "format-alt": "{percentage}%",
///     "format-alt-click": 3,
///     "format-icons": ["-", "+"],
///     "states": { "warning": 30, "critical": 15 },
/// }))?;
/// let mut module = ButtonModule::new(config, ButtonOptions::new("battery"));
/// let mut output = WaybarOutput::default();
///
/// module.update(&Reading::new(20).with_lesser(true), &mut output);
/// assert_eq!(output.text, "- 20%");
/// assert_eq!(output.class, vec!["warning".to_owned()]);
///
/// module.handle_click(&ClickEvent::new(ClickButton::Secondary), &mut |_: &ClickEvent, _: Option<&str>| {});
/// module.update(&Reading::new(20).with_lesser(true), &mut output);
/// assert_eq!(output.text, "20%");
/// # Ok::<(), waybutton_rs_core::ButtonError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ButtonModule {
    name: String,
    id: String,
    config: ModuleConfig,
    toggle: FormatToggle,
    router: ClickRouter,
    interval: Duration,
    layout: LabelLayout,
}

impl ButtonModule {
    #[must_use]
    pub fn new(config: ModuleConfig, options: ButtonOptions) -> Self {
        let view = config.view();
        let toggle = FormatToggle::new(settings::primary_format(view, &options.format));
        let router = ClickRouter::new(view, options.enable_click);
        let interval = settings::update_interval(view, options.interval);
        let layout = LabelLayout::from_config(view, options.ellipsize);

        debug!(
            name = %options.name,
            interactive = router.is_interactive(),
            ?interval,
            "created button module"
        );

        Self {
            name: options.name,
            id: options.id,
            config,
            toggle,
            router,
            interval,
            layout,
        }
    }

    /// Bind the module to a sink: tags it with the instance id.
    pub fn attach<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        if !self.id.is_empty() {
            sink.add_tag(&self.id);
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn config(&self) -> ConfigView<'_> {
        self.config.view()
    }

    /// Format currently in effect, primary or alternate.
    #[must_use]
    pub fn format(&self) -> &str {
        self.toggle.active_format()
    }

    #[must_use]
    pub const fn is_alternate(&self) -> bool {
        self.toggle.is_alternate()
    }

    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.router.is_interactive()
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub const fn layout(&self) -> &LabelLayout {
        &self.layout
    }

    /// Icon for `percentage` with at most one category.
    #[must_use]
    pub fn icon(&self, percentage: u16, category: &str, max: u16) -> &str {
        IconResolver::from_config(self.config()).resolve(percentage, category, max)
    }

    /// Icon for `percentage`, trying `categories` in order.
    #[must_use]
    pub fn icon_for<S: AsRef<str>>(&self, percentage: u16, categories: &[S], max: u16) -> &str {
        IconResolver::from_config(self.config()).resolve_any(percentage, categories, max)
    }

    /// Classify `value` against `states`, updating the sink's tags.
    pub fn state<S: RenderSink + ?Sized>(&self, value: u8, lesser: bool, sink: &mut S) -> &str {
        StateClassifier::from_config(self.config()).apply(value, lesser, sink)
    }

    /// Deliver a click. Non-interactive modules ignore it.
    pub fn handle_click<H: ClickHandler + ?Sized>(
        &mut self,
        event: &ClickEvent,
        handler: &mut H,
    ) -> ClickOutcome {
        self.router
            .route(event, self.config.view(), &mut self.toggle, handler)
    }

    /// Widget activation without button details, routed as button 1.
    pub fn press<H: ClickHandler + ?Sized>(&mut self, handler: &mut H) -> ClickOutcome {
        self.handle_click(&ClickEvent::new(ClickButton::Primary), handler)
    }

    /// Recompute the label from `reading` and draw it.
    ///
    /// Placeholders: `{icon}`, `{percentage}`, `{value}` and `{state}`.
    pub fn update<S: RenderSink + ?Sized>(&self, reading: &Reading, sink: &mut S) {
        let icon = self.icon_for(reading.percentage, reading.categories.as_slice(), reading.max);
        let state = self.state(reading.value, reading.lesser, &mut *sink);
        let percentage = reading.percentage.to_string();
        let value = reading.value.to_string();

        let text = format::render(
            self.format(),
            &[
                ("icon", icon),
                ("percentage", percentage.as_str()),
                ("value", value.as_str()),
                ("state", state),
            ],
        );
        sink.set_text(&text);
    }
}
