use super::*;

mod alerts_collapse;
mod confirm_button;
mod copy_clipboard;
mod fade_in;
mod toggle_fields;
mod visibility;

pub use alerts_collapse::{
    AlertsCollapseConfig, AlertsHandle, AlertsView, DEFAULT_COLLAPSE_DELAY_MS,
};
pub use copy_clipboard::DEFAULT_COPY_ERROR_PREFIX;
pub use fade_in::{DEFAULT_FADE_IN_STEP_MS, FADE_IN_CLASS};
pub use toggle_fields::{
    ShowPredicate, TRIGGER_HIGHLIGHT_CLASS, TRIGGER_HIGHLIGHT_MS, ToggleFieldsConfig,
    ToggleHandle, normalize_trigger_value,
};
pub use visibility::VisibilityAnimation;

pub(crate) use alerts_collapse::AlertsWidget;
pub(crate) use toggle_fields::ToggleBinding;

/// Per-page widget instances, addressed by index through their handles.
#[derive(Debug, Default)]
pub(crate) struct WidgetRegistry {
    pub(crate) toggles: Vec<ToggleBinding>,
    pub(crate) alerts: Vec<AlertsWidget>,
}
