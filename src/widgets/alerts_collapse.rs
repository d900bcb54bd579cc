use super::*;

pub const DEFAULT_COLLAPSE_DELAY_MS: i64 = 5000;

const PANEL_TRANSITION: &str = "opacity 0.3s ease, max-height 0.5s ease";
const BAR_REVEAL_TRANSITION: &str = "opacity 0.3s ease, transform 0.3s ease";
const BAR_FADE_TRANSITION: &str = "opacity 0.2s ease";
const PANEL_EXPANDED_MAX_HEIGHT: &str = "500px";

/// Element ids and delay for [`Page::init_alerts_collapse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertsCollapseConfig {
    pub collapse_delay_ms: i64,
    pub container_id: String,
    pub expanded_id: String,
    pub collapsed_id: String,
}

impl Default for AlertsCollapseConfig {
    fn default() -> Self {
        Self {
            collapse_delay_ms: DEFAULT_COLLAPSE_DELAY_MS,
            container_id: "alerts-container".into(),
            expanded_id: "alerts-expanded-view".into(),
            collapsed_id: "alerts-collapsed-bar".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertsView {
    Expanded,
    Collapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlertsHandle(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) struct AlertsWidget {
    pub(crate) container: NodeId,
    pub(crate) expanded: NodeId,
    pub(crate) bar: NodeId,
    pub(crate) collapse_delay_ms: i64,
    pub(crate) view: AlertsView,
    pub(crate) auto_collapse_timer: Option<i64>,
}

impl Page {
    /// Binds the alert panel and starts its auto-collapse countdown.
    ///
    /// Returns `Ok(None)` when the container or either view is missing.
    pub fn init_alerts_collapse(
        &mut self,
        config: AlertsCollapseConfig,
    ) -> Result<Option<AlertsHandle>> {
        let (Some(container), Some(expanded), Some(bar)) = (
            self.dom.by_id(&config.container_id),
            self.dom.by_id(&config.expanded_id),
            self.dom.by_id(&config.collapsed_id),
        ) else {
            log::debug!(
                "alerts-collapse: #{} / #{} / #{} incomplete, not bound",
                config.container_id,
                config.expanded_id,
                config.collapsed_id
            );
            return Ok(None);
        };

        let widget = self.widgets.alerts.len();
        self.widgets.alerts.push(AlertsWidget {
            container,
            expanded,
            bar,
            collapse_delay_ms: config.collapse_delay_ms.max(0),
            view: AlertsView::Expanded,
            auto_collapse_timer: None,
        });

        self.listeners
            .add(expanded, "mouseenter", Listener::AlertsPointerEnter { widget });
        self.listeners
            .add(expanded, "mouseleave", Listener::AlertsPointerLeave { widget });
        self.listeners
            .add(bar, "click", Listener::AlertsExpand { widget });

        self.restart_alerts_timer(widget)?;
        Ok(Some(AlertsHandle(widget)))
    }

    pub fn alerts_view(&self, handle: AlertsHandle) -> Result<AlertsView> {
        Ok(self.alerts_widget(handle.0)?.view)
    }

    /// Collapses right away, cancelling a pending auto-collapse.
    pub fn collapse_alerts(&mut self, handle: AlertsHandle) -> Result<()> {
        self.collapse_alerts_widget(handle.0)
    }

    /// Expands the panel (if collapsed) and restarts the countdown.
    pub fn expand_alerts(&mut self, handle: AlertsHandle) -> Result<()> {
        self.expand_alerts_widget(handle.0)
    }

    pub(crate) fn on_alerts_auto_collapse(&mut self, widget: usize, timer_id: i64) -> Result<()> {
        let state = self.alerts_widget_mut(widget)?;
        if state.auto_collapse_timer == Some(timer_id) {
            state.auto_collapse_timer = None;
        }
        self.collapse_alerts_widget(widget)
    }

    pub(crate) fn on_alerts_pointer_leave(&mut self, widget: usize) -> Result<()> {
        if self.alerts_widget(widget)?.view == AlertsView::Expanded {
            self.restart_alerts_timer(widget)?;
        }
        Ok(())
    }

    pub(crate) fn cancel_alerts_timer(&mut self, widget: usize) -> Result<()> {
        if let Some(timer_id) = self.alerts_widget_mut(widget)?.auto_collapse_timer.take() {
            self.clear_timeout(timer_id);
        }
        Ok(())
    }

    fn restart_alerts_timer(&mut self, widget: usize) -> Result<()> {
        self.cancel_alerts_timer(widget)?;
        let delay_ms = self.alerts_widget(widget)?.collapse_delay_ms;
        let timer_id = self.schedule_timer(delay_ms, TimerTask::AlertsAutoCollapse { widget });
        self.alerts_widget_mut(widget)?.auto_collapse_timer = Some(timer_id);
        Ok(())
    }

    pub(crate) fn collapse_alerts_widget(&mut self, widget: usize) -> Result<()> {
        self.cancel_alerts_timer(widget)?;
        let state = self.alerts_widget(widget)?.clone();
        if state.view == AlertsView::Collapsed {
            return Ok(());
        }
        log::debug!("alerts-collapse #{widget}: collapse");
        self.alerts_widget_mut(widget)?.view = AlertsView::Collapsed;

        let key = (state.container, AnimationChannel::Alerts);
        let (panel, bar) = (state.expanded, state.bar);
        self.begin_transition(key)?;
        self.apply_effects(&[
            (panel, DomEffect::style("transition", PANEL_TRANSITION)),
            (panel, DomEffect::style("opacity", "0")),
            (panel, DomEffect::style("max-height", "0")),
            (panel, DomEffect::style("overflow", "hidden")),
        ])?;
        // The panel is hidden before the bar is revealed so both are never shown.
        self.schedule_effects(
            Some(key),
            "alerts.collapse.swap",
            300,
            vec![
                (panel, DomEffect::add_class("hidden")),
                (bar, DomEffect::remove_class("hidden")),
                (bar, DomEffect::style("opacity", "0")),
                (bar, DomEffect::style("transform", "translateY(-10px)")),
            ],
        );
        self.schedule_effects(
            Some(key),
            "alerts.collapse.reveal",
            350,
            vec![
                (bar, DomEffect::style("transition", BAR_REVEAL_TRANSITION)),
                (bar, DomEffect::style("opacity", "1")),
                (bar, DomEffect::style("transform", "translateY(0)")),
            ],
        );
        Ok(())
    }

    pub(crate) fn expand_alerts_widget(&mut self, widget: usize) -> Result<()> {
        let state = self.alerts_widget(widget)?.clone();
        if state.view == AlertsView::Expanded {
            return self.restart_alerts_timer(widget);
        }
        log::debug!("alerts-collapse #{widget}: expand");
        self.alerts_widget_mut(widget)?.view = AlertsView::Expanded;

        let key = (state.container, AnimationChannel::Alerts);
        let (panel, bar) = (state.expanded, state.bar);
        self.begin_transition(key)?;
        self.apply_effects(&[
            (bar, DomEffect::style("transition", BAR_FADE_TRANSITION)),
            (bar, DomEffect::style("opacity", "0")),
        ])?;
        self.schedule_effects(
            Some(key),
            "alerts.expand.swap",
            200,
            vec![
                (bar, DomEffect::add_class("hidden")),
                (panel, DomEffect::remove_class("hidden")),
                (panel, DomEffect::style("opacity", "0")),
                (panel, DomEffect::style("max-height", "0")),
            ],
        );
        self.schedule_effects(
            Some(key),
            "alerts.expand.reveal",
            250,
            vec![
                (panel, DomEffect::style("transition", PANEL_TRANSITION)),
                (panel, DomEffect::style("opacity", "1")),
                (panel, DomEffect::style("max-height", PANEL_EXPANDED_MAX_HEIGHT)),
            ],
        );
        self.restart_alerts_timer(widget)
    }

    fn alerts_widget(&self, widget: usize) -> Result<&AlertsWidget> {
        self.widgets
            .alerts
            .get(widget)
            .ok_or_else(|| Error::Runtime(format!("unknown alerts widget {widget}")))
    }

    fn alerts_widget_mut(&mut self, widget: usize) -> Result<&mut AlertsWidget> {
        self.widgets
            .alerts
            .get_mut(widget)
            .ok_or_else(|| Error::Runtime(format!("unknown alerts widget {widget}")))
    }
}
