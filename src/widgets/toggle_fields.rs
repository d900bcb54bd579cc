use super::*;

/// Class flashed on a trigger's container after the user changes it.
pub const TRIGGER_HIGHLIGHT_CLASS: &str = "bg-blue-50";
pub const TRIGGER_HIGHLIGHT_MS: i64 = 800;

/// Decides from the normalized primary value and the normalized secondary
/// values whether the dependent fields are shown.
pub type ShowPredicate = Rc<dyn Fn(&str, &[String]) -> bool>;

/// Trims and uppercases a trigger value before it reaches the predicate.
///
/// U+FEFF counts as whitespace here, as it does for a browser's `trim()`.
/// Combining marks are left as typed.
pub fn normalize_trigger_value(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
        .to_uppercase()
}

/// Builder for [`Page::init_toggle_fields`].
#[derive(Clone)]
pub struct ToggleFieldsConfig {
    trigger_id: String,
    dependent_ids: Vec<String>,
    alt_trigger_ids: Vec<String>,
    should_show: ShowPredicate,
    highlight: bool,
    clear_on_hide: bool,
    container_selector: String,
    animation: VisibilityAnimation,
}

impl fmt::Debug for ToggleFieldsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleFieldsConfig")
            .field("trigger_id", &self.trigger_id)
            .field("dependent_ids", &self.dependent_ids)
            .field("alt_trigger_ids", &self.alt_trigger_ids)
            .field("highlight", &self.highlight)
            .field("clear_on_hide", &self.clear_on_hide)
            .field("container_selector", &self.container_selector)
            .field("animation", &self.animation)
            .finish_non_exhaustive()
    }
}

impl ToggleFieldsConfig {
    pub fn new(
        trigger_id: impl Into<String>,
        should_show: impl Fn(&str, &[String]) -> bool + 'static,
    ) -> Self {
        Self {
            trigger_id: trigger_id.into(),
            dependent_ids: Vec::new(),
            alt_trigger_ids: Vec::new(),
            should_show: Rc::new(should_show),
            highlight: true,
            clear_on_hide: false,
            container_selector: "div".into(),
            animation: VisibilityAnimation::default(),
        }
    }

    pub fn dependents<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependent_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Secondary triggers; their values reach the predicate in this order.
    pub fn alt_triggers<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alt_trigger_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn highlight(mut self, enabled: bool) -> Self {
        self.highlight = enabled;
        self
    }

    pub fn clear_on_hide(mut self, enabled: bool) -> Self {
        self.clear_on_hide = enabled;
        self
    }

    /// Selector of the wrapper animated for each dependent (nearest
    /// ancestor-or-self match). Defaults to `div`.
    pub fn container_selector(mut self, selector: impl Into<String>) -> Self {
        self.container_selector = selector.into();
        self
    }

    pub fn animation(mut self, animation: VisibilityAnimation) -> Self {
        self.animation = animation;
        self
    }
}

/// Identifies a toggle binding on the page that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToggleHandle(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DependentField {
    pub(crate) field: NodeId,
    pub(crate) container: Option<NodeId>,
}

#[derive(Clone)]
pub(crate) struct ToggleBinding {
    pub(crate) trigger: NodeId,
    pub(crate) alt_triggers: Vec<NodeId>,
    pub(crate) dependents: Vec<DependentField>,
    pub(crate) should_show: ShowPredicate,
    pub(crate) highlight: bool,
    pub(crate) clear_on_hide: bool,
    pub(crate) container_selector: String,
    pub(crate) animation: VisibilityAnimation,
    pub(crate) decision: bool,
}

impl fmt::Debug for ToggleBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleBinding")
            .field("trigger", &self.trigger)
            .field("alt_triggers", &self.alt_triggers)
            .field("dependents", &self.dependents)
            .field("highlight", &self.highlight)
            .field("clear_on_hide", &self.clear_on_hide)
            .field("decision", &self.decision)
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Binds dependent fields to a trigger and applies the initial decision.
    ///
    /// Returns `Ok(None)` when the primary trigger is not in the document.
    /// Dependents and secondary triggers that do not resolve are skipped.
    pub fn init_toggle_fields(&mut self, config: ToggleFieldsConfig) -> Result<Option<ToggleHandle>> {
        parse_selector_groups(&config.container_selector)?;

        let Some(trigger) = self.dom.by_id(&config.trigger_id) else {
            log::debug!("toggle-fields: trigger #{} not found", config.trigger_id);
            return Ok(None);
        };

        let mut dependents = Vec::new();
        for id in &config.dependent_ids {
            let Some(field) = self.dom.by_id(id) else {
                log::debug!("toggle-fields: dependent #{id} not found, skipped");
                continue;
            };
            let container = self.dom.closest(field, &config.container_selector)?;
            dependents.push(DependentField { field, container });
        }

        // One change listener per node, even when ids repeat.
        let mut alt_triggers = Vec::new();
        for node in config.alt_trigger_ids.iter().filter_map(|id| self.dom.by_id(id)) {
            if node != trigger && !alt_triggers.contains(&node) {
                alt_triggers.push(node);
            }
        }

        let binding = self.widgets.toggles.len();
        self.widgets.toggles.push(ToggleBinding {
            trigger,
            alt_triggers: alt_triggers.clone(),
            dependents,
            should_show: config.should_show,
            highlight: config.highlight,
            clear_on_hide: config.clear_on_hide,
            container_selector: config.container_selector,
            animation: config.animation,
            decision: false,
        });

        for node in std::iter::once(trigger).chain(alt_triggers) {
            self.listeners
                .add(node, "change", Listener::ToggleFields { binding });
        }

        self.apply_toggle(binding)?;
        Ok(Some(ToggleHandle(binding)))
    }

    /// Re-reads the triggers, re-applies visibility and returns the decision.
    pub fn reevaluate_toggle(&mut self, handle: ToggleHandle) -> Result<bool> {
        self.apply_toggle(handle.0)
    }

    /// Last show/hide decision of the binding.
    pub fn toggle_decision(&self, handle: ToggleHandle) -> Result<bool> {
        Ok(self.toggle_binding(handle.0)?.decision)
    }

    pub(crate) fn on_toggle_trigger_change(&mut self, binding: usize, trigger: NodeId) -> Result<()> {
        self.apply_toggle(binding)?;

        let (highlight, container_selector) = {
            let state = self.toggle_binding(binding)?;
            (state.highlight, state.container_selector.clone())
        };
        if highlight {
            if let Some(container) = self.dom.closest(trigger, &container_selector)? {
                self.flash_class(container, TRIGGER_HIGHLIGHT_CLASS, TRIGGER_HIGHLIGHT_MS)?;
            }
        }
        Ok(())
    }

    fn apply_toggle(&mut self, binding: usize) -> Result<bool> {
        let state = self.toggle_binding(binding)?.clone();
        let primary = normalize_trigger_value(&self.dom.value(state.trigger)?);
        let secondaries = state
            .alt_triggers
            .iter()
            .map(|node| self.dom.value(*node).map(|raw| normalize_trigger_value(&raw)))
            .collect::<Result<Vec<_>>>()?;
        let show = (state.should_show)(&primary, &secondaries);
        log::debug!(
            "toggle-fields #{binding}: primary={primary:?} secondaries={secondaries:?} show={show}"
        );

        if let Some(stored) = self.widgets.toggles.get_mut(binding) {
            stored.decision = show;
        }

        let mut animated = HashSet::new();
        for dependent in &state.dependents {
            self.dom.set_disabled(dependent.field, !show)?;
            if !show && state.clear_on_hide {
                self.dom.set_value(dependent.field, "")?;
            }

            let Some(container) = dependent.container else {
                continue;
            };
            if !animated.insert(container) {
                continue;
            }
            if show {
                self.animate_show(container, &state.animation)?;
            } else {
                self.animate_hide(container, &state.animation)?;
            }
        }
        Ok(show)
    }

    fn toggle_binding(&self, binding: usize) -> Result<&ToggleBinding> {
        self.widgets
            .toggles
            .get(binding)
            .ok_or_else(|| Error::Runtime(format!("unknown toggle binding {binding}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_trims_and_uppercases() {
        assert_eq!(normalize_trigger_value("  bono  "), "BONO");
        assert_eq!(normalize_trigger_value("\tcheque\n"), "CHEQUE");
        assert_eq!(normalize_trigger_value("opci\u{006F}\u{0301}n"), "OPCIO\u{301}N");
        assert_eq!(normalize_trigger_value("ñandú"), "ÑANDÚ");
        assert_eq!(normalize_trigger_value(""), "");
    }

    #[test]
    fn normalization_strips_byte_order_marks() {
        assert_eq!(normalize_trigger_value("\u{FEFF}bono"), "BONO");
        assert_eq!(normalize_trigger_value(" bono\u{FEFF}\u{00A0}"), "BONO");
        assert_eq!(normalize_trigger_value("bo\u{FEFF}no"), "BO\u{FEFF}NO");
    }
}
