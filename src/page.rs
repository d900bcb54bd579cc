use super::*;

const SNIPPET_MAX_CHARS: usize = 200;

/// A loaded document plus everything the widgets need to run against it.
///
/// The page never runs on wall-clock time: timers only fire when the caller
/// moves the virtual clock with [`Page::advance_time`], [`Page::flush`] and
/// friends.
#[derive(Debug)]
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) scheduler: SchedulerState,
    pub(crate) microtasks: VecDeque<Microtask>,
    pub(crate) animations: AnimationState,
    pub(crate) widgets: WidgetRegistry,
    pub(crate) platform_mocks: PlatformMockState,
    pub(crate) activity: ActivityLog,
    pub(crate) trace_state: TraceState,
    pub(crate) dispatch_depth: usize,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        let dom = parse_html(html)?;
        log::debug!("page loaded with {} nodes", dom.nodes.len());
        Ok(Self {
            dom,
            listeners: ListenerStore::default(),
            scheduler: SchedulerState::default(),
            microtasks: VecDeque::new(),
            animations: AnimationState::default(),
            widgets: WidgetRegistry::default(),
            platform_mocks: PlatformMockState::default(),
            activity: ActivityLog::default(),
            trace_state: TraceState::default(),
            dispatch_depth: 0,
        })
    }

    pub fn value(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.value(target)
    }

    /// Raw `textContent` of the first match.
    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.text_content(target))
    }

    /// Rendered text of the first match; hidden subtrees are left out.
    pub fn inner_text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.inner_text(target))
    }

    /// Inline style value of `prop` (`max-height` or `maxHeight`), empty when unset.
    pub fn style(&self, selector: &str, prop: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.style_get(target, prop)
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        self.dom.class_contains(target, class_name)
    }

    pub fn is_disabled(&self, selector: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.dom.disabled(target))
    }

    pub fn is_displayed(&self, selector: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.dom.is_displayed(target))
    }

    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.attr(target, name))
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        self.check(selector, target, expected, actual)
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.value(target)?;
        self.check(selector, target, expected, actual)
    }

    pub fn assert_class(&self, selector: &str, class_name: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.class_contains(target, class_name)?;
        self.check(
            selector,
            target,
            &class_presence(class_name, expected),
            class_presence(class_name, actual),
        )
    }

    pub fn assert_style(&self, selector: &str, prop: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.style_get(target, prop)?;
        self.check(
            selector,
            target,
            &format!("{prop}: {expected}"),
            format!("{prop}: {actual}"),
        )
    }

    pub fn assert_disabled(&self, selector: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.disabled(target);
        self.check(selector, target, &expected.to_string(), actual.to_string())
    }

    pub fn assert_displayed(&self, selector: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.is_displayed(target);
        self.check(selector, target, &expected.to_string(), actual.to_string())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub fn enqueue_confirm_response(&mut self, accepted: bool) {
        self.platform_mocks.confirm_responses.push_back(accepted);
    }

    /// Answer used once the queued responses run out. Starts as `false`.
    pub fn set_default_confirm_response(&mut self, accepted: bool) {
        self.platform_mocks.default_confirm_response = accepted;
    }

    pub fn take_confirm_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform_mocks.confirm_messages)
    }

    pub fn take_alert_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform_mocks.alert_messages)
    }

    pub fn clipboard_text(&self) -> &str {
        &self.platform_mocks.clipboard_text
    }

    pub fn set_clipboard_text(&mut self, text: &str) {
        self.platform_mocks.clipboard_text = text.to_string();
    }

    /// Makes every later clipboard write reject with `reason`; `None` restores success.
    pub fn set_clipboard_failure(&mut self, reason: Option<&str>) {
        self.platform_mocks.clipboard_failure = reason.map(str::to_string);
    }

    pub fn take_form_submissions(&mut self) -> Vec<FormSubmission> {
        std::mem::take(&mut self.activity.submissions)
    }

    pub fn take_navigations(&mut self) -> Vec<Navigation> {
        std::mem::take(&mut self.activity.navigations)
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace_state.enabled = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace_state.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace_state.timers = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Runtime(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace_state.log_limit = max_entries;
        while self.trace_state.logs.len() > self.trace_state.log_limit {
            self.trace_state.logs.pop_front();
        }
        Ok(())
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace_state.logs.drain(..).collect()
    }

    pub(crate) fn confirm(&mut self, message: &str) -> bool {
        self.platform_mocks.confirm_messages.push(message.to_string());
        let accepted = self
            .platform_mocks
            .confirm_responses
            .pop_front()
            .unwrap_or(self.platform_mocks.default_confirm_response);
        self.trace_event_line(format!("[dialog] confirm accepted={accepted}"));
        accepted
    }

    pub(crate) fn alert(&mut self, message: &str) {
        self.trace_event_line(format!("[dialog] alert {message}"));
        self.platform_mocks.alert_messages.push(message.to_string());
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    pub(crate) fn node_snippet(&self, node_id: NodeId) -> String {
        let mut html = self.dom.dump_node(node_id);
        if let Some((cut, _)) = html.char_indices().nth(SNIPPET_MAX_CHARS) {
            html.truncate(cut);
            html.push_str("...");
        }
        html
    }

    fn check(&self, selector: &str, target: NodeId, expected: &str, actual: String) -> Result<()> {
        if actual == expected {
            return Ok(());
        }
        Err(Error::AssertionFailed {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual,
            dom_snippet: self.node_snippet(target),
        })
    }
}

fn class_presence(class_name: &str, present: bool) -> String {
    if present {
        format!("class {class_name}")
    } else {
        format!("no class {class_name}")
    }
}
