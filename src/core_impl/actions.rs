use super::*;

impl Page {
    /// Types `text` into an input or textarea, firing `input` then `change`.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.expect_tag(selector, target, &["input", "textarea"], "input or textarea")?;
        if self.dom.disabled(target) {
            return Ok(());
        }

        self.dom.set_value(target, text)?;
        self.dispatch_event(target, "input")?;
        self.dispatch_event(target, "change")?;
        Ok(())
    }

    /// Picks the option whose value is `value` and fires `input` and `change`.
    pub fn select_option(&mut self, selector: &str, value: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.expect_tag(selector, target, &["select"], "select")?;
        if self.dom.disabled(target) {
            return Ok(());
        }

        if !self.dom.has_select_option(target, value) {
            return Err(Error::Runtime(format!(
                "select {selector} has no option with value {value:?}"
            )));
        }
        self.dom.set_select_value(target, value)?;
        self.dispatch_event(target, "input")?;
        self.dispatch_event(target, "change")?;
        Ok(())
    }

    /// Sets a control's value without firing any event.
    pub fn set_value(&mut self, selector: &str, value: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dom.set_value(target, value)
    }

    pub fn set_checked(&mut self, selector: &str, checked: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        if !is_checkable_input(&self.dom, target) {
            let actual = match self.dom.tag_name(target) {
                Some("input") => format!(
                    "input[type={}]",
                    self.dom.attr(target, "type").unwrap_or_else(|| "text".into())
                ),
                Some(tag) => tag.to_string(),
                None => "non-element".into(),
            };
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input[type=checkbox|radio]".into(),
                actual,
            });
        }
        if self.dom.disabled(target) {
            return Ok(());
        }

        if self.dom.checked(target)? != checked {
            self.dom.set_checked(target, checked)?;
            self.dispatch_event(target, "input")?;
            self.dispatch_event(target, "change")?;
        }
        Ok(())
    }

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.click_node(target)
    }

    /// Dispatches a bare event. Returns `false` when a listener prevented
    /// its default action.
    pub fn dispatch(&mut self, selector: &str, event_type: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        let event = self.dispatch_event(target, event_type)?;
        Ok(!event.default_prevented)
    }

    pub fn pointer_enter(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, "mouseenter")?;
        Ok(())
    }

    pub fn pointer_leave(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, "mouseleave")?;
        Ok(())
    }

    pub(crate) fn click_node(&mut self, target: NodeId) -> Result<()> {
        if self.dom.disabled(target) {
            return Ok(());
        }

        let outcome = self.dispatch_event(target, "click")?;
        if outcome.default_prevented {
            return Ok(());
        }

        if is_checkable_input(&self.dom, target) {
            let current = self.dom.checked(target)?;
            let is_radio = self
                .dom
                .attr(target, "type")
                .is_some_and(|kind| kind.eq_ignore_ascii_case("radio"));
            if !(is_radio && current) {
                self.dom.set_checked(target, !current)?;
                self.dispatch_event(target, "input")?;
                self.dispatch_event(target, "change")?;
            }
            return Ok(());
        }

        if is_submit_control(&self.dom, target) {
            if let Some(form) = self.dom.find_ancestor_by_tag(target, "form") {
                self.submit_form(form, Some(target))?;
            }
            return Ok(());
        }

        if let Some(anchor) = self.dom.closest(target, "a[href]")? {
            let href = self.dom.attr(anchor, "href").unwrap_or_default();
            self.trace_event_line(format!("[navigation] href={href}"));
            self.activity.navigations.push(Navigation { href });
        }
        Ok(())
    }

    fn submit_form(&mut self, form: NodeId, submitter: Option<NodeId>) -> Result<()> {
        let outcome = self.dispatch_event(form, "submit")?;
        if outcome.default_prevented {
            return Ok(());
        }

        let submission = FormSubmission {
            form_id: self.dom.attr(form, "id"),
            action: self.dom.attr(form, "action").unwrap_or_default(),
            submitter_id: submitter.and_then(|node| self.dom.attr(node, "id")),
        };
        self.trace_event_line(format!(
            "[form] submit form={} action={}",
            self.trace_node_label(form),
            submission.action
        ));
        self.activity.submissions.push(submission);
        Ok(())
    }

    fn expect_tag(
        &self,
        selector: &str,
        target: NodeId,
        accepted: &[&str],
        expected: &str,
    ) -> Result<()> {
        let tag = self.dom.tag_name(target).unwrap_or("non-element");
        if accepted.contains(&tag) {
            return Ok(());
        }
        Err(Error::TypeMismatch {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual: tag.to_string(),
        })
    }
}

fn is_checkable_input(dom: &Dom, node: NodeId) -> bool {
    dom.has_tag(node, "input")
        && dom.attr(node, "type").is_some_and(|kind| {
            kind.eq_ignore_ascii_case("checkbox") || kind.eq_ignore_ascii_case("radio")
        })
}

// `<button>` defaults to type=submit.
fn is_submit_control(dom: &Dom, node: NodeId) -> bool {
    let kind = dom.attr(node, "type").map(|kind| kind.to_ascii_lowercase());
    if dom.has_tag(node, "button") {
        return kind.is_none_or(|kind| kind == "submit" || kind.is_empty());
    }
    dom.has_tag(node, "input") && kind.is_some_and(|kind| kind == "submit" || kind == "image")
}
