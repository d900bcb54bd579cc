use super::*;

impl Dom {
    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        match &self.nodes[node_id.0].node_type {
            NodeType::Document | NodeType::Element(_) => {
                let mut out = String::new();
                for child in &self.nodes[node_id.0].children {
                    out.push_str(&self.text_content(*child));
                }
                out
            }
            NodeType::Text(text) => text.clone(),
        }
    }

    // Rendered text only: hidden subtrees and raw-text containers contribute nothing.
    pub(crate) fn inner_text(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.collect_rendered_text(node_id, &mut out);
        out
    }

    fn collect_rendered_text(&self, node_id: NodeId, out: &mut String) {
        match &self.nodes[node_id.0].node_type {
            NodeType::Text(text) => out.push_str(text),
            NodeType::Document => {
                for child in &self.nodes[node_id.0].children {
                    self.collect_rendered_text(*child, out);
                }
            }
            NodeType::Element(element) => {
                if is_locally_hidden(element)
                    || matches!(
                        element.tag_name.as_str(),
                        "script" | "style" | "template" | "head"
                    )
                {
                    return;
                }
                if element.tag_name == "br" {
                    out.push('\n');
                    return;
                }
                for child in &self.nodes[node_id.0].children {
                    self.collect_rendered_text(*child, out);
                }
            }
        }
    }

    pub(crate) fn value(&self, node_id: NodeId) -> Result<String> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Runtime("value target is not an element".into()))?;
        Ok(element.value.clone())
    }

    pub(crate) fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if self.has_tag(node_id, "select") {
            return self.set_select_value(node_id, value);
        }

        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("value target is not an element".into()))?;
        element.value = value.to_string();
        Ok(())
    }

    pub(crate) fn initialize_form_control_values(&mut self) -> Result<()> {
        for node in self.all_element_nodes() {
            if self.has_tag(node, "textarea") {
                let text = self.text_content(node);
                let element = self.element_mut(node).ok_or_else(|| {
                    Error::Runtime("textarea target is not an element".into())
                })?;
                element.value = text;
            } else if self.has_tag(node, "select") {
                let value = self.select_value_from_options(node)?;
                let element = self
                    .element_mut(node)
                    .ok_or_else(|| Error::Runtime("select target is not an element".into()))?;
                element.value = value;
            }
        }
        Ok(())
    }

    pub(crate) fn set_select_value(&mut self, select_node: NodeId, requested: &str) -> Result<()> {
        let mut options = Vec::new();
        self.collect_select_options(select_node, &mut options);

        let mut matched = None;
        for option in &options {
            if matched.is_none() && self.option_effective_value(*option) == requested {
                matched = Some(*option);
            }
        }

        for option in options {
            let option_element = self
                .element_mut(option)
                .ok_or_else(|| Error::Runtime("option target is not an element".into()))?;
            if Some(option) == matched {
                option_element
                    .attrs
                    .insert("selected".to_string(), String::new());
            } else {
                option_element.attrs.remove("selected");
            }
        }

        let value = if matched.is_some() {
            requested.to_string()
        } else {
            String::new()
        };
        let element = self
            .element_mut(select_node)
            .ok_or_else(|| Error::Runtime("select target is not an element".into()))?;
        element.value = value;
        Ok(())
    }

    pub(crate) fn has_select_option(&self, select_node: NodeId, value: &str) -> bool {
        let mut options = Vec::new();
        self.collect_select_options(select_node, &mut options);
        options
            .into_iter()
            .any(|option| self.option_effective_value(option) == value)
    }

    fn select_value_from_options(&self, select_node: NodeId) -> Result<String> {
        let mut options = Vec::new();
        self.collect_select_options(select_node, &mut options);
        let Some(first) = options.first().copied() else {
            return Ok(String::new());
        };

        let selected = options
            .iter()
            .copied()
            .find(|option| self.attr(*option, "selected").is_some())
            .unwrap_or(first);
        Ok(self.option_effective_value(selected))
    }

    pub(crate) fn collect_select_options(&self, node: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.nodes[node.0].children {
            if self.has_tag(*child, "option") {
                out.push(*child);
            }
            self.collect_select_options(*child, out);
        }
    }

    // Without a value attribute an option submits its whitespace-collapsed label.
    fn option_effective_value(&self, option_node: NodeId) -> String {
        if let Some(value) = self.attr(option_node, "value") {
            return value;
        }
        self.text_content(option_node)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn checked(&self, node_id: NodeId) -> Result<bool> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Runtime("checked target is not an element".into()))?;
        Ok(element.checked)
    }

    pub(crate) fn set_checked(&mut self, node_id: NodeId, checked: bool) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("checked target is not an element".into()))?;
        element.checked = checked;
        Ok(())
    }

    pub(crate) fn disabled(&self, node_id: NodeId) -> bool {
        self.element(node_id).map(|e| e.disabled).unwrap_or(false)
    }

    // The property reflects to the `disabled` content attribute.
    pub(crate) fn set_disabled(&mut self, node_id: NodeId, disabled: bool) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("disabled target is not an element".into()))?;
        element.disabled = disabled;
        if disabled {
            element
                .attrs
                .entry("disabled".to_string())
                .or_default();
        } else {
            element.attrs.remove("disabled");
        }
        Ok(())
    }

    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|e| e.attrs.get(&name.to_ascii_lowercase()).cloned())
    }
}
