use super::*;

impl Dom {
    pub(crate) fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        let all = self.query_selector_all(selector)?;
        Ok(all.into_iter().next())
    }

    pub(crate) fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let groups = parse_selector_groups(selector)?;

        if groups.len() == 1 && groups[0].len() == 1 {
            if let Some(id) = groups[0][0].step.id_only() {
                return Ok(self.by_id(id).into_iter().collect());
            }
        }

        let mut seen = HashSet::new();
        let mut matched = Vec::new();
        for candidate in self.all_element_nodes() {
            if groups
                .iter()
                .any(|steps| self.matches_selector_chain(candidate, steps))
                && seen.insert(candidate)
            {
                matched.push(candidate);
            }
        }
        Ok(matched)
    }

    /// Nearest inclusive ancestor matching `selector`.
    pub(crate) fn closest(&self, node_id: NodeId, selector: &str) -> Result<Option<NodeId>> {
        if self.element(node_id).is_none() {
            return Ok(None);
        }

        let groups = parse_selector_groups(selector)?;
        let mut cursor = Some(node_id);
        while let Some(current) = cursor {
            if groups
                .iter()
                .any(|steps| self.matches_selector_chain(current, steps))
            {
                return Ok(Some(current));
            }
            cursor = self.parent(current);
        }
        Ok(None)
    }

    /// Matches right to left, backtracking over every ancestor or sibling the
    /// combinator allows.
    pub(crate) fn matches_selector_chain(&self, node_id: NodeId, steps: &[SelectorPart]) -> bool {
        let Some((last, rest)) = steps.split_last() else {
            return false;
        };
        if !self.matches_step(node_id, &last.step) {
            return false;
        }
        if rest.is_empty() {
            return true;
        }

        let parent = |node: NodeId| self.parent(node);
        let previous = |node: NodeId| self.previous_element_sibling(node);
        match last.combinator.unwrap_or(SelectorCombinator::Descendant) {
            SelectorCombinator::Child => self.any_along(node_id, parent, rest, false),
            SelectorCombinator::Descendant => self.any_along(node_id, parent, rest, true),
            SelectorCombinator::AdjacentSibling => self.any_along(node_id, previous, rest, false),
            SelectorCombinator::GeneralSibling => self.any_along(node_id, previous, rest, true),
        }
    }

    fn any_along(
        &self,
        from: NodeId,
        next: impl Fn(NodeId) -> Option<NodeId>,
        rest: &[SelectorPart],
        keep_walking: bool,
    ) -> bool {
        let mut cursor = next(from);
        while let Some(node) = cursor {
            if self.matches_selector_chain(node, rest) {
                return true;
            }
            if !keep_walking {
                break;
            }
            cursor = next(node);
        }
        false
    }

    pub(crate) fn matches_step(&self, node_id: NodeId, step: &SelectorStep) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };

        step.tag
            .as_ref()
            .is_none_or(|tag| element.tag_name.eq_ignore_ascii_case(tag))
            && step.id.as_ref().is_none_or(|id| element.attrs.get("id") == Some(id))
            && step.classes.iter().all(|class_name| has_class(element, class_name))
            && step.attrs.iter().all(|cond| cond.matches(&element.attrs))
            && step
                .pseudo_classes
                .iter()
                .all(|pseudo| self.matches_pseudo(node_id, element, pseudo))
    }

    fn matches_pseudo(&self, node_id: NodeId, element: &Element, pseudo: &SelectorPseudoClass) -> bool {
        match pseudo {
            SelectorPseudoClass::FirstChild => self.previous_element_sibling(node_id).is_none(),
            SelectorPseudoClass::LastChild => self.next_element_sibling(node_id).is_none(),
            SelectorPseudoClass::Checked => element.checked,
            SelectorPseudoClass::Disabled => element.disabled,
            SelectorPseudoClass::Enabled => !element.disabled,
            SelectorPseudoClass::Not(inners) => !inners
                .iter()
                .any(|inner| self.matches_selector_chain(node_id, inner)),
        }
    }
}
