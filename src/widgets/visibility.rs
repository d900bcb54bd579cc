use super::*;

/// Timings and values of the container show/hide transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityAnimation {
    /// Length of the CSS transition on `max-height`, `opacity` and `transform`.
    pub duration_ms: i64,
    /// Tick between clearing `display` and starting the reveal.
    pub reveal_delay_ms: i64,
    pub expanded_max_height: String,
    pub hidden_transform: String,
    /// Class flashed on a container while it is revealed.
    pub highlight_class: String,
    pub highlight_ms: i64,
}

impl Default for VisibilityAnimation {
    fn default() -> Self {
        Self {
            duration_ms: 500,
            reveal_delay_ms: 10,
            expanded_max_height: "100px".into(),
            hidden_transform: "translateY(-10px)".into(),
            highlight_class: "bg-yellow-50".into(),
            highlight_ms: 1000,
        }
    }
}

impl VisibilityAnimation {
    pub(crate) fn transition_value(&self) -> String {
        let seconds = css_seconds(self.duration_ms);
        format!("max-height {seconds} ease, opacity {seconds} ease, transform {seconds} ease")
    }
}

impl Page {
    /// Reveals the first element matching `selector` with the default animation.
    pub fn show_container(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.animate_show(target, &VisibilityAnimation::default())
    }

    /// Collapses the first element matching `selector` with the default animation.
    pub fn hide_container(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.animate_hide(target, &VisibilityAnimation::default())
    }

    pub(crate) fn animate_show(
        &mut self,
        container: NodeId,
        animation: &VisibilityAnimation,
    ) -> Result<()> {
        let key = (container, AnimationChannel::Visibility);
        self.begin_transition(key)?;
        self.apply_effects(&[
            (container, DomEffect::style("transition", animation.transition_value())),
            (container, DomEffect::style("overflow", "hidden")),
            (container, DomEffect::style("display", "")),
        ])?;

        // A highlight class carried by the markup is not ours to strip on supersede.
        if !self.dom.class_contains(container, &animation.highlight_class)? {
            self.mark_transient_class(key, &animation.highlight_class);
        }
        self.schedule_effects(
            Some(key),
            "visibility.show",
            animation.reveal_delay_ms,
            vec![
                (
                    container,
                    DomEffect::style("max-height", animation.expanded_max_height.clone()),
                ),
                (container, DomEffect::style("opacity", "1")),
                (container, DomEffect::style("transform", "translateY(0)")),
                (container, DomEffect::add_class(&animation.highlight_class)),
            ],
        );
        self.schedule_effects(
            Some(key),
            "visibility.highlight-end",
            animation.reveal_delay_ms + animation.highlight_ms,
            vec![(container, DomEffect::remove_class(&animation.highlight_class))],
        );
        log::debug!("show container {}", self.trace_node_label(container));
        Ok(())
    }

    pub(crate) fn animate_hide(
        &mut self,
        container: NodeId,
        animation: &VisibilityAnimation,
    ) -> Result<()> {
        let key = (container, AnimationChannel::Visibility);
        self.begin_transition(key)?;
        self.apply_effects(&[
            (container, DomEffect::style("transition", animation.transition_value())),
            (container, DomEffect::style("overflow", "hidden")),
            (container, DomEffect::style("max-height", "0")),
            (container, DomEffect::style("opacity", "0")),
            (
                container,
                DomEffect::style("transform", animation.hidden_transform.clone()),
            ),
        ])?;

        self.schedule_effects(
            Some(key),
            "visibility.hide",
            animation.duration_ms,
            vec![(container, DomEffect::style("display", "none"))],
        );
        log::debug!("hide container {}", self.trace_node_label(container));
        Ok(())
    }

    /// Adds `class_name` to `node` for `duration_ms`; a newer flash replaces a pending one.
    pub(crate) fn flash_class(
        &mut self,
        node: NodeId,
        class_name: &str,
        duration_ms: i64,
    ) -> Result<()> {
        let key = (node, AnimationChannel::Highlight);
        self.begin_transition(key)?;
        if !self.dom.class_contains(node, class_name)? {
            self.dom.class_add(node, class_name)?;
            self.mark_transient_class(key, class_name);
        }
        self.schedule_effects(
            Some(key),
            "highlight.end",
            duration_ms,
            vec![(node, DomEffect::remove_class(class_name))],
        );
        Ok(())
    }
}
