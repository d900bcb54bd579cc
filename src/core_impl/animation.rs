use super::*;

impl Page {
    /// Starts a new transition on `key`, superseding the one in flight.
    ///
    /// Pending stage timers of the previous transition are cancelled and the
    /// transient classes it added are removed again.
    pub(crate) fn begin_transition(&mut self, key: TransitionKey) -> Result<()> {
        let Some(previous) = self.animations.active.remove(&key) else {
            return Ok(());
        };

        let (node, channel) = key;
        for timer_id in &previous.timers {
            self.clear_timeout(*timer_id);
        }
        for class_name in &previous.transient_classes {
            self.dom.class_remove(node, class_name)?;
        }
        if !previous.timers.is_empty() {
            self.trace_timer_line(format!(
                "[animation] supersede {} target={} cancelled={}",
                channel.as_str(),
                self.trace_node_label(node),
                previous.timers.len()
            ));
        }
        Ok(())
    }

    pub(crate) fn mark_transient_class(&mut self, key: TransitionKey, class_name: &str) {
        let transition = self.animations.active.entry(key).or_default();
        if !transition.transient_classes.iter().any(|c| c == class_name) {
            transition.transient_classes.push(class_name.to_string());
        }
    }

    pub(crate) fn apply_effects(&mut self, effects: &[(NodeId, DomEffect)]) -> Result<()> {
        for (node, effect) in effects {
            match effect {
                DomEffect::SetStyle { prop, value } => self.dom.style_set(*node, prop, value)?,
                DomEffect::AddClass(class_name) => self.dom.class_add(*node, class_name)?,
                DomEffect::RemoveClass(class_name) => self.dom.class_remove(*node, class_name)?,
            }
        }
        Ok(())
    }

    /// Queues one transition stage `delay_ms` from now and returns its timer id.
    pub(crate) fn schedule_effects(
        &mut self,
        transition: Option<TransitionKey>,
        label: &'static str,
        delay_ms: i64,
        effects: Vec<(NodeId, DomEffect)>,
    ) -> i64 {
        let timer_id = self.schedule_timer(
            delay_ms,
            TimerTask::Effects {
                transition,
                label,
                effects,
            },
        );
        if let Some(key) = transition {
            self.animations
                .active
                .entry(key)
                .or_default()
                .timers
                .push(timer_id);
        }
        timer_id
    }

    // A transition with no stages left is complete; its transient classes
    // were already removed by its own final stage.
    pub(crate) fn finish_transition_stage(&mut self, key: TransitionKey, timer_id: i64) {
        let Some(transition) = self.animations.active.get_mut(&key) else {
            return;
        };
        transition.timers.retain(|id| *id != timer_id);
        if transition.timers.is_empty() {
            self.animations.active.remove(&key);
        }
    }
}
