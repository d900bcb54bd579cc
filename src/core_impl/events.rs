use super::*;

impl Page {
    /// Dispatches `event_type` at `target`: target phase, then bubbling.
    ///
    /// Microtasks queued by listeners settle once the outermost dispatch
    /// returns, so nested dispatches (a click that fires `change`) share one
    /// checkpoint.
    pub(crate) fn dispatch_event(&mut self, target: NodeId, event_type: &str) -> Result<EventState> {
        let mut event = EventState::new(event_type, target);
        self.dispatch_depth += 1;
        let result = self.dispatch_prepared_event(&mut event);
        self.dispatch_depth -= 1;
        result?;

        if self.dispatch_depth == 0 {
            self.run_microtasks()?;
        }
        Ok(event)
    }

    fn dispatch_prepared_event(&mut self, event: &mut EventState) -> Result<()> {
        let target = event.target;
        let mut path = Vec::new();
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.dom.parent(node);
        }

        event.current_target = target;
        self.invoke_listeners(target, event, "target")?;

        if event_bubbles(&event.event_type) {
            for node in path.into_iter().skip(1) {
                event.current_target = node;
                self.invoke_listeners(node, event, "bubble")?;
            }
        }

        if self.trace_state.enabled {
            let target_label = self.trace_node_label(event.target);
            self.trace_event_line(format!(
                "[event] done {} target={} default_prevented={}",
                event.event_type, target_label, event.default_prevented
            ));
        }
        Ok(())
    }

    fn invoke_listeners(
        &mut self,
        node_id: NodeId,
        event: &mut EventState,
        phase: &str,
    ) -> Result<()> {
        let listeners = self.listeners.get(node_id, &event.event_type);
        for listener in listeners {
            if self.trace_state.enabled {
                let target_label = self.trace_node_label(event.target);
                let current_label = self.trace_node_label(event.current_target);
                self.trace_event_line(format!(
                    "[event] {} target={} current={} phase={} listener={} default_prevented={}",
                    event.event_type,
                    target_label,
                    current_label,
                    phase,
                    listener.kind(),
                    event.default_prevented
                ));
            }
            self.run_listener(listener, event)?;
        }
        Ok(())
    }

    fn run_listener(&mut self, listener: Listener, event: &mut EventState) -> Result<()> {
        match listener {
            Listener::ToggleFields { binding } => {
                self.on_toggle_trigger_change(binding, event.current_target)
            }
            Listener::ConfirmGate { message } => {
                if !self.confirm(&message) {
                    event.default_prevented = true;
                }
                Ok(())
            }
            Listener::CopyToClipboard {
                source,
                success_msg,
                error_prefix,
            } => {
                let text = self.dom.inner_text(source);
                self.microtasks.push_back(Microtask::ClipboardWrite {
                    text,
                    success_msg,
                    error_prefix,
                });
                Ok(())
            }
            Listener::AlertsExpand { widget } => self.expand_alerts_widget(widget),
            Listener::AlertsPointerEnter { widget } => self.cancel_alerts_timer(widget),
            Listener::AlertsPointerLeave { widget } => self.on_alerts_pointer_leave(widget),
        }
    }
}

fn event_bubbles(event_type: &str) -> bool {
    !matches!(
        event_type,
        "mouseenter" | "mouseleave" | "focus" | "blur" | "load"
    )
}
