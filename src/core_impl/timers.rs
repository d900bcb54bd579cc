use super::*;

impl Page {
    pub fn now_ms(&self) -> i64 {
        self.scheduler.now_ms
    }

    /// Cancels a pending timer. Returns whether it was still queued.
    pub fn clear_timer(&mut self, timer_id: i64) -> bool {
        self.clear_timeout(timer_id)
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.scheduler.pending()
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Runtime(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.scheduler.timer_step_limit = max_steps;
        Ok(())
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let from = self.scheduler.now_ms;
        self.scheduler.now_ms = self.scheduler.now_ms.saturating_add(delta_ms);
        let ran = self.run_due_timers_internal()?;
        self.trace_timer_line(format!(
            "[timer] advance delta_ms={} from={} to={} ran_due={}",
            delta_ms, from, self.scheduler.now_ms, ran
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.scheduler.now_ms {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={})",
                self.scheduler.now_ms
            )));
        }
        let from = self.scheduler.now_ms;
        self.scheduler.now_ms = target_ms;
        let ran = self.run_due_timers_internal()?;
        self.trace_timer_line(format!(
            "[timer] advance_to from={} to={} ran_due={}",
            from, self.scheduler.now_ms, ran
        ));
        Ok(())
    }

    /// Runs every queued timer, moving the clock forward to each due time.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.scheduler.now_ms;
        let ran = self.run_timer_queue(None, true)?;
        self.trace_timer_line(format!(
            "[timer] flush from={} to={} ran={}",
            from, self.scheduler.now_ms, ran
        ));
        Ok(())
    }

    pub fn run_next_timer(&mut self) -> Result<bool> {
        let Some(next_idx) = self.scheduler.next_task_index(None) else {
            self.trace_timer_line("[timer] run_next none".into());
            return Ok(false);
        };

        let task = self.scheduler.task_queue.remove(next_idx);
        if task.due_at > self.scheduler.now_ms {
            self.scheduler.now_ms = task.due_at;
        }
        self.execute_timer_task(task)?;
        Ok(true)
    }

    pub fn run_due_timers(&mut self) -> Result<usize> {
        let ran = self.run_due_timers_internal()?;
        self.trace_timer_line(format!(
            "[timer] run_due now_ms={} ran={}",
            self.scheduler.now_ms, ran
        ));
        Ok(ran)
    }

    pub(crate) fn schedule_timer(&mut self, delay_ms: i64, task: TimerTask) -> i64 {
        let scheduled = self.scheduler.push(delay_ms, task);
        self.trace_timer_line(format!(
            "[timer] schedule id={} due_at={} label={} delay_ms={}",
            scheduled.id,
            scheduled.due_at,
            scheduled.task.label(),
            delay_ms.max(0)
        ));
        scheduled.id
    }

    pub(crate) fn clear_timeout(&mut self, timer_id: i64) -> bool {
        let Some(task) = self.scheduler.remove(timer_id) else {
            return false;
        };
        self.trace_timer_line(format!(
            "[timer] clear id={} label={}",
            task.id,
            task.task.label()
        ));
        true
    }

    pub(crate) fn run_due_timers_internal(&mut self) -> Result<usize> {
        self.run_timer_queue(Some(self.scheduler.now_ms), false)
    }

    pub(crate) fn run_timer_queue(
        &mut self,
        due_limit: Option<i64>,
        advance_clock: bool,
    ) -> Result<usize> {
        let mut steps = 0usize;
        while let Some(next_idx) = self.scheduler.next_task_index(due_limit) {
            steps += 1;
            if steps > self.scheduler.timer_step_limit {
                return Err(self.timer_step_limit_error(
                    self.scheduler.timer_step_limit,
                    steps,
                    due_limit,
                ));
            }
            let task = self.scheduler.task_queue.remove(next_idx);
            if advance_clock && task.due_at > self.scheduler.now_ms {
                self.scheduler.now_ms = task.due_at;
            }
            self.execute_timer_task(task)?;
        }
        Ok(steps)
    }

    pub(crate) fn timer_step_limit_error(
        &self,
        max_steps: usize,
        steps: usize,
        due_limit: Option<i64>,
    ) -> Error {
        let due_limit_desc = due_limit
            .map(|value| value.to_string())
            .unwrap_or_else(|| "none".into());

        let next_task_desc = self
            .scheduler
            .next_task_index(due_limit)
            .and_then(|idx| self.scheduler.task_queue.get(idx))
            .map(|task| {
                format!(
                    "id={},due_at={},order={},label={}",
                    task.id,
                    task.due_at,
                    task.order,
                    task.task.label()
                )
            })
            .unwrap_or_else(|| "none".into());

        Error::Runtime(format!(
            "timer queue exceeded max task steps: limit={max_steps}, steps={steps}, now_ms={}, due_limit={}, pending_tasks={}, next_task={}",
            self.scheduler.now_ms,
            due_limit_desc,
            self.scheduler.task_queue.len(),
            next_task_desc
        ))
    }

    pub(crate) fn execute_timer_task(&mut self, task: ScheduledTask) -> Result<()> {
        self.trace_timer_line(format!(
            "[timer] run id={} due_at={} label={} now_ms={}",
            task.id,
            task.due_at,
            task.task.label(),
            self.scheduler.now_ms
        ));

        match task.task {
            TimerTask::Effects {
                transition,
                effects,
                ..
            } => {
                if let Some(key) = transition {
                    self.finish_transition_stage(key, task.id);
                }
                self.apply_effects(&effects)?;
            }
            TimerTask::AlertsAutoCollapse { widget } => {
                self.on_alerts_auto_collapse(widget, task.id)?;
            }
        }

        self.run_microtasks()
    }

    pub(crate) fn run_microtasks(&mut self) -> Result<()> {
        while let Some(task) = self.microtasks.pop_front() {
            match task {
                Microtask::ClipboardWrite {
                    text,
                    success_msg,
                    error_prefix,
                } => match self.platform_mocks.clipboard_failure.clone() {
                    Some(reason) => {
                        self.trace_event_line(format!("[clipboard] write rejected: {reason}"));
                        self.alert(&format!("{error_prefix}{reason}"));
                    }
                    None => {
                        self.trace_event_line(format!(
                            "[clipboard] write chars={}",
                            text.chars().count()
                        ));
                        self.platform_mocks.clipboard_text = text;
                        self.alert(&success_msg);
                    }
                },
            }
        }
        Ok(())
    }

    pub(crate) fn trace_node_label(&self, node_id: NodeId) -> String {
        if let Some(id) = self.dom.attr(node_id, "id").filter(|id| !id.is_empty()) {
            return format!("#{id}");
        }
        self.dom
            .tag_name(node_id)
            .map(str::to_string)
            .unwrap_or_else(|| "document".into())
    }

    pub(crate) fn trace_event_line(&mut self, line: String) {
        if self.trace_state.events {
            log::trace!(target: "page_widgets::event", "{line}");
            self.trace_line(line);
        }
    }

    pub(crate) fn trace_timer_line(&mut self, line: String) {
        if self.trace_state.timers {
            log::trace!(target: "page_widgets::timer", "{line}");
            self.trace_line(line);
        }
    }

    pub(crate) fn trace_line(&mut self, line: String) {
        if self.trace_state.enabled {
            if self.trace_state.logs.len() >= self.trace_state.log_limit {
                self.trace_state.logs.pop_front();
            }
            self.trace_state.logs.push_back(line);
        }
    }
}
