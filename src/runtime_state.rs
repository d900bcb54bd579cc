use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum AnimationChannel {
    Visibility,
    Highlight,
    Alerts,
}

impl AnimationChannel {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Visibility => "visibility",
            Self::Highlight => "highlight",
            Self::Alerts => "alerts",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DomEffect {
    SetStyle { prop: String, value: String },
    AddClass(String),
    RemoveClass(String),
}

impl DomEffect {
    pub(crate) fn style(prop: &str, value: impl Into<String>) -> Self {
        Self::SetStyle {
            prop: prop.to_string(),
            value: value.into(),
        }
    }

    pub(crate) fn add_class(class_name: &str) -> Self {
        Self::AddClass(class_name.to_string())
    }

    pub(crate) fn remove_class(class_name: &str) -> Self {
        Self::RemoveClass(class_name.to_string())
    }
}

pub(crate) type TransitionKey = (NodeId, AnimationChannel);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TimerTask {
    /// One stage of a transition; all effects land in the same tick.
    Effects {
        transition: Option<TransitionKey>,
        label: &'static str,
        effects: Vec<(NodeId, DomEffect)>,
    },
    AlertsAutoCollapse {
        widget: usize,
    },
}

impl TimerTask {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Effects { label, .. } => label,
            Self::AlertsAutoCollapse { .. } => ALERTS_AUTO_COLLAPSE_LABEL,
        }
    }
}

pub(crate) const ALERTS_AUTO_COLLAPSE_LABEL: &str = "alerts.auto-collapse";

#[derive(Debug, Clone)]
pub(crate) struct ScheduledTask {
    pub(crate) id: i64,
    pub(crate) due_at: i64,
    pub(crate) order: i64,
    pub(crate) task: TimerTask,
}

/// A timer waiting in the page's queue, as reported by [`Page::pending_timers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: i64,
    pub due_at: i64,
    pub order: i64,
    /// What the timer will do, e.g. `visibility.hide` or `alerts.auto-collapse`.
    pub label: &'static str,
}

#[derive(Debug)]
pub(crate) struct SchedulerState {
    pub(crate) task_queue: Vec<ScheduledTask>,
    pub(crate) now_ms: i64,
    pub(crate) timer_step_limit: usize,
    pub(crate) next_timer_id: i64,
    pub(crate) next_task_order: i64,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self {
            task_queue: Vec::new(),
            now_ms: 0,
            timer_step_limit: 10_000,
            next_timer_id: 1,
            next_task_order: 0,
        }
    }
}

impl SchedulerState {
    pub(crate) fn push(&mut self, delay_ms: i64, task: TimerTask) -> ScheduledTask {
        let id = self.next_timer_id;
        self.next_timer_id = self.next_timer_id.saturating_add(1);
        let order = self.next_task_order;
        self.next_task_order = self.next_task_order.saturating_add(1);
        let scheduled = ScheduledTask {
            id,
            due_at: self.now_ms.saturating_add(delay_ms.max(0)),
            order,
            task,
        };
        self.task_queue.push(scheduled.clone());
        scheduled
    }

    pub(crate) fn remove(&mut self, timer_id: i64) -> Option<ScheduledTask> {
        let pos = self
            .task_queue
            .iter()
            .position(|task| task.id == timer_id)?;
        Some(self.task_queue.remove(pos))
    }

    pub(crate) fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.task_queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }

    pub(crate) fn pending(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
                label: task.task.label(),
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Listener {
    ToggleFields {
        binding: usize,
    },
    ConfirmGate {
        message: String,
    },
    CopyToClipboard {
        source: NodeId,
        success_msg: String,
        error_prefix: String,
    },
    AlertsExpand {
        widget: usize,
    },
    AlertsPointerEnter {
        widget: usize,
    },
    AlertsPointerLeave {
        widget: usize,
    },
}

impl Listener {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::ToggleFields { .. } => "toggle-fields",
            Self::ConfirmGate { .. } => "confirm-gate",
            Self::CopyToClipboard { .. } => "copy-to-clipboard",
            Self::AlertsExpand { .. } => "alerts-expand",
            Self::AlertsPointerEnter { .. } => "alerts-pointer-enter",
            Self::AlertsPointerLeave { .. } => "alerts-pointer-leave",
        }
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    pub(crate) map: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, node_id: NodeId, event: &str, listener: Listener) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(event.to_string())
            .or_default()
            .push(listener);
    }

    pub(crate) fn get(&self, node_id: NodeId, event: &str) -> Vec<Listener> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) default_prevented: bool,
}

impl EventState {
    pub(crate) fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            default_prevented: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Microtask {
    ClipboardWrite {
        text: String,
        success_msg: String,
        error_prefix: String,
    },
}

#[derive(Debug, Default)]
pub(crate) struct PlatformMockState {
    pub(crate) clipboard_text: String,
    pub(crate) clipboard_failure: Option<String>,
    pub(crate) alert_messages: Vec<String>,
    pub(crate) confirm_messages: Vec<String>,
    pub(crate) confirm_responses: VecDeque<bool>,
    pub(crate) default_confirm_response: bool,
}

/// A form submission that was allowed to proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub form_id: Option<String>,
    pub action: String,
    pub submitter_id: Option<String>,
}

/// A link activation that was allowed to proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub href: String,
}

#[derive(Debug, Default)]
pub(crate) struct ActivityLog {
    pub(crate) submissions: Vec<FormSubmission>,
    pub(crate) navigations: Vec<Navigation>,
}

#[derive(Debug, Default)]
pub(crate) struct ActiveTransition {
    pub(crate) timers: Vec<i64>,
    pub(crate) transient_classes: Vec<String>,
}

#[derive(Debug, Default)]
pub(crate) struct AnimationState {
    pub(crate) active: HashMap<TransitionKey, ActiveTransition>,
}

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
        }
    }
}
