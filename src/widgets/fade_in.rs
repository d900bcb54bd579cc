use super::*;

pub const FADE_IN_CLASS: &str = "animate-fadeIn";
pub const DEFAULT_FADE_IN_STEP_MS: i64 = 200;

impl Page {
    /// Adds [`FADE_IN_CLASS`] to the `i`-th match of `selector` after
    /// `i * delay_step_ms`. Negative steps count as zero.
    pub fn init_fade_in(&mut self, selector: &str, delay_step_ms: i64) -> Result<usize> {
        let targets = self.dom.query_selector_all(selector)?;
        let step = delay_step_ms.max(0);
        for (idx, target) in targets.iter().enumerate() {
            let delay = step.saturating_mul(idx as i64);
            self.schedule_effects(
                None,
                "fade-in",
                delay,
                vec![(*target, DomEffect::add_class(FADE_IN_CLASS))],
            );
        }
        Ok(targets.len())
    }
}
