use super::*;

impl Page {
    /// Gates clicks on every element matching `selector` behind a confirm
    /// dialog showing `message`. Declining prevents the click's default
    /// action. Returns the number of elements bound.
    pub fn init_confirm_button(&mut self, selector: &str, message: &str) -> Result<usize> {
        let targets = self.dom.query_selector_all(selector)?;
        for target in &targets {
            self.listeners.add(
                *target,
                "click",
                Listener::ConfirmGate {
                    message: message.to_string(),
                },
            );
        }
        log::debug!("confirm-gate: bound {} element(s) for {selector}", targets.len());
        Ok(targets.len())
    }
}
