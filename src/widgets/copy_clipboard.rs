use super::*;

pub const DEFAULT_COPY_ERROR_PREFIX: &str = "Error al copiar: ";

impl Page {
    /// Copies the rendered text of `#source_id` when `#button_id` is clicked.
    ///
    /// The write settles after the click: success alerts `success_msg`, a
    /// rejected write alerts `error_prefix` (default
    /// [`DEFAULT_COPY_ERROR_PREFIX`]) followed by the platform error. Returns
    /// `false` without binding anything when either element is missing.
    pub fn init_copy_to_clipboard(
        &mut self,
        button_id: &str,
        source_id: &str,
        success_msg: &str,
        error_prefix: Option<&str>,
    ) -> bool {
        let (Some(button), Some(source)) = (self.dom.by_id(button_id), self.dom.by_id(source_id))
        else {
            log::debug!("copy-to-clipboard: #{button_id} or #{source_id} not found");
            return false;
        };

        self.listeners.add(
            button,
            "click",
            Listener::CopyToClipboard {
                source,
                success_msg: success_msg.to_string(),
                error_prefix: error_prefix.unwrap_or(DEFAULT_COPY_ERROR_PREFIX).to_string(),
            },
        );
        true
    }
}
