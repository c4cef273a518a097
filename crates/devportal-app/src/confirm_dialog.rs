//! Confirm dialog state.
//!
//! Data model for confirmation dialogs. The rendering widget lives in
//! `devportal-tui`'s `widgets/confirm_dialog.rs`.

use crate::message::Message;

#[derive(Debug, Clone)]
pub struct ConfirmDialogState {
    /// Translation key of the title
    pub title: &'static str,
    /// Translation key of the body
    pub message: &'static str,
    /// (label key, message sent when chosen); the first option is the confirm action
    pub options: Vec<(&'static str, Message)>,
}

impl ConfirmDialogState {
    pub fn new(
        title: &'static str,
        message: &'static str,
        options: Vec<(&'static str, Message)>,
    ) -> Self {
        Self {
            title,
            message,
            options,
        }
    }

    /// Ask before removing the attached image at `index`
    pub fn delete_image(index: usize) -> Self {
        Self::new(
            "delete_image",
            "delete_image_confirm",
            vec![
                ("delete", Message::ConfirmImageDelete { index }),
                ("cancel", Message::CancelImageDelete),
            ],
        )
    }

    pub fn confirm_message(&self) -> Option<Message> {
        self.options.first().map(|(_, msg)| msg.clone())
    }

    pub fn cancel_message(&self) -> Option<Message> {
        self.options.last().map(|(_, msg)| msg.clone())
    }
}
