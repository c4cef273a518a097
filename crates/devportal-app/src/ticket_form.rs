//! Ticket submission form state

use devportal_core::ticket::cycle;
use devportal_core::{CallType, DeviceRecord, ImageAttachment, TicketDraft, Urgency, MAX_IMAGES};

/// Focusable form fields, in tab order. The phone is read-only and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Title,
    CallType,
    Urgency,
    Description,
    ImagePath,
    Images,
    Submit,
}

impl FormField {
    pub const ORDER: [FormField; 9] = [
        FormField::Name,
        FormField::Email,
        FormField::Title,
        FormField::CallType,
        FormField::Urgency,
        FormField::Description,
        FormField::ImagePath,
        FormField::Images,
        FormField::Submit,
    ];

    /// Accepts free text
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FormField::Name
                | FormField::Email
                | FormField::Title
                | FormField::Description
                | FormField::ImagePath
        )
    }
}

/// Result of adding a batch of images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageBatchOutcome {
    /// The form already holds the maximum
    Full,
    Added { accepted: usize, submitted: usize },
}

impl ImageBatchOutcome {
    /// Fewer images were kept than were selected
    pub fn truncated(&self) -> bool {
        matches!(self, ImageBatchOutcome::Added { accepted, submitted } if accepted < submitted)
    }
}

#[derive(Debug, Clone)]
pub struct TicketForm {
    pub draft: TicketDraft,
    pub focus: FormField,
    /// Comma separated paths typed into the image field
    pub image_path_input: String,
    pub selected_image: usize,
    pub submitting: bool,
    pub loading_images: bool,
}

impl TicketForm {
    pub fn new(record: &DeviceRecord) -> Self {
        Self {
            draft: TicketDraft::for_device(record),
            focus: FormField::Name,
            image_path_input: String::new(),
            selected_image: 0,
            submitting: false,
            loading_images: false,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.step_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.step_focus(FormField::ORDER.len() - 1);
    }

    fn step_focus(&self, by: usize) -> FormField {
        let len = FormField::ORDER.len();
        let current = FormField::ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        let mut next = (current + by) % len;
        // Skip the image list while it is empty
        if FormField::ORDER[next] == FormField::Images && self.draft.images.is_empty() {
            next = (next + by) % len;
        }
        FormField::ORDER[next]
    }

    fn text_field(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.draft.name),
            FormField::Email => Some(&mut self.draft.email),
            FormField::Title => Some(&mut self.draft.title),
            FormField::Description => Some(&mut self.draft.description),
            FormField::ImagePath => Some(&mut self.image_path_input),
            _ => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if self.submitting {
            return;
        }
        if let Some(field) = self.text_field() {
            field.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.submitting {
            return;
        }
        if let Some(field) = self.text_field() {
            field.pop();
        }
    }

    /// Line break in the description
    pub fn newline(&mut self) {
        if !self.submitting && self.focus == FormField::Description {
            self.draft.description.push('\n');
        }
    }

    /// Step the focused choice field
    pub fn cycle_choice(&mut self, forward: bool) {
        if self.submitting {
            return;
        }
        match self.focus {
            FormField::CallType => {
                self.draft.call_type = cycle(&CallType::ALL, self.draft.call_type, forward);
            }
            FormField::Urgency => {
                self.draft.urgency = cycle(&Urgency::ALL, self.draft.urgency, forward);
            }
            _ => {}
        }
    }

    /// Split the typed image paths and clear the input
    pub fn take_image_paths(&mut self) -> Vec<String> {
        let paths = self
            .image_path_input
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        self.image_path_input.clear();
        paths
    }

    pub fn is_full(&self) -> bool {
        self.draft.images.len() >= MAX_IMAGES
    }

    /// Add loaded images in order, keeping at most [`MAX_IMAGES`]
    pub fn add_images(
        &mut self,
        images: Vec<ImageAttachment>,
        submitted: usize,
    ) -> ImageBatchOutcome {
        if self.is_full() {
            return ImageBatchOutcome::Full;
        }
        let room = self.draft.remaining_image_slots();
        let accepted = images.len().min(room);
        self.draft.images.extend(images.into_iter().take(accepted));
        ImageBatchOutcome::Added {
            accepted,
            submitted,
        }
    }

    pub fn select_image(&mut self, down: bool) {
        let count = self.draft.images.len();
        if count == 0 {
            return;
        }
        self.selected_image = if down {
            (self.selected_image + 1).min(count - 1)
        } else {
            self.selected_image.saturating_sub(1)
        };
    }

    pub fn remove_image(&mut self, index: usize) -> Option<ImageAttachment> {
        if index >= self.draft.images.len() {
            return None;
        }
        let removed = self.draft.images.remove(index);
        let count = self.draft.images.len();
        if self.selected_image >= count {
            self.selected_image = count.saturating_sub(1);
        }
        if count == 0 && self.focus == FormField::Images {
            self.focus = FormField::ImagePath;
        }
        Some(removed)
    }

    /// Fresh form for the same device
    pub fn reset(&mut self) {
        let phone = std::mem::take(&mut self.draft.phone);
        let device = std::mem::take(&mut self.draft.device);
        *self = Self {
            draft: TicketDraft {
                phone,
                device,
                ..TicketDraft::default()
            },
            focus: FormField::Name,
            image_path_input: String::new(),
            selected_image: 0,
            submitting: false,
            loading_images: false,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> ImageAttachment {
        ImageAttachment::new(name, vec![1, 2, 3])
    }

    fn images(n: usize) -> Vec<ImageAttachment> {
        (0..n).map(|i| image(&format!("img{i}.png"))).collect()
    }

    fn form() -> TicketForm {
        TicketForm::new(&DeviceRecord {
            phone: Some("0501234567".into()),
            ..Default::default()
        })
    }

    #[test]
    fn test_six_images_on_empty_form_keeps_five() {
        let mut f = form();
        let outcome = f.add_images(images(6), 6);
        assert_eq!(
            outcome,
            ImageBatchOutcome::Added {
                accepted: 5,
                submitted: 6
            }
        );
        assert!(outcome.truncated());
        assert_eq!(f.draft.images.len(), 5);
        assert_eq!(f.draft.images[0].file_name, "img0.png");
    }

    #[test]
    fn test_batch_respects_existing_images() {
        for existing in 0..=5 {
            for batch in 0..=6 {
                let mut f = form();
                f.draft.images = images(existing);
                f.add_images(images(batch), batch);
                assert_eq!(f.draft.images.len(), (existing + batch).min(5));
            }
        }
    }

    #[test]
    fn test_full_form_rejects_batch() {
        let mut f = form();
        f.draft.images = images(5);
        assert_eq!(f.add_images(images(1), 1), ImageBatchOutcome::Full);
    }

    #[test]
    fn test_batch_that_fits_is_not_truncated() {
        let mut f = form();
        let outcome = f.add_images(images(2), 2);
        assert!(!outcome.truncated());
    }

    #[test]
    fn test_focus_skips_empty_image_list() {
        let mut f = form();
        f.focus = FormField::ImagePath;
        f.focus_next();
        assert_eq!(f.focus, FormField::Submit);

        f.draft.images = images(1);
        f.focus = FormField::ImagePath;
        f.focus_next();
        assert_eq!(f.focus, FormField::Images);
    }

    #[test]
    fn test_focus_wraps_backwards() {
        let mut f = form();
        f.focus_prev();
        assert_eq!(f.focus, FormField::Submit);
    }

    #[test]
    fn test_text_input_goes_to_focused_field() {
        let mut f = form();
        f.insert_char('D');
        f.focus = FormField::Title;
        f.insert_char('T');
        f.backspace();
        f.insert_char('X');
        assert_eq!(f.draft.name, "D");
        assert_eq!(f.draft.title, "X");
    }

    #[test]
    fn test_choice_cycles() {
        let mut f = form();
        f.focus = FormField::Urgency;
        f.cycle_choice(true);
        assert_eq!(f.draft.urgency, Some(Urgency::NotUrgent));
        f.cycle_choice(false);
        assert_eq!(f.draft.urgency, Some(Urgency::Disabled));
    }

    #[test]
    fn test_take_image_paths() {
        let mut f = form();
        f.image_path_input = " a.png, ,b.jpg ,".into();
        assert_eq!(f.take_image_paths(), vec!["a.png", "b.jpg"]);
        assert!(f.image_path_input.is_empty());
    }

    #[test]
    fn test_remove_image_clamps_selection() {
        let mut f = form();
        f.draft.images = images(2);
        f.focus = FormField::Images;
        f.selected_image = 1;
        f.remove_image(1);
        assert_eq!(f.selected_image, 0);
        f.remove_image(0);
        assert_eq!(f.focus, FormField::ImagePath);
        assert!(f.remove_image(0).is_none());
    }

    #[test]
    fn test_reset_keeps_device_and_phone() {
        let mut f = form();
        f.draft.name = "Dana".into();
        f.draft.device.serial_number = "SN".into();
        f.reset();
        assert!(f.draft.name.is_empty());
        assert_eq!(f.draft.phone, "0501234567");
        assert_eq!(f.draft.device.serial_number, "SN");
    }
}
