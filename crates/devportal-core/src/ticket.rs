//! Service ticket draft and confirmation types

use std::path::Path;

use crate::device::DeviceRecord;
use crate::i18n::Localizer;

/// Maximum number of images attached to one ticket
pub const MAX_IMAGES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallType {
    Malfunction,
    Calibration,
    PreventiveMaintenance,
}

impl CallType {
    pub const ALL: [CallType; 3] = [
        CallType::Malfunction,
        CallType::Calibration,
        CallType::PreventiveMaintenance,
    ];

    /// Code expected by the ticket backend
    pub fn backend_code(&self) -> &'static str {
        match self {
            CallType::Malfunction => "תקלה",
            CallType::Calibration => "כיול",
            CallType::PreventiveMaintenance => "אחזקה מונעת",
        }
    }

    pub fn translation_key(&self) -> &'static str {
        match self {
            CallType::Malfunction => "malfunction",
            CallType::Calibration => "calibration",
            CallType::PreventiveMaintenance => "preventive_maintenance",
        }
    }

    pub fn label(&self, localizer: &Localizer) -> &'static str {
        localizer.translate(self.translation_key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Urgency {
    NotUrgent,
    Urgent,
    VeryUrgent,
    Disabled,
}

impl Urgency {
    pub const ALL: [Urgency; 4] = [
        Urgency::NotUrgent,
        Urgency::Urgent,
        Urgency::VeryUrgent,
        Urgency::Disabled,
    ];

    pub fn backend_code(&self) -> &'static str {
        match self {
            Urgency::NotUrgent => "לא דחוף",
            Urgency::Urgent => "דחוף",
            Urgency::VeryUrgent => "דחוף מאוד",
            Urgency::Disabled => "מושבת",
        }
    }

    pub fn translation_key(&self) -> &'static str {
        match self {
            Urgency::NotUrgent => "not_urgent",
            Urgency::Urgent => "urgent",
            Urgency::VeryUrgent => "very_urgent",
            Urgency::Disabled => "disabled",
        }
    }

    pub fn label(&self, localizer: &Localizer) -> &'static str {
        localizer.translate(self.translation_key())
    }
}

/// Step through `ALL`, wrapping, starting from nothing selected
pub fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>, forward: bool) -> Option<T> {
    if all.is_empty() {
        return None;
    }
    let next = match current.and_then(|c| all.iter().position(|x| *x == c)) {
        None if forward => 0,
        None => all.len() - 1,
        Some(i) if forward => (i + 1) % all.len(),
        Some(i) => (i + all.len() - 1) % all.len(),
    };
    Some(all[next])
}

/// Image file attached to a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_for_path(Path::new(&file_name)).to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }
}

/// MIME type inferred from a file extension
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("heic") => "image/heic",
        Some("tif" | "tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Device the ticket is opened against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketDevice {
    pub serial_number: String,
    pub customer_number: String,
}

impl From<&DeviceRecord> for TicketDevice {
    fn from(record: &DeviceRecord) -> Self {
        Self {
            serial_number: record.serial_number.clone().unwrap_or_default(),
            customer_number: record.customer_number.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketDraft {
    pub name: String,
    /// Pre-filled from the device record, read-only in the form
    pub phone: String,
    pub email: String,
    pub title: String,
    pub description: String,
    pub call_type: Option<CallType>,
    pub urgency: Option<Urgency>,
    pub images: Vec<ImageAttachment>,
    pub device: TicketDevice,
}

impl TicketDraft {
    /// Empty draft for `record`, phone taken from the record
    pub fn for_device(record: &DeviceRecord) -> Self {
        Self {
            phone: record.phone.clone().unwrap_or_default(),
            device: TicketDevice::from(record),
            ..Default::default()
        }
    }

    /// All required fields are filled
    pub fn is_complete(&self) -> bool {
        let filled = |s: &str| !s.trim().is_empty();
        filled(&self.name)
            && filled(&self.phone)
            && filled(&self.description)
            && filled(&self.title)
            && self.call_type.is_some()
            && self.urgency.is_some()
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }

    pub fn remaining_image_slots(&self) -> usize {
        MAX_IMAGES.saturating_sub(self.images.len())
    }
}

/// Payload handed to the confirmation view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketConfirmation {
    pub name: String,
    pub call_type: Option<CallType>,
    pub serial_number: String,
    pub title: String,
    pub urgency: Option<Urgency>,
    pub ticket_id: Option<String>,
    /// Accepted locally because the backend was unreachable
    pub offline: bool,
}

impl TicketConfirmation {
    pub fn from_draft(draft: &TicketDraft, ticket_id: Option<String>, offline: bool) -> Self {
        Self {
            name: draft.name.clone(),
            call_type: draft.call_type,
            serial_number: draft.device.serial_number.clone(),
            title: draft.title.clone(),
            urgency: draft.urgency,
            ticket_id,
            offline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> TicketDraft {
        TicketDraft {
            name: "Dana".into(),
            phone: "0501234567".into(),
            title: "Pump noise".into(),
            description: "Loud rattle on startup".into(),
            call_type: Some(CallType::Malfunction),
            urgency: Some(Urgency::Urgent),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_draft() {
        assert!(complete_draft().is_complete());
    }

    #[test]
    fn test_each_required_field_blocks_completion() {
        let mut d = complete_draft();
        d.name = " ".into();
        assert!(!d.is_complete());

        let mut d = complete_draft();
        d.phone.clear();
        assert!(!d.is_complete());

        let mut d = complete_draft();
        d.description.clear();
        assert!(!d.is_complete());

        let mut d = complete_draft();
        d.title.clear();
        assert!(!d.is_complete());

        let mut d = complete_draft();
        d.call_type = None;
        assert!(!d.is_complete());

        let mut d = complete_draft();
        d.urgency = None;
        assert!(!d.is_complete());
    }

    #[test]
    fn test_email_is_optional() {
        let mut d = complete_draft();
        d.email.clear();
        assert!(d.is_complete());
    }

    #[test]
    fn test_backend_codes() {
        assert_eq!(CallType::PreventiveMaintenance.backend_code(), "אחזקה מונעת");
        assert_eq!(Urgency::VeryUrgent.backend_code(), "דחוף מאוד");
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(cycle(&CallType::ALL, None, true), Some(CallType::Malfunction));
        assert_eq!(
            cycle(&CallType::ALL, None, false),
            Some(CallType::PreventiveMaintenance)
        );
        assert_eq!(
            cycle(&Urgency::ALL, Some(Urgency::Disabled), true),
            Some(Urgency::NotUrgent)
        );
        assert_eq!(
            cycle(&Urgency::ALL, Some(Urgency::NotUrgent), false),
            Some(Urgency::Disabled)
        );
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_for_path(Path::new("a/photo.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("scan.png")), "image/png");
        assert_eq!(mime_for_path(Path::new("notes")), "application/octet-stream");
    }

    #[test]
    fn test_draft_for_device_prefills_phone() {
        let record = DeviceRecord {
            serial_number: Some("SN".into()),
            customer_number: Some("C1".into()),
            phone: Some("0501234567".into()),
            ..Default::default()
        };
        let draft = TicketDraft::for_device(&record);
        assert_eq!(draft.phone, "0501234567");
        assert_eq!(draft.device.serial_number, "SN");
        assert_eq!(draft.device.customer_number, "C1");
        assert_eq!(draft.remaining_image_slots(), MAX_IMAGES);
    }

    #[test]
    fn test_confirmation_from_draft() {
        let draft = complete_draft();
        let c = TicketConfirmation::from_draft(&draft, Some("T-1".into()), false);
        assert_eq!(c.name, "Dana");
        assert_eq!(c.ticket_id.as_deref(), Some("T-1"));
        assert!(!c.offline);
    }
}
