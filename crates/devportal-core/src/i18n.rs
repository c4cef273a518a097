//! Localization context: language tables, text direction and lookup
//!
//! The [`Localizer`] is a plain value owned by the application state and
//! handed to every render function. Nothing here is global.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hebrew,
}

/// Text direction of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Language {
    /// Short language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hebrew => "he",
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Language::English => Direction::Ltr,
            Language::Hebrew => Direction::Rtl,
        }
    }

    /// The other supported language
    pub fn other(&self) -> Language {
        match self {
            Language::English => Language::Hebrew,
            Language::Hebrew => Language::English,
        }
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::English => ENGLISH,
            Language::Hebrew => HEBREW,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "english"),
            Language::Hebrew => write!(f, "hebrew"),
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "hebrew" | "he" => Ok(Language::Hebrew),
            other => Err(Error::config(format!("unknown language '{other}'"))),
        }
    }
}

/// Active language plus translation lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Localizer {
    language: Language,
}

impl Localizer {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Current language code and direction
    pub fn language(&self) -> (&'static str, Direction) {
        (self.language.code(), self.language.direction())
    }

    pub fn current(&self) -> Language {
        self.language
    }

    pub fn direction(&self) -> Direction {
        self.language.direction()
    }

    pub fn is_rtl(&self) -> bool {
        self.direction() == Direction::Rtl
    }

    /// Flip to the other language and return the new code and direction
    pub fn toggle(&mut self) -> (&'static str, Direction) {
        self.language = self.language.other();
        self.language()
    }

    /// Look up `key` in the active table, then in the English table.
    ///
    /// Unknown keys resolve to the empty string.
    pub fn translate(&self, key: &str) -> &'static str {
        lookup(self.language.table(), key)
            .or_else(|| lookup(ENGLISH, key))
            .unwrap_or("")
    }

    /// Translate and substitute `{name}` placeholders
    pub fn translate_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.translate(key).to_string();
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

// ─────────────────────────────────────────────────────────────────
// Translation tables
// ─────────────────────────────────────────────────────────────────

static ENGLISH: &[(&str, &str)] = &[
    // OTP
    ("enter_phone", "Enter phone number"),
    ("send_code", "Send Code"),
    ("enter_otp", "Enter verification code"),
    ("verify_code", "Verify Code"),
    ("phone_verification", "Phone Number Verification"),
    ("invalid_phone", "Please enter a valid phone number"),
    ("invalid_otp", "Please enter a valid verification code"),
    ("otp_send_failed", "Failed to send verification code"),
    ("otp_send_error", "Error sending verification code"),
    ("wrong_otp", "Wrong verification code"),
    ("otp_verify_error", "Error verifying code"),
    ("test_mode_phone", "In test mode, enter phone number 1234"),
    ("test_mode_otp", "In test mode, enter verification code 1234"),
    ("auto_fill_note", "Code will auto-fill when SMS is received"),
    ("sending", "Sending..."),
    ("verifying", "Verifying..."),
    ("resend_code", "Resend code"),
    ("resend_wait", "Resend available in {seconds}s"),
    ("change_number", "Change number"),
    // General
    ("loading", "Loading..."),
    ("error", "Error"),
    ("cancel", "Cancel"),
    ("confirm", "Confirm"),
    ("delete", "Delete"),
    ("retry", "Retry"),
    ("back", "Back"),
    ("sign_out", "Sign out"),
    ("quit", "Quit"),
    ("language", "Language"),
    ("app_title", "Device Service Portal"),
    ("current_language", "EN"),
    // Device
    ("device_info", "Device Information"),
    ("device_status", "Device Status"),
    ("device_serial_number", "Serial Number"),
    ("customer_system_id", "Customer System ID"),
    ("service_number", "Service Number"),
    ("part_code", "Part Code"),
    ("site", "Site"),
    ("product_description", "Product Description"),
    ("warranty_end_date", "Warranty End Date"),
    ("warranty_start_date", "Warranty Start Date"),
    ("service_contract_end_date", "Service Contract End Date"),
    ("under_warranty", "Under Warranty"),
    ("chargeable_service", "Chargeable Service"),
    ("contract", "Contract"),
    ("active", "Active"),
    ("no_device", "No device selected. Open the portal with a device id."),
    ("error_loading", "Something went wrong while loading this page"),
    ("fetch_failed", "Could not load the device, please sign in again"),
    // Ticket form
    ("open_service_call", "Open Service Call"),
    ("name", "Name"),
    ("phone", "Phone"),
    ("email", "Email"),
    ("subject", "Subject"),
    ("call_type", "Call Type"),
    ("urgency", "Urgency"),
    ("description", "Description"),
    ("images", "Images"),
    ("add_images", "Add image paths (comma separated)"),
    ("select", "Select"),
    ("submit", "Send"),
    ("malfunction", "Malfunction"),
    ("calibration", "Calibration"),
    ("preventive_maintenance", "Preventive Maintenance"),
    ("not_urgent", "Not Urgent"),
    ("urgent", "Urgent"),
    ("very_urgent", "Very Urgent"),
    ("disabled", "Disabled"),
    ("fill_all_fields", "Please fill all required fields"),
    ("max_images", "Maximum 5 images allowed"),
    ("images_loading", "Images are still loading, try again in a moment"),
    (
        "selected_images",
        "Selected only {count} images out of {total} due to 5 image limit",
    ),
    ("image_unreadable", "Could not read image {path}"),
    ("sending_error", "Error sending the call"),
    ("file_too_large", "File size too large"),
    ("offline_mode", "Offline mode: the ticket was recorded locally"),
    ("delete_image", "Delete Image"),
    ("delete_image_confirm", "Are you sure you want to delete this image?"),
    // Confirmation
    ("ticket_opened", "Service call opened successfully"),
    ("ticket_number", "Ticket Number"),
    ("not_available", "N/A"),
];

static HEBREW: &[(&str, &str)] = &[
    // OTP
    ("enter_phone", "הזן מספר טלפון"),
    ("send_code", "שלח קוד"),
    ("enter_otp", "הזן קוד אימות"),
    ("verify_code", "אמת קוד"),
    ("phone_verification", "אימות מספר טלפון"),
    ("invalid_phone", "נא להזין מספר טלפון תקין"),
    ("invalid_otp", "נא להזין קוד אימות תקין"),
    ("otp_send_failed", "שליחת קוד האימות נכשלה"),
    ("otp_send_error", "שגיאה בשליחת קוד האימות"),
    ("wrong_otp", "קוד האימות שגוי"),
    ("otp_verify_error", "שגיאה באימות הקוד"),
    ("test_mode_phone", "במצב בדיקה, הכנס מספר טלפון 1234"),
    ("test_mode_otp", "במצב בדיקה, הכנס קוד אימות 1234"),
    ("auto_fill_note", "הקוד יתמלא אוטומטית כאשר יתקבל המסרון"),
    ("sending", "שולח..."),
    ("verifying", "מאמת..."),
    ("resend_code", "שלח קוד שוב"),
    ("resend_wait", "שליחה חוזרת בעוד {seconds} שניות"),
    ("change_number", "שנה מספר"),
    // General
    ("loading", "טוען..."),
    ("error", "שגיאה"),
    ("cancel", "ביטול"),
    ("confirm", "אישור"),
    ("delete", "מחק"),
    ("retry", "נסה שוב"),
    ("back", "חזרה"),
    ("sign_out", "התנתק"),
    ("quit", "יציאה"),
    ("language", "שפה"),
    ("app_title", "פורטל שירות מכשירים"),
    ("current_language", "עב"),
    // Device
    ("device_info", "פרטי המכשיר"),
    ("device_status", "סטטוס מכשיר"),
    ("device_serial_number", "מספר סידורי"),
    ("customer_system_id", "זיהוי מערכת לקוח"),
    ("service_number", "מספר שירות"),
    ("part_code", "מק״ט"),
    ("site", "אתר"),
    ("product_description", "תאור מוצר"),
    ("warranty_end_date", "תאריך סיום אחריות"),
    ("warranty_start_date", "תאריך תחילת אחריות"),
    ("service_contract_end_date", "תאריך תום חוזה שירות"),
    ("under_warranty", "באחריות"),
    ("chargeable_service", "בחיוב"),
    ("contract", "חוזה"),
    ("active", "בתוקף"),
    ("no_device", "לא נבחר מכשיר. פתח את הפורטל עם מזהה מכשיר."),
    ("error_loading", "אירעה שגיאה בטעינת הדף"),
    ("fetch_failed", "לא ניתן לטעון את פרטי המכשיר, נא להתחבר מחדש"),
    // Ticket form
    ("open_service_call", "פתיחת קריאה"),
    ("name", "שם"),
    ("phone", "טלפון"),
    ("email", "אימייל"),
    ("subject", "נושא"),
    ("call_type", "סוג קריאה"),
    ("urgency", "דחיפות"),
    ("description", "טקסט"),
    ("images", "תמונות"),
    ("add_images", "הוסף נתיבי תמונות (מופרדים בפסיק)"),
    ("select", "בחר"),
    ("submit", "שלח"),
    ("malfunction", "תקלה"),
    ("calibration", "כיול"),
    ("preventive_maintenance", "אחזקה מונעת"),
    ("not_urgent", "לא דחוף"),
    ("urgent", "דחוף"),
    ("very_urgent", "דחוף מאוד"),
    ("disabled", "מושבת"),
    ("fill_all_fields", "אנא מלא את כל השדות הנדרשים"),
    ("max_images", "ניתן להעלות מקסימום 5 תמונות"),
    ("images_loading", "התמונות עדיין נטענות, נסה שוב בעוד רגע"),
    (
        "selected_images",
        "נבחרו רק {count} תמונות מתוך {total} בגלל המגבלה של 5 תמונות",
    ),
    ("sending_error", "שגיאה בשליחת הקריאה"),
    ("file_too_large", "גודל הקובץ גדול מדי"),
    ("offline_mode", "מצב לא מקוון: הקריאה נשמרה מקומית"),
    ("delete_image", "מחיקת תמונה"),
    ("delete_image_confirm", "האם אתה בטוח שברצונך למחוק את התמונה?"),
    // Confirmation
    ("ticket_opened", "קריאת השירות נפתחה בהצלחה"),
    ("ticket_number", "מספר קריאה"),
    ("not_available", "לא זמין"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english_ltr() {
        let loc = Localizer::default();
        assert_eq!(loc.language(), ("en", Direction::Ltr));
        assert!(!loc.is_rtl());
    }

    #[test]
    fn test_toggle_flips_language_and_direction() {
        let mut loc = Localizer::default();
        assert_eq!(loc.toggle(), ("he", Direction::Rtl));
        assert_eq!(loc.current(), Language::Hebrew);
        assert_eq!(loc.toggle(), ("en", Direction::Ltr));
    }

    #[test]
    fn test_translate_active_table() {
        let loc = Localizer::new(Language::Hebrew);
        assert_eq!(loc.translate("active"), "בתוקף");
        assert_eq!(Localizer::default().translate("active"), "Active");
    }

    #[test]
    fn test_translate_falls_back_to_english() {
        // image_unreadable only exists in the English table
        let loc = Localizer::new(Language::Hebrew);
        assert_eq!(loc.translate("image_unreadable"), "Could not read image {path}");
    }

    #[test]
    fn test_translate_unknown_key_is_empty() {
        let loc = Localizer::new(Language::Hebrew);
        assert_eq!(loc.translate("no_such_key"), "");
    }

    #[test]
    fn test_translate_with_substitutes_placeholders() {
        let loc = Localizer::default();
        let text = loc.translate_with("selected_images", &[("count", "5"), ("total", "6")]);
        assert_eq!(
            text,
            "Selected only 5 images out of 6 due to 5 image limit"
        );
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("hebrew".parse::<Language>().unwrap(), Language::Hebrew);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::English);
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn test_tables_share_keys() {
        for (key, _) in HEBREW {
            assert!(
                lookup(ENGLISH, key).is_some(),
                "hebrew key {key} missing from english table"
            );
        }
    }
}
