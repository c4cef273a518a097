//! Wire format of the device service backend

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use devportal_core::TicketDraft;

pub const SEND_OTP_PATH: &str = "device/sginin";
pub const VERIFY_OTP_PATH: &str = "device/checksms";
pub const CREATE_TICKET_PATH: &str = "device/createticket";
pub const SIGN_OUT_PATH: &str = "device/signout";
/// Device records live under `device/{id}`
pub const DEVICE_SEGMENT: &str = "device";

/// Name of the multipart file part carrying each image
pub const IMAGE_PART: &str = "images";

#[derive(Debug, Serialize)]
pub struct SendOtpRequest<'a> {
    pub phone: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SendOtpResponse {
    #[serde(default)]
    pub send: bool,
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpRequest<'a> {
    pub phone: &'a str,
    pub sms: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpResponse {
    #[serde(default)]
    pub signed: bool,
    #[serde(default)]
    pub code: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTicketResponse {
    #[serde(rename = "DOCNO", default)]
    pub docno: Option<Value>,
}

/// Error body returned by the backend on failure
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Scalar JSON value as text; `null` and empty strings become `None`
pub fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Text fields of a ticket, in the order the backend documents them
pub fn ticket_fields(draft: &TicketDraft) -> Vec<(&'static str, String)> {
    vec![
        ("SERNUM", draft.device.serial_number.clone()),
        ("CUSTNAME", draft.device.customer_number.clone()),
        (
            "CALLTYPECODE",
            draft
                .call_type
                .map(|c| c.backend_code().to_string())
                .unwrap_or_default(),
        ),
        ("ELDN_UPDSOURCE", draft.name.clone()),
        ("ELDN_UPDSRCPHONEMAIL", draft.phone.clone()),
        ("TEXT", draft.description.clone()),
        ("TITLE", draft.title.clone()),
        (
            "URGENCY",
            draft
                .urgency
                .map(|u| u.backend_code().to_string())
                .unwrap_or_default(),
        ),
        ("EMAIL", draft.email.clone()),
    ]
}

/// JSON body for a ticket without images
pub fn ticket_json(draft: &TicketDraft) -> Value {
    let mut body: Map<String, Value> = ticket_fields(draft)
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::String(v)))
        .collect();
    body.insert("IMAGES".to_string(), json!([]));
    Value::Object(body)
}
