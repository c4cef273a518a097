//! HTTP implementation of [`RemoteService`]
//!
//! Provides [`HttpRemote`], which builds requests against the configured
//! backend base URL and normalizes transport, status and decoding failures
//! into [`Error`] variants.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use devportal_core::prelude::*;
use devportal_core::{DeviceRecord, TicketDraft};

use crate::protocol::{self, *};
use crate::service::{CreatedTicket, RemoteService, SendOtpOutcome, VerifyOtpOutcome};

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for [`HttpRemote`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Keep and resend backend cookies
    pub include_credentials: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            include_credentials: true,
        }
    }
}

/// Live backend client
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpRemote {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .cookie_store(config.include_credentials)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        debug!(base_url = %base_url, timeout = ?config.timeout, "HTTP remote ready");

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::config(format!("invalid endpoint '{path}': {e}")))
    }

    /// `device/{id}` with the id encoded as a single path segment
    fn device_url(&self, id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::config("base URL cannot carry a path"))?
            .pop_if_empty()
            .extend([DEVICE_SEGMENT, id]);
        Ok(url)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    // A base without a trailing slash would drop its last segment on join
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|e| Error::config(format!("invalid base URL '{raw}': {e}")))
}

/// Map a transport failure onto the portal error taxonomy
fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else if err.is_decode() {
        Error::protocol(err.to_string())
    } else {
        Error::network(err.to_string())
    }
}

/// Check the status and read the body of a response
async fn read_body(response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return Err(Error::PayloadTooLarge);
    }
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        warn!(status = %status, message = %message, "backend rejected request");
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(Error::auth(message));
        }
        return Err(Error::server(status.as_u16(), message));
    }
    Ok(body)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = read_body(response).await?;
    serde_json::from_str(&body)
        .map_err(|e| Error::protocol(format!("failed to parse backend response: {e}")))
}

fn multipart_form(draft: &TicketDraft) -> Result<Form> {
    let mut form = Form::new();
    for (key, value) in protocol::ticket_fields(draft) {
        form = form.text(key, value);
    }
    for image in draft.images.iter().take(devportal_core::MAX_IMAGES) {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| Error::validation(format!("bad image type '{}': {e}", image.mime_type)))?;
        form = form.part(IMAGE_PART, part);
    }
    Ok(form)
}

impl RemoteService for HttpRemote {
    async fn send_otp(&self, phone: &str) -> Result<SendOtpOutcome> {
        let response = self
            .client
            .post(self.endpoint(SEND_OTP_PATH)?)
            .json(&SendOtpRequest { phone })
            .send()
            .await
            .map_err(transport_error)?;

        let body: SendOtpResponse = read_json(response).await?;
        debug!(sent = body.send, "send OTP response");
        Ok(SendOtpOutcome { sent: body.send })
    }

    async fn verify_otp(&self, phone: &str, code: &str) -> Result<VerifyOtpOutcome> {
        let response = self
            .client
            .post(self.endpoint(VERIFY_OTP_PATH)?)
            .json(&VerifyOtpRequest { phone, sms: code })
            .send()
            .await
            .map_err(transport_error)?;

        let body: VerifyOtpResponse = read_json(response).await?;
        debug!(signed = body.signed, "verify OTP response");
        Ok(VerifyOtpOutcome {
            verified: body.signed,
            session_code: scalar_text(body.code.as_ref()),
        })
    }

    async fn fetch_device(&self, id: &str) -> Result<DeviceRecord> {
        let url = self.device_url(id)?;
        debug!(url = %url, "fetching device");

        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(transport_error)?;

        read_json(response).await
    }

    async fn create_ticket(&self, draft: &TicketDraft) -> Result<CreatedTicket> {
        let request = self.client.post(self.endpoint(CREATE_TICKET_PATH)?);
        let request = if draft.has_images() {
            debug!(images = draft.images.len(), "creating ticket as multipart");
            request.multipart(multipart_form(draft)?)
        } else {
            debug!("creating ticket as JSON");
            request.json(&protocol::ticket_json(draft))
        };

        let response = request.send().await.map_err(transport_error)?;
        let body: CreateTicketResponse = read_json(response).await?;
        let ticket_id = scalar_text(body.docno.as_ref());
        info!(ticket_id = ?ticket_id, "ticket created");
        Ok(CreatedTicket { ticket_id })
    }

    async fn sign_out(&self) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint(SIGN_OUT_PATH)?)
            .send()
            .await
            .map_err(transport_error)?;

        read_body(response).await?;
        Ok(())
    }
}
