//! Test utilities for remote service consumers
//!
//! Provides [`MockRemote`], a scripted [`RemoteService`] that records every
//! call, plus helpers for building test records and drafts.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use devportal_core::prelude::*;
use devportal_core::{CallType, DeviceRecord, TicketDevice, TicketDraft, Urgency};

use crate::service::{CreatedTicket, RemoteService, SendOtpOutcome, VerifyOtpOutcome};

/// Calls observed by a [`MockRemote`]
#[derive(Debug, Clone, Default)]
pub struct RecordedCalls {
    pub send_otp: usize,
    pub verify_otp: usize,
    pub fetch_device: usize,
    pub create_ticket: usize,
    pub sign_out: usize,
    pub phones: Vec<String>,
    pub codes: Vec<String>,
    pub device_ids: Vec<String>,
    pub drafts: Vec<TicketDraft>,
}

impl RecordedCalls {
    /// Total number of backend calls of any kind
    pub fn total(&self) -> usize {
        self.send_otp + self.verify_otp + self.fetch_device + self.create_ticket + self.sign_out
    }
}

#[derive(Default)]
struct Script {
    send_otp: VecDeque<Result<SendOtpOutcome>>,
    verify_otp: VecDeque<Result<VerifyOtpOutcome>>,
    fetch_device: VecDeque<Result<DeviceRecord>>,
    create_ticket: VecDeque<Result<CreatedTicket>>,
    calls: RecordedCalls,
}

/// Scripted backend
///
/// Each operation pops its next queued outcome. An empty queue yields a
/// successful default: code sent, code verified, an empty record, ticket
/// `TICKET-1`.
#[derive(Clone, Default)]
pub struct MockRemote {
    script: Arc<Mutex<Script>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        // A panic in another test thread must not hide this test's calls
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push_send_otp(&self, outcome: Result<SendOtpOutcome>) -> &Self {
        self.script().send_otp.push_back(outcome);
        self
    }

    pub fn push_verify_otp(&self, outcome: Result<VerifyOtpOutcome>) -> &Self {
        self.script().verify_otp.push_back(outcome);
        self
    }

    pub fn push_device(&self, outcome: Result<DeviceRecord>) -> &Self {
        self.script().fetch_device.push_back(outcome);
        self
    }

    pub fn push_create_ticket(&self, outcome: Result<CreatedTicket>) -> &Self {
        self.script().create_ticket.push_back(outcome);
        self
    }

    /// Snapshot of the calls made so far
    pub fn calls(&self) -> RecordedCalls {
        self.script().calls.clone()
    }
}

impl RemoteService for MockRemote {
    async fn send_otp(&self, phone: &str) -> Result<SendOtpOutcome> {
        let mut script = self.script();
        script.calls.send_otp += 1;
        script.calls.phones.push(phone.to_string());
        script
            .send_otp
            .pop_front()
            .unwrap_or(Ok(SendOtpOutcome { sent: true }))
    }

    async fn verify_otp(&self, phone: &str, code: &str) -> Result<VerifyOtpOutcome> {
        let mut script = self.script();
        script.calls.verify_otp += 1;
        script.calls.phones.push(phone.to_string());
        script.calls.codes.push(code.to_string());
        script
            .verify_otp
            .pop_front()
            .unwrap_or_else(|| Ok(VerifyOtpOutcome::verified(None)))
    }

    async fn fetch_device(&self, id: &str) -> Result<DeviceRecord> {
        let mut script = self.script();
        script.calls.fetch_device += 1;
        script.calls.device_ids.push(id.to_string());
        script
            .fetch_device
            .pop_front()
            .unwrap_or_else(|| Ok(DeviceRecord::default()))
    }

    async fn create_ticket(&self, draft: &TicketDraft) -> Result<CreatedTicket> {
        let mut script = self.script();
        script.calls.create_ticket += 1;
        script.calls.drafts.push(draft.clone());
        script.create_ticket.pop_front().unwrap_or_else(|| {
            Ok(CreatedTicket {
                ticket_id: Some("TICKET-1".to_string()),
            })
        })
    }

    async fn sign_out(&self) -> Result<()> {
        self.script().calls.sign_out += 1;
        Ok(())
    }
}

/// A record with every displayed field set
pub fn test_record(serial: &str) -> DeviceRecord {
    DeviceRecord {
        serial_number: Some(serial.to_string()),
        part_code: Some("G0010BBTT".into()),
        part_description: Some("A.T 7000AA Triple Quad bundle".into()),
        customer_number: Some("13666666".into()),
        site: Some("A.P.P. Laboratory".into()),
        customer_system_id: Some("3Q AAM-11(1111)".into()),
        service_number: Some("121212".into()),
        warranty_start: devportal_core::parse_date("2015-01-22T00:00:00+02:00"),
        warranty_final: devportal_core::parse_date("2017-01-21T00:00:00+02:00"),
        phone: Some("0501234567".into()),
        status_descriptor: None,
        contracts: Vec::new(),
    }
}

/// A draft that passes validation
pub fn complete_draft() -> TicketDraft {
    TicketDraft {
        name: "Dana Levi".into(),
        phone: "0501234567".into(),
        email: String::new(),
        title: "Pump noise".into(),
        description: "Loud rattle on startup".into(),
        call_type: Some(CallType::Malfunction),
        urgency: Some(Urgency::Urgent),
        images: Vec::new(),
        device: TicketDevice {
            serial_number: "AU125668790".into(),
            customer_number: "13666666".into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_defaults_succeed() {
        let remote = MockRemote::new();
        assert!(remote.send_otp("0501234567").await.unwrap().sent);
        assert!(remote.verify_otp("0501234567", "1111").await.unwrap().verified);
        let created = remote.create_ticket(&complete_draft()).await.unwrap();
        assert_eq!(created.ticket_id.as_deref(), Some("TICKET-1"));

        let calls = remote.calls();
        assert_eq!(calls.total(), 3);
        assert_eq!(calls.codes, vec!["1111".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_scripted_outcomes_in_order() {
        let remote = MockRemote::new();
        remote
            .push_send_otp(Ok(SendOtpOutcome { sent: false }))
            .push_send_otp(Err(Error::network("down")));

        assert!(!remote.send_otp("1").await.unwrap().sent);
        assert!(remote.send_otp("1").await.is_err());
        assert!(remote.send_otp("1").await.unwrap().sent);
    }

    #[test]
    fn test_record_has_serial() {
        let record = test_record("SN-9");
        assert_eq!(record.serial_number.as_deref(), Some("SN-9"));
        assert!(complete_draft().is_complete());
    }
}
