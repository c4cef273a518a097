//! Warranty classification as an ordered list of rules
//!
//! Rules are evaluated in order and the first one that yields a status
//! wins. The default order is coverage window, then the record's status
//! descriptor, then chargeable.

use chrono::{DateTime, FixedOffset, Utc};

use crate::device::DeviceRecord;
use crate::i18n::Localizer;

/// Status descriptor the backend sends for an active contract, whatever the UI language
const BACKEND_ACTIVE: &str = "Active";

/// Derived warranty status of a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarrantyStatus {
    UnderWarranty,
    ContractStatus(String),
    Chargeable,
}

impl WarrantyStatus {
    /// Chargeable service is shown with error severity
    pub fn is_error(&self) -> bool {
        matches!(self, WarrantyStatus::Chargeable)
    }

    /// Localized banner text, without the "Device Status" prefix
    pub fn label(&self, localizer: &Localizer) -> String {
        match self {
            WarrantyStatus::UnderWarranty => localizer.translate("under_warranty").to_string(),
            WarrantyStatus::ContractStatus(label) => {
                format!("{} {}", localizer.translate("contract"), label)
            }
            WarrantyStatus::Chargeable => localizer.translate("chargeable_service").to_string(),
        }
    }
}

/// Where the coverage end date came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageSource {
    Contract,
    BaseWarranty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageEnd {
    pub date: DateTime<FixedOffset>,
    pub source: CoverageSource,
}

/// End of coverage: the first active contract with an expiry date, else `WARDATEFINAL`.
///
/// A contract is active when its status label equals `active_term`.
pub fn coverage_end(record: &DeviceRecord, active_term: &str) -> Option<CoverageEnd> {
    let from_contract = record
        .contracts
        .iter()
        .find(|c| c.status.as_deref().map(str::trim) == Some(active_term))
        .and_then(|c| c.expiry)
        .map(|date| CoverageEnd {
            date,
            source: CoverageSource::Contract,
        });

    from_contract.or_else(|| {
        record.warranty_final.map(|date| CoverageEnd {
            date,
            source: CoverageSource::BaseWarranty,
        })
    })
}

/// One step of the classification chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarrantyRule {
    /// Covered while `now` is on or before the coverage end
    CoverageWindow,
    /// Report the record's own status descriptor when present
    StatusDescriptor,
    /// Always matches
    Chargeable,
}

impl WarrantyRule {
    fn evaluate(
        &self,
        record: &DeviceRecord,
        active_term: &str,
        now: DateTime<Utc>,
    ) -> Option<WarrantyStatus> {
        match self {
            WarrantyRule::CoverageWindow => coverage_end(record, active_term)
                .filter(|end| now <= end.date.with_timezone(&Utc))
                .map(|_| WarrantyStatus::UnderWarranty),
            WarrantyRule::StatusDescriptor => DeviceRecord::text(&record.status_descriptor)
                .map(|label| if label == BACKEND_ACTIVE { active_term } else { label })
                .map(|label| WarrantyStatus::ContractStatus(label.to_string())),
            WarrantyRule::Chargeable => Some(WarrantyStatus::Chargeable),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WarrantyClassifier {
    rules: Vec<WarrantyRule>,
}

impl Default for WarrantyClassifier {
    fn default() -> Self {
        Self::new(vec![
            WarrantyRule::CoverageWindow,
            WarrantyRule::StatusDescriptor,
            WarrantyRule::Chargeable,
        ])
    }
}

impl WarrantyClassifier {
    pub fn new(rules: Vec<WarrantyRule>) -> Self {
        Self { rules }
    }

    /// First matching rule wins; a chain without a match is chargeable
    pub fn classify(
        &self,
        record: &DeviceRecord,
        localizer: &Localizer,
        now: DateTime<Utc>,
    ) -> WarrantyStatus {
        let active_term = localizer.translate("active");
        self.rules
            .iter()
            .find_map(|rule| rule.evaluate(record, active_term, now))
            .unwrap_or(WarrantyStatus::Chargeable)
    }
}

/// Classify with the default rule order
pub fn classify(record: &DeviceRecord, localizer: &Localizer, now: DateTime<Utc>) -> WarrantyStatus {
    WarrantyClassifier::default().classify(record, localizer, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{parse_date, ServiceContract};
    use crate::i18n::Language;
    use chrono::Duration;

    fn at(raw: &str) -> DateTime<Utc> {
        parse_date(raw).unwrap().with_timezone(&Utc)
    }

    fn contract(status: &str, expiry: &str) -> ServiceContract {
        ServiceContract {
            status: Some(status.into()),
            expiry: parse_date(expiry),
        }
    }

    #[test]
    fn test_active_contract_in_future_is_under_warranty() {
        let record = DeviceRecord {
            warranty_final: parse_date("2017-01-21T00:00:00+02:00"),
            contracts: vec![contract("Active", "2030-12-31T00:00:00+02:00")],
            ..Default::default()
        };
        let status = classify(&record, &Localizer::default(), at("2026-10-19"));
        assert_eq!(status, WarrantyStatus::UnderWarranty);
    }

    #[test]
    fn test_past_final_date_without_descriptor_is_chargeable() {
        let now = at("2026-10-19");
        let record = DeviceRecord {
            warranty_final: Some((now - Duration::days(365)).fixed_offset()),
            ..Default::default()
        };
        let status = classify(&record, &Localizer::default(), now);
        assert_eq!(status, WarrantyStatus::Chargeable);
        assert!(status.is_error());

        let end = coverage_end(&record, "Active").unwrap();
        assert_eq!(end.source, CoverageSource::BaseWarranty);
    }

    #[test]
    fn test_expired_coverage_falls_back_to_descriptor() {
        let record = DeviceRecord {
            warranty_final: parse_date("2017-01-21"),
            status_descriptor: Some("Suspended".into()),
            ..Default::default()
        };
        let status = classify(&record, &Localizer::default(), at("2026-10-19"));
        assert_eq!(status, WarrantyStatus::ContractStatus("Suspended".into()));
        assert_eq!(status.label(&Localizer::default()), "Contract Suspended");
    }

    #[test]
    fn test_active_descriptor_is_localized() {
        let record = DeviceRecord {
            warranty_final: parse_date("2017-01-21"),
            status_descriptor: Some("Active".into()),
            ..Default::default()
        };
        let now = at("2026-10-19");

        let hebrew = Localizer::new(Language::Hebrew);
        let status = classify(&record, &hebrew, now);
        assert_eq!(status, WarrantyStatus::ContractStatus("בתוקף".into()));
        assert_eq!(status.label(&hebrew), "חוזה בתוקף");

        let english = classify(&record, &Localizer::default(), now);
        assert_eq!(english, WarrantyStatus::ContractStatus("Active".into()));
    }

    #[test]
    fn test_end_date_is_inclusive() {
        let record = DeviceRecord {
            warranty_final: parse_date("2026-10-19T00:00:00+00:00"),
            ..Default::default()
        };
        let status = classify(&record, &Localizer::default(), at("2026-10-19T00:00:00+00:00"));
        assert_eq!(status, WarrantyStatus::UnderWarranty);
    }

    #[test]
    fn test_active_term_follows_language() {
        let record = DeviceRecord {
            contracts: vec![contract("בתוקף", "2030-01-01")],
            ..Default::default()
        };
        let now = at("2026-10-19");

        let hebrew = Localizer::new(Language::Hebrew);
        assert_eq!(classify(&record, &hebrew, now), WarrantyStatus::UnderWarranty);

        // Hebrew label is not the active term in English
        let english = Localizer::default();
        assert_eq!(classify(&record, &english, now), WarrantyStatus::Chargeable);
    }

    #[test]
    fn test_inactive_contract_uses_final_date() {
        let record = DeviceRecord {
            warranty_final: parse_date("2030-01-01"),
            contracts: vec![contract("Expired", "2020-01-01")],
            ..Default::default()
        };
        let end = coverage_end(&record, "Active").unwrap();
        assert_eq!(end.source, CoverageSource::BaseWarranty);
    }

    #[test]
    fn test_active_contract_without_expiry_uses_final_date() {
        let record = DeviceRecord {
            warranty_final: parse_date("2030-01-01"),
            contracts: vec![ServiceContract {
                status: Some("Active".into()),
                expiry: None,
            }],
            ..Default::default()
        };
        let end = coverage_end(&record, "Active").unwrap();
        assert_eq!(end.source, CoverageSource::BaseWarranty);
    }

    #[test]
    fn test_custom_rule_order() {
        let record = DeviceRecord {
            warranty_final: parse_date("2030-01-01"),
            status_descriptor: Some("Active".into()),
            ..Default::default()
        };
        let classifier = WarrantyClassifier::new(vec![
            WarrantyRule::StatusDescriptor,
            WarrantyRule::CoverageWindow,
        ]);
        let status = classifier.classify(&record, &Localizer::default(), at("2026-10-19"));
        assert_eq!(status, WarrantyStatus::ContractStatus("Active".into()));
    }

    #[test]
    fn test_empty_chain_is_chargeable() {
        let classifier = WarrantyClassifier::new(Vec::new());
        let status =
            classifier.classify(&DeviceRecord::default(), &Localizer::default(), Utc::now());
        assert_eq!(status, WarrantyStatus::Chargeable);
    }
}
