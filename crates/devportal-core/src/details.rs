//! Display fields derived from a device record

use chrono::{DateTime, Utc};

use crate::device::{format_date, DeviceRecord};
use crate::i18n::Localizer;
use crate::warranty::{self, CoverageSource, WarrantyStatus};

/// Column span of a detail field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidth {
    Full,
    Half,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: String,
    pub value: String,
    pub width: FieldWidth,
}

impl DetailField {
    fn new(label: &str, value: Option<String>, width: FieldWidth) -> Option<Self> {
        value.filter(|v| !v.trim().is_empty()).map(|value| Self {
            label: label.to_string(),
            value,
            width,
        })
    }
}

/// The ordered list of non-empty detail fields for `record`
pub fn device_details(record: &DeviceRecord, localizer: &Localizer) -> Vec<DetailField> {
    let text = |field: &Option<String>| DeviceRecord::text(field).map(str::to_string);

    let has_service_number = DeviceRecord::text(&record.service_number).is_some();
    let has_part_code = DeviceRecord::text(&record.part_code).is_some();
    let service_number_width = if has_part_code {
        FieldWidth::Half
    } else {
        FieldWidth::Full
    };
    let part_code_width = if has_service_number {
        FieldWidth::Half
    } else {
        FieldWidth::Full
    };

    let coverage = warranty::coverage_end(record, localizer.translate("active"));
    let coverage_label = match coverage.map(|c| c.source) {
        Some(CoverageSource::Contract) => "service_contract_end_date",
        _ => "warranty_end_date",
    };

    let t = |key: &str| localizer.translate(key);

    [
        DetailField::new(
            t("device_serial_number"),
            text(&record.serial_number),
            FieldWidth::Full,
        ),
        DetailField::new(
            t("customer_system_id"),
            text(&record.customer_system_id),
            FieldWidth::Full,
        ),
        DetailField::new(
            t("service_number"),
            text(&record.service_number),
            service_number_width,
        ),
        DetailField::new(t("part_code"), text(&record.part_code), part_code_width),
        DetailField::new(t("site"), text(&record.site), FieldWidth::Full),
        DetailField::new(
            t("product_description"),
            text(&record.part_description),
            FieldWidth::Full,
        ),
        DetailField::new(
            t(coverage_label),
            coverage.map(|c| format_date(&c.date)),
            FieldWidth::Half,
        ),
        DetailField::new(
            t("warranty_start_date"),
            record.warranty_start.as_ref().map(format_date),
            FieldWidth::Half,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Status banner shown above the details card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub status: WarrantyStatus,
    pub text: String,
}

impl StatusBanner {
    pub fn is_error(&self) -> bool {
        self.status.is_error()
    }
}

pub fn status_banner(
    record: &DeviceRecord,
    localizer: &Localizer,
    now: DateTime<Utc>,
) -> StatusBanner {
    let status = warranty::classify(record, localizer, now);
    let text = format!(
        "{} {}",
        localizer.translate("device_status"),
        status.label(localizer)
    );
    StatusBanner { status, text }
}
