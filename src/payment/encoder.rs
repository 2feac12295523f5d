//! Virtual bank barcode (pankkiviivakoodi) payload, version 4.
//!
//! The payload is a 54-digit positional string:
//!
//! | Field     | Width | Content                               |
//! |-----------|-------|---------------------------------------|
//! | version   | 1     | `4`                                   |
//! | account   | 16    | IBAN without the `FI` prefix          |
//! | amount    | 8     | cents, zero padded                    |
//! | reserved  | 3     | `000`                                 |
//! | reference | 20    | national reference, zero padded       |
//! | due date  | 6     | `YYMMDD`, `000000` when unknown       |
//!
//! Encoding is total: malformed input resolves to the documented fallbacks,
//! and anything that still cannot fill the layout yields an empty string.

use super::{iban, reference};
use crate::model::{Invoice, Organization};
use chrono::Datelike;

/// Version digit for national references.
pub const VERSION: &str = "4";

/// Reserved field, always zero.
pub const RESERVED: &str = "000";

/// Total payload length.
pub const PAYLOAD_LEN: usize = 54;

/// Account body used when the organization account is not a Finnish IBAN.
pub const DEFAULT_ACCOUNT_BODY: &str = "1410093000123458";

/// Largest encodable amount in euros.
pub const MAX_AMOUNT: f64 = 999_999.99;

const ACCOUNT_LEN: usize = 16;
const AMOUNT_LEN: usize = 8;
const REFERENCE_LEN: usize = 20;
const DUE_DATE_LEN: usize = 6;
const DEFAULT_REFERENCE: &str = "1";
const UNKNOWN_DUE_DATE: &str = "000000";

/// The fields of one payload, before concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeComponents {
    /// Version digit
    pub version: String,
    /// 16-digit account body
    pub account: String,
    /// 8-digit amount in cents
    pub amount_cents: String,
    /// Reserved field
    pub reserved: String,
    /// 20-digit reference
    pub reference: String,
    /// 6-digit due date
    pub due_date: String,
}

impl BarcodeComponents {
    /// Plain concatenation of all fields, whatever their lengths.
    pub fn concat(&self) -> String {
        format!(
            "{}{}{}{}{}{}",
            self.version,
            self.account,
            self.amount_cents,
            self.reserved,
            self.reference,
            self.due_date
        )
    }

    /// The 54-digit payload, or `None` when any field broke the layout.
    pub fn payload(&self) -> Option<String> {
        let fields_ok = self.version.len() == 1
            && self.account.len() == ACCOUNT_LEN
            && self.amount_cents.len() == AMOUNT_LEN
            && self.reserved.len() == RESERVED.len()
            && self.reference.len() == REFERENCE_LEN
            && self.due_date.len() == DUE_DATE_LEN;
        let joined = self.concat();
        if fields_ok && joined.len() == PAYLOAD_LEN && joined.bytes().all(|b| b.is_ascii_digit()) {
            Some(joined)
        } else {
            None
        }
    }
}

/// Builds virtual bank barcode payloads.
#[derive(Debug, Clone)]
pub struct BarcodeEncoder {
    default_account_body: String,
}

impl Default for BarcodeEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BarcodeEncoder {
    /// Encoder with the standard fallback account.
    pub fn new() -> Self {
        Self {
            default_account_body: DEFAULT_ACCOUNT_BODY.to_string(),
        }
    }

    /// Use a different fallback account body.
    pub fn with_default_account_body(mut self, body: impl Into<String>) -> Self {
        self.default_account_body = body.into();
        self
    }

    /// Split the invoice into barcode fields.
    pub fn components(&self, invoice: &Invoice, organization: &Organization) -> BarcodeComponents {
        BarcodeComponents {
            version: VERSION.to_string(),
            account: self.account_field(organization),
            amount_cents: amount_field(invoice.total),
            reserved: RESERVED.to_string(),
            reference: reference_field(invoice.reference.as_deref()),
            due_date: due_date_field(invoice),
        }
    }

    /// Encode the payload: 54 digits, or `""` when the layout cannot be filled.
    pub fn encode(&self, invoice: &Invoice, organization: &Organization) -> String {
        let components = self.components(invoice, organization);
        match components.payload() {
            Some(payload) => {
                log::debug!(
                    "barcode components: version={} account={} amount={} reference={} due={}",
                    components.version,
                    components.account,
                    components.amount_cents,
                    components.reference,
                    components.due_date
                );
                payload
            },
            None => {
                log::warn!(
                    "barcode payload discarded, fields do not form {} digits: {:?}",
                    PAYLOAD_LEN,
                    components
                );
                String::new()
            },
        }
    }

    fn account_field(&self, organization: &Organization) -> String {
        let raw = organization.bank_account.as_deref().unwrap_or_default();
        let body = match iban::finnish_account_body(raw) {
            Some(body) => {
                if !iban::is_valid_iban(raw) {
                    log::warn!("bank account {} fails the IBAN checksum", iban::normalize(raw));
                }
                body
            },
            None => {
                if !raw.trim().is_empty() {
                    log::warn!(
                        "bank account {:?} is not a Finnish IBAN, using the default account",
                        raw
                    );
                }
                self.default_account_body.clone()
            },
        };
        fit_account_body(&body)
    }
}

/// Force an account body to 16 characters: keep the last 16, or left-pad with zeros.
fn fit_account_body(body: &str) -> String {
    let len = body.chars().count();
    if len > ACCOUNT_LEN {
        body.chars().skip(len - ACCOUNT_LEN).collect()
    } else {
        format!("{:0>width$}", body, width = ACCOUNT_LEN)
    }
}

/// Cents of the clamped amount, 8 digits.
fn amount_field(total: Option<f64>) -> String {
    let amount = total.filter(|a| a.is_finite()).unwrap_or(0.0);
    let clamped = amount.clamp(0.0, MAX_AMOUNT);
    let cents = (clamped * 100.0).round() as u64;
    format!("{:0>width$}", cents, width = AMOUNT_LEN)
}

/// Whitespace-free reference, zero padded to 20. Longer input is kept as is.
fn reference_field(raw: Option<&str>) -> String {
    let stripped: String = raw
        .unwrap_or(DEFAULT_REFERENCE)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let value = if stripped.is_empty() {
        DEFAULT_REFERENCE.to_string()
    } else {
        stripped
    };
    if !reference::is_valid_reference(&value) {
        log::warn!("payment reference {:?} has no valid check digit", value);
    }
    format!("{:0>width$}", value, width = REFERENCE_LEN)
}

fn due_date_field(invoice: &Invoice) -> String {
    match invoice.parsed_due_date() {
        Some(date) => format!(
            "{:02}{:02}{:02}",
            date.year().rem_euclid(100),
            date.month(),
            date.day()
        ),
        None => {
            if invoice.due_date.is_some() {
                log::warn!("unparseable due date {:?}", invoice.due_date);
            }
            UNKNOWN_DUE_DATE.to_string()
        },
    }
}

/// Encode with the default encoder.
pub fn encode(invoice: &Invoice, organization: &Organization) -> String {
    BarcodeEncoder::new().encode(invoice, organization)
}
