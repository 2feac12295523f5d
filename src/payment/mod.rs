//! Payment data: the virtual bank barcode payload and the account and
//! reference number checks it relies on.
//!
//! Nothing in here performs I/O. [`encode`] is a total function returning
//! either a 54-digit payload or an empty string.

pub mod encoder;
pub mod iban;
pub mod reference;

pub use encoder::{encode, BarcodeComponents, BarcodeEncoder, DEFAULT_ACCOUNT_BODY, PAYLOAD_LEN};
