//! Service layer for the contact card API.
//! - `contact`: capped contact collection with create/read/update/delete and vCard export.
//! - `storage`: repository backends holding the collection under a TTL.
//! - `qr`: SVG QR code generation, independent of stored contacts.

pub mod errors;
pub mod contact;
pub mod storage;
pub mod qr;
