//! Contact cards: domain types, the repository seam, the service enforcing
//! capacity and id rules, and vCard rendering.

pub mod domain;
pub mod repository;
pub mod service;
pub mod vcard;
