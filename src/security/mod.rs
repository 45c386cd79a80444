//! Security subsystem.
//!
//! # Design Decisions
//! - The outbound TLS verification policy is process-wide, applied once at
//!   bootstrap, immutable afterwards
//! - Disabling verification is an explicit, logged opt-in for test
//!   environments; the default is always full validation
//! - Fail safe: an unparseable policy value keeps verification enabled

pub mod tls;
