//! Concrete response messages.
//!
//! Each message is a plain body struct plus a field table; the envelope and
//! codec in [`crate::protocol`] do the rest. Only a handful of OCPP 2.0.1
//! responses live here, enough to exercise every field shape.

pub mod boot_notification;
pub mod data_transfer;
pub mod heartbeat;
pub mod status_notification;
pub mod types;

pub use boot_notification::{BootNotification, BootNotificationResponse};
pub use data_transfer::{DataTransfer, DataTransferResponse};
pub use heartbeat::{Heartbeat, HeartbeatResponse};
pub use status_notification::{StatusNotification, StatusNotificationResponse};
pub use types::{DataTransferStatus, RegistrationStatus, StatusInfo};
