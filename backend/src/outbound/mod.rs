//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local record store and notification sink. The sink
//!   keeps a send log instead of contacting a mail server.
//!
//! Adapters translate between the port contracts and their storage. They
//! contain no lifecycle rules.

pub mod memory;
