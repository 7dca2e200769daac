//! Wire protocol definitions for the kiosk fleet coordination server.
//!
//! The transport is a single message-framed duplex channel per session: every
//! frame is a JSON object `{event, payload}` (see `Frame`). This crate defines
//! the frame envelope plus the typed payload for each event so the server and
//! the device executor agree on shapes without sharing implementation code.
//!
//! Submodules group payloads by direction, matching the three channels in the
//! spec: device -> server, server -> device, server -> admin.

pub mod frame;
pub mod events;
pub mod device;
pub mod server;
pub mod admin;

pub use frame::Frame;
