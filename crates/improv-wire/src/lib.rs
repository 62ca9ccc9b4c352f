//! Improv Serial Wire Protocol
//!
//! This crate provides types and utilities for the Improv provisioning
//! protocol as carried over a serial byte stream. Every frame has a fixed
//! structure: a 6-byte `IMPROV` preamble, a version byte, a frame type byte,
//! a length-prefixed payload, and an 8-bit additive checksum trailer.
//!
//! # Protocol Overview
//!
//! Frames are one of four types:
//!
//! - **Current state** (device → host): a single state byte
//! - **Error state** (device → host): a single error byte
//! - **RPC command** (host → device): a `[code][len][data]` payload
//! - **RPC response** (device → host): a command code followed by
//!   length-prefixed strings
//!
//! # Example
//!
//! ```rust,ignore
//! use improv_wire::{Command, FrameParser, ParseEvent};
//!
//! // Build an RPC command frame
//! let frame = Command::GetDeviceInfo.to_frame();
//!
//! // Parse it back one byte at a time
//! let mut parser = FrameParser::new();
//! for byte in frame {
//!     if let ParseEvent::Frame(f) = parser.feed(byte) {
//!         let command = Command::decode(&f.payload, false);
//!     }
//! }
//! ```

mod commands;
mod constants;
mod error;
mod frame;
mod responses;
mod types;

pub use commands::*;
pub use constants::*;
pub use error::*;
pub use frame::*;
pub use responses::*;
pub use types::*;
