//! Serial Command Protocol for the Omnibus Audio Module
//!
//! The MP3 player on the expansion board accepts fixed-size framed
//! commands over the shared serial line. Transport is fire-and-forget:
//! the module sends no acknowledgment, so encoding is pure and
//! stateless.
//!
//! # Frame Overview
//!
//! Every frame is exactly 10 bytes:
//! ```text
//! ┌───────┬─────────────┬──────────┬─────┐
//! │ START │ PAYLOAD     │ CHECKSUM │ END │
//! │ 0x7E  │ 6B          │ 2B (BE)  │0xEF │
//! └───────┴─────────────┴──────────┴─────┘
//! ```
//!
//! The checksum is the 16-bit two's complement of the payload byte
//! sum, transmitted big-endian.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod commands;
pub mod frame;

pub use frame::{Frame, FrameError, FRAME_END, FRAME_LEN, FRAME_START, PAYLOAD_LEN};
