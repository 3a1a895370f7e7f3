//! Command set for the MP3 audio module.
//!
//! Payload layout: `[version, length, command, feedback, param_hi, param_lo]`.
//! The version and length bytes are fixed by the module firmware; the
//! feedback byte requests an acknowledgment the transport never reads
//! back, so it is set only where the original command set does.

use crate::frame::Frame;

/// Protocol version byte, fixed by the module firmware
const VERSION: u8 = 0xFF;

/// Payload length byte, fixed by the module firmware
const LENGTH: u8 = 0x06;

/// Play the track with the given index
const CMD_PLAY_TRACK: u8 = 0x03;

/// Set playback volume
const CMD_SET_VOLUME: u8 = 0x06;

/// Stop playback
const CMD_STOP: u8 = 0x16;

fn command(cmd: u8, feedback: u8, param: u16) -> Frame {
    Frame::new([
        VERSION,
        LENGTH,
        cmd,
        feedback,
        (param >> 8) as u8,
        (param & 0xFF) as u8,
    ])
}

/// Start playback of a track by index
pub fn play_track(track: u8) -> Frame {
    command(CMD_PLAY_TRACK, 0x01, u16::from(track))
}

/// Stop playback
pub fn stop() -> Frame {
    command(CMD_STOP, 0x00, 0)
}

/// Set playback volume
pub fn set_volume(volume: u8) -> Frame {
    command(CMD_SET_VOLUME, 0x00, u16::from(volume))
}
