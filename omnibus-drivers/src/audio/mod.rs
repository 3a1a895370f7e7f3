//! Audio output over the serial line
//!
//! Two mutually exclusive modules share the board's UART header: a
//! MIDI synthesizer driven by raw MIDI messages and an MP3 player
//! driven by checksummed command frames. Both are fire-and-forget;
//! neither reads anything back.

pub mod midi;
pub mod mp3;

pub use midi::MidiSynth;
pub use mp3::Mp3Player;
