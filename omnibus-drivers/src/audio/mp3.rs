//! MP3 player module
//!
//! Thin transport over the framed serial protocol: each operation
//! builds one command frame and transmits its 10 encoded bytes in a
//! single write. The module never answers on a line we listen to, so
//! there is no read path and no settle delay.

use omnibus_hal::UartTx;
use omnibus_protocol::commands;

use crate::Error;

/// MP3 player driver
pub struct Mp3Player<TX> {
    tx: TX,
}

impl<TX> Mp3Player<TX>
where
    TX: UartTx,
{
    pub fn new(tx: TX) -> Self {
        Self { tx }
    }

    /// Play a track by its index on the module's storage
    pub fn play(&mut self, track: u8) -> Result<(), Error<TX::Error>> {
        self.send(commands::play_track(track))
    }

    /// Stop playback
    pub fn stop(&mut self) -> Result<(), Error<TX::Error>> {
        self.send(commands::stop())
    }

    /// Set playback volume (0-30 on the module)
    pub fn set_volume(&mut self, volume: u8) -> Result<(), Error<TX::Error>> {
        self.send(commands::set_volume(volume))
    }

    fn send(&mut self, frame: omnibus_protocol::Frame) -> Result<(), Error<TX::Error>> {
        self.tx.write_blocking(&frame.encode()).map_err(Error::Bus)
    }
}
