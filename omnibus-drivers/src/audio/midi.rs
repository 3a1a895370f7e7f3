//! MIDI synthesizer module
//!
//! Speaks plain MIDI over the serial line, channel 0 only: one
//! control-change or voice message per write, each followed by a
//! settle delay so the synth's input buffer keeps up.

use embedded_hal::delay::DelayNs;
use omnibus_hal::UartTx;

use crate::Error;

/// Control change, channel 0
const CONTROL_CHANGE: u8 = 0xB0;

/// Program change, channel 0
const PROGRAM_CHANGE: u8 = 0xC0;

/// Note on, channel 0
const NOTE_ON: u8 = 0x90;

/// Note off, channel 0
const NOTE_OFF: u8 = 0x80;

/// All-sound-off controller number
const CC_ALL_SOUND_OFF: u8 = 0x78;

/// Reset-all-controllers controller number
const CC_RESET_CONTROLLERS: u8 = 0x79;

/// Channel volume controller number
const CC_VOLUME: u8 = 0x07;

/// Settle time after most messages
const SETTLE_MS: u32 = 10;

/// MIDI synthesizer driver
pub struct MidiSynth<TX, D> {
    tx: TX,
    delay: D,
}

impl<TX, D> MidiSynth<TX, D>
where
    TX: UartTx,
    D: DelayNs,
{
    pub fn new(tx: TX, delay: D) -> Self {
        Self { tx, delay }
    }

    /// Silence the synth and reset all controllers to defaults
    pub fn init(&mut self) -> Result<(), Error<TX::Error>> {
        self.tx
            .write_blocking(&[CONTROL_CHANGE, CC_ALL_SOUND_OFF, 0x00])
            .map_err(Error::Bus)?;
        self.delay.delay_ms(4);

        self.tx
            .write_blocking(&[CONTROL_CHANGE, CC_RESET_CONTROLLERS, 0x7F])
            .map_err(Error::Bus)?;
        self.delay.delay_ms(15);
        Ok(())
    }

    /// Set the channel volume (0-127)
    pub fn set_volume(&mut self, volume: u8) -> Result<(), Error<TX::Error>> {
        self.message(&[CONTROL_CHANGE, CC_VOLUME, volume])
    }

    /// Select an instrument by General MIDI program number
    pub fn set_instrument(&mut self, program: u8) -> Result<(), Error<TX::Error>> {
        self.message(&[PROGRAM_CHANGE, program])
    }

    /// Start a note at full velocity
    pub fn note_on(&mut self, note: u8) -> Result<(), Error<TX::Error>> {
        self.message(&[NOTE_ON, note, 0x7F])
    }

    /// Release a note
    pub fn note_off(&mut self, note: u8) -> Result<(), Error<TX::Error>> {
        self.message(&[NOTE_OFF, note, 0x00])
    }

    fn message(&mut self, bytes: &[u8]) -> Result<(), Error<TX::Error>> {
        self.tx.write_blocking(bytes).map_err(Error::Bus)?;
        self.delay.delay_ms(SETTLE_MS);
        Ok(())
    }
}
