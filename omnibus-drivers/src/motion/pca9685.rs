//! PCA9685 16-channel PWM controller
//!
//! Drives the board's DC motor headers, servo headers and stepper
//! coils. Each of the 16 channels holds an (on-tick, off-tick) pair
//! in a 4096-tick period; the pair lives only in the chip's
//! registers, never cached here. Changing the output frequency means
//! putting the chip to sleep, rewriting the prescaler and waking it
//! back up, in a fixed 6-step sequence.

use embedded_hal::delay::DelayNs;
use omnibus_hal::I2cBus;

use crate::Error;

/// PCA9685 I2C address (7-bit)
const PCA9685_ADDR: u8 = 0x41;

/// PCA9685 registers
mod reg {
    pub const MODE1: u8 = 0x00;
    pub const LED0_ON_L: u8 = 0x06;
    pub const PRESCALE: u8 = 0xFE;
}

/// MODE1 sleep bit; the prescaler only accepts writes while asleep
const MODE1_SLEEP: u8 = 0x10;

/// MODE1 restart + auto-increment + all-call, set after wake-up
const MODE1_RESTART_AI: u8 = 0xA1;

/// Internal oscillator frequency in Hz
const OSC_HZ: u32 = 25_000_000;

/// Ticks per PWM period
const PERIOD_TICKS: u32 = 4096;

/// Channels on the chip
const CHANNELS: u8 = 16;

/// Settle time after most register operations
const SETTLE_MS: u32 = 2;

/// Settle time after mode restores and channel writes
const LONG_SETTLE_MS: u32 = 10;

/// Quadrature duty pairs for stepper drive, one per coil phase
const QUAD_A: (u16, u16) = (2047, 4095);
const QUAD_B: (u16, u16) = (1, 2047);
const QUAD_C: (u16, u16) = (1023, 3071);
const QUAD_D: (u16, u16) = (3071, 1023);

/// Stepper rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Reverse,
}

/// PCA9685 driver
pub struct Pca9685<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C, D> Pca9685<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Wake the chip, set 50 Hz output and zero every channel
    ///
    /// Idempotent; safe to call again at any time.
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(PCA9685_ADDR, &[reg::MODE1, 0x00])
            .map_err(Error::Bus)?;
        self.delay.delay_ms(SETTLE_MS);

        self.set_frequency(50)?;
        for channel in 0..CHANNELS {
            self.set_channel(channel, 0, 0)?;
        }
        Ok(())
    }

    /// Set the PWM output frequency in Hz for all channels
    ///
    /// `prescale = round(25 MHz / (4096 * freq)) - 1`; 50 Hz gives
    /// 121. The chip must sleep while the prescaler changes, so this
    /// briefly stops all outputs.
    pub fn set_frequency(&mut self, freq_hz: u32) -> Result<(), Error<I2C::Error>> {
        let denom = PERIOD_TICKS * freq_hz;
        let prescale = ((OSC_HZ + denom / 2) / denom - 1) as u8;

        self.i2c
            .write(PCA9685_ADDR, &[reg::MODE1])
            .map_err(Error::Bus)?;
        self.delay.delay_ms(SETTLE_MS);

        let mut mode = [0u8; 1];
        self.i2c.read(PCA9685_ADDR, &mut mode).map_err(Error::Bus)?;
        let old_mode = mode[0];
        self.delay.delay_ms(SETTLE_MS);

        // Sleep (restart bit cleared), write the prescaler, wake up,
        // then restart with auto-increment
        self.i2c
            .write(PCA9685_ADDR, &[reg::MODE1, (old_mode & 0x7F) | MODE1_SLEEP])
            .map_err(Error::Bus)?;
        self.delay.delay_ms(SETTLE_MS);

        self.i2c
            .write(PCA9685_ADDR, &[reg::PRESCALE, prescale])
            .map_err(Error::Bus)?;
        self.delay.delay_ms(SETTLE_MS);

        self.i2c
            .write(PCA9685_ADDR, &[reg::MODE1, old_mode])
            .map_err(Error::Bus)?;
        self.delay.delay_ms(LONG_SETTLE_MS);

        self.i2c
            .write(PCA9685_ADDR, &[reg::MODE1, old_mode | MODE1_RESTART_AI])
            .map_err(Error::Bus)?;
        self.delay.delay_ms(LONG_SETTLE_MS);
        Ok(())
    }

    /// Write one channel's (on-tick, off-tick) pair
    ///
    /// Channel indices above 15 are silently ignored, matching the
    /// board's documented behavior for every actuator operation.
    pub fn set_channel(&mut self, channel: u8, on: u16, off: u16) -> Result<(), Error<I2C::Error>> {
        if channel >= CHANNELS {
            return Ok(());
        }
        let data = [
            reg::LED0_ON_L + 4 * channel,
            (on & 0xFF) as u8,
            (on >> 8) as u8,
            (off & 0xFF) as u8,
            (off >> 8) as u8,
        ];
        self.i2c.write(PCA9685_ADDR, &data).map_err(Error::Bus)?;
        self.delay.delay_ms(LONG_SETTLE_MS);
        Ok(())
    }

    /// Drive a DC motor header at the given speed
    ///
    /// `motor` is the board header number (1-4); `speed` is
    /// -255..=255, scaled by 16 into duty ticks and clamped to
    /// +/-4095. The sign picks which of the header's two channels
    /// carries the duty. Headers are wired pairwise-swapped relative
    /// to channel order (1<->2, 3<->4); do not "fix" the remap.
    pub fn dc_motor(&mut self, motor: u8, speed: i16) -> Result<(), Error<I2C::Error>> {
        if !(1..=4).contains(&motor) {
            return Ok(());
        }
        let remapped = match motor {
            1 => 2,
            2 => 1,
            3 => 4,
            _ => 3,
        };
        let base = (remapped - 1) * 2;

        let duty = (i32::from(speed) * 16).clamp(-4095, 4095);
        if duty >= 0 {
            self.set_channel(base, 0, duty as u16)?;
            self.set_channel(base + 1, 0, 0)
        } else {
            self.set_channel(base, 0, 0)?;
            self.set_channel(base + 1, 0, (-duty) as u16)
        }
    }

    /// Position a servo header at the given angle in degrees
    ///
    /// Servo header `n` rides channel `n + 7`; headers past channel
    /// 15 are silently ignored. The pulse width is `600 + 10 *
    /// degrees` microseconds of a 20 ms period (0.6 ms to 2.4 ms over
    /// 0-180 degrees), converted to duty ticks with integer
    /// truncation.
    pub fn servo(&mut self, servo: u8, degrees: u16) -> Result<(), Error<I2C::Error>> {
        let Some(channel) = Self::header_channel(servo) else {
            return Ok(());
        };
        let pulse_us = u32::from(degrees) * 10 + 600;
        let duty = pulse_us * PERIOD_TICKS / 20_000;
        self.set_channel(channel, 0, duty as u16)
    }

    /// Set a raw duty on a PWM output header
    ///
    /// Output header `n` rides channel `n + 7`, like the servos;
    /// headers past channel 15 are silently ignored.
    pub fn pwm_output(&mut self, output: u8, duty: u16) -> Result<(), Error<I2C::Error>> {
        let Some(channel) = Self::header_channel(output) else {
            return Ok(());
        };
        self.set_channel(channel, 0, duty)
    }

    /// Channel behind a servo/PWM header, or `None` when the header
    /// maps past the last channel
    fn header_channel(header: u8) -> Option<u8> {
        let channel = u16::from(header) + 7;
        (channel < u16::from(CHANNELS)).then_some(channel as u8)
    }

    /// Energize a stepper motor's four coils
    ///
    /// `motor` 1 uses channels 0-3, motor 2 channels 4-7. `speed_hz`
    /// is clamped to 25-200 and applied as the PWM frequency; the
    /// coil channels then hold a fixed quadrature pattern until the
    /// next call.
    pub fn step_motor(
        &mut self,
        motor: u8,
        direction: Direction,
        speed_hz: u32,
    ) -> Result<(), Error<I2C::Error>> {
        let base = match motor {
            1 => 0,
            2 => 4,
            _ => return Ok(()),
        };
        self.set_frequency(speed_hz.clamp(25, 200))?;

        let phases = match direction {
            Direction::Forward => [(0, QUAD_A), (2, QUAD_B), (1, QUAD_C), (3, QUAD_D)],
            Direction::Reverse => [(3, QUAD_A), (1, QUAD_B), (2, QUAD_C), (0, QUAD_D)],
        };
        for (offset, (on, off)) in phases {
            self.set_channel(base + offset, on, off)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omnibus_hal::mock::{BusOp, MockBus, MockDelay};

    fn pwm(bus: MockBus) -> Pca9685<MockBus, MockDelay> {
        Pca9685::new(bus, MockDelay::new())
    }

    fn channel_writes(bus: &MockBus) -> Vec<(u8, u16, u16)> {
        bus.writes()
            .filter(|(_, bytes)| bytes.len() == 5)
            .map(|(_, b)| {
                let channel = (b[0] - reg::LED0_ON_L) / 4;
                let on = u16::from_le_bytes([b[1], b[2]]);
                let off = u16::from_le_bytes([b[3], b[4]]);
                (channel, on, off)
            })
            .collect()
    }

    #[test]
    fn test_prescale_for_50hz() {
        let mut bus = MockBus::new();
        bus.push_read(&[0x00]); // current MODE1
        let mut pwm = pwm(bus);

        pwm.set_frequency(50).unwrap();

        let writes: Vec<_> = pwm.i2c.writes().collect();
        assert_eq!(
            writes,
            [
                (PCA9685_ADDR, &[0x00][..]),        // point at MODE1
                (PCA9685_ADDR, &[0x00, 0x10][..]),  // sleep
                (PCA9685_ADDR, &[0xFE, 121][..]),   // prescale
                (PCA9685_ADDR, &[0x00, 0x00][..]),  // wake
                (PCA9685_ADDR, &[0x00, 0xA1][..]),  // restart + auto-increment
            ]
        );
        let delays: Vec<_> = pwm.delay.delays_ms().collect();
        assert_eq!(delays, [2, 2, 2, 2, 10, 10]);
    }

    #[test]
    fn test_frequency_change_preserves_mode_bits() {
        let mut bus = MockBus::new();
        bus.push_read(&[0x04]); // some mode flag already set
        let mut pwm = pwm(bus);

        pwm.set_frequency(50).unwrap();

        let writes: Vec<_> = pwm.i2c.writes().collect();
        assert_eq!(writes[1].1, &[0x00, 0x14][..]); // sleep keeps the flag
        assert_eq!(writes[3].1, &[0x00, 0x04][..]); // restored verbatim
        assert_eq!(writes[4].1, &[0x00, 0xA5][..]); // flag | 0xA1
    }

    #[test]
    fn test_channel_register_roundtrip() {
        let mut pwm = pwm(MockBus::new());
        pwm.set_channel(3, 0x0123, 0x0456).unwrap();

        let BusOp::Write { bytes, .. } = &pwm.i2c.ops[0] else {
            panic!("expected a write");
        };
        assert_eq!(bytes[0], reg::LED0_ON_L + 4 * 3);
        // Little-endian decode of the written bytes reconstructs the pair
        assert_eq!(channel_writes(&pwm.i2c), [(3, 0x0123, 0x0456)]);
    }

    #[test]
    fn test_channel_16_silently_ignored() {
        let mut pwm = pwm(MockBus::new());
        pwm.set_channel(16, 0, 4095).unwrap();
        assert!(pwm.i2c.ops.is_empty());
    }

    #[test]
    fn test_dc_motor_forward_with_remap() {
        let mut pwm = pwm(MockBus::new());
        pwm.dc_motor(1, 255).unwrap();

        // Header 1 remaps to channel pair (2, 3); 255 * 16 = 4080
        assert_eq!(channel_writes(&pwm.i2c), [(2, 0, 4080), (3, 0, 0)]);
    }

    #[test]
    fn test_dc_motor_out_of_range_speed_clamps() {
        let mut pwm = pwm(MockBus::new());
        pwm.dc_motor(1, 300).unwrap();

        assert_eq!(channel_writes(&pwm.i2c), [(2, 0, 4095), (3, 0, 0)]);
    }

    #[test]
    fn test_dc_motor_reverse() {
        let mut pwm = pwm(MockBus::new());
        pwm.dc_motor(3, -100).unwrap();

        // Header 3 remaps to 4: channels (6, 7); reverse drives the
        // second channel
        assert_eq!(channel_writes(&pwm.i2c), [(6, 0, 0), (7, 0, 1600)]);
    }

    #[test]
    fn test_dc_motor_invalid_header_ignored() {
        let mut pwm = pwm(MockBus::new());
        pwm.dc_motor(5, 100).unwrap();
        pwm.dc_motor(0, 100).unwrap();
        assert!(pwm.i2c.ops.is_empty());
    }

    #[test]
    fn test_servo_angle_to_duty() {
        let mut pwm = pwm(MockBus::new());
        pwm.servo(1, 90).unwrap();

        // 600 + 900 = 1500 us -> 1500 * 4096 / 20000 = 307 (truncated)
        assert_eq!(channel_writes(&pwm.i2c), [(8, 0, 307)]);
    }

    #[test]
    fn test_servo_header_past_channel_15_ignored() {
        let mut pwm = pwm(MockBus::new());
        pwm.servo(9, 90).unwrap();
        assert!(pwm.i2c.ops.is_empty());
    }

    #[test]
    fn test_header_near_u8_max_ignored() {
        let mut pwm = pwm(MockBus::new());
        pwm.servo(250, 90).unwrap();
        pwm.pwm_output(255, 100).unwrap();
        assert!(pwm.i2c.ops.is_empty());
    }

    #[test]
    fn test_pwm_output_channel_offset() {
        let mut pwm = pwm(MockBus::new());
        pwm.pwm_output(1, 2048).unwrap();
        assert_eq!(channel_writes(&pwm.i2c), [(8, 0, 2048)]);
    }

    #[test]
    fn test_stepper_forward_pattern() {
        let mut bus = MockBus::new();
        bus.push_read(&[0x00]);
        let mut pwm = pwm(bus);

        pwm.step_motor(1, Direction::Forward, 100).unwrap();

        assert_eq!(
            channel_writes(&pwm.i2c),
            [
                (0, 2047, 4095),
                (2, 1, 2047),
                (1, 1023, 3071),
                (3, 3071, 1023),
            ]
        );
    }

    #[test]
    fn test_stepper_reverse_pattern_second_motor() {
        let mut bus = MockBus::new();
        bus.push_read(&[0x00]);
        let mut pwm = pwm(bus);

        pwm.step_motor(2, Direction::Reverse, 100).unwrap();

        assert_eq!(
            channel_writes(&pwm.i2c),
            [
                (7, 2047, 4095),
                (5, 1, 2047),
                (6, 1023, 3071),
                (4, 3071, 1023),
            ]
        );
    }

    #[test]
    fn test_stepper_speed_clamped_to_prescale_range() {
        let mut bus = MockBus::new();
        bus.push_read(&[0x00]);
        let mut pwm = pwm(bus);

        pwm.step_motor(1, Direction::Forward, 10).unwrap();

        // Clamped to 25 Hz: round(25 MHz / (4096 * 25)) - 1 = 243
        let prescale_write = pwm
            .i2c
            .writes()
            .find(|(_, b)| b[0] == reg::PRESCALE)
            .unwrap();
        assert_eq!(prescale_write.1, &[0xFE, 243][..]);
    }

    #[test]
    fn test_init_zeroes_all_channels() {
        let mut bus = MockBus::new();
        bus.push_read(&[0x00]); // MODE1 read inside set_frequency
        let mut pwm = pwm(bus);

        pwm.init().unwrap();

        let channels = channel_writes(&pwm.i2c);
        assert_eq!(channels.len(), 16);
        for (i, &(channel, on, off)) in channels.iter().enumerate() {
            assert_eq!((channel, on, off), (i as u8, 0, 0));
        }
    }

    #[test]
    fn test_failed_mode_read_aborts_sequence() {
        let mut bus = MockBus::new();
        bus.fail_transaction(1); // the MODE1 read
        let mut pwm = pwm(bus);

        assert!(matches!(pwm.set_frequency(50), Err(Error::Bus(_))));
        // Pointer write + failed read; the sleep step never ran
        assert_eq!(pwm.i2c.ops.len(), 2);
    }
}
