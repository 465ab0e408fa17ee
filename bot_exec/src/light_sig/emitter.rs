//! Signal emitters, which write [`SignalPattern`]s out to the light.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::light::{Level, SignalPattern};
use embedded_hal::{blocking::delay::DelayUs, digital::v2::OutputPin};
use log::{debug, info, trace};

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Trait to provide a unified API for writing signal patterns, whatever the line is driven by.
pub trait SignalEmitter {
    /// Write the whole pattern out, returning once the last pulse has started.
    fn emit(&mut self, pattern: &SignalPattern) -> Result<(), SignalError>;
}

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// Emitter which logs patterns instead of writing them, used when no light is attached.
#[derive(Default)]
pub struct LogEmitter {
    num_emitted: u64,
}

/// Emitter which bit-bangs patterns on a GPIO pin.
///
/// Durations are rounded to the nearest microsecond, pulses which round to zero are as short as
/// the pin can be toggled.
pub struct PinEmitter<P, D> {
    pin: P,
    delay: D,
}

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum SignalError {
    #[error("Could not set the signal pin: {0}")]
    PinError(String),
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl LogEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of patterns emitted so far.
    pub fn num_emitted(&self) -> u64 {
        self.num_emitted
    }
}

impl SignalEmitter for LogEmitter {
    fn emit(&mut self, pattern: &SignalPattern) -> Result<(), SignalError> {
        self.num_emitted += 1;

        info!(
            "Light frame {}: {} pulses over {} ns",
            self.num_emitted,
            pattern.len(),
            pattern.duration_ns()
        );
        trace!("{:?}", pattern.pulses);

        Ok(())
    }
}

impl<P, D> PinEmitter<P, D>
where
    P: OutputPin,
    P::Error: std::fmt::Debug,
    D: DelayUs<u32>,
{
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Release the pin and delay.
    pub fn free(self) -> (P, D) {
        (self.pin, self.delay)
    }

    fn set(&mut self, level: Level) -> Result<(), SignalError> {
        let res = match level {
            Level::High => self.pin.set_high(),
            Level::Low => self.pin.set_low(),
        };

        res.map_err(|e| SignalError::PinError(format!("{:?}", e)))
    }
}

impl<P, D> SignalEmitter for PinEmitter<P, D>
where
    P: OutputPin,
    P::Error: std::fmt::Debug,
    D: DelayUs<u32>,
{
    fn emit(&mut self, pattern: &SignalPattern) -> Result<(), SignalError> {
        debug!("Writing {} pulse signal to pin", pattern.len());

        for pulse in pattern.pulses.iter() {
            self.set(pulse.level)?;

            let us = round_to_us(pulse.duration_ns);
            if us > 0 {
                self.delay.delay_us(us);
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

fn round_to_us(ns: u32) -> u32 {
    (ns / 1000) + if ns % 1000 >= 500 { 1 } else { 0 }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::eqpt::light::Pulse;
    use std::{cell::RefCell, rc::Rc};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Event {
        Set(Level),
        Delay(u32),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct MockPin {
        log: Log,
        fail: bool,
    }

    struct MockDelay {
        log: Log,
    }

    impl OutputPin for MockPin {
        type Error = &'static str;

        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.fail {
                return Err("pin unavailable");
            }
            self.log.borrow_mut().push(Event::Set(Level::Low));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.fail {
                return Err("pin unavailable");
            }
            self.log.borrow_mut().push(Event::Set(Level::High));
            Ok(())
        }
    }

    impl DelayUs<u32> for MockDelay {
        fn delay_us(&mut self, us: u32) {
            self.log.borrow_mut().push(Event::Delay(us));
        }
    }

    fn emitter(fail: bool) -> (PinEmitter<MockPin, MockDelay>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let e = PinEmitter::new(
            MockPin { log: log.clone(), fail },
            MockDelay { log: log.clone() },
        );
        (e, log)
    }

    #[test]
    fn test_round_to_us() {
        assert_eq!(round_to_us(0), 0);
        assert_eq!(round_to_us(11), 0);
        assert_eq!(round_to_us(499), 0);
        assert_eq!(round_to_us(500), 1);
        assert_eq!(round_to_us(889), 1);
        assert_eq!(round_to_us(51_000), 51);
    }

    #[test]
    fn test_pin_emitter_frame() {
        let (mut e, log) = emitter(false);
        let frame = SignalPattern::zero_frame(51_000, 11, 889, 48);

        e.emit(&frame).unwrap();

        let mut expected = vec![
            Event::Set(Level::Low),
            Event::Delay(51),
            Event::Set(Level::High),
        ];
        for _ in 0..48 {
            expected.push(Event::Set(Level::High));
            expected.push(Event::Set(Level::Low));
            expected.push(Event::Delay(1));
        }
        expected.push(Event::Set(Level::High));

        assert_eq!(*log.borrow(), expected);

        // The released pin can still be driven directly
        let (mut pin, _delay) = e.free();
        pin.set_low().unwrap();
        assert_eq!(log.borrow().last(), Some(&Event::Set(Level::Low)));
        assert_eq!(log.borrow().len(), expected.len() + 1);
    }

    #[test]
    fn test_pin_error() {
        let (mut e, log) = emitter(true);
        let pattern = SignalPattern {
            pulses: vec![Pulse::low(1000)],
        };

        assert!(matches!(e.emit(&pattern), Err(SignalError::PinError(_))));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_log_emitter_counts() {
        let mut e = LogEmitter::new();
        let frame = SignalPattern::zero_frame(51_000, 11, 889, 48);

        e.emit(&frame).unwrap();
        e.emit(&frame).unwrap();

        assert_eq!(e.num_emitted(), 2);
    }
}
