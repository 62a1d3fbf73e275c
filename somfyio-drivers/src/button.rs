//! Emulated button presses
//!
//! Each button line idles high and registers a press while pulled low. The
//! remote needs a minimum hold time before it accepts a press, so a pulse
//! deliberately occupies its caller for the full hold.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

use somfyio_core::dispatcher::Line;

/// One emulated button: idle-high output, active-low press.
pub struct ButtonActuator<P> {
    pin: P,
}

impl<P: OutputPin> ButtonActuator<P> {
    /// Wrap an output line, asserting the released (high) level.
    pub fn new(mut pin: P) -> Self {
        // Pin writes are infallible on the GPIO blocks this targets
        pin.set_high().ok();
        Self { pin }
    }

    /// Press for `hold_ms`, then release.
    pub async fn pulse<D: DelayNs>(&mut self, delay: &mut D, hold_ms: u32) {
        self.pin.set_low().ok();
        delay.delay_ms(hold_ms).await;
        self.pin.set_high().ok();
    }
}

/// The four remote buttons, addressed by dispatcher line.
pub struct RemoteButtons<P> {
    select: ButtonActuator<P>,
    up: ButtonActuator<P>,
    my: ButtonActuator<P>,
    down: ButtonActuator<P>,
}

impl<P: OutputPin> RemoteButtons<P> {
    /// Wrap the four button lines, releasing all of them.
    pub fn new(select: P, up: P, my: P, down: P) -> Self {
        Self {
            select: ButtonActuator::new(select),
            up: ButtonActuator::new(up),
            my: ButtonActuator::new(my),
            down: ButtonActuator::new(down),
        }
    }

    /// Press the button behind `line` for `hold_ms`.
    pub async fn press<D: DelayNs>(&mut self, line: Line, delay: &mut D, hold_ms: u32) {
        let button = match line {
            Line::Select => &mut self.select,
            Line::Up => &mut self.up,
            Line::My => &mut self.my,
            Line::Down => &mut self.down,
        };
        button.pulse(delay, hold_ms).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use core::convert::Infallible;
    use embassy_futures::block_on;
    use heapless::Vec;

    /// Records every level written to the pin.
    struct MockPin<'a> {
        levels: &'a RefCell<Vec<bool, 8>>,
    }

    impl embedded_hal::digital::ErrorType for MockPin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for MockPin<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            let _ = self.levels.borrow_mut().push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            let _ = self.levels.borrow_mut().push(true);
            Ok(())
        }
    }

    /// Records requested delays instead of sleeping.
    struct MockDelay {
        slept_ms: Vec<u32, 8>,
    }

    impl DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            let _ = self.slept_ms.push(ns / 1_000_000);
        }
    }

    #[test]
    fn test_idles_high_on_construction() {
        let levels = RefCell::new(Vec::new());
        let _button = ButtonActuator::new(MockPin { levels: &levels });
        assert_eq!(levels.borrow().as_slice(), &[true]);
    }

    #[test]
    fn test_pulse_drives_low_then_restores_high() {
        let levels = RefCell::new(Vec::new());
        let mut button = ButtonActuator::new(MockPin { levels: &levels });
        let mut delay = MockDelay {
            slept_ms: Vec::new(),
        };

        block_on(button.pulse(&mut delay, 250));

        // construction high, press low, release high
        assert_eq!(levels.borrow().as_slice(), &[true, false, true]);
        assert_eq!(delay.slept_ms.as_slice(), &[250]);
    }

    #[test]
    fn test_press_routes_to_the_right_line() {
        let select = RefCell::new(Vec::new());
        let up = RefCell::new(Vec::new());
        let my = RefCell::new(Vec::new());
        let down = RefCell::new(Vec::new());
        let mut buttons = RemoteButtons::new(
            MockPin { levels: &select },
            MockPin { levels: &up },
            MockPin { levels: &my },
            MockPin { levels: &down },
        );
        let mut delay = MockDelay {
            slept_ms: Vec::new(),
        };

        block_on(buttons.press(Line::My, &mut delay, 500));

        assert_eq!(my.borrow().as_slice(), &[true, false, true]);
        // The other lines stay released
        assert_eq!(select.borrow().as_slice(), &[true]);
        assert_eq!(up.borrow().as_slice(), &[true]);
        assert_eq!(down.borrow().as_slice(), &[true]);
        assert_eq!(delay.slept_ms.as_slice(), &[500]);
    }
}
