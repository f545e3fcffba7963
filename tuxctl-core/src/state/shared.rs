//! Lock-protected snapshot of display and button state
//!
//! Every access takes the lock for the duration of a single copy. No I/O
//! happens inside the critical section.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use tuxctl_protocol::{ButtonState, EncodedDisplay};

/// Everything the core remembers about the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceState {
    /// Last LED command sent, replayed after a controller reset
    pub display: EncodedDisplay,
    /// Last raw button status reported by the controller
    pub buttons: ButtonState,
}

/// [`DeviceState`] behind a blocking mutex
///
/// With `CriticalSectionRawMutex` the lock is a short critical section, safe
/// to take from the packet callback even when it runs in interrupt context.
pub struct SharedState<M: RawMutex> {
    inner: Mutex<M, RefCell<DeviceState>>,
}

impl<M: RawMutex> SharedState<M> {
    /// Create shared state retaining `display` and no buttons pressed
    pub fn new(display: EncodedDisplay) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(DeviceState {
                display,
                buttons: ButtonState::default(),
            })),
        }
    }

    /// Overwrite the retained LED command
    pub fn replace_display(&self, display: EncodedDisplay) {
        self.inner.lock(|cell| cell.borrow_mut().display = display);
    }

    /// Overwrite the button state with a new event's raw bytes
    pub fn record_buttons(&self, b: u8, c: u8) {
        let buttons = ButtonState::from_event(b, c);
        self.inner.lock(|cell| cell.borrow_mut().buttons = buttons);
    }

    /// Copy of the retained LED command
    pub fn snapshot_display(&self) -> EncodedDisplay {
        self.inner.lock(|cell| cell.borrow().display)
    }

    /// Copy of the current button state
    pub fn snapshot_buttons(&self) -> ButtonState {
        self.inner.lock(|cell| cell.borrow().buttons)
    }

    /// Copy of both halves taken under one lock
    pub fn snapshot(&self) -> DeviceState {
        self.inner.lock(|cell| *cell.borrow())
    }
}

impl<M: RawMutex> Default for SharedState<M> {
    fn default() -> Self {
        Self::new(EncodedDisplay::blank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use tuxctl_protocol::DisplayCommand;

    type State = SharedState<CriticalSectionRawMutex>;

    #[test]
    fn test_initial_state() {
        let state = State::default();
        assert_eq!(state.snapshot_display(), EncodedDisplay::blank());
        assert_eq!(state.snapshot_buttons(), ButtonState::default());
    }

    #[test]
    fn test_replace_display() {
        let state = State::default();
        let display = DisplayCommand::from_packed(0x000F_1234).encode();

        state.replace_display(display);

        assert_eq!(state.snapshot_display(), display);
        // Buttons untouched
        assert_eq!(state.snapshot_buttons(), ButtonState::default());
    }

    #[test]
    fn test_record_buttons() {
        let state = State::default();
        state.record_buttons(0x85, 0x8A);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.buttons, ButtonState::from_event(0x85, 0x8A));
        assert_eq!(snapshot.display, EncodedDisplay::blank());
    }

    #[test]
    fn test_latest_write_wins() {
        let state = State::default();
        state.record_buttons(0x81, 0x81);
        state.record_buttons(0x82, 0x84);
        assert_eq!(state.snapshot_buttons().pack_for_host(), 0x42);
    }
}
