//! Protocol engine
//!
//! Two independent entry points share one [`SharedState`]:
//!
//! - [`Controller::handle_packet`] runs once per framed packet from the
//!   controller, in whatever context the transport delivers it.
//! - [`Controller::dispatch`] and the handlers behind it run on behalf of
//!   host requests, possibly from several host threads.
//!
//! Neither side ever waits for the controller. A round trip at 9600 baud is
//! around 9 ms; handlers return as soon as their bytes are queued.

use embassy_sync::blocking_mutex::raw::RawMutex;

use tuxctl_protocol::{
    ControlCommand, DevicePacket, DisplayCommand, PacketError, PacketParser, PACKET_SIZE,
};

use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::request::HostRequest;
use crate::state::SharedState;
use crate::traits::{HostDestination, Transport};

/// Protocol engine for one attached controller
pub struct Controller<M: RawMutex, T: Transport> {
    transport: T,
    state: SharedState<M>,
}

impl<M: RawMutex, T: Transport> Controller<M, T> {
    /// Attach to a transport
    ///
    /// The retained display starts as `config.initial_display` so that a
    /// reset arriving before any set-display request restores a known state.
    pub fn new(transport: T, config: &ControllerConfig) -> Self {
        Self {
            transport,
            state: SharedState::new(config.initial_display.encode()),
        }
    }

    /// The transport this controller sends on
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Shared display and button state
    pub fn state(&self) -> &SharedState<M> {
        &self.state
    }

    // Device → host

    /// Handle one complete packet from the controller
    ///
    /// Never blocks. Unknown opcodes are ignored.
    pub fn handle_packet(&self, packet: [u8; PACKET_SIZE]) {
        match DevicePacket::from_bytes(packet) {
            DevicePacket::Ack => {
                #[cfg(feature = "defmt")]
                defmt::trace!("ACK received");
            }
            DevicePacket::ButtonEvent { b, c } => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Button event: {=u8:#x} {=u8:#x}", b, c);
                self.state.record_buttons(b, c);
            }
            DevicePacket::Reset => {
                #[cfg(feature = "defmt")]
                defmt::info!("Controller reset, restoring configuration");
                self.restore_after_reset();
            }
            DevicePacket::PollOk => {
                #[cfg(feature = "defmt")]
                defmt::trace!("POLL_OK received");
            }
            DevicePacket::Unknown(_op) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Ignoring unknown opcode {=u8:#x}", _op);
            }
        }
    }

    /// Frame one received byte and handle the packet it completes, if any
    pub fn feed(&self, parser: &mut PacketParser, byte: u8) -> Result<(), PacketError> {
        if let Some(packet) = parser.feed(byte)? {
            self.handle_packet(packet);
        }
        Ok(())
    }

    /// Re-enable interrupts and user LED mode, then replay the retained display
    fn restore_after_reset(&self) {
        self.send_startup();
        // Copy out under the lock, send outside it
        let display = self.state.snapshot_display();
        self.transport.send(display.as_bytes());
    }

    fn send_startup(&self) {
        for cmd in ControlCommand::STARTUP {
            self.transport.send(&[cmd.to_byte()]);
        }
    }

    // Host → device

    /// Enable button interrupts and user LED mode
    pub fn initialize(&self) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Initialize");
        self.send_startup();
    }

    /// Show the packed display argument
    ///
    /// The encoded command is retained before it is sent so a later reset
    /// can restore it.
    pub fn set_display(&self, arg: u32) {
        let encoded = DisplayCommand::from_packed(arg).encode();
        #[cfg(feature = "defmt")]
        defmt::debug!("Set display: {=u32:#x}", arg);
        self.state.replace_display(encoded);
        self.transport.send(encoded.as_bytes());
    }

    /// Current button mask as the host sees it
    pub fn buttons(&self) -> u32 {
        self.state.snapshot_buttons().pack_for_host()
    }

    /// Deliver the current button mask to `dest`
    pub fn read_buttons<D: HostDestination + ?Sized>(
        &self,
        dest: &mut D,
    ) -> Result<(), ControllerError> {
        let value = self.buttons();
        dest.write(value.to_ne_bytes()).map_err(|fault| {
            #[cfg(feature = "defmt")]
            defmt::warn!("Failed to deliver button state to host");
            ControllerError::from(fault)
        })
    }

    /// Run a decoded host request
    pub fn handle_request<D: HostDestination + ?Sized>(
        &self,
        request: HostRequest,
        dest: &mut D,
    ) -> Result<(), ControllerError> {
        match request {
            HostRequest::Initialize => {
                self.initialize();
                Ok(())
            }
            HostRequest::SetDisplay(arg) => {
                self.set_display(arg);
                Ok(())
            }
            HostRequest::ReadButtons => self.read_buttons(dest),
        }
    }

    /// Decode and run a raw host request
    ///
    /// `dest` receives the result of a read-buttons request and is ignored
    /// by the others.
    pub fn dispatch<D: HostDestination + ?Sized>(
        &self,
        id: u32,
        arg: u32,
        dest: &mut D,
    ) -> Result<(), ControllerError> {
        let request = HostRequest::from_raw(id, arg).map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("Invalid request id {=u32}", id);
            e
        })?;
        self.handle_request(request, dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostMemoryFault;
    use crate::request::{TUX_BUTTONS, TUX_INIT, TUX_SET_LED};
    use crate::traits::NoDestination;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use std::sync::Mutex;
    use std::vec::Vec;
    use tuxctl_protocol::messages::{
        MTCP_ACK, MTCP_BIOC_EVENT, MTCP_BIOC_ON, MTCP_LED_SET, MTCP_LED_USR, MTCP_POLL_OK,
        MTCP_RESET,
    };
    use tuxctl_protocol::EncodedDisplay;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<Vec<u8>>>,
    }

    impl Recorder {
        fn take(&self) -> Vec<Vec<u8>> {
            core::mem::take(&mut *self.sent.lock().unwrap())
        }
    }

    impl Transport for Recorder {
        fn send(&self, bytes: &[u8]) {
            self.sent.lock().unwrap().push(bytes.to_vec());
        }
    }

    struct Faulting;

    impl HostDestination for Faulting {
        fn write(&mut self, _value: [u8; 4]) -> Result<(), HostMemoryFault> {
            Err(HostMemoryFault)
        }
    }

    fn controller() -> Controller<CriticalSectionRawMutex, Recorder> {
        Controller::new(Recorder::default(), &ControllerConfig::default())
    }

    #[test]
    fn test_initialize_sends_startup_bytes() {
        let ctl = controller();
        ctl.initialize();
        assert_eq!(
            ctl.transport().take(),
            vec![vec![MTCP_BIOC_ON], vec![MTCP_LED_USR]]
        );
    }

    #[test]
    fn test_set_display_sends_and_retains() {
        let ctl = controller();
        ctl.set_display(0x000F_1111);

        let expected = [MTCP_LED_SET, 0x0F, 0x06, 0x06, 0x06, 0x06];
        assert_eq!(ctl.transport().take(), vec![expected.to_vec()]);
        assert_eq!(ctl.state().snapshot_display().as_bytes(), &expected);
    }

    #[test]
    fn test_set_display_idempotent() {
        let ctl = controller();
        ctl.set_display(0x0102_ABCD);
        let once = ctl.state().snapshot();
        ctl.set_display(0x0102_ABCD);
        assert_eq!(ctl.state().snapshot(), once);
    }

    #[test]
    fn test_button_event_updates_state_without_reply() {
        let ctl = controller();
        ctl.handle_packet([MTCP_BIOC_EVENT, 0x05, 0x0A]);

        assert!(ctl.transport().take().is_empty());
        assert_eq!(ctl.buttons(), 0xA5);
    }

    #[test]
    fn test_ack_and_poll_are_silent() {
        let ctl = controller();
        ctl.set_display(0x000F_0000);
        ctl.transport().take();
        let before = ctl.state().snapshot();

        ctl.handle_packet([MTCP_ACK, 0x80, 0x80]);
        ctl.handle_packet([MTCP_POLL_OK, 0x80, 0x80]);

        assert!(ctl.transport().take().is_empty());
        assert_eq!(ctl.state().snapshot(), before);
    }

    #[test]
    fn test_unknown_opcode_ignored() {
        let ctl = controller();
        ctl.handle_packet([MTCP_BIOC_EVENT, 0x83, 0x81]);
        let before = ctl.state().snapshot();

        ctl.handle_packet([0x7E, 0x8F, 0x8F]);

        assert!(ctl.transport().take().is_empty());
        assert_eq!(ctl.state().snapshot(), before);
    }

    #[test]
    fn test_reset_replays_retained_display() {
        let ctl = controller();
        ctl.set_display(0x0800_5678 | 0x000F_0000);
        let retained = *ctl.state().snapshot_display().as_bytes();
        ctl.transport().take();

        ctl.handle_packet([MTCP_RESET, 0x80, 0x80]);

        assert_eq!(
            ctl.transport().take(),
            vec![vec![MTCP_BIOC_ON], vec![MTCP_LED_USR], retained.to_vec()]
        );
    }

    #[test]
    fn test_reset_before_set_display_replays_blank() {
        let ctl = controller();
        ctl.handle_packet([MTCP_RESET, 0x80, 0x80]);

        let sent = ctl.transport().take();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[2], EncodedDisplay::blank().as_bytes().to_vec());
    }

    #[test]
    fn test_reset_uses_configured_initial_display() {
        let config = ControllerConfig {
            initial_display: DisplayCommand::from_packed(0x0001_0008),
            ..ControllerConfig::default()
        };
        let ctl: Controller<CriticalSectionRawMutex, _> =
            Controller::new(Recorder::default(), &config);

        ctl.handle_packet([MTCP_RESET, 0x80, 0x80]);

        let sent = ctl.transport().take();
        assert_eq!(sent[2], vec![MTCP_LED_SET, 0x0F, 0xEF, 0, 0, 0]);
    }

    #[test]
    fn test_read_buttons_into_u32() {
        let ctl = controller();
        ctl.handle_packet([MTCP_BIOC_EVENT, 0x85, 0x8A]);

        let mut out = 0u32;
        assert_eq!(ctl.read_buttons(&mut out), Ok(()));
        assert_eq!(out, 0x0000_00A5);
    }

    #[test]
    fn test_read_buttons_fault() {
        let ctl = controller();
        assert_eq!(
            ctl.read_buttons(&mut Faulting),
            Err(ControllerError::HostMemoryFault)
        );
    }

    #[test]
    fn test_dispatch_table() {
        let ctl = controller();
        let mut out = [0u8; 4];

        assert_eq!(ctl.dispatch(TUX_INIT, 0, &mut NoDestination), Ok(()));
        assert_eq!(ctl.dispatch(TUX_SET_LED, 0x000F_0F01, &mut NoDestination), Ok(()));
        ctl.handle_packet([MTCP_BIOC_EVENT, 0x81, 0x82]);
        assert_eq!(ctl.dispatch(TUX_BUTTONS, 0, &mut out), Ok(()));
        assert_eq!(u32::from_ne_bytes(out), 0x21);

        assert_eq!(
            ctl.dispatch(TUX_BUTTONS, 0, &mut NoDestination),
            Err(ControllerError::HostMemoryFault)
        );
    }

    #[test]
    fn test_invalid_request_changes_nothing() {
        let ctl = controller();
        ctl.set_display(0x000F_4321);
        ctl.transport().take();
        let before = ctl.state().snapshot();

        let mut out = 0xDEAD_BEEFu32;
        assert_eq!(
            ctl.dispatch(7, 0x000F_0000, &mut out),
            Err(ControllerError::InvalidRequest)
        );

        assert_eq!(out, 0xDEAD_BEEF);
        assert!(ctl.transport().take().is_empty());
        assert_eq!(ctl.state().snapshot(), before);
    }

    #[test]
    fn test_feed_frames_and_dispatches() {
        let ctl = controller();
        let mut parser = PacketParser::new();

        for byte in [0x85, MTCP_BIOC_EVENT, 0x83, 0x8C] {
            ctl.feed(&mut parser, byte).unwrap();
        }
        assert_eq!(ctl.buttons(), 0xC3);

        ctl.feed(&mut parser, MTCP_ACK).unwrap();
        assert_eq!(
            ctl.feed(&mut parser, MTCP_RESET),
            Err(PacketError::Resync)
        );
    }
}
