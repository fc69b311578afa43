// MIT License - Copyright (c) 2026 Peter Wright
// Ring Keypad Z-Wave codec and MQTT bridge

//! # ring-keypad-bridge
//!
//! Codec and MQTT glue for the Ring Keypad (2nd gen) attached through a
//! Z-Wave JS gateway.
//!
//! The core is a pair of pure, stateless translations over one shared table
//! of protocol constants:
//!
//! - [`event::decode`] maps raw Entry Control notifications (command class
//!   111) to semantic keypad events — button presses and entered codes.
//! - [`command`] encodes semantic intents (alarm state, chime, alarm sound)
//!   into Indicator `set_value` payloads (command class 135) for the gateway
//!   to transmit.
//!
//! [`keypad::RingKeypad`] wraps both directions for a single device, and the
//! `keypad2mqtt` binary wires that handle to an MQTT broker.
//!
//! ## Quick Start
//!
//! ```
//! use ring_keypad_bridge::{alarm_state_command, decode, EventData};
//!
//! // Inbound: raw notification -> semantic event
//! let event = decode(2, Some(&EventData::Text("1234".into()))).unwrap();
//! assert_eq!(event.button.name(), "code_entered");
//! assert_eq!(event.code.as_deref(), Some("1234"));
//!
//! // Outbound: alarm panel state -> Indicator command
//! let cmd = alarm_state_command("armed_home", None).unwrap();
//! assert_eq!((cmd.property, cmd.property_key, cmd.value), (10, 1, 100));
//! ```

pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod keypad;
pub mod services;

// Re-exports for convenience
pub use command::{alarm_command, alarm_state_command, chime_command, message_command, CommandPayload};
pub use config::{KeypadConfig, KeypadConfigBuilder};
pub use constants::{AlarmSound, AlarmState, Chime, Delay, Message, StateIndicator};
pub use error::{KeypadError, Result};
pub use event::{
    decode, Button, EventCategory, EventData, EventReceiver, EventSender, KeypadEvent,
    Notification,
};
pub use keypad::{RingKeypad, SetValue};
pub use services::{dispatch, ServiceCommand, ServiceError, ServiceRegistry};
