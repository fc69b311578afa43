// MIT License - Copyright (c) 2026 Peter Wright
// Per-device keypad handle

use serde::Serialize;
use tracing::{debug, info};

use crate::command::{
    alarm_command, alarm_state_command, chime_command, message_command, CommandPayload,
};
use crate::config::KeypadConfig;
use crate::constants::{Message, EVENT_COMMAND_CLASS};
use crate::error::Result;
use crate::event::{decode, event_channel, EventReceiver, EventSender, KeypadEvent, Notification};

/// A fully addressed Indicator command, ready to hand to the Z-Wave gateway's
/// `set_value` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetValue {
    pub device_id: Vec<String>,
    #[serde(flatten)]
    pub payload: CommandPayload,
}

impl SetValue {
    fn new(device_id: &str, payload: CommandPayload) -> Self {
        Self {
            device_id: vec![device_id.to_string()],
            payload,
        }
    }
}

/// Handle for one physical keypad.
///
/// Filters the shared notification stream down to this device, decodes its
/// events, fans them out over a broadcast channel, and builds addressed
/// commands. Holds no mutable state, so it is safe to call from any number
/// of notification-handling tasks concurrently.
pub struct RingKeypad {
    config: KeypadConfig,
    event_tx: EventSender,
}

impl RingKeypad {
    pub fn new(config: KeypadConfig) -> Self {
        let (event_tx, _) = event_channel(config.event_capacity);
        Self { config, event_tx }
    }

    pub fn device_id(&self) -> &str {
        &self.config.device_id
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    /// Subscribe to decoded keypad events.
    pub fn subscribe(&self) -> EventReceiver {
        self.event_tx.subscribe()
    }

    /// Handle one notification from the shared bus.
    ///
    /// Notifications for other devices or other command classes are dropped
    /// silently — on a multi-device mesh most traffic is not for us. Unknown
    /// event types on our own device are logged at informational level and
    /// dropped. Decoded events are broadcast to subscribers and returned.
    pub fn handle_notification(&self, notification: &Notification) -> Option<KeypadEvent> {
        if notification.device_id != self.config.device_id {
            return None;
        }
        if notification.command_class != EVENT_COMMAND_CLASS {
            return None;
        }
        debug!(
            "{}: notification event_type={} event_data={:?}",
            self.config.label, notification.event_type, notification.event_data
        );
        let Some(event) = decode(notification.event_type, notification.event_data.as_ref()) else {
            info!(
                "{}: notification with unknown event type {}",
                self.config.label, notification.event_type
            );
            return None;
        };
        // Send only fails when nobody is subscribed; the event still goes
        // back to the caller.
        let _ = self.event_tx.send(event.clone());
        Some(event)
    }

    /// Build an addressed alarm-state command.
    pub fn alarm_state(&self, state: &str, delay_secs: Option<u16>) -> Result<SetValue> {
        Ok(SetValue::new(
            &self.config.device_id,
            alarm_state_command(state, delay_secs)?,
        ))
    }

    /// Build an addressed chime command.
    pub fn chime(&self, chime: &str, volume: Option<u16>) -> Result<SetValue> {
        Ok(SetValue::new(
            &self.config.device_id,
            chime_command(chime, volume)?,
        ))
    }

    /// Build an addressed alarm sound command.
    pub fn alarm(&self, alarm: &str, volume: Option<u16>) -> Result<SetValue> {
        Ok(SetValue::new(
            &self.config.device_id,
            alarm_command(alarm, volume)?,
        ))
    }

    /// Build an addressed feedback message command.
    pub fn message(&self, message: Message) -> SetValue {
        SetValue::new(&self.config.device_id, message_command(message))
    }
}
