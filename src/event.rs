// MIT License - Copyright (c) 2026 Peter Wright
// Inbound notification decoding

use serde::Deserialize;

/// Buttons and code-entry actions the keypad reports, keyed by the raw
/// `event_type` of its Entry Control notification.
///
/// The raw codes span 0-25 but are not contiguous; codes the keypad never
/// sends (or that we do not map) simply fail [`Button::from_event_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Button {
    CodeStarted = 0,
    CodeTimeout = 1,
    /// Notification also carries the entered code in `event_data`.
    CodeEntered = 2,
    /// Check-mark button; carries the entered code when one was typed.
    Disarm = 3,
    ArmAway = 5,
    ArmStay = 6,
    Fire = 16,
    Police = 17,
    Medical = 19,
    CodeCancel = 25,
}

impl Button {
    pub const ALL: [Button; 10] = [
        Button::CodeStarted,
        Button::CodeTimeout,
        Button::CodeEntered,
        Button::Disarm,
        Button::ArmAway,
        Button::ArmStay,
        Button::Fire,
        Button::Police,
        Button::Medical,
        Button::CodeCancel,
    ];

    pub fn from_event_type(event_type: u32) -> Option<Self> {
        match event_type {
            0 => Some(Self::CodeStarted),
            1 => Some(Self::CodeTimeout),
            2 => Some(Self::CodeEntered),
            3 => Some(Self::Disarm),
            5 => Some(Self::ArmAway),
            6 => Some(Self::ArmStay),
            16 => Some(Self::Fire),
            17 => Some(Self::Police),
            19 => Some(Self::Medical),
            25 => Some(Self::CodeCancel),
            _ => None,
        }
    }

    /// Canonical name published with the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CodeStarted => "code_started",
            Self::CodeTimeout => "code_timeout",
            Self::CodeEntered => "code_entered",
            Self::Disarm => "disarm",
            Self::ArmAway => "arm_away",
            Self::ArmStay => "arm_stay",
            Self::Fire => "fire",
            Self::Police => "police",
            Self::Medical => "medical",
            Self::CodeCancel => "code_cancel",
        }
    }

    /// Coarse grouping used for the platform's event-type enumeration.
    pub fn category(&self) -> EventCategory {
        match self {
            Self::CodeEntered | Self::Disarm => EventCategory::AlarmDisarm,
            Self::ArmAway => EventCategory::AlarmArmAway,
            Self::ArmStay => EventCategory::AlarmArmHome,
            _ => EventCategory::Pressed,
        }
    }

    /// Whether notifications of this type carry an entered code.
    pub fn carries_code(&self) -> bool {
        matches!(self, Self::CodeEntered | Self::Disarm)
    }
}

/// Outward-facing category grouping related buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Pressed,
    AlarmDisarm,
    AlarmArmAway,
    AlarmArmHome,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pressed => "pressed",
            Self::AlarmDisarm => "alarm_disarm",
            Self::AlarmArmAway => "alarm_arm_away",
            Self::AlarmArmHome => "alarm_arm_home",
        }
    }
}

/// A Z-Wave JS notification as it appears on the shared event bus. Only the
/// fields the bridge consumes; everything else in the gateway's JSON is
/// ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    pub device_id: String,
    pub command_class: u32,
    pub event_type: u32,
    #[serde(default)]
    pub event_data: Option<EventData>,
}

/// Entered codes arrive as strings from most gateways but as bare integers
/// from some firmware revisions; both normalize to a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EventData {
    Number(u64),
    Text(String),
}

impl EventData {
    pub fn as_code(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// A decoded keypad interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadEvent {
    pub button: Button,
    /// Entered code, present only for code-carrying buttons.
    pub code: Option<String>,
}

/// Decode a raw Entry Control event type into a keypad event.
///
/// Unknown event types return `None`. The shared event bus is noisy and
/// unmapped types are an expected condition, not an error — callers log them
/// at informational level and move on.
pub fn decode(event_type: u32, event_data: Option<&EventData>) -> Option<KeypadEvent> {
    let button = Button::from_event_type(event_type)?;
    let code = if button.carries_code() {
        event_data.map(EventData::as_code)
    } else {
        None
    };
    Some(KeypadEvent { button, code })
}

/// Type alias for the decoded-event broadcast sender.
pub type EventSender = tokio::sync::broadcast::Sender<KeypadEvent>;

/// Type alias for the decoded-event broadcast receiver.
pub type EventReceiver = tokio::sync::broadcast::Receiver<KeypadEvent>;

/// Create a new event channel with the given capacity.
pub fn event_channel(capacity: usize) -> (EventSender, EventReceiver) {
    tokio::sync::broadcast::channel(capacity)
}
