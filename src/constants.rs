// MIT License - Copyright (c) 2026 Peter Wright
// Ring Keypad wire protocol constants

//! Single source of truth for the keypad's numeric protocol codes.
//!
//! The keypad is driven through the Indicator command class. Each outbound
//! command addresses a `(property, property_key)` pair, where the property
//! key selects one of three disjoint code spaces: modes/messages (key 1),
//! countdowns (key 7) and sounds (key 9). Property codes are unique within
//! their own space but overlap numerically across spaces — a burglar alarm
//! mode and a burglar alarm sound both use code 13 — so the key must always
//! travel with the code.
//!
//! The event and command details are described in
//! <https://github.com/ImSorryButWho/HomeAssistantNotes/blob/main/RingKeypadV2.md>

/// Command class of inbound Entry Control notifications.
pub const EVENT_COMMAND_CLASS: u32 = 111;

/// Command class for outbound Indicator commands. Z-Wave JS takes this as a
/// string in `set_value` payloads, hence `&str` rather than an integer.
pub const COMMAND_CLASS: &str = "135";

/// The keypad accepts Indicator commands on its root endpoint.
pub const ENDPOINT: u8 = 0;

/// Property key of the mode/message code space.
pub const PROPERTY_KEY_MODE: u8 = 1;

/// Property key of the countdown (entry/exit delay) code space. Commands in
/// this space carry the remaining seconds as their value.
pub const PROPERTY_KEY_DELAY: u8 = 7;

/// Property key of the sound code space. Commands in this space carry the
/// playback volume as their value.
pub const PROPERTY_KEY_SOUND: u8 = 9;

/// Value sent with static indicators, and the default volume for sounds.
pub const FULL_INTENSITY: u16 = 100;

/// Countdown seconds pushed to the keypad when the caller supplies none.
pub const DEFAULT_DELAY_SECS: u16 = 60;

/// Longest countdown the keypad accepts.
pub const MAX_DELAY_SECS: u16 = 300;

/// Mode and message codes (property key 1).
///
/// Modes are latched onto the keypad's state ring; messages (invalid code,
/// bypass needed) flash once and clear themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Message {
    Disarmed = 2,
    InvalidCode = 9,
    ArmedHome = 10,
    ArmedAway = 11,
    GenericAlarm = 12,
    BurglarAlarm = 13,
    SmokeAlarm = 14,
    Co2Alarm = 15,
    NeedBypass = 16,
    MedicalAlarm = 19,
}

/// Countdown codes (property key 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Delay {
    EntryDelay = 17,
    ExitDelay = 18,
}

/// Chime sound codes (property key 9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Chime {
    ElectronicDoubleBeep = 96,
    GuitarRiff = 97,
    WindChime = 98,
    BingBong = 99,
    Doorbell = 100,
}

impl Chime {
    pub const ALL: [Chime; 5] = [
        Chime::ElectronicDoubleBeep,
        Chime::GuitarRiff,
        Chime::WindChime,
        Chime::BingBong,
        Chime::Doorbell,
    ];

    /// Look up a chime by its service name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "electronic_double_beep" => Some(Self::ElectronicDoubleBeep),
            "guitar_riff" => Some(Self::GuitarRiff),
            "wind_chime" => Some(Self::WindChime),
            "bing_bong" => Some(Self::BingBong),
            "doorbell" => Some(Self::Doorbell),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ElectronicDoubleBeep => "electronic_double_beep",
            Self::GuitarRiff => "guitar_riff",
            Self::WindChime => "wind_chime",
            Self::BingBong => "bing_bong",
            Self::Doorbell => "doorbell",
        }
    }
}

/// Alarm sound codes (property key 9).
///
/// These coincide numerically with the alarm entries of [`Message`]; the
/// property key keeps the two spaces apart on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlarmSound {
    Generic = 12,
    Burglar = 13,
    Smoke = 14,
    Co2 = 15,
    Medical = 19,
}

impl AlarmSound {
    pub const ALL: [AlarmSound; 5] = [
        AlarmSound::Generic,
        AlarmSound::Burglar,
        AlarmSound::Smoke,
        AlarmSound::Co2,
        AlarmSound::Medical,
    ];

    /// Look up an alarm sound by its service name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "generic" => Some(Self::Generic),
            "burglar" => Some(Self::Burglar),
            "smoke" => Some(Self::Smoke),
            "co2" => Some(Self::Co2),
            "medical" => Some(Self::Medical),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Burglar => "burglar",
            Self::Smoke => "smoke",
            Self::Co2 => "co2",
            Self::Medical => "medical",
        }
    }
}

/// Alarm panel states the keypad can mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlarmState {
    ArmedAway,
    ArmedHome,
    Arming,
    Disarmed,
    Pending,
    Triggered,
}

/// What an alarm state puts on the keypad: a static mode indicator, or a
/// countdown that needs a duration value. Arming and pending map to
/// countdowns because the device renders a ticking exit/entry delay, not a
/// fixed light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateIndicator {
    Mode(Message),
    Countdown(Delay),
}

impl AlarmState {
    pub const ALL: [AlarmState; 6] = [
        AlarmState::ArmedAway,
        AlarmState::ArmedHome,
        AlarmState::Arming,
        AlarmState::Disarmed,
        AlarmState::Pending,
        AlarmState::Triggered,
    ];

    /// Look up a state by the platform's state name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "armed_away" => Some(Self::ArmedAway),
            "armed_home" => Some(Self::ArmedHome),
            "arming" => Some(Self::Arming),
            "disarmed" => Some(Self::Disarmed),
            "pending" => Some(Self::Pending),
            "triggered" => Some(Self::Triggered),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ArmedAway => "armed_away",
            Self::ArmedHome => "armed_home",
            Self::Arming => "arming",
            Self::Disarmed => "disarmed",
            Self::Pending => "pending",
            Self::Triggered => "triggered",
        }
    }

    /// The indicator this state drives on the keypad.
    pub fn indicator(&self) -> StateIndicator {
        match self {
            Self::ArmedAway => StateIndicator::Mode(Message::ArmedAway),
            Self::ArmedHome => StateIndicator::Mode(Message::ArmedHome),
            Self::Arming => StateIndicator::Countdown(Delay::ExitDelay),
            Self::Disarmed => StateIndicator::Mode(Message::Disarmed),
            Self::Pending => StateIndicator::Countdown(Delay::EntryDelay),
            Self::Triggered => StateIndicator::Mode(Message::BurglarAlarm),
        }
    }
}
