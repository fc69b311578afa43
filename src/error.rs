// MIT License - Copyright (c) 2026 Peter Wright
// Error taxonomy for the keypad codec

/// All errors the keypad codec can return.
///
/// Every variant is an invalid-argument condition: a semantic name that is
/// not in its lookup table, or a numeric parameter outside its documented
/// range. These are surfaced to the service caller as hard failures, never
/// silently substituted. Unknown inbound event types are deliberately NOT an
/// error — the decoder returns `None` for those (see [`crate::event::decode`]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeypadError {
    #[error("Unknown alarm state: {name}")]
    UnknownAlarmState { name: String },

    #[error("Unknown chime: {name}")]
    UnknownChime { name: String },

    #[error("Unknown alarm type: {name}")]
    UnknownAlarmType { name: String },

    #[error("Delay out of range: {delay}s (limit 0-300s)")]
    DelayOutOfRange { delay: u16 },

    #[error("Volume out of range: {volume} (limit 1-100)")]
    VolumeOutOfRange { volume: u16 },
}

pub type Result<T> = std::result::Result<T, KeypadError>;
