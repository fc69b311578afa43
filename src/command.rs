// MIT License - Copyright (c) 2026 Peter Wright
// Outbound Indicator command encoding

use serde::Serialize;

use crate::constants::{
    AlarmSound, AlarmState, Chime, Message, StateIndicator, COMMAND_CLASS, DEFAULT_DELAY_SECS,
    ENDPOINT, FULL_INTENSITY, MAX_DELAY_SECS, PROPERTY_KEY_DELAY, PROPERTY_KEY_MODE,
    PROPERTY_KEY_SOUND,
};
use crate::error::{KeypadError, Result};

/// Everything the protocol layer needs to transmit one Indicator command,
/// minus the target device — the caller attaches that (see
/// [`crate::keypad::SetValue`]).
///
/// Wire contract: property keys are the numeric 1/7/9 and countdown values
/// are plain integer seconds. The formatted-duration encoding some older
/// automations used is never emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandPayload {
    pub command_class: &'static str,
    pub endpoint: u8,
    pub property: u8,
    pub property_key: u8,
    pub value: u16,
}

fn indicator(property: u8, property_key: u8, value: u16) -> CommandPayload {
    CommandPayload {
        command_class: COMMAND_CLASS,
        endpoint: ENDPOINT,
        property,
        property_key,
        value,
    }
}

fn checked_volume(volume: Option<u16>) -> Result<u16> {
    match volume {
        Some(v) if v == 0 || v > 100 => Err(KeypadError::VolumeOutOfRange { volume: v }),
        Some(v) => Ok(v),
        None => Ok(FULL_INTENSITY),
    }
}

/// Encode an alarm panel state change.
///
/// Delay states (arming, pending) produce a countdown command whose value is
/// `delay_secs`, defaulting to [`DEFAULT_DELAY_SECS`]. Direct states produce
/// a static mode command at full intensity and ignore an in-range delay. A
/// supplied delay is validated against [`MAX_DELAY_SECS`] before the state's
/// shape is considered, so an out-of-range delay fails even for direct states.
pub fn alarm_state_command(state: &str, delay_secs: Option<u16>) -> Result<CommandPayload> {
    let state = AlarmState::from_name(state).ok_or_else(|| KeypadError::UnknownAlarmState {
        name: state.to_string(),
    })?;
    if let Some(delay) = delay_secs {
        if delay > MAX_DELAY_SECS {
            return Err(KeypadError::DelayOutOfRange { delay });
        }
    }
    Ok(match state.indicator() {
        StateIndicator::Mode(code) => indicator(code as u8, PROPERTY_KEY_MODE, FULL_INTENSITY),
        StateIndicator::Countdown(code) => indicator(
            code as u8,
            PROPERTY_KEY_DELAY,
            delay_secs.unwrap_or(DEFAULT_DELAY_SECS),
        ),
    })
}

/// Encode a chime playback command. Volume defaults to full and must be
/// within 1-100 when supplied.
pub fn chime_command(chime: &str, volume: Option<u16>) -> Result<CommandPayload> {
    let chime = Chime::from_name(chime).ok_or_else(|| KeypadError::UnknownChime {
        name: chime.to_string(),
    })?;
    Ok(indicator(chime as u8, PROPERTY_KEY_SOUND, checked_volume(volume)?))
}

/// Encode an alarm sound command. Same volume rules as [`chime_command`].
pub fn alarm_command(alarm: &str, volume: Option<u16>) -> Result<CommandPayload> {
    let sound = AlarmSound::from_name(alarm).ok_or_else(|| KeypadError::UnknownAlarmType {
        name: alarm.to_string(),
    })?;
    Ok(indicator(sound as u8, PROPERTY_KEY_SOUND, checked_volume(volume)?))
}

/// Encode a keypad feedback message (invalid code entered, bypass needed).
pub fn message_command(message: Message) -> CommandPayload {
    indicator(message as u8, PROPERTY_KEY_MODE, FULL_INTENSITY)
}
