// MIT License - Copyright (c) 2026 Peter Wright
// Service command validation and dispatch

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Deserialize;

use crate::error::KeypadError;
use crate::keypad::{RingKeypad, SetValue};

pub const OP_UPDATE_ALARM_STATE: &str = "UPDATE_ALARM_STATE";
pub const OP_CHIME: &str = "CHIME";
pub const OP_ALARM: &str = "ALARM";

/// Inbound service command (flat JSON; `op` selects which fields apply).
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceCommand {
    pub op: String,
    #[serde(default)]
    pub alarm_state: Option<String>,
    #[serde(default)]
    pub chime: Option<String>,
    #[serde(default)]
    pub alarm: Option<String>,
    #[serde(default)]
    pub delay: Option<u16>,
    #[serde(default)]
    pub volume: Option<u16>,
}

/// Why a service command was rejected. Surfaced to the caller in the
/// command acknowledgement, never silently defaulted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("Unknown op: {op}")]
    UnknownOp { op: String },

    #[error("{op} requires the {field} field")]
    MissingField { op: &'static str, field: &'static str },

    #[error(transparent)]
    Keypad(#[from] KeypadError),
}

/// Validate one service command and encode it against a keypad.
pub fn dispatch(keypad: &RingKeypad, cmd: &ServiceCommand) -> Result<SetValue, ServiceError> {
    match cmd.op.as_str() {
        OP_UPDATE_ALARM_STATE => {
            let state = cmd.alarm_state.as_deref().ok_or(ServiceError::MissingField {
                op: OP_UPDATE_ALARM_STATE,
                field: "alarm_state",
            })?;
            Ok(keypad.alarm_state(state, cmd.delay)?)
        }
        OP_CHIME => {
            let chime = cmd.chime.as_deref().ok_or(ServiceError::MissingField {
                op: OP_CHIME,
                field: "chime",
            })?;
            Ok(keypad.chime(chime, cmd.volume)?)
        }
        OP_ALARM => {
            let alarm = cmd.alarm.as_deref().ok_or(ServiceError::MissingField {
                op: OP_ALARM,
                field: "alarm",
            })?;
            Ok(keypad.alarm(alarm, cmd.volume)?)
        }
        other => Err(ServiceError::UnknownOp {
            op: other.to_string(),
        }),
    }
}

/// One-shot guard around service registration.
///
/// Registration (subscribing the command topic and wiring the dispatcher)
/// may be reached from more than one startup path; the contract is that the
/// first caller performs it and every later call is a successful no-op.
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    registered: AtomicBool,
}

impl ServiceRegistry {
    pub const fn new() -> Self {
        Self {
            registered: AtomicBool::new(false),
        }
    }

    /// Claim the registration. Returns `true` exactly once; callers perform
    /// the actual subscription only on `true`.
    pub fn begin_registration(&self) -> bool {
        !self.registered.swap(true, Ordering::SeqCst)
    }

    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::SeqCst)
    }
}
