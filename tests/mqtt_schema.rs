// Schema validation tests for the MQTT wire format
//
// These tests validate real encoder output (and hand-built JSON for the
// published-event shapes) against the JSON Schema files in schemas/mqtt/,
// pinning the wire contract independently of the Rust structs.

use serde_json::json;

use ring_keypad_bridge::{AlarmSound, AlarmState, Button, Chime, KeypadConfig, RingKeypad};

fn load_schema(name: &str) -> serde_json::Value {
    let path = format!("{}/schemas/mqtt/{name}", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read schema {path}: {e}"));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("Failed to parse schema {path}: {e}"))
}

fn build_validator(schema_name: &str) -> jsonschema::Validator {
    let schema = load_schema(schema_name);
    jsonschema::validator_for(&schema)
        .unwrap_or_else(|e| panic!("Failed to compile schema {schema_name}: {e}"))
}

fn validate(schema_name: &str, instance: &serde_json::Value) {
    let validator = build_validator(schema_name);
    let errors: Vec<_> = validator.iter_errors(instance).collect();
    if !errors.is_empty() {
        let msgs: Vec<String> = errors.iter().map(|e| format!("  - {e}")).collect();
        panic!(
            "Schema validation failed for {schema_name}:\n{}\nInstance: {}",
            msgs.join("\n"),
            serde_json::to_string_pretty(instance).unwrap()
        );
    }
}

fn validate_fails(schema_name: &str, instance: &serde_json::Value) {
    let validator = build_validator(schema_name);
    assert!(
        !validator.is_valid(instance),
        "Expected schema validation to fail for {schema_name}, but it passed.\nInstance: {}",
        serde_json::to_string_pretty(instance).unwrap()
    );
}

fn keypad() -> RingKeypad {
    RingKeypad::new(
        KeypadConfig::builder()
            .device_id("f9790dd3ac4b49c0b52f1e0d54ed2c588")
            .build(),
    )
}

// =========================================================================
// set_value
// =========================================================================

#[test]
fn set_value_valid_for_every_alarm_state() {
    let keypad = keypad();
    for state in AlarmState::ALL {
        let set_value = keypad.alarm_state(state.name(), None).unwrap();
        validate(
            "set_value.schema.json",
            &serde_json::to_value(&set_value).unwrap(),
        );
    }
}

#[test]
fn set_value_valid_for_every_chime_and_alarm_sound() {
    let keypad = keypad();
    for chime in Chime::ALL {
        let set_value = keypad.chime(chime.name(), Some(50)).unwrap();
        validate(
            "set_value.schema.json",
            &serde_json::to_value(&set_value).unwrap(),
        );
    }
    for sound in AlarmSound::ALL {
        let set_value = keypad.alarm(sound.name(), None).unwrap();
        validate(
            "set_value.schema.json",
            &serde_json::to_value(&set_value).unwrap(),
        );
    }
}

#[test]
fn set_value_valid_with_max_delay() {
    let keypad = keypad();
    let set_value = keypad.alarm_state("arming", Some(300)).unwrap();
    validate(
        "set_value.schema.json",
        &serde_json::to_value(&set_value).unwrap(),
    );
}

#[test]
fn set_value_rejects_wrong_command_class() {
    validate_fails(
        "set_value.schema.json",
        &json!({
            "command_class": "134",
            "endpoint": 0,
            "property": 10,
            "property_key": 1,
            "value": 100,
            "device_id": ["abc"]
        }),
    );
}

#[test]
fn set_value_rejects_unknown_property_key() {
    validate_fails(
        "set_value.schema.json",
        &json!({
            "command_class": "135",
            "endpoint": 0,
            "property": 10,
            "property_key": 2,
            "value": 100,
            "device_id": ["abc"]
        }),
    );
}

#[test]
fn set_value_rejects_missing_device_id() {
    validate_fails(
        "set_value.schema.json",
        &json!({
            "command_class": "135",
            "endpoint": 0,
            "property": 10,
            "property_key": 1,
            "value": 100
        }),
    );
}

#[test]
fn set_value_rejects_formatted_duration_value() {
    // The old automation encoding ("0m45s" with a "timeout" key) must never
    // appear on the wire.
    validate_fails(
        "set_value.schema.json",
        &json!({
            "command_class": "135",
            "endpoint": 0,
            "property": 18,
            "property_key": "timeout",
            "value": "0m45s",
            "device_id": ["abc"]
        }),
    );
}

#[test]
fn set_value_rejects_value_above_limit() {
    validate_fails(
        "set_value.schema.json",
        &json!({
            "command_class": "135",
            "endpoint": 0,
            "property": 18,
            "property_key": 7,
            "value": 301,
            "device_id": ["abc"]
        }),
    );
}

// =========================================================================
// keypad_event
// =========================================================================

#[test]
fn keypad_event_valid_for_every_button() {
    for button in Button::ALL {
        validate(
            "keypad_event.schema.json",
            &json!({
                "now": 1738900000000_u64,
                "op": "KEYPAD_EVENT",
                "button": button.name(),
                "category": button.category().as_str(),
                "event_type": button as u8
            }),
        );
    }
}

#[test]
fn keypad_event_valid_with_code() {
    validate(
        "keypad_event.schema.json",
        &json!({
            "now": 1738900000000_u64,
            "op": "KEYPAD_EVENT",
            "button": "code_entered",
            "category": "alarm_disarm",
            "event_type": 2,
            "code": "1234"
        }),
    );
}

#[test]
fn keypad_event_rejects_unknown_button() {
    validate_fails(
        "keypad_event.schema.json",
        &json!({
            "now": 1738900000000_u64,
            "op": "KEYPAD_EVENT",
            "button": "snooze",
            "category": "pressed",
            "event_type": 4
        }),
    );
}

#[test]
fn keypad_event_rejects_missing_category() {
    validate_fails(
        "keypad_event.schema.json",
        &json!({
            "now": 1738900000000_u64,
            "op": "KEYPAD_EVENT",
            "button": "fire",
            "event_type": 16
        }),
    );
}

// =========================================================================
// cmd
// =========================================================================

#[test]
fn cmd_valid() {
    validate(
        "cmd.schema.json",
        &json!({"op": "UPDATE_ALARM_STATE", "alarm_state": "armed_away"}),
    );
    validate(
        "cmd.schema.json",
        &json!({"op": "UPDATE_ALARM_STATE", "alarm_state": "pending", "delay": 30}),
    );
    validate(
        "cmd.schema.json",
        &json!({"op": "CHIME", "chime": "wind_chime", "volume": 50}),
    );
    validate("cmd.schema.json", &json!({"op": "ALARM", "alarm": "co2"}));
}

#[test]
fn cmd_rejects_missing_operand() {
    validate_fails("cmd.schema.json", &json!({"op": "UPDATE_ALARM_STATE"}));
    validate_fails("cmd.schema.json", &json!({"op": "CHIME", "volume": 50}));
    validate_fails("cmd.schema.json", &json!({"op": "ALARM"}));
}

#[test]
fn cmd_rejects_out_of_range_parameters() {
    validate_fails(
        "cmd.schema.json",
        &json!({"op": "UPDATE_ALARM_STATE", "alarm_state": "arming", "delay": 301}),
    );
    validate_fails(
        "cmd.schema.json",
        &json!({"op": "CHIME", "chime": "wind_chime", "volume": 0}),
    );
    validate_fails(
        "cmd.schema.json",
        &json!({"op": "CHIME", "chime": "wind_chime", "volume": 101}),
    );
}

#[test]
fn cmd_rejects_unknown_names() {
    validate_fails("cmd.schema.json", &json!({"op": "PING"}));
    validate_fails(
        "cmd.schema.json",
        &json!({"op": "CHIME", "chime": "not_a_chime"}),
    );
    validate_fails(
        "cmd.schema.json",
        &json!({"op": "UPDATE_ALARM_STATE", "alarm_state": "armed_vacation"}),
    );
}

// =========================================================================
// cmd_ack
// =========================================================================

#[test]
fn cmd_ack_valid() {
    validate(
        "cmd_ack.schema.json",
        &json!({"now": 1738900000000_u64, "op": "CMD_ACK", "success": true}),
    );
    validate(
        "cmd_ack.schema.json",
        &json!({
            "now": 1738900000000_u64,
            "op": "CMD_ACK",
            "success": false,
            "src": {"op": "CHIME"},
            "error": "Unknown chime: not_a_chime"
        }),
    );
}

#[test]
fn cmd_ack_rejects_missing_success() {
    validate_fails(
        "cmd_ack.schema.json",
        &json!({"now": 1738900000000_u64, "op": "CMD_ACK"}),
    );
}
