// MIT License - Copyright (c) 2026 Peter Wright
// Per-keypad configuration

/// Configuration for a single keypad device.
#[derive(Debug, Clone)]
pub struct KeypadConfig {
    /// Device registry id the gateway stamps on this keypad's notifications.
    /// Notifications carrying any other id are dropped before decoding.
    pub device_id: String,
    /// Display label used in log output.
    pub label: String,
    /// Capacity of the decoded-event broadcast channel.
    pub event_capacity: usize,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            device_id: String::new(),
            label: "Ring Keypad".to_string(),
            event_capacity: 32,
        }
    }
}

impl KeypadConfig {
    /// Create a new config builder starting from defaults.
    pub fn builder() -> KeypadConfigBuilder {
        KeypadConfigBuilder::default()
    }
}

/// Builder for [`KeypadConfig`].
#[derive(Debug, Default)]
pub struct KeypadConfigBuilder {
    config: KeypadConfig,
}

impl KeypadConfigBuilder {
    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.config.device_id = device_id.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = label.into();
        self
    }

    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.config.event_capacity = capacity;
        self
    }

    pub fn build(self) -> KeypadConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = KeypadConfig::builder()
            .device_id("f9790dd3ac4b49c0b52f1e0d54ed2c588")
            .label("Front door keypad")
            .build();
        assert_eq!(config.device_id, "f9790dd3ac4b49c0b52f1e0d54ed2c588");
        assert_eq!(config.label, "Front door keypad");
        assert_eq!(config.event_capacity, 32);
    }

    #[test]
    fn test_config_defaults() {
        let config = KeypadConfig::builder().device_id("abc").build();
        assert_eq!(config.label, "Ring Keypad");
    }

    #[test]
    fn test_event_capacity_override() {
        let config = KeypadConfig::builder().event_capacity(128).build();
        assert_eq!(config.event_capacity, 128);
    }
}
