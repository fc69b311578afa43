// MIT License - Copyright (c) 2026 Peter Wright
// MQTT bridge

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use serde::{Deserialize, Serialize};
use tokio::signal::unix::{signal, SignalKind};
use tokio::time::Duration;
use tracing::{debug, error, info, warn};

use ring_keypad_bridge::{
    dispatch, KeypadConfig, KeypadEvent, Notification, RingKeypad, ServiceCommand, ServiceRegistry,
};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "keypad2mqtt")]
#[command(about = "Bridge between a Ring Keypad (Z-Wave) and MQTT")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Config {
    keypad: KeypadToml,
    mqtt: MqttToml,
    zwave: ZwaveToml,
}

#[derive(Debug, Deserialize)]
struct KeypadToml {
    /// Device registry id the Z-Wave gateway stamps on this keypad's
    /// notifications. Everything else on the bus is ignored.
    device_id: String,
    #[serde(default = "default_keypad_label")]
    label: String,
}

#[derive(Debug, Deserialize)]
struct MqttToml {
    url: String,
    #[serde(default = "default_client_id")]
    client_id: String,
    #[serde(default = "default_command_topic")]
    command_topic: String,
    #[serde(default = "default_event_topic")]
    event_topic: String,
    /// Optional topic carrying alarm panel state strings ("disarmed",
    /// "armed_home", ...). When set, state changes are mirrored onto the
    /// keypad without a separate automation.
    #[serde(default)]
    alarm_state_topic: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ZwaveToml {
    #[serde(default = "default_notification_topic")]
    notification_topic: String,
    #[serde(default = "default_set_value_topic")]
    set_value_topic: String,
}

fn default_keypad_label() -> String {
    "Ring Keypad".to_string()
}
fn default_client_id() -> String {
    "keypad-bridge".to_string()
}
fn default_command_topic() -> String {
    "keypad/cmd".to_string()
}
fn default_event_topic() -> String {
    "keypad".to_string()
}
fn default_notification_topic() -> String {
    "zwave/events/notification".to_string()
}
fn default_set_value_topic() -> String {
    "zwave/api/set_value".to_string()
}

// ---------------------------------------------------------------------------
// MQTT JSON types
// ---------------------------------------------------------------------------

// Published messages — all share the {now, op, ...} flat structure

#[derive(Serialize)]
struct MqttKeypadEvent {
    now: u64,
    op: String,
    button: &'static str,
    category: &'static str,
    event_type: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

#[derive(Serialize)]
struct MqttCmdAck {
    now: u64,
    op: String,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    src: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn now_epoch_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}

async fn publish_json(client: &AsyncClient, topic: &str, payload: &impl Serialize, retain: bool) {
    match serde_json::to_string(payload) {
        Ok(json) => {
            if let Err(e) = client.publish(topic, QoS::AtLeastOnce, retain, json).await {
                error!("Failed to publish to {topic}: {e}");
            }
        }
        Err(e) => error!("Failed to serialize MQTT payload: {e}"),
    }
}

async fn publish_keypad_event(client: &AsyncClient, topic: &str, event: &KeypadEvent) {
    let msg = MqttKeypadEvent {
        now: now_epoch_ms(),
        op: "KEYPAD_EVENT".to_string(),
        button: event.button.name(),
        category: event.button.category().as_str(),
        event_type: event.button as u8,
        code: event.code.clone(),
    };
    publish_json(client, topic, &msg, false).await;
}

async fn publish_cmd_ack(
    client: &AsyncClient,
    topic: &str,
    success: bool,
    src: Option<serde_json::Value>,
    error: Option<String>,
) {
    let msg = MqttCmdAck {
        now: now_epoch_ms(),
        op: "CMD_ACK".to_string(),
        success,
        src,
        error,
    };
    publish_json(client, topic, &msg, false).await;
}

/// Parse an MQTT URL like "mqtt://host:port" into (host, port).
fn parse_mqtt_url(url: &str) -> Result<(String, u16)> {
    let stripped = url
        .strip_prefix("mqtt://")
        .or_else(|| url.strip_prefix("tcp://"))
        .unwrap_or(url);

    let (host, port_str) = stripped
        .rsplit_once(':')
        .context("MQTT URL must be in format mqtt://host:port")?;

    let port: u16 = port_str.parse().context("Invalid MQTT port number")?;

    Ok((host.to_string(), port))
}

// ---------------------------------------------------------------------------
// Message handlers
// ---------------------------------------------------------------------------

fn handle_notification_message(payload: &str, keypad: &RingKeypad) {
    // The notification topic carries traffic for every node on the mesh;
    // shapes we cannot parse are not for us.
    let notification: Notification = match serde_json::from_str(payload) {
        Ok(n) => n,
        Err(e) => {
            debug!("Ignoring unparseable notification: {e}");
            return;
        }
    };
    // Decoded events fan out to the publisher task via the broadcast channel.
    keypad.handle_notification(&notification);
}

async fn handle_command(
    payload_str: &str,
    client: &AsyncClient,
    keypad: &RingKeypad,
    event_topic: &str,
    set_value_topic: &str,
) {
    // Parse the raw payload as a JSON value for the CMD_ACK src field
    let src_json = serde_json::from_str::<serde_json::Value>(payload_str).ok();

    let cmd: ServiceCommand = match serde_json::from_str(payload_str) {
        Ok(cmd) => cmd,
        Err(e) => {
            warn!("Failed to parse MQTT command: {e}");
            publish_cmd_ack(client, event_topic, false, src_json, Some(e.to_string())).await;
            return;
        }
    };

    info!("Command: {} for {}", cmd.op, keypad.label());
    match dispatch(keypad, &cmd) {
        Ok(set_value) => {
            publish_json(client, set_value_topic, &set_value, false).await;
            publish_cmd_ack(client, event_topic, true, src_json, None).await;
        }
        Err(e) => {
            error!("{} rejected: {e}", cmd.op);
            publish_cmd_ack(client, event_topic, false, src_json, Some(e.to_string())).await;
        }
    }
}

async fn handle_alarm_state_message(
    payload: &str,
    client: &AsyncClient,
    keypad: &RingKeypad,
    set_value_topic: &str,
) {
    let state = payload.trim();
    match keypad.alarm_state(state, None) {
        Ok(set_value) => {
            info!("Alarm panel state '{state}' -> keypad {}", keypad.label());
            publish_json(client, set_value_topic, &set_value, false).await;
        }
        Err(e) => {
            // States the keypad has no indicator for (e.g. armed_vacation)
            // land here; nothing is sent.
            warn!("Alarm state not mirrored: {e}");
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG controls verbosity (e.g. RUST_LOG=debug or RUST_LOG=ring_keypad_bridge=trace).
    // Default: info.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // systemd journal already adds timestamps, so omit them when running under systemd
    if std::env::var_os("JOURNAL_STREAM").is_some() {
        tracing_subscriber::fmt().without_time().with_env_filter(env_filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let cli = Cli::parse();

    // Load config
    let config_text =
        std::fs::read_to_string(&cli.config).context("Failed to read config file")?;
    let mut config: Config = toml::from_str(&config_text).context("Failed to parse config file")?;

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    loop {
        let keypad = Arc::new(RingKeypad::new(
            KeypadConfig::builder()
                .device_id(&config.keypad.device_id)
                .label(&config.keypad.label)
                .build(),
        ));
        info!(
            "Bridging keypad '{}' (device {})",
            keypad.label(),
            keypad.device_id()
        );

        let (mqtt_host, mqtt_port) = parse_mqtt_url(&config.mqtt.url)?;
        let mut mqtt_opts = MqttOptions::new(&config.mqtt.client_id, &mqtt_host, mqtt_port);
        mqtt_opts.set_keep_alive(Duration::from_secs(30));
        let (client, mut eventloop) = AsyncClient::new(mqtt_opts, 64);

        let notification_topic = config.zwave.notification_topic.clone();
        let set_value_topic = config.zwave.set_value_topic.clone();
        let command_topic = config.mqtt.command_topic.clone();
        let event_topic = config.mqtt.event_topic.clone();
        let alarm_state_topic = config.mqtt.alarm_state_topic.clone();

        // Notification feed for this keypad
        client
            .subscribe(&notification_topic, QoS::AtLeastOnce)
            .await
            .context("Failed to subscribe to notification topic")?;
        if let Some(topic) = &alarm_state_topic {
            client
                .subscribe(topic, QoS::AtLeastOnce)
                .await
                .context("Failed to subscribe to alarm state topic")?;
        }

        // Service registration is guarded: only the first caller subscribes
        // the command topic, later attempts are successful no-ops.
        let services = ServiceRegistry::new();
        if services.begin_registration() {
            client
                .subscribe(&command_topic, QoS::AtLeastOnce)
                .await
                .context("Failed to subscribe to command topic")?;
            info!("MQTT: services registered on {command_topic}");
        }

        // Task 1: decoded keypad events -> MQTT
        let client_events = client.clone();
        let topic_events = event_topic.clone();
        let mut event_rx = keypad.subscribe();
        let event_handle = tokio::spawn(async move {
            loop {
                match event_rx.recv().await {
                    Ok(event) => {
                        info!("Keypad event: {} (code={})", event.button.name(),
                            if event.code.is_some() { "yes" } else { "no" });
                        publish_keypad_event(&client_events, &topic_events, &event).await;
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        warn!("Event receiver lagged, missed {n} events");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        info!("Event channel closed");
                        break;
                    }
                }
            }
        });

        // Task 2: MQTT event loop (notifications in, commands in)
        let keypad_mqtt = Arc::clone(&keypad);
        let client_mqtt = client.clone();
        let mqtt_handle = tokio::spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        // (Re)subscribe after every broker connect/reconnect.
                        // rumqttc does not auto-resubscribe, so without this a
                        // broker restart silently drops our subscriptions.
                        info!("MQTT: connected, subscribing");
                        let mut topics = vec![notification_topic.clone(), command_topic.clone()];
                        if let Some(topic) = &alarm_state_topic {
                            topics.push(topic.clone());
                        }
                        for topic in topics {
                            if let Err(e) =
                                client_mqtt.subscribe(&topic, QoS::AtLeastOnce).await
                            {
                                error!("Failed to subscribe to {topic}: {e}");
                            }
                        }
                    }
                    Ok(Event::Incoming(Packet::Publish(msg))) => {
                        let payload = String::from_utf8_lossy(&msg.payload);
                        if msg.topic == notification_topic {
                            handle_notification_message(&payload, &keypad_mqtt);
                        } else if msg.topic == command_topic {
                            handle_command(
                                &payload,
                                &client_mqtt,
                                &keypad_mqtt,
                                &event_topic,
                                &set_value_topic,
                            )
                            .await;
                        } else if alarm_state_topic.as_deref() == Some(msg.topic.as_str()) {
                            handle_alarm_state_message(
                                &payload,
                                &client_mqtt,
                                &keypad_mqtt,
                                &set_value_topic,
                            )
                            .await;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("MQTT event loop error: {e}");
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                }
            }
        });

        // Wait for a signal
        info!("Keypad bridge running. Send SIGHUP to reload, SIGINT/SIGTERM to stop.");
        let restart = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received SIGINT, shutting down...");
                false
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                false
            }
            _ = sighup.recv() => {
                info!("Received SIGHUP, reloading config...");
                true
            }
        };

        event_handle.abort();
        mqtt_handle.abort();

        if !restart {
            break;
        }

        // Reload config from disk; keep previous config on failure
        info!("Reloading config from {}", cli.config);
        match std::fs::read_to_string(&cli.config)
            .context("Failed to read config file")
            .and_then(|text| toml::from_str::<Config>(&text).context("Failed to parse config file"))
        {
            Ok(new_config) => {
                config = new_config;
                info!("Config reloaded successfully");
            }
            Err(e) => warn!("Failed to reload config, keeping previous: {e}"),
        }

        info!("Reconnecting...");
    }

    info!("Shutdown complete");
    Ok(())
}
