//! Interactive command sender for the padlink firmware.
//!
//! Scans for a peripheral advertising the Nordic UART Service,
//! connects, and turns typed single-character commands into
//! control-pad button packets written to the RX characteristic.
//! Anything the peripheral notifies back is printed as-is.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use btleplug::api::{
    Central, CentralEvent, Characteristic, Manager as _, Peripheral as _, ScanFilter, WriteType,
};
use btleplug::platform::{Adapter, Manager, Peripheral};
use futures::stream::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

use padlink::config;
use padlink::input::{map_line, write_chunks, LineAction};

const UART_SERVICE: Uuid = Uuid::from_u128(config::UART_SERVICE_UUID);
const UART_RX_CHAR: Uuid = Uuid::from_u128(config::UART_RX_CHAR_UUID);
const UART_TX_CHAR: Uuid = Uuid::from_u128(config::UART_TX_CHAR_UUID);

#[tokio::main]
async fn main() -> Result<()> {
    let manager = Manager::new().await?;
    let adapter = manager
        .adapters()
        .await?
        .into_iter()
        .next()
        .context("no Bluetooth adapter found")?;

    let peripheral = find_uart_peripheral(&adapter).await?;
    peripheral.connect().await?;
    peripheral.discover_services().await?;

    let rx_char = find_characteristic(&peripheral, UART_RX_CHAR)
        .context("peripheral has no UART RX characteristic")?;
    let tx_char = find_characteristic(&peripheral, UART_TX_CHAR)
        .context("peripheral has no UART TX characteristic")?;
    peripheral.subscribe(&tx_char).await?;

    // Inbound data is only ever printed, never acted on.
    let mut notifications = peripheral.notifications().await?;
    tokio::spawn(async move {
        while let Some(notification) = notifications.next().await {
            println!("received: {:?}", notification.value);
        }
    });

    println!("Connected, start typing and press ENTER...");

    let peripheral_id = peripheral.id();
    let mut events = adapter.events().await?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut poll_events = true;

    loop {
        // The pending read-line wait races the disconnect event; the
        // select drops the read future cleanly when the remote side
        // goes away mid-wait. A terminated event stream is always
        // immediately ready, so it must stop being polled or this
        // loop spins.
        tokio::select! {
            event = events.next(), if poll_events => {
                let disconnected = event.map(|e| match e {
                    CentralEvent::DeviceDisconnected(id) => Some(id),
                    _ => None,
                });
                match adapter_signal(disconnected, &peripheral_id) {
                    AdapterSignal::RemoteDisconnected => {
                        println!("Device was disconnected, goodbye.");
                        return Ok(());
                    }
                    AdapterSignal::StreamEnded => poll_events = false,
                    AdapterSignal::Unrelated => {}
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break; // EOF on stdin
                };
                match map_line(&line) {
                    Ok(LineAction::Quit) => break,
                    Ok(LineAction::Rejected) => println!("Single characters please."),
                    Ok(LineAction::Send(packet)) => {
                        let frame = packet.to_bytes();
                        for chunk in write_chunks(&frame, config::MAX_WRITE_NO_RESPONSE_LEN) {
                            peripheral
                                .write(&rx_char, chunk, WriteType::WithoutResponse)
                                .await?;
                        }
                        println!("sent: {:?}", packet.button);
                    }
                    Err(e) => {
                        // Fail closed: never keep sending after a bad packet.
                        eprintln!("{e}");
                        break;
                    }
                }
            }
        }
    }

    peripheral.disconnect().await.ok();
    Ok(())
}

/// Scan for the configured window and return the first peripheral
/// advertising the UART service.
async fn find_uart_peripheral(adapter: &Adapter) -> Result<Peripheral> {
    adapter
        .start_scan(ScanFilter {
            services: vec![UART_SERVICE],
        })
        .await?;
    tokio::time::sleep(Duration::from_secs(config::BLE_SCAN_DURATION_SECS)).await;
    adapter.stop_scan().await.ok();

    for peripheral in adapter.peripherals().await? {
        if let Ok(Some(props)) = peripheral.properties().await {
            if props.services.contains(&UART_SERVICE) {
                let name = props.local_name.unwrap_or_else(|| "<unnamed>".to_string());
                println!("Found {} ({})", name, props.address);
                return Ok(peripheral);
            }
        }
    }
    bail!("no matching device found, is the firmware advertising?");
}

fn find_characteristic(peripheral: &Peripheral, uuid: Uuid) -> Option<Characteristic> {
    peripheral
        .characteristics()
        .into_iter()
        .find(|c| c.uuid == uuid)
}

/// Outcome of polling the adapter event stream once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AdapterSignal {
    /// Our peripheral dropped the connection; exit cleanly.
    RemoteDisconnected,
    /// The stream is exhausted and must not be polled again.
    StreamEnded,
    /// Some other adapter event; keep going.
    Unrelated,
}

/// Classify one event-stream item. `disconnected` is `None` when the
/// stream itself ended, `Some(None)` for an event that is not a
/// disconnect of interest, `Some(Some(id))` for a disconnect of `id`.
fn adapter_signal<I: PartialEq>(disconnected: Option<Option<I>>, ours: &I) -> AdapterSignal {
    match disconnected {
        Some(Some(id)) if id == *ours => AdapterSignal::RemoteDisconnected,
        Some(_) => AdapterSignal::Unrelated,
        None => AdapterSignal::StreamEnded,
    }
}

#[cfg(test)]
mod tests {
    use super::{adapter_signal, AdapterSignal};

    #[test]
    fn disconnect_of_our_peripheral_exits() {
        assert_eq!(
            adapter_signal(Some(Some(7u32)), &7),
            AdapterSignal::RemoteDisconnected
        );
    }

    #[test]
    fn foreign_disconnects_and_other_events_are_ignored() {
        assert_eq!(adapter_signal(Some(Some(9u32)), &7), AdapterSignal::Unrelated);
        assert_eq!(adapter_signal(Some(None::<u32>), &7), AdapterSignal::Unrelated);
    }

    #[test]
    fn exhausted_stream_stops_being_polled() {
        assert_eq!(adapter_signal(None::<Option<u32>>, &7), AdapterSignal::StreamEnded);
    }
}
