//! Connection manager
//!
//! Single owner of the printer connection state machine. All radio
//! operations (power, discovery, pairing, connect, disconnect) go through
//! here; every state transition is broadcast to subscribers so UI layers
//! can mirror the connection without polling.
//!
//! Budget thermal printers need settle time after pairing and connecting
//! before they accept data, so the timing knobs in [`ManagerConfig`]
//! default to values tuned on real hardware. Tests use
//! [`ManagerConfig::immediate`].

use std::collections::HashSet;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::sync::{Mutex, broadcast, mpsc};
use tokio::time::Instant;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::adapter::{PowerState, RadioAdapter};
use crate::device::{ConnectionState, Device};
use crate::error::{ConnectError, DiscoveryError, PairError, PowerError, PrintError, PrintResult};

/// Timing configuration for the connection state machine.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// How long to wait for the radio to come up after a power-on request
    pub power_on_timeout: Duration,
    /// How long a discovery scan runs before the stream closes
    pub discovery_window: Duration,
    /// Settle delay after a successful pairing
    pub pair_settle: Duration,
    /// Settle delay after a successful connection
    pub connect_settle: Duration,
    /// Poll interval when the adapter has no power event channel
    pub power_poll_interval: Duration,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            power_on_timeout: Duration::from_secs(8),
            discovery_window: Duration::from_secs(8),
            pair_settle: Duration::from_secs(2),
            connect_settle: Duration::from_secs(1),
            power_poll_interval: Duration::from_secs(2),
        }
    }
}

impl ManagerConfig {
    /// All settle delays and windows collapsed for tests.
    pub fn immediate() -> Self {
        Self {
            power_on_timeout: Duration::ZERO,
            discovery_window: Duration::ZERO,
            pair_settle: Duration::ZERO,
            connect_settle: Duration::ZERO,
            power_poll_interval: Duration::from_millis(10),
        }
    }
}

struct Shared {
    state: StdMutex<ConnectionState>,
    last_connected: StdMutex<Option<Device>>,
    state_tx: broadcast::Sender<ConnectionState>,
}

impl Shared {
    fn current(&self) -> ConnectionState {
        self.state.lock().expect("state lock poisoned").clone()
    }

    fn set(&self, next: ConnectionState) {
        *self.state.lock().expect("state lock poisoned") = next.clone();
        let _ = self.state_tx.send(next);
    }
}

pub struct ConnectionManager<A: RadioAdapter> {
    adapter: Arc<A>,
    shared: Arc<Shared>,
    /// Held for the duration of any radio operation. Connect and discover
    /// refuse with `Busy` instead of queueing; pair and disconnect wait.
    op_lock: Arc<Mutex<()>>,
    config: ManagerConfig,
    cancel: CancellationToken,
}

impl<A: RadioAdapter> ConnectionManager<A> {
    pub async fn new(adapter: Arc<A>, config: ManagerConfig) -> Self {
        let initial = match adapter.power_state().await {
            PowerState::On => ConnectionState::Idle,
            PowerState::Off => ConnectionState::PoweredOff,
        };
        let (state_tx, _) = broadcast::channel(32);
        let shared = Arc::new(Shared {
            state: StdMutex::new(initial),
            last_connected: StdMutex::new(None),
            state_tx,
        });
        let cancel = CancellationToken::new();
        Self::spawn_power_watcher(
            adapter.clone(),
            shared.clone(),
            config.power_poll_interval,
            cancel.clone(),
        );
        Self {
            adapter,
            shared,
            op_lock: Arc::new(Mutex::new(())),
            config,
            cancel,
        }
    }

    /// Subscribe to connection state transitions.
    pub fn subscribe(&self) -> broadcast::Receiver<ConnectionState> {
        self.shared.state_tx.subscribe()
    }

    pub fn state(&self) -> ConnectionState {
        self.shared.current()
    }

    /// The device most recently connected in this session, if any.
    pub fn last_connected(&self) -> Option<Device> {
        self.shared
            .last_connected
            .lock()
            .expect("device lock poisoned")
            .clone()
    }

    /// Power the radio on and wait for it to come up.
    pub async fn power_on(&self) -> Result<(), PowerError> {
        if self.adapter.power_state().await == PowerState::On {
            return Ok(());
        }
        let _guard = self.op_lock.lock().await;
        self.shared.set(ConnectionState::PoweringOn);

        if let Err(e) = self.adapter.request_power().await {
            warn!(error = %e, "power-on request rejected");
            self.shared.set(ConnectionState::PoweredOff);
            return Err(e);
        }

        let deadline = Instant::now() + self.config.power_on_timeout;
        loop {
            if self.adapter.power_state().await == PowerState::On {
                info!("radio powered on");
                self.shared.set(ConnectionState::Idle);
                return Ok(());
            }
            if Instant::now() >= deadline {
                warn!("radio did not power on in time");
                self.shared.set(ConnectionState::PoweredOff);
                return Err(PowerError::Timeout);
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    /// Start a discovery scan. Bonded devices are emitted first, then
    /// devices found over the air, deduplicated by address and filtered to
    /// printer candidates. The stream closes when the scan window elapses,
    /// the scan source ends, or the caller drops the stream.
    ///
    /// Refuses with `Busy` while another operation is in progress.
    pub async fn discover(&self) -> Result<ReceiverStream<Device>, DiscoveryError> {
        let guard = self
            .op_lock
            .clone()
            .try_lock_owned()
            .map_err(|_| DiscoveryError::Busy)?;
        if self.adapter.power_state().await == PowerState::Off {
            return Err(DiscoveryError::AdapterOff);
        }
        self.shared.set(ConnectionState::Discovering);

        let bonded = self.adapter.bonded_devices().await;
        let mut scan_rx = match self.adapter.start_discovery().await {
            Ok(rx) => rx,
            Err(e) => {
                self.shared.set(ConnectionState::Idle);
                return Err(e);
            }
        };

        let (tx, rx) = mpsc::channel(32);
        let adapter = self.adapter.clone();
        let shared = self.shared.clone();
        let window = self.config.discovery_window;
        tokio::spawn(async move {
            let _guard = guard;
            let mut seen: HashSet<String> = HashSet::new();

            let mut dropped = false;
            for dev in bonded {
                if dev.is_printer_candidate()
                    && seen.insert(dev.address.clone())
                    && tx.send(dev).await.is_err()
                {
                    dropped = true;
                    break;
                }
            }

            if !dropped {
                let deadline = tokio::time::sleep(window);
                tokio::pin!(deadline);
                loop {
                    tokio::select! {
                        biased;
                        found = scan_rx.recv() => match found {
                            Some(dev) => {
                                if dev.is_printer_candidate()
                                    && seen.insert(dev.address.clone())
                                    && tx.send(dev).await.is_err()
                                {
                                    break;
                                }
                            }
                            None => break,
                        },
                        _ = tx.closed() => break,
                        _ = &mut deadline => break,
                    }
                }
            }

            adapter.stop_discovery().await;
            debug!(found = seen.len(), "discovery scan finished");
            // An external power-off may already have moved the state on
            if matches!(shared.current(), ConnectionState::Discovering) {
                shared.set(ConnectionState::Idle);
            }
        });

        Ok(ReceiverStream::new(rx))
    }

    /// Bond with a device. Waits for any in-flight operation to finish.
    pub async fn pair(&self, device: &Device) -> Result<(), PairError> {
        let _guard = self.op_lock.lock().await;
        self.shared.set(ConnectionState::Pairing {
            device: device.clone(),
        });
        info!(address = %device.address, name = %device.display_name(), "pairing");

        if let Err(e) = self.adapter.pair(&device.address).await {
            warn!(address = %device.address, error = %e, "pairing failed");
            self.shared.set(ConnectionState::Failed {
                reason: e.to_string(),
            });
            return Err(e);
        }

        tokio::time::sleep(self.config.pair_settle).await;
        self.shared.set(ConnectionState::Idle);
        Ok(())
    }

    /// Connect to a device. Any existing connection is closed first, so a
    /// stale link can never survive into a new session. Refuses with
    /// `Busy` while another operation is in progress.
    pub async fn connect(&self, device: &Device) -> Result<(), ConnectError> {
        if !valid_address(&device.address) {
            return Err(ConnectError::AddressInvalid(device.address.clone()));
        }
        let _guard = self
            .op_lock
            .try_lock()
            .map_err(|_| ConnectError::Busy)?;
        if self.adapter.power_state().await == PowerState::Off {
            return Err(ConnectError::AdapterOff);
        }
        self.shared.set(ConnectionState::Connecting {
            device: device.clone(),
        });
        info!(address = %device.address, name = %device.display_name(), "connecting");

        if let Err(e) = self.adapter.close().await {
            debug!(error = %e, "pre-connect close failed");
        }
        if let Err(e) = self.adapter.open(&device.address).await {
            warn!(address = %device.address, error = %e, "connection failed");
            if let Err(close_err) = self.adapter.close().await {
                debug!(error = %close_err, "close after failed open");
            }
            self.shared.set(ConnectionState::Failed {
                reason: e.to_string(),
            });
            return Err(e);
        }

        tokio::time::sleep(self.config.connect_settle).await;
        *self
            .shared
            .last_connected
            .lock()
            .expect("device lock poisoned") = Some(device.clone());
        self.shared.set(ConnectionState::Connected {
            device: device.clone(),
        });
        info!(address = %device.address, "connected");
        Ok(())
    }

    /// Close the connection. Always ends in `Idle`, even when the close
    /// itself fails or nothing was connected.
    pub async fn disconnect(&self) {
        let _guard = self.op_lock.lock().await;
        if let Err(e) = self.adapter.close().await {
            warn!(error = %e, "close failed during disconnect");
        }
        self.shared.set(ConnectionState::Idle);
    }

    /// Send raw bytes to the connected device.
    pub async fn transmit(&self, bytes: &[u8]) -> PrintResult<()> {
        if !self.state().is_connected() {
            return Err(PrintError::NotConnected);
        }
        self.adapter.write(bytes).await?;
        debug!(len = bytes.len(), "payload sent");
        Ok(())
    }

    fn spawn_power_watcher(
        adapter: Arc<A>,
        shared: Arc<Shared>,
        poll_interval: Duration,
        cancel: CancellationToken,
    ) {
        let events = adapter.power_events();
        tokio::spawn(async move {
            match events {
                Some(mut rx) => loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        ev = rx.recv() => match ev {
                            Some(power) => Self::on_power_change(&adapter, &shared, power).await,
                            None => break,
                        },
                    }
                },
                None => {
                    warn!("adapter has no power event channel, polling instead");
                    let mut last = adapter.power_state().await;
                    let mut tick = tokio::time::interval(poll_interval);
                    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
                    loop {
                        tokio::select! {
                            _ = cancel.cancelled() => break,
                            _ = tick.tick() => {
                                let now = adapter.power_state().await;
                                if now != last {
                                    Self::on_power_change(&adapter, &shared, now).await;
                                    last = now;
                                }
                            }
                        }
                    }
                }
            }
        });
    }

    async fn on_power_change(adapter: &A, shared: &Shared, power: PowerState) {
        match power {
            PowerState::Off => {
                if shared.current().is_connected() {
                    if let Err(e) = adapter.close().await {
                        warn!(error = %e, "close failed after radio powered off");
                    }
                }
                info!("radio powered off");
                shared.set(ConnectionState::PoweredOff);
            }
            PowerState::On => {
                let was_off = matches!(
                    shared.current(),
                    ConnectionState::PoweredOff | ConnectionState::PoweringOn
                );
                if was_off {
                    info!("radio powered on");
                    shared.set(ConnectionState::Idle);
                }
            }
        }
    }
}

impl<A: RadioAdapter> Drop for ConnectionManager<A> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn valid_address(addr: &str) -> bool {
    let parts: Vec<&str> = addr.split(':').collect();
    parts.len() == 6
        && parts
            .iter()
            .all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_hexdigit()))
}
