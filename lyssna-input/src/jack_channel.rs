//! Live-channel input via a JACK server (feature `jack`).
//!
//! Each `JackInput` registers its own client with one capture port and
//! forwards process-callback buffers over a bounded channel; the worker
//! thread drains that channel through the blocking `InputSource` contract.

use std::collections::{BTreeSet, VecDeque};

use crossbeam_channel::{bounded, Receiver, Sender};
use jack::{AudioIn, Client, ClientOptions, Control, Port, PortFlags, ProcessScope};
use lyssna_config::InputConfig;
use tracing::debug;

use crate::{ChannelEvent, ChannelWatcher, InputError, InputSource};

const MONO_AUDIO: &str = "32 bit float mono audio";

struct PortReader {
    port: Port<AudioIn>,
    tx: Sender<Vec<f32>>,
}

impl jack::ProcessHandler for PortReader {
    fn process(&mut self, _client: &Client, ps: &ProcessScope) -> Control {
        // Never block inside the process callback; if the worker fell
        // behind, the block is dropped.
        let _ = self.tx.try_send(self.port.as_slice(ps).to_vec());
        Control::Continue
    }
}

/// One live channel, bound to a named JACK output port.
pub struct JackInput {
    name: String,
    sample_rate: u32,
    rx: Receiver<Vec<f32>>,
    pending: VecDeque<f32>,
    _active: jack::AsyncClient<(), PortReader>,
}

impl JackInput {
    /// Connects a fresh client's capture port to `source`.
    pub fn connect(source: &str, config: &InputConfig) -> Result<Self, InputError> {
        let (client, _status) = Client::new("lyssna", ClientOptions::NO_START_SERVER)?;
        let sample_rate = client.sample_rate() as u32;
        let port = client.register_port("capture", AudioIn::default())?;
        let port_name = port.name()?;

        // Enough slack for a few process cycles at the configured chunk size.
        let (tx, rx) = bounded(config.chunk_frames.max(64));
        let active = client.activate_async((), PortReader { port, tx })?;
        active.as_client().connect_ports_by_name(source, &port_name)?;
        debug!(source, sample_rate, "connected jack input");

        Ok(Self {
            name: source.to_string(),
            sample_rate,
            rx,
            pending: VecDeque::new(),
            _active: active,
        })
    }
}

impl InputSource for JackInput {
    fn name(&self) -> &str {
        &self.name
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn read_chunk(&mut self, buf: &mut [f32]) -> Result<usize, InputError> {
        let mut written = 0;
        while written < buf.len() {
            if let Some(s) = self.pending.pop_front() {
                buf[written] = s;
                written += 1;
                continue;
            }
            if written == 0 {
                // Block for the first samples of a chunk; a closed channel
                // means the client died and the stream is over.
                match self.rx.recv() {
                    Ok(block) => self.pending.extend(block),
                    Err(_) => return Ok(0),
                }
            } else {
                match self.rx.try_recv() {
                    Ok(block) => self.pending.extend(block),
                    Err(_) => break,
                }
            }
        }
        Ok(written)
    }
}

/// Diffs the server's audio output ports against the previously seen set.
pub struct JackWatcher {
    client: Client,
    pattern: Option<String>,
    known: BTreeSet<String>,
}

impl JackWatcher {
    pub fn connect(pattern: Option<&str>) -> Result<Self, InputError> {
        let (client, _status) = Client::new("lyssna-monitor", ClientOptions::NO_START_SERVER)?;
        Ok(Self {
            client,
            pattern: pattern.map(str::to_string),
            known: BTreeSet::new(),
        })
    }
}

impl ChannelWatcher for JackWatcher {
    fn poll(&mut self) -> Result<Vec<ChannelEvent>, InputError> {
        let current: BTreeSet<String> = self
            .client
            .ports(
                self.pattern.as_deref(),
                Some(MONO_AUDIO),
                PortFlags::IS_OUTPUT,
            )
            .into_iter()
            .collect();

        let mut events = Vec::new();
        for name in current.difference(&self.known) {
            events.push(ChannelEvent::Appeared(name.clone()));
        }
        for name in self.known.difference(&current) {
            events.push(ChannelEvent::Disappeared(name.clone()));
        }
        self.known = current;
        Ok(events)
    }
}
