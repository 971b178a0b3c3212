//! An authoritative DNS responder for UDP.
//!
//! [`dns_parser`] holds the message codec. [`Responder`] binds the sockets,
//! resolves each question against a [`RecordStore`] and sends the encoded
//! response back to the sender.

use futures_util::future::{self, BoxFuture, FutureExt};
use log::warn;
use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;
use std::thread;
use tokio::{runtime::Handle, sync::mpsc};

mod address_family;
mod config;
pub mod dns_parser;
mod fsm;
pub mod store;

use crate::address_family::{AddressFamily, Inet, Inet6};
use crate::fsm::{Command, FSM};

pub use crate::config::ResponderConfig;
pub use crate::store::{FixedRecordStore, RecordStore, StoreEntry};

pub const DEFAULT_PORT: u16 = 53;
pub const DEFAULT_TTL: u32 = 3600;
pub const DEFAULT_MAX_DATAGRAM_SIZE: usize = 1024;

/// The future that serves requests until the [`Responder`] is dropped
pub type ResponderTask = BoxFuture<'static, ()>;

/// A running DNS server
///
/// Dropping it stops the receive loops; a responder created with
/// [`Responder::new`] also joins its thread.
pub struct Responder {
    local_addrs: Vec<SocketAddr>,
    commands: CommandSender,
    thread: Option<thread::JoinHandle<()>>,
}

impl Responder {
    /// Serves `store` from a dedicated thread with its own tokio runtime
    pub fn new(config: ResponderConfig, store: Arc<dyn RecordStore>) -> io::Result<Responder> {
        let sockets = Sockets::bind(&config)?;
        let (tx, rx) = std::sync::mpsc::sync_channel(0);
        let thread = thread::Builder::new()
            .name("dns-responder".to_owned())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_io()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(err) => {
                        let _ = tx.send(Err(err));
                        return;
                    }
                };
                let setup = {
                    let _guard = runtime.enter();
                    Self::start(sockets, &config, store)
                };
                match setup {
                    Ok((responder, task)) => {
                        if tx.send(Ok(responder)).is_ok() {
                            runtime.block_on(task);
                        }
                    }
                    Err(err) => {
                        let _ = tx.send(Err(err));
                    }
                }
            })?;

        let mut responder = rx.recv().map_err(|_| {
            io::Error::new(io::ErrorKind::Other, "responder thread exited during setup")
        })??;
        responder.thread = Some(thread);
        Ok(responder)
    }

    /// Serves `store` as a task spawned on `handle`
    pub fn spawn(
        handle: &Handle,
        config: ResponderConfig,
        store: Arc<dyn RecordStore>,
    ) -> io::Result<Responder> {
        let sockets = Sockets::bind(&config)?;
        let (responder, task) = {
            let _guard = handle.enter();
            Self::start(sockets, &config, store)?
        };
        handle.spawn(task);
        Ok(responder)
    }

    /// Returns the serving task for the caller to drive
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_default_handle(
        config: ResponderConfig,
        store: Arc<dyn RecordStore>,
    ) -> io::Result<(Responder, ResponderTask)> {
        let sockets = Sockets::bind(&config)?;
        Self::start(sockets, &config, store)
    }

    /// The addresses the sockets ended up bound to
    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.local_addrs
    }

    fn start(
        sockets: Sockets,
        config: &ResponderConfig,
        store: Arc<dyn RecordStore>,
    ) -> io::Result<(Responder, ResponderTask)> {
        let mut tasks = Vec::with_capacity(2);
        let mut commands = Vec::with_capacity(2);
        let mut local_addrs = Vec::with_capacity(2);

        if let Some(socket) = sockets.v4 {
            local_addrs.push(socket.local_addr()?);
            let (task, command) = FSM::<Inet>::new(socket, &store, config)?;
            tasks.push(task.boxed());
            commands.push(command);
        }
        if let Some(socket) = sockets.v6 {
            local_addrs.push(socket.local_addr()?);
            let (task, command) = FSM::<Inet6>::new(socket, &store, config)?;
            tasks.push(task.boxed());
            commands.push(command);
        }

        let task = future::join_all(tasks).map(|_| ()).boxed();
        let responder = Responder {
            local_addrs,
            commands: CommandSender(commands),
            thread: None,
        };
        Ok((responder, task))
    }
}

impl Drop for Responder {
    fn drop(&mut self) {
        self.commands.send_shutdown();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("responder thread panicked");
            }
        }
    }
}

/// Bound, not yet registered sockets
///
/// Binding happens before any runtime is involved so that errors reach the
/// caller of the constructor directly.
struct Sockets {
    v4: Option<UdpSocket>,
    v6: Option<UdpSocket>,
}

impl Sockets {
    fn bind(config: &ResponderConfig) -> io::Result<Sockets> {
        let v4 = match config.ipv4 {
            Some(addr) => Some(Inet::bind(addr, config.port)?),
            None => None,
        };
        let v6 = match config.ipv6 {
            Some(addr) => match Inet6::bind(addr, config.port) {
                Ok(socket) => Some(socket),
                Err(err) if v4.is_some() => {
                    warn!("Failed to register IPv6 receiver: {:?}", err);
                    None
                }
                Err(err) => return Err(err),
            },
            None => None,
        };
        if v4.is_none() && v6.is_none() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "neither an IPv4 nor an IPv6 address is configured",
            ));
        }
        Ok(Sockets { v4, v6 })
    }
}

struct CommandSender(Vec<mpsc::UnboundedSender<Command>>);

impl CommandSender {
    fn send_shutdown(&self) {
        for tx in self.0.iter() {
            // a task that already stopped has nothing to shut down
            let _ = tx.send(Command::Shutdown);
        }
    }
}
