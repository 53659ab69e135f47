//! The LUCID node orchestrator.
//!
//! Opens storage, owns the registry, runs the HTTP API server in a
//! background task, and processes API commands one at a time in its main
//! event loop. That loop is the only code touching the registry, so every
//! operation (including path-compressing reads) is serialized.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

use lucid_core::RegistryEvent;
use lucid_registry::{MemoryBackend, Registry, StorageBackend};

use crate::commands::{IdResponse, LinkResponse, RegistryCommand, RootResponse, StatsResponse};
use crate::config::{BackendKind, LucidConfig};
use crate::state::NodeState;
use crate::storage::RocksBackend;

/// Registry over whichever backend the config selects.
pub type NodeRegistry = Registry<Box<dyn StorageBackend>>;

/// The LUCID node.
pub struct LucidNode {
    /// Node configuration.
    config: LucidConfig,
    /// The registry (None until started).
    registry: Option<NodeRegistry>,
    /// Shared state accessible from HTTP handlers.
    node_state: Option<Arc<NodeState>>,
    /// Receives commands from the HTTP API.
    command_rx: Option<mpsc::Receiver<RegistryCommand>>,
    /// Receives events published by the registry.
    event_rx: Option<broadcast::Receiver<RegistryEvent>>,
}

impl LucidNode {
    /// Create a new node with the given config.
    pub fn new(config: LucidConfig) -> Result<Self> {
        let _: SocketAddr = config.api_socket_addr().parse()?;
        tracing::info!(backend = ?config.storage.backend, "LUCID node created");

        Ok(Self {
            config,
            registry: None,
            node_state: None,
            command_rx: None,
            event_rx: None,
        })
    }

    fn open_backend(&self) -> Result<Box<dyn StorageBackend>> {
        match self.config.storage.backend {
            BackendKind::Rocksdb => {
                let backend = RocksBackend::open(&self.config.storage.data_dir)?;
                tracing::info!(
                    path = %self.config.storage.data_dir.display(),
                    "RocksDB storage initialized"
                );
                Ok(Box::new(backend))
            }
            BackendKind::Memory => {
                tracing::warn!("using in-memory storage; state is lost on exit");
                Ok(Box::new(MemoryBackend::new()))
            }
        }
    }

    /// Initialize and start the node: storage, registry, HTTP API.
    pub async fn start(&mut self) -> Result<()> {
        tracing::info!("starting LUCID node");

        let backend = self.open_backend()?;
        let registry = Registry::new(backend, self.config.registry.clone());
        tracing::info!(
            identities = registry.identity_count()?,
            path_compression = registry.config().path_compression,
            "registry loaded"
        );
        let event_rx = registry.subscribe();

        // Create the command channel (HTTP API → main event loop)
        let (command_tx, command_rx) =
            mpsc::channel::<RegistryCommand>(self.config.api.command_capacity.max(1));
        let node_state = Arc::new(NodeState::new(command_tx));

        // Spawn the HTTP API server
        let api_addr: SocketAddr = self.config.api_socket_addr().parse()?;
        let api_state = node_state.clone();
        tokio::spawn(async move {
            if let Err(e) = crate::api::start_api_server(api_addr, api_state).await {
                tracing::error!(error = %e, "HTTP API server error");
            }
        });

        self.registry = Some(registry);
        self.node_state = Some(node_state);
        self.command_rx = Some(command_rx);
        self.event_rx = Some(event_rx);

        Ok(())
    }

    /// Run the node's main event loop: processes API commands and logs
    /// registry events.
    pub async fn run(&mut self) -> Result<()> {
        let mut event_rx = self
            .event_rx
            .take()
            .ok_or_else(|| anyhow::anyhow!("node not started"))?;
        let mut command_rx = self
            .command_rx
            .take()
            .ok_or_else(|| anyhow::anyhow!("node not started"))?;
        let registry = self
            .registry
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("node not started"))?;

        tracing::info!("entering main event loop");

        loop {
            tokio::select! {
                cmd = command_rx.recv() => {
                    match cmd {
                        Some(c) => handle_command(registry, c),
                        None => {
                            tracing::info!("API command channel closed");
                            break;
                        }
                    }
                }
                event = event_rx.recv() => {
                    match event {
                        Ok(ev) => log_registry_event(&ev),
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            tracing::warn!(missed = n, "event receiver lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            tracing::info!("registry event channel closed");
                            break;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Gracefully shut down the node.
    pub async fn shutdown(&mut self) -> Result<()> {
        tracing::info!("shutting down LUCID node");

        self.node_state = None;
        self.command_rx = None;
        self.event_rx = None;

        if let Some(registry) = self.registry.take() {
            drop(registry);
            tracing::info!("storage closed");
        }

        tracing::info!("LUCID node shut down");
        Ok(())
    }

    /// The running registry, if started.
    pub fn registry(&self) -> Option<&NodeRegistry> {
        self.registry.as_ref()
    }
}

/// Log a registry event observed on the node's subscription.
fn log_registry_event(event: &RegistryEvent) {
    match event {
        RegistryEvent::IdentityCreated {
            id,
            kind,
            handle,
            wallet,
        } => {
            tracing::info!(
                event = event.name(),
                %id,
                kind = %kind,
                handle = %handle,
                wallet = ?wallet.map(|a| a.to_string()),
                "registry event"
            );
        }
        RegistryEvent::IdentitiesLinked { ids, root } => {
            tracing::info!(event = event.name(), ?ids, %root, "registry event");
        }
    }
}

/// Apply one API command to the registry and send back the result.
///
/// A dropped reply channel means the HTTP client went away; the operation
/// has already been applied either way.
pub(crate) fn handle_command<B: StorageBackend>(registry: &mut Registry<B>, cmd: RegistryCommand) {
    match cmd {
        RegistryCommand::RegisterSocial {
            platform,
            handle,
            display_name,
            avatar_uri,
            reply,
        } => {
            let result = registry
                .register_social(&platform, &handle, &display_name, &avatar_uri)
                .map(|id| IdResponse { id });
            let _ = reply.send(result);
        }
        RegistryCommand::RegisterWallet { address, reply } => {
            let result = registry.register_wallet(address).map(|id| IdResponse { id });
            let _ = reply.send(result);
        }
        RegistryCommand::Link { ids, reply } => {
            let result = registry
                .link(&ids)
                .map(|root| LinkResponse { ids, root });
            let _ = reply.send(result);
        }
        RegistryCommand::FindRoot { id, reply } => {
            let result = registry.find_root(id).map(|root| RootResponse { id, root });
            let _ = reply.send(result);
        }
        RegistryCommand::GetIdentity { id, reply } => {
            let _ = reply.send(registry.get_identity(id));
        }
        RegistryCommand::GetAccount { id, reply } => {
            let _ = reply.send(registry.get_account(id));
        }
        RegistryCommand::LookupSocial {
            platform,
            handle,
            reply,
        } => {
            let result = registry
                .get_user_id_by_social(&platform, &handle)
                .map(|id| IdResponse { id });
            let _ = reply.send(result);
        }
        RegistryCommand::LookupWallet { address, reply } => {
            let result = registry
                .get_user_id_by_wallet(&address)
                .map(|id| IdResponse { id });
            let _ = reply.send(result);
        }
        RegistryCommand::Stats { reply } => {
            let result = registry.identity_count().map(|identity_count| StatsResponse {
                identity_count,
                path_compression: registry.config().path_compression,
            });
            let _ = reply.send(result);
        }
    }
}
