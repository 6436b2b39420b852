use crate::clients::AuthorClient;
use crate::config::CatalogConfig;
use tracing::{error, info};

/// Runtime owner of the catalog's actors.
///
/// ```ignore
/// let system = CatalogSystem::new(CatalogConfig::from_env());
/// let id = system.author_client.create_author(params).await?;
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    /// Client for interacting with the Author actor
    pub author_client: AuthorClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem {
    /// Spawns every actor. Must be called inside a Tokio runtime.
    pub fn new(config: CatalogConfig) -> Self {
        info!(?config, "Starting catalog");
        let (author_actor, author_client) = crate::author_actor::new(&config);

        // Author has no dependencies (Context = ())
        let author_handle = tokio::spawn(author_actor.run(()));

        Self {
            author_client,
            handles: vec![author_handle],
        }
    }

    /// Drops the clients and waits for every actor to drain its mailbox and stop.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Dropping the client drops its sender; the actor's receiver then
        // returns None and the run loop exits.
        drop(self.author_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
