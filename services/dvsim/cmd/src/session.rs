//! Command loop binding the console to the routing core

use crate::command::{CommandError, CommandLine, Keyword, HELP};
use crate::console::{render_route, Console};
use dvsim_routing::{Registry, RoutingError, SharedRegistry};
use dvsim_topology::load_file;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::info;

/// Printed when the topology file cannot be loaded
pub const BOOTSTRAP_FAILED: &str =
    "Error: the file could not be read or there is something wrong with it.";

const ROUTER_NOT_FOUND: &str = "Router was not found.";
const ROUTERS_NOT_FOUND: &str = "One or more of the routers was not found.";
const NAME_TAKEN: &str = "Name is taken.";
const NAME_EMPTY: &str = "Name cannot be empty.";
const NETWORK_NOT_ADDED: &str = "Network was not added.";

/// Whether the loop keeps reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command
    Continue,
    /// Stop the session
    Quit,
}

/// Session settings taken from the configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Command prompt
    pub prompt: String,
    /// Extra attempts allowed for numeric input
    pub max_input_retries: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            max_input_retries: 3,
        }
    }
}

/// Interactive simulator session
pub struct Session<R, W> {
    registry: SharedRegistry,
    console: Console<R, W>,
    config: SessionConfig,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a session over a registry and a console
    pub fn new(registry: SharedRegistry, console: Console<R, W>, config: SessionConfig) -> Self {
        Self {
            registry,
            console,
            config,
        }
    }

    /// Give back the console
    #[cfg(test)]
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Run commands until `Q` or end of input
    pub async fn run(&mut self) -> Result<(), CommandError> {
        loop {
            let prompt = self.config.prompt.clone();
            let line = match self.console.prompt(&prompt).await? {
                Some(line) => line,
                None => {
                    info!("End of input, closing session");
                    return Ok(());
                }
            };

            let command = match CommandLine::parse(&line) {
                Ok(command) if command.has_surplus_args() => {
                    crate::component_warn!("session", "Too many arguments for {}: {:?}", command.keyword, line);
                    self.erroneous_command().await?;
                    continue;
                }
                Ok(command) => command,
                Err(CommandError::InvalidCommand(input)) => {
                    crate::component_warn!("session", "Erroneous command {:?}", input);
                    self.erroneous_command().await?;
                    continue;
                }
                Err(err) => return Err(err),
            };

            if self.execute(command).await? == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Execute one parsed command
    pub async fn execute(&mut self, mut command: CommandLine) -> Result<Flow, CommandError> {
        let keyword = command.keyword;
        crate::component_debug!("session", "Executing {}", keyword);

        match keyword {
            Keyword::NewRouter => {
                let Some(name) = self.console.argument(&mut command, "Enter a new name: ").await? else {
                    return Ok(Flow::Quit);
                };
                if name.is_empty() {
                    self.console.println(NAME_EMPTY).await?;
                    return Ok(Flow::Continue);
                }
                let result = self.registry.create_router(&name).await.map(|_| ());
                self.report(result, ROUTER_NOT_FOUND).await?;
            }
            Keyword::Print => {
                let Some(name) = self.console.argument(&mut command, "Enter router name: ").await? else {
                    return Ok(Flow::Quit);
                };
                match self.registry.describe(&name).await {
                    Ok(text) => self.console.println(&text).await?,
                    Err(err) => self.report(Err(err), ROUTER_NOT_FOUND).await?,
                }
            }
            Keyword::PrintAll => {
                for text in self.registry.describe_all().await {
                    self.console.println(&text).await?;
                }
            }
            Keyword::Connect => {
                let Some(first) = self.console.argument(&mut command, "Enter 1st router: ").await? else {
                    return Ok(Flow::Quit);
                };
                let Some(second) = self.console.argument(&mut command, "Enter 2nd router: ").await? else {
                    return Ok(Flow::Quit);
                };
                let result = self.registry.connect(&first, &second).await;
                self.report(result, ROUTERS_NOT_FOUND).await?;
            }
            Keyword::NewNetwork => return self.new_network(command).await,
            Keyword::Send => {
                let Some(sender) = self.console.argument(&mut command, "Sending router: ").await? else {
                    return Ok(Flow::Quit);
                };
                let result = self.registry.propagate(&sender).await.map(|_| ());
                self.report(result, ROUTER_NOT_FOUND).await?;
            }
            Keyword::RouteRequest => {
                let Some(router) = self.console.argument(&mut command, "Enter router name: ").await? else {
                    return Ok(Flow::Quit);
                };
                let Some(network) = self.console.argument(&mut command, "Enter network name: ").await? else {
                    return Ok(Flow::Quit);
                };
                match self.registry.query(&router, &network).await {
                    Ok(status) => self.console.println(&render_route(&network, status)).await?,
                    Err(err) => self.report(Err(err), ROUTER_NOT_FOUND).await?,
                }
            }
            Keyword::Quit => {
                self.console.println("Simulator closes.").await?;
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }

    async fn new_network(&mut self, mut command: CommandLine) -> Result<Flow, CommandError> {
        let Some(router) = self.console.argument(&mut command, "Enter router name: ").await? else {
            return Ok(Flow::Quit);
        };
        if !self.registry.contains(&router).await {
            self.report(Err(RoutingError::NotFound(router)), ROUTER_NOT_FOUND).await?;
            return Ok(Flow::Continue);
        }

        let Some(network) = self.console.argument(&mut command, "Enter network: ").await? else {
            return Ok(Flow::Quit);
        };
        let retries = self.config.max_input_retries;
        let distance = match self.console.distance(&mut command, "Enter distance: ", retries).await {
            Ok(Some(distance)) => distance,
            Ok(None) => return Ok(Flow::Quit),
            Err(CommandError::RetriesExhausted(attempts)) => {
                crate::component_warn!("session", "No valid distance after {} attempts", attempts);
                self.console.println(NETWORK_NOT_ADDED).await?;
                return Ok(Flow::Continue);
            }
            Err(err) => return Err(err),
        };

        let result = self.registry.add_network(&router, &network, distance).await;
        self.report(result, ROUTER_NOT_FOUND).await?;
        Ok(Flow::Continue)
    }

    async fn erroneous_command(&mut self) -> Result<(), CommandError> {
        self.console.println("Erroneous command!").await?;
        self.console.println(HELP).await
    }

    /// Print the console message for a recoverable routing error
    async fn report(
        &mut self,
        result: Result<(), RoutingError>,
        not_found: &str,
    ) -> Result<(), CommandError> {
        match result {
            Ok(()) => Ok(()),
            Err(err) => {
                crate::component_warn!("session", "{}", err);
                let message = match err {
                    RoutingError::NotFound(_) => not_found,
                    RoutingError::NameTaken(_) => NAME_TAKEN,
                };
                self.console.println(message).await
            }
        }
    }
}

/// Load the starting topology.
///
/// Uses the configured file, or asks for one when none is configured; an
/// empty answer starts with no routers. Returns `None` when command
/// processing must not start: the file failed to load, or input ended.
pub async fn bootstrap<R, W>(
    console: &mut Console<R, W>,
    configured: Option<PathBuf>,
) -> Result<Option<Registry>, CommandError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let path = match configured {
        Some(path) => path,
        None => match console.prompt("Network file: ").await? {
            Some(name) if name.is_empty() => return Ok(Some(Registry::new())),
            Some(name) => PathBuf::from(name),
            None => return Ok(None),
        },
    };

    match load_file(&path) {
        Ok(registry) => {
            crate::component_info!("bootstrap", "Loaded {} routers from {:?}", registry.len(), path);
            Ok(Some(registry))
        }
        Err(err) => {
            crate::component_error!("bootstrap", "{}", err);
            console.println(BOOTSTRAP_FAILED).await?;
            Ok(None)
        }
    }
}
