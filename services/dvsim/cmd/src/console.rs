//! Line-oriented console: prompts, inline arguments and numeric input

use crate::command::{CommandError, CommandLine};
use dvsim_routing::{Distance, RouteStatus};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Printed when a distance does not parse
pub const INVALID_DISTANCE: &str = "Invalid distance, enter a non-negative integer.";

/// Prompting console over any async line reader and writer
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a console
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Give back the reader and writer
    #[cfg(test)]
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// Write a line
    pub async fn println(&mut self, text: &str) -> Result<(), CommandError> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Show a prompt and read one line without its line terminator.
    ///
    /// Returns `None` at end of input.
    pub async fn prompt(&mut self, text: &str) -> Result<Option<String>, CommandError> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        debug!("Read input {:?}", line);
        Ok(Some(line))
    }

    /// Use the next inline argument or prompt for it
    pub async fn argument(
        &mut self,
        command: &mut CommandLine,
        text: &str,
    ) -> Result<Option<String>, CommandError> {
        match command.next_arg() {
            Some(arg) => Ok(Some(arg)),
            None => self.prompt(text).await,
        }
    }

    /// Read a distance, re-prompting after invalid input.
    ///
    /// An invalid inline argument counts as the first attempt. Gives up
    /// with [`CommandError::RetriesExhausted`] after `retries` further
    /// attempts fail. Returns `None` at end of input.
    pub async fn distance(
        &mut self,
        command: &mut CommandLine,
        text: &str,
        retries: u32,
    ) -> Result<Option<Distance>, CommandError> {
        let mut input = command.next_arg();
        for attempt in 0..=retries {
            let raw = match input.take() {
                Some(raw) => raw,
                None => match self.prompt(text).await? {
                    Some(raw) => raw,
                    None => return Ok(None),
                },
            };

            match parse_distance(&raw) {
                Ok(distance) => return Ok(Some(distance)),
                Err(err) => {
                    debug!("Attempt {} rejected: {}", attempt + 1, err);
                    self.println(INVALID_DISTANCE).await?;
                }
            }
        }
        Err(CommandError::RetriesExhausted(retries.saturating_add(1)))
    }
}

/// Parse a non-negative hop count
pub fn parse_distance(raw: &str) -> Result<Distance, CommandError> {
    raw.trim()
        .parse::<Distance>()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

/// Render a route request answer
pub fn render_route(network: &str, status: RouteStatus) -> String {
    match status {
        RouteStatus::EdgeRouter => "Router is an edge router for the network.".to_string(),
        RouteStatus::Reachable(_) => format!("Network {} is {}", network, status),
        RouteStatus::Unknown => "Route to the network is unknown.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    fn output(console: Console<&[u8], Vec<u8>>) -> String {
        String::from_utf8(console.into_inner().1).unwrap()
    }

    #[tokio::test]
    async fn test_prompt_reads_lines() {
        let mut console = console("first\r\nsecond\n");
        assert_eq!(console.prompt("? ").await.unwrap().as_deref(), Some("first"));
        assert_eq!(console.prompt("? ").await.unwrap().as_deref(), Some("second"));
        assert_eq!(console.prompt("? ").await.unwrap(), None);
        assert_eq!(output(console), "? ? ? ");
    }

    #[tokio::test]
    async fn test_argument_prefers_inline() {
        let mut command = CommandLine::parse("P R1").unwrap();
        let mut console = console("R2\n");

        assert_eq!(
            console.argument(&mut command, "Enter router name: ").await.unwrap().as_deref(),
            Some("R1")
        );
        assert_eq!(
            console.argument(&mut command, "Enter router name: ").await.unwrap().as_deref(),
            Some("R2")
        );
        assert_eq!(output(console), "Enter router name: ");
    }

    #[tokio::test]
    async fn test_distance_retries() {
        let mut command = CommandLine::parse("NN").unwrap();
        let mut console = console("abc\n-1\n4\n");

        let distance = console.distance(&mut command, "d: ", 3).await.unwrap();
        assert_eq!(distance, Some(4));
        assert_eq!(
            output(console),
            format!("d: {INVALID_DISTANCE}\nd: {INVALID_DISTANCE}\nd: ")
        );
    }

    #[tokio::test]
    async fn test_distance_gives_up() {
        let mut command = CommandLine::parse("NN A net x").unwrap();
        let mut console = console("y\nz\n7\n");

        let err = console.distance(&mut command, "d: ", 2).await.unwrap_err();
        assert!(matches!(err, CommandError::RetriesExhausted(3)));
    }

    #[tokio::test]
    async fn test_distance_end_of_input() {
        let mut command = CommandLine::parse("NN").unwrap();
        let mut console = console("");
        assert_eq!(console.distance(&mut command, "d: ", 1).await.unwrap(), None);
    }

    #[test]
    fn test_parse_distance() {
        assert_eq!(parse_distance("0").unwrap(), 0);
        assert_eq!(parse_distance(" 12 ").unwrap(), 12);
        assert!(matches!(parse_distance("-3"), Err(CommandError::InvalidNumber(_))));
        assert!(matches!(parse_distance("1.5"), Err(CommandError::InvalidNumber(_))));
    }

    #[test]
    fn test_render_route() {
        assert_eq!(
            render_route("net1", RouteStatus::EdgeRouter),
            "Router is an edge router for the network."
        );
        assert_eq!(
            render_route("net1", RouteStatus::Reachable(1)),
            "Network net1 is 1 hop away"
        );
        assert_eq!(
            render_route("net1", RouteStatus::Reachable(3)),
            "Network net1 is 3 hops away"
        );
        assert_eq!(
            render_route("net2", RouteStatus::Unknown),
            "Route to the network is unknown."
        );
    }
}
