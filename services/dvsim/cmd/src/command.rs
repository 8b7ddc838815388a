//! Command keywords and line parsing

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use dvsim_routing::RoutingError;

/// Help block printed after an unrecognized command
pub const HELP: &str = "Enter one of these commands:
NR (new router)
P (print)
C (connect)
NN (new network)
PA (print all)
S (send routing tables)
RR (route request)
Q (quit)";

/// Errors raised while handling a console command
#[derive(Error, Debug)]
pub enum CommandError {
    /// Unrecognized command keyword
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// Input that should have been a non-negative integer
    #[error("invalid number: {0}")]
    InvalidNumber(String),

    /// Numeric input kept failing after the allowed retries
    #[error("no valid number after {0} attempts")]
    RetriesExhausted(u32),

    /// Routing core rejected the operation
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// Console I/O failure
    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Command keywords understood by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// `NR`: create a router
    NewRouter,
    /// `P`: print one router
    Print,
    /// `PA`: print every router
    PrintAll,
    /// `C`: connect two routers
    Connect,
    /// `NN`: attach a network to a router
    NewNetwork,
    /// `S`: send a router's table to its neighbors
    Send,
    /// `RR`: route request
    RouteRequest,
    /// `Q`: quit
    Quit,
}

impl FromStr for Keyword {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NR" => Ok(Keyword::NewRouter),
            "P" => Ok(Keyword::Print),
            "PA" => Ok(Keyword::PrintAll),
            "C" => Ok(Keyword::Connect),
            "NN" => Ok(Keyword::NewNetwork),
            "S" => Ok(Keyword::Send),
            "RR" => Ok(Keyword::RouteRequest),
            "Q" => Ok(Keyword::Quit),
            _ => Err(CommandError::InvalidCommand(s.to_string())),
        }
    }
}

impl Keyword {
    /// Number of arguments the command takes, inline or prompted
    pub fn arity(&self) -> usize {
        match self {
            Keyword::PrintAll | Keyword::Quit => 0,
            Keyword::NewRouter | Keyword::Print | Keyword::Send => 1,
            Keyword::Connect | Keyword::RouteRequest => 2,
            Keyword::NewNetwork => 3,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Keyword::NewRouter => "NR",
            Keyword::Print => "P",
            Keyword::PrintAll => "PA",
            Keyword::Connect => "C",
            Keyword::NewNetwork => "NN",
            Keyword::Send => "S",
            Keyword::RouteRequest => "RR",
            Keyword::Quit => "Q",
        };
        f.write_str(keyword)
    }
}

/// A keyword followed by any arguments given on the same line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Parsed keyword
    pub keyword: Keyword,
    /// Inline arguments, consumed front to back before prompting
    pub args: VecDeque<String>,
}

impl CommandLine {
    /// Parse a console line such as `nn A net1 0`
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let keyword = match words.next() {
            Some(word) => word.parse()?,
            None => return Err(CommandError::InvalidCommand(String::new())),
        };

        Ok(Self {
            keyword,
            args: words.map(str::to_string).collect(),
        })
    }

    /// Check whether more inline words were given than the keyword takes
    pub fn has_surplus_args(&self) -> bool {
        self.args.len() > self.keyword.arity()
    }

    /// Take the next inline argument, if any
    pub fn next_arg(&mut self) -> Option<String> {
        self.args.pop_front()
    }
}
