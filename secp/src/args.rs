use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

/// SECP API client
#[derive(Debug, Parser)]
#[command(name = "secp", about = "Authenticated command-line access to the SECP API")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "secp.toml", env = "SECP_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the stored bearer token
    #[command(subcommand)]
    Token(TokenCommand),

    /// Send a request with the stored token attached
    Fetch {
        /// Path relative to the configured base URL
        path: String,

        /// HTTP method
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,

        /// Extra header as `Name: value` (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Request body
        #[arg(short, long)]
        data: Option<String>,
    },

    /// Turn an error response body into a readable message
    Explain {
        /// Raw body; read from stdin when omitted
        body: Option<String>,
    },

    /// Show the notice the login page would display for a URL
    Banner {
        /// Login page URL including its query string
        url: Url,
    },
}

#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Store a token; read from stdin when omitted
    Set { token: Option<String> },
    /// Report whether a token is stored
    Show,
    /// Remove the stored token (sign out)
    Clear,
}
