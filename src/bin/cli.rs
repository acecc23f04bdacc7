//! rediswire CLI Client
//!
//! Command-line interface for sending commands to a Redis-compatible
//! server and printing the decoded replies.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use rediswire::{Command, CommandName, Config, Connection, Reply, SetParams};

/// rediswire CLI
#[derive(Parser, Debug)]
#[command(name = "rediswire-cli")]
#[command(about = "CLI for Redis-compatible key-value stores")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:6379")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,

        /// Set only if the key does not exist
        #[arg(long)]
        nx: bool,

        /// Set only if the key already exists
        #[arg(long, conflicts_with = "nx")]
        xx: bool,

        /// Expire after this many seconds
        #[arg(long)]
        ex: Option<u64>,

        /// Expire after this many milliseconds
        #[arg(long, conflicts_with = "ex")]
        px: Option<u64>,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Increment the integer value of a key
    Incr {
        /// The key to increment
        key: String,
    },

    /// Ping the server
    Ping,

    /// Send an arbitrary command verbatim
    Send {
        /// Command name
        name: String,

        /// Command arguments, in order
        args: Vec<String>,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,rediswire=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let config = Config::default();
    let mut conn = match Connection::connect(args.server.as_str(), &config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to connect to {}: {}", args.server, e);
            std::process::exit(1);
        }
    };

    let command = build_command(args.command);

    match conn.send(&command) {
        Ok(reply) => print_reply(&reply, 0),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Translate a CLI subcommand into a protocol command
fn build_command(cli: Commands) -> Command {
    match cli {
        Commands::Get { key } => Command::new(CommandName::Get).arg_str(&key),
        Commands::Set {
            key,
            value,
            nx,
            xx,
            ex,
            px,
        } => {
            let mut params = SetParams::new();
            if nx {
                params = params.nx();
            }
            if xx {
                params = params.xx();
            }
            if let Some(seconds) = ex {
                params = params.ex(seconds);
            }
            if let Some(millis) = px {
                params = params.px(millis);
            }
            Command::new(CommandName::Set)
                .arg_str(&key)
                .arg_str(&value)
                .args(params.to_args())
        }
        Commands::Del { key } => Command::new(CommandName::Del).arg_str(&key),
        Commands::Incr { key } => Command::new(CommandName::Incr).arg_str(&key),
        Commands::Ping => Command::new(CommandName::Ping),
        Commands::Send { name, args } => Command::new(CommandName::parse(&name))
            .args(args.into_iter().map(String::into_bytes)),
    }
}

/// Print a decoded reply, indenting nested array elements
fn print_reply(reply: &Reply, indent: usize) {
    let pad = "  ".repeat(indent);
    match reply {
        Reply::Status(s) => println!("{}{}", pad, s),
        Reply::Integer(n) => println!("{}(integer) {}", pad, n),
        Reply::Bulk(None) => println!("{}(nil)", pad),
        Reply::Bulk(Some(payload)) => {
            println!("{}\"{}\"", pad, String::from_utf8_lossy(payload))
        }
        Reply::Error(message) => println!("{}(error) {}", pad, message),
        Reply::Array(None) => println!("{}(nil array)", pad),
        Reply::Array(Some(elements)) => {
            if elements.is_empty() {
                println!("{}(empty array)", pad);
            }
            for (i, element) in elements.iter().enumerate() {
                println!("{}{})", pad, i + 1);
                print_reply(element, indent + 1);
            }
        }
    }
}
