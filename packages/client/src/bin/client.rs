//! CLI client for the Hiroma collaboration hub.
//!
//! Connects to a collaboration hub server, joins one room and relays stdin
//! input: plain lines become chat messages, slash commands drive the shared
//! whiteboard and code buffer. Incoming room events are rendered to the
//! terminal. Automatically reconnects on disconnection (max 5 attempts with
//! 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroma-client -- --room r1 --name Alice
//! cargo run --bin hiroma-client -- -r r1 -n Bob
//! ```

use clap::Parser;

use hiroma_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroma-client")]
#[command(about = "CLI client for the Hiroma collaboration hub", long_about = None)]
struct Args {
    /// Room to join
    #[arg(short = 'r', long)]
    room: String,

    /// Display name in the room
    #[arg(short = 'n', long)]
    name: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = hiroma_client::run_client(args.url, args.room, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
