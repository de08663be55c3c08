/// Main entry point for the JSON-RPC pipeline
///
/// Sets up logging, resolves the requested method module and serves
/// newline-delimited JSON-RPC payloads over stdin/stdout.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use jsonrpc_pipeline::{BuiltinModules, Engine, ModuleResolver, RpcServer};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Method module to serve
    #[arg(long, default_value = "arith")]
    module: String,

    /// Trace inbound and outbound payloads
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,

    /// Print the module's methods and exit
    #[arg(long)]
    list_methods: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "trace"
    } else if args.debug {
        "debug"
    } else {
        "warn"
    };

    // RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("jsonrpc_pipeline={}", log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // stdout carries protocol traffic
        .init();

    let resolver = BuiltinModules;
    let engine = Engine::from_module(&resolver, &args.module)
        .map_err(|e| format!("{} (available: {})", e, resolver.modules().join(", ")))?
        .with_payload_tracing(args.debug || args.verbose);

    if args.list_methods {
        for name in engine.registry().method_names() {
            if let Some(descriptor) = engine.registry().descriptor(name) {
                println!("{}", descriptor);
            }
        }
        return Ok(());
    }

    info!("Serving module {}", args.module);
    RpcServer::new(engine).run().await?;

    info!("JSON-RPC pipeline shutdown complete");
    Ok(())
}
