use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use pingdeck_client::{ApiClient, DEFAULT_BASE_URL};
use pingdeck_endpoint::build_endpoint;
use pingdeck_model::{Protocol, StatusEndpoint};

mod panel;

use panel::UiOpts;

#[derive(Parser)]
#[command(name = "pingdeck", version, about = "Terminal front end for a local network-probe API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Probe(ProbeArgs),
    Status(StatusArgs),
    Panel(PanelArgs),
}

#[derive(Args)]
#[command(about = "Trigger one probe and print the backend's JSON response")]
struct ProbeArgs {
    /// Target host (or address, for rdns)
    #[arg(long)]
    host: String,

    /// icmp, tcp, arp, udp or rdns
    #[arg(long, default_value = "icmp")]
    protocol: String,

    /// TCP port, required when --protocol tcp
    #[arg(long)]
    port: Option<u16>,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    api: String,
}

#[derive(Args)]
#[command(about = "Call the backend's liveness endpoint and print the response")]
struct StatusArgs {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    api: String,

    /// status or health, depending on the backend version
    #[arg(long, default_value = "status")]
    status_path: String,
}

#[derive(Args)]
#[command(about = "Interactive probe panel")]
struct PanelArgs {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    api: String,

    /// status or health, depending on the backend version
    #[arg(long, default_value = "status")]
    status_path: String,

    /// No terminal styling in the rendered frames
    #[arg(long)]
    plain: bool,

    #[arg(long)]
    ascii_only: bool,
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Probe(args) => run_probe(args),
        Commands::Status(args) => run_status(args),
        Commands::Panel(args) => run_panel(args),
    }
}

fn run_probe(args: ProbeArgs) -> Result<()> {
    let protocol: Protocol = args.protocol.parse().map_err(|err| anyhow!("{err}"))?;
    let port_text = args.port.map(|port| port.to_string()).unwrap_or_default();

    let endpoint = match build_endpoint(&args.host, protocol, &port_text) {
        Some(endpoint) => endpoint,
        None if args.host.trim().is_empty() => return Err(anyhow!("--host must not be empty")),
        None => return Err(anyhow!("--protocol tcp needs --port between 1 and 65535")),
    };

    let client = make_client(args.api);
    println!("{}", client.call(&endpoint));
    Ok(())
}

fn run_status(args: StatusArgs) -> Result<()> {
    let status_path: StatusEndpoint = args.status_path.parse().map_err(|err| anyhow!("{err}"))?;
    let client = make_client(args.api);
    println!("{}", client.call(status_path.path()));
    Ok(())
}

fn run_panel(args: PanelArgs) -> Result<()> {
    let status_path: StatusEndpoint = args.status_path.parse().map_err(|err| anyhow!("{err}"))?;
    let client = make_client(args.api);
    let opts = UiOpts {
        plain: args.plain,
        ascii_only: args.ascii_only,
    };
    panel::run(client, status_path, opts)
}

fn make_client(base: String) -> ApiClient {
    let client = ApiClient::new(base);
    log::debug!("using probe API at {}", client.base_url());
    client
}
