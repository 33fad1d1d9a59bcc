//! Party Printout API server binary
//!
//! Upload a booking workbook over HTTP and fetch its printout.

use clap::Parser;
use party_printout::api::{run_api_server, ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "party-printout-server")]
#[command(version)]
#[command(about = "Party Printout server - upload a Day Printout workbook, get the party printout")]
#[command(long_about = r#"
Party Printout server

Endpoints:
  - POST /api/v1/upload    - Upload a booking workbook (raw bytes in the body)
  - GET  /api/v1/printout  - Current printout (idle, loaded or failed)
  - POST /api/v1/reset     - Clear the current printout
  - GET  /api/v1/export    - Download the printout as parties.xlsx

Additional endpoints:
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Example usage:
  party-printout-server
  party-printout-server --host 0.0.0.0 --port 3000

  curl -X POST http://localhost:8080/api/v1/upload --data-binary @bookings.xlsx
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "PARTY_PRINTOUT_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "PARTY_PRINTOUT_PORT")]
    port: u16,

    /// Largest accepted upload, in megabytes (1-1024)
    #[arg(
        long,
        default_value = "20",
        env = "PARTY_PRINTOUT_MAX_UPLOAD_MB",
        value_parser = clap::value_parser!(u16).range(1..=1024)
    )]
    max_upload_mb: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        max_upload_bytes: ApiConfig::upload_limit_from_mb(usize::from(args.max_upload_mb)),
    };

    run_api_server(config).await
}
