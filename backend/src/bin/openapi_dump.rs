//! Print the OpenAPI document as JSON, or YAML with `--yaml`.

use std::io::{self, Write};

use clap::Parser;
use fuelroute::doc::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the fuel route planner OpenAPI document")]
struct Cli {
    /// Emit YAML instead of JSON.
    #[arg(long)]
    yaml: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let doc = ApiDoc::openapi();
    let rendered = if cli.yaml {
        doc.to_yaml().map_err(io::Error::other)?
    } else {
        doc.to_pretty_json().map_err(io::Error::other)?
    };
    writeln!(io::stdout().lock(), "{rendered}")
}
