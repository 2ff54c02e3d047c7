use std::{
    fs::{self},
    path::PathBuf,
};

use anyhow::Result;
use clap::Parser;
use ipv6geo_service::api::ApiDoc;
use utoipa::OpenApi;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Arg {
    /// File to write the OpenAPI document to
    #[arg(default_value = "openapi.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Arg::parse();

    let doc = ApiDoc::openapi().to_pretty_json()?;
    Ok(fs::write(args.output, doc)?)
}
