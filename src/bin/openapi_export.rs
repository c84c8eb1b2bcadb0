//! Prints the OpenAPI document, error envelope schema included.

use anyhow::{Context, Result};
use repositorios_api::api::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    let json = serde_json::to_string_pretty(&ApiDoc::openapi())
        .context("Failed to serialize OpenAPI document to JSON")?;

    println!("{}", json);

    Ok(())
}
