use crate::error::CliError;
use serde::Serialize;

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.map_err(CliError::JsonSerialize)
}

pub async fn emit<T: Serialize>(
    value: &T,
    pretty: bool,
    path: Option<String>,
) -> Result<(), CliError> {
    let json = to_json(value, pretty)?;
    match path {
        Some(path) => tokio::fs::write(path, json).await?,
        None => println!("{json}"),
    }
    Ok(())
}
