use eyre::Context;
use serde::{Deserialize, Serialize};
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncWriteExt},
};

/// Read bytes from file - asynchronous version
pub async fn read_file_async(path: &str) -> eyre::Result<Vec<u8>> {
    let mut file = File::open(path)
        .await
        .with_context(|| format!("Failed to open file: {}", path))?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer).await?;
    Ok(buffer)
}

/// Read from json file - asynchronous version
pub async fn read_from_json_file_async<T: for<'a> Deserialize<'a>>(path: &str) -> eyre::Result<T> {
    let data = read_file_async(path).await?;
    let value: T =
        serde_json::from_slice(&data).with_context(|| format!("Failed to parse file: {}", path))?;
    Ok(value)
}

/// Write to json file - asynchronous version
pub async fn write_json_to_file_async<T: Serialize>(path: &str, data: &T) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    let mut file = File::create(path)
        .await
        .with_context(|| format!("Failed to create file: {}", path))?;
    file.write_all(json.as_bytes()).await?;
    Ok(())
}
