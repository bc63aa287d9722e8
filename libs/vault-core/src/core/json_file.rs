use std::{
    fs::File,
    io::{BufReader, Read, Write},
};

use eyre::Context;
use serde::{Deserialize, Serialize};

/// Read bytes from file - synchronous version
pub fn read_file(path: &str) -> eyre::Result<Vec<u8>> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {}", path))?;
    let mut reader = BufReader::new(file);
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Read from json file - synchronous version
pub fn read_from_json_file<T: for<'a> Deserialize<'a>>(path: &str) -> eyre::Result<T> {
    let data = read_file(path)?;
    let value: T =
        serde_json::from_slice(&data).with_context(|| format!("Failed to parse file: {}", path))?;
    Ok(value)
}

/// Write to json file - synchronous version
pub fn write_json_to_file<T: Serialize>(path: &str, data: &T) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    let mut file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path))?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
