use gridcast_core::error::GridError;
use serde::Serialize;
use std::path::Path;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), GridError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

pub fn write<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), GridError> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}
