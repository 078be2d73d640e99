use bookrecon_core::error::ReconError;
use serde_json::Value;

pub fn print(value: &Value) -> Result<(), ReconError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
