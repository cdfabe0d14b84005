use fortnight_core::error::FortnightError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), FortnightError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
