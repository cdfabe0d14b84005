use fortnight_core::error::FortnightError;
use fortnight_core::export;
use fortnight_core::normalize;
use std::path::PathBuf;

use crate::commands::{import, OptionArgs};
use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    option_args: OptionArgs,
    dedupe: bool,
) -> Result<(), FortnightError> {
    let options = option_args.resolve()?;
    let mut outcome = import(&input_file, &options)?;

    if dedupe {
        let before = outcome.valid_entries.len();
        outcome.valid_entries = normalize::dedupe(std::mem::take(&mut outcome.valid_entries));
        let dropped = before - outcome.valid_entries.len();
        if dropped > 0 {
            eprintln!("  {dropped} duplicate entries dropped");
        }
    }

    let output_str = match output_format {
        "json" => serde_json::to_string_pretty(&outcome)? + "\n",
        "csv" => export::to_csv(&outcome.valid_entries),
        _ => output::table::format_outcome(&outcome),
    };

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&outcome)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Parsed {} entries from {} row(s), written to {}",
                outcome.success_count(),
                outcome.total_rows_considered,
                path.display()
            );
            for e in &outcome.errors {
                eprintln!("  error: {e}");
            }
        }
        None => {
            print!("{output_str}");
        }
    }

    Ok(())
}
