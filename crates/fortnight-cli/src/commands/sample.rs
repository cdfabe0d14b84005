use fortnight_core::error::FortnightError;
use fortnight_core::export;
use fortnight_core::model::ParseOutcome;
use fortnight_core::sample::sample_entries;

use crate::output;

pub fn run(output_format: &str) -> Result<(), FortnightError> {
    let entries = sample_entries();
    match output_format {
        "json" => output::json::print(&entries)?,
        "table" => {
            let outcome = ParseOutcome {
                total_rows_considered: entries.len(),
                valid_entries: entries,
                errors: vec![],
            };
            print!("{}", output::table::format_outcome(&outcome));
        }
        _ => print!("{}", export::to_csv(&entries)),
    }
    Ok(())
}
