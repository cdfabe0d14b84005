use fortnight_core::error::FortnightError;
use fortnight_core::validate::validate;
use std::path::PathBuf;

use crate::commands::{import, OptionArgs};
use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    option_args: OptionArgs,
) -> Result<(), FortnightError> {
    let options = option_args.resolve()?;
    let outcome = import(&input_file, &options)?;
    let report = validate(&outcome.valid_entries);

    match output_format {
        "json" => output::json::print(&report)?,
        _ => {
            if outcome.has_errors() {
                println!("{} row(s) could not be imported:", outcome.error_count());
                for e in &outcome.errors {
                    println!("  {e}");
                }
                println!();
            }
            print!("{report}");
        }
    }

    Ok(())
}
