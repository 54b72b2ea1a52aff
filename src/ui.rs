// Terminal output helpers: the instance-URI prompt, progress spinners for
// transfers, and the aligned table for listings.

use crate::api::RemoteFile;
use crate::error::Result;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Blocking single-line prompt for an instance URI. The gate trims the
/// returned value before using it.
pub fn prompt_instance_uri() -> Result<String> {
    let uri: String = Input::new()
        .with_prompt("Instance URI not set. Please enter your instance URI")
        .interact_text()?;
    Ok(uri)
}

/// Spinner shown while a blocking transfer is in flight.
pub fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Print the listing as a table with columns sized to their widest value.
pub fn print_file_table(files: &[RemoteFile]) {
    let headers = ["KEY", "SIZE", "LAST MODIFIED", "STORAGE CLASS", "OWNER"];
    let rows: Vec<[String; 5]> = files
        .iter()
        .map(|f| {
            [
                f.key.clone(),
                f.size.to_string(),
                f.last_modified.clone(),
                f.storage_class.clone(),
                f.owner.display_name.clone(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let print_row = |cells: &[&str]| {
        let line = cells
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line.trim_end());
    };

    print_row(&headers);
    let separators: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    print_row(&separators.iter().map(String::as_str).collect::<Vec<_>>());
    for row in &rows {
        print_row(&row.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
