use crate::cli::args::{CliArgs, Command};

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(key) = args.key.as_deref() {
        if key.trim().is_empty() {
            return Err("invalid --key, expected a non-empty storage key".to_string());
        }
    }
    if let Some(raw) = args.date_format.as_deref() {
        if !crate::admin::is_valid_date_format(raw) {
            return Err(format!("invalid --date-format '{raw}'"));
        }
    }
    match &args.command {
        Command::Gallery(gallery) => {
            if let Some(raw) = gallery.format.as_deref() {
                if crate::output::OutputFormat::parse(raw).is_none() {
                    return Err(format!(
                        "invalid --format '{raw}', expected text, json or html"
                    ));
                }
            }
        }
        Command::Delete(delete) => {
            if let Some(raw) = delete.id.as_deref() {
                raw.parse::<crate::record::RecordId>()
                    .map_err(|e| format!("invalid --id '{raw}': {e}"))?;
            }
        }
        _ => {}
    }
    Ok(())
}
