//! Config command implementation.

use anyhow::{Context, Result};
use shiftlabel_lib::prelude::*;

/// Print the effective settings, after the settings file is applied.
pub(crate) fn show_config(settings: &Settings) -> Result<()> {
    let text = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
    print!("{text}");

    if let Err(err) = settings.validate() {
        eprintln!("warning: these settings are invalid: {err}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_round_trip() {
        let text = toml::to_string_pretty(&Settings::default()).unwrap();
        assert!(text.contains("[label]"));
        assert_eq!(Settings::from_toml_str(&text).unwrap(), Settings::default());
    }
}
