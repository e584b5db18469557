use reminder_core::ConfigError;
use std::path::Path;

/// Parse and validate `config.toml`, printing any issues.
///
/// Returns `true` when the configuration is usable (no fatal errors).
pub fn validate(config_dir: &Path) -> bool {
    match reminder_config::load(config_dir) {
        Ok((catalogue, _general)) => {
            println!("Config OK ({})", config_dir.join("config.toml").display());
            println!("{} reminder(s) configured:", catalogue.len());
            for def in catalogue.iter() {
                println!("  - {}: {}", def.name, def.schedule);
            }
            true
        }
        Err(err) => {
            print_error(&err);
            false
        }
    }
}

/// Dump the resolved general settings (with defaults filled in) as TOML.
pub fn show(config_dir: &Path) {
    match reminder_config::load(config_dir) {
        Ok((_, general)) => match toml::to_string_pretty(&TomlGeneral::from(&general)) {
            Ok(output) => print!("{output}"),
            Err(e) => {
                eprintln!("failed to serialize general settings: {e}");
                std::process::exit(1);
            }
        },
        Err(err) => {
            print_error(&err);
            std::process::exit(1);
        }
    }
}

fn print_error(err: &ConfigError) {
    eprintln!("[ERROR] {err}");
}

/// A serializable mirror of `GeneralSettings` for `config show`.
/// `GeneralSettings` only derives `Deserialize` (it is a read path); this
/// narrow wrapper keeps `Serialize` out of the core data model.
#[derive(serde::Serialize)]
struct TomlGeneral {
    text_font: String,
    text_size: u32,
    icon_scale: f64,
    max_opacity: f64,
    fade_in_duration: u32,
    fade_out_duration: u32,
}

impl From<&reminder_core::GeneralSettings> for TomlGeneral {
    fn from(g: &reminder_core::GeneralSettings) -> Self {
        Self {
            text_font: g.text_font.clone(),
            text_size: g.text_size,
            icon_scale: g.icon_scale,
            max_opacity: g.max_opacity,
            fade_in_duration: g.fade_in_duration,
            fade_out_duration: g.fade_out_duration,
        }
    }
}
