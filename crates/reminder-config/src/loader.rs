//! Reads and validates `config.toml`, producing an immutable catalogue of
//! reminder definitions plus the general presentation settings.

use crate::Catalogue;
use reminder_core::{cron, ConfigError, ConfigResult, GeneralSettings, ReminderDefinition};
use std::path::Path;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Read `<dir>/config.toml` and parse it into a catalogue plus general
/// settings. Missing required keys or an invalid schedule are fatal;
/// a missing icon file is only warned about (logged, not returned).
pub fn load(dir: &Path) -> ConfigResult<(Catalogue, GeneralSettings)> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Err(ConfigError::Missing(path));
    }

    let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;

    let table: toml::Table = toml::from_str(&raw).map_err(|source| ConfigError::Toml {
        path: path.clone(),
        source,
    })?;

    let mut catalogue = Catalogue::new();
    let mut general = GeneralSettings::default();

    for (name, value) in table.iter() {
        let Some(section) = value.as_table() else {
            // Non-table top-level entries are ignored.
            continue;
        };

        if name == "general" {
            general = toml::Value::Table(section.clone())
                .try_into()
                .map_err(|source| ConfigError::Toml {
                    path: path.clone(),
                    source,
                })?;
            continue;
        }

        let definition = parse_reminder(name, section, dir)?;
        catalogue.insert(definition);
    }

    Ok((catalogue, general))
}

fn parse_reminder(
    name: &str,
    section: &toml::Table,
    config_dir: &Path,
) -> ConfigResult<ReminderDefinition> {
    let schedule_str = section
        .get("schedule")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ConfigError::MissingKey {
            name: name.to_string(),
            key: "schedule",
        })?;

    let icon = section
        .get("icon")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ConfigError::MissingKey {
            name: name.to_string(),
            key: "icon",
        })?;

    let schedule =
        cron::parse(schedule_str).map_err(|source| ConfigError::InvalidSchedule {
            name: name.to_string(),
            schedule: schedule_str.to_string(),
            source,
        })?;

    let icon_ref = config_dir.join(icon);
    if !icon_ref.exists() {
        tracing::warn!(reminder = name, icon = %icon_ref.display(), "icon file not found, presenter will fall back to text");
    }

    let snooze_seconds = section
        .get("snooze_duration")
        .and_then(|v| v.as_integer())
        .map(|n| n.max(0) as u64)
        .unwrap_or(reminder_core::DEFAULT_SNOOZE_SECONDS);

    let text = section
        .get("text")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    Ok(ReminderDefinition::new(
        name, schedule, icon_ref, snooze_seconds, text,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_config(dir: &Path, contents: &str) {
        fs::write(dir.join(CONFIG_FILE_NAME), contents).unwrap();
    }

    #[test]
    fn missing_file_is_config_missing() {
        let dir = tempdir().unwrap();
        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn loads_general_defaults_when_section_absent() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
            [water_break]
            schedule = "0 * * * *"
            icon = "water.png"
            "#,
        );
        let (catalogue, general) = load(dir.path()).unwrap();
        assert_eq!(general, GeneralSettings::default());
        assert_eq!(catalogue.len(), 1);
        let def = catalogue.get("water_break").unwrap();
        assert_eq!(def.snooze_seconds, 300);
        assert!(def.text.is_none());
    }

    #[test]
    fn loads_general_overrides() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
            [general]
            text_font = "Monospace"
            text_size = 32

            [water_break]
            schedule = "0 * * * *"
            icon = "water.png"
            "#,
        );
        let (_, general) = load(dir.path()).unwrap();
        assert_eq!(general.text_font, "Monospace");
        assert_eq!(general.text_size, 32);
        // Unset fields still fall back to their documented defaults.
        assert_eq!(general.icon_scale, 1.0);
    }

    #[test]
    fn reminder_named_general_never_produces_a_definition() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
            [general]
            text_size = 30
            "#,
        );
        let (catalogue, _) = load(dir.path()).unwrap();
        assert!(catalogue.is_empty());
        assert!(catalogue.get("general").is_none());
    }

    #[test]
    fn missing_schedule_is_fatal() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
            [water_break]
            icon = "water.png"
            "#,
        );
        let err = load(dir.path()).unwrap_err();
        match err {
            ConfigError::MissingKey { name, key } => {
                assert_eq!(name, "water_break");
                assert_eq!(key, "schedule");
            }
            other => panic!("expected MissingKey, got {other:?}"),
        }
    }

    #[test]
    fn missing_icon_key_is_fatal() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
            [water_break]
            schedule = "0 * * * *"
            "#,
        );
        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { key: "icon", .. }));
    }

    #[test]
    fn invalid_schedule_is_fatal_and_names_the_reminder() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
            [water_break]
            schedule = "bogus"
            icon = "water.png"
            "#,
        );
        let err = load(dir.path()).unwrap_err();
        match err {
            ConfigError::InvalidSchedule { name, .. } => assert_eq!(name, "water_break"),
            other => panic!("expected InvalidSchedule, got {other:?}"),
        }
    }

    #[test]
    fn missing_icon_file_is_a_warning_not_an_error() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
            [water_break]
            schedule = "0 * * * *"
            icon = "does-not-exist.png"
            "#,
        );
        let (catalogue, _) = load(dir.path()).unwrap();
        assert_eq!(catalogue.len(), 1);
    }

    #[test]
    fn icon_path_is_joined_to_config_dir() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
            [water_break]
            schedule = "0 * * * *"
            icon = "water.png"
            "#,
        );
        let (catalogue, _) = load(dir.path()).unwrap();
        let def = catalogue.get("water_break").unwrap();
        assert_eq!(def.icon_ref, dir.path().join("water.png"));
    }

    #[test]
    fn preserves_insertion_order() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
            [zebra]
            schedule = "0 * * * *"
            icon = "z.png"

            [alpha]
            schedule = "0 * * * *"
            icon = "a.png"
            "#,
        );
        let (catalogue, _) = load(dir.path()).unwrap();
        let names: Vec<&str> = catalogue.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["zebra", "alpha"]);
    }

    #[test]
    fn malformed_toml_is_reported() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "this is not valid toml [[[");
        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }
}
