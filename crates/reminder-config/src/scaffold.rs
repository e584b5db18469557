//! Writes the example configuration used to bootstrap a fresh config
//! directory, matching the normative example in the external interface.

use std::io;
use std::path::Path;

const EXAMPLE_CONFIG: &str = r#"# Reminder System Configuration
# Place icon files alongside this file.

# General settings (optional — these are the defaults)
[general]
text_font = "Sans Serif"
text_size = 24
icon_scale = 1.0
max_opacity = 0.85
fade_in_duration = 2000
fade_out_duration = 500

[water_break]
schedule = "0 * * * *"
icon = "water.png"
snooze_duration = 300
text = "Time to drink some water!"

[stretch_break]
schedule = "30 9-17 * * 1-5"
icon = "stretch.png"
snooze_duration = 600
text = "Stand up and stretch for a minute"

[eye_rest]
schedule = "*/20 * * * *"
icon = "eye.png"
snooze_duration = 120
text = "Look at something 20 feet away for 20 seconds"
"#;

/// Create `dir` if needed and write `config.toml` with the example
/// template. Does not overwrite an existing file.
pub fn write_example(dir: &Path) -> io::Result<std::path::PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join("config.toml");
    if !path.exists() {
        std::fs::write(&path, EXAMPLE_CONFIG)?;
    }
    Ok(path)
}
