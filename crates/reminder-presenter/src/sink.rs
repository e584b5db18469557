//! The surface the presenter coordinator drives. The overlay window
//! itself — rendering, animation, input — is an external collaborator;
//! this trait is the only contract the core depends on.

use std::path::Path;

/// Renders one reminder and (conceptually) collects the user's response.
/// Implementations report responses back through [`super::Presenter`]'s
/// `on_user_complete`/`on_user_snooze`, not through this trait — the
/// trait only covers the present direction.
pub trait PresenterSink {
    fn present(&mut self, name: &str, icon_path: &Path, snooze_seconds: u64, text: Option<&str>);
}
