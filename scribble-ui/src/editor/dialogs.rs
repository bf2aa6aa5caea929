// Native file dialogs.

use std::path::{Path, PathBuf};

pub fn pick_open_path() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open")
        .add_filter("PNG Files", &["png"])
        .add_filter("All Files", &["*"])
        .pick_file()
}

/// Starts in the directory of `current`, when there is one.
pub fn pick_save_path(current: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Save As")
        .add_filter("PNG Files", &["png"])
        .add_filter("All Files", &["*"]);

    match current {
        Some(path) => {
            if let Some(dir) = path.parent() {
                dialog = dialog.set_directory(dir);
            }
            if let Some(name) = path.file_name() {
                dialog = dialog.set_file_name(name.to_string_lossy());
            }
        }
        None => dialog = dialog.set_file_name("untitled.png"),
    }

    dialog.save_file()
}
