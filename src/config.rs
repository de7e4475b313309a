use std::path::PathBuf;

/// Server configuration.
///
/// The documentation root is fixed at startup and is deliberately not
/// configurable through environment variables or CLI flags: docs ship with
/// the package and are resolved relative to the installed location.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub docs_root: PathBuf,
}

impl ServerConfig {
    /// Locate the packaged documentation root.
    ///
    /// Prefers `static/react` next to the installed executable; falls back to
    /// the crate's own `static/react` for a development checkout.
    pub fn locate() -> Self {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let installed = dir.join("static").join("react");
                if installed.is_dir() {
                    return Self { docs_root: installed };
                }
            }
        }

        Self {
            docs_root: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("static")
                .join("react"),
        }
    }
}
