use std::path::{Path, PathBuf};

pub static TEMPLATE_PATH_ENV: &str = "TEMPLATE_PATH";
static TEMPLATE_FILE: &str = "config/newsletter_template.html";

/// `TEMPLATE_PATH` when set, otherwise the first existing
/// `config/newsletter_template.html` beside the executable, under the working
/// directory, or under the working directory's `libs/api`.
pub fn default_path() -> PathBuf {
    let override_path = std::env::var_os(TEMPLATE_PATH_ENV).map(PathBuf::from);

    let mut roots = Vec::new();
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(dir);
    }
    if let Ok(dir) = std::env::current_dir() {
        roots.push(dir.clone());
        roots.push(dir.join("libs").join("api"));
    }

    resolve_path(override_path, &roots)
}

/// A missing template is not an error here; `/generate` reports it per
/// request.
pub fn resolve_path(
    override_path: Option<PathBuf>,
    roots: &[PathBuf],
) -> PathBuf {
    if let Some(path) = override_path {
        return path;
    }

    let candidates = roots
        .iter()
        .map(|root| root.join(TEMPLATE_FILE))
        .collect::<Vec<_>>();
    candidates
        .iter()
        .find(|path| path.is_file())
        .or(candidates.first())
        .cloned()
        .unwrap_or_else(|| PathBuf::from(TEMPLATE_FILE))
}

/// Read on every call; the template is never cached.
pub async fn load(path: &Path) -> std::io::Result<String> {
    tokio::fs::read_to_string(path).await
}
