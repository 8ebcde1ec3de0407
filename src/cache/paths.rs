// Cache path utilities.
// Constructs filesystem paths for cached server responses, keyed by server.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/warden on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "warden").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to a server's cache directory.
pub fn server_dir(server_url: &str) -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("servers").join(sanitize_name(server_url)))
}

/// Path to a server's cached configuration list.
pub fn configs_path(server_url: &str) -> Option<PathBuf> {
    server_dir(server_url).map(|dir| dir.join("configs.json"))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
