//! Static front-end bundle.

use std::path::Path;

use tower_http::services::ServeDir;

/// Serves files under `web_dir`. Directory paths (including `/`) resolve
/// to their `index.html`; missing files are a plain 404.
pub fn serve_dir(web_dir: &Path) -> ServeDir {
    ServeDir::new(web_dir).append_index_html_on_directories(true)
}
