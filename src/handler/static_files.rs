//! Static file serving module
//!
//! Maps a request target onto the configured root directory and serves the
//! file, an index file, or a generated directory listing.

use crate::config::AppState;
use crate::http::{self, mime, path};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A request target resolved against the root directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedPath {
    pub path: PathBuf,
    /// The request path ended in `/`
    pub trailing_slash: bool,
}

/// Resolve a request target to a filesystem path under `root`.
///
/// Query and fragment are dropped and the path is percent-decoded. The path
/// is then normalized: `..` removes the segment before it (never past the
/// root), empty and `.` segments are skipped.
pub fn translate_path(root: &Path, target: &str) -> TranslatedPath {
    let (raw_path, _) = path::split_target(target);
    let decoded = path::decode_percent(raw_path);

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut resolved = root.to_path_buf();
    for segment in segments {
        // A segment that still names a parent (e.g. `a\b` on Windows) is skipped
        if Path::new(segment)
            .parent()
            .is_some_and(|p| !p.as_os_str().is_empty())
        {
            continue;
        }
        resolved.push(segment);
    }

    TranslatedPath {
        path: resolved,
        trailing_slash: raw_path.ends_with('/'),
    }
}

/// Serve a GET/HEAD request target from the root directory
pub async fn serve(state: &AppState, target: &str, is_head: bool) -> Response<Full<Bytes>> {
    let translated = translate_path(state.root_dir(), target);

    let Ok(metadata) = fs::metadata(&translated.path).await else {
        return http::build_404_response("File not found", is_head);
    };

    if metadata.is_dir() {
        if !translated.trailing_slash {
            return http::build_redirect_response(&directory_redirect(target));
        }

        for index_file in &state.settings.http.index_files {
            let index_path = translated.path.join(index_file);
            if fs::metadata(&index_path).await.is_ok_and(|m| m.is_file()) {
                return serve_file(&index_path, is_head).await;
            }
        }

        return serve_listing(&translated.path, target, is_head).await;
    }

    // A file cannot be addressed as a directory
    if translated.trailing_slash {
        return http::build_404_response("File not found", is_head);
    }

    serve_file(&translated.path, is_head).await
}

/// Location that adds the missing `/` to a directory path, keeping the query
fn directory_redirect(target: &str) -> String {
    let (raw_path, rest) = path::split_target(target);
    format!("{raw_path}/{rest}")
}

async fn serve_file(file_path: &Path, is_head: bool) -> Response<Full<Bytes>> {
    let content = match fs::read(file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_debug(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            return http::build_404_response("File not found", is_head);
        }
    };

    let last_modified = fs::metadata(file_path)
        .await
        .and_then(|m| m.modified())
        .ok()
        .map(http::date::format_http_date);

    http::build_file_response(
        Bytes::from(content),
        mime::content_type_for(file_path),
        last_modified.as_deref(),
        is_head,
    )
}

async fn serve_listing(dir: &Path, target: &str, is_head: bool) -> Response<Full<Bytes>> {
    match render_listing(dir, target).await {
        Ok(html) => http::build_listing_response(html, is_head),
        Err(e) => {
            logger::log_debug(&format!("Failed to list '{}': {e}", dir.display()));
            http::build_404_response("No permission to list directory", is_head)
        }
    }
}

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListingEntry {
    display_name: String,
    link_name: String,
}

async fn read_listing(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;

    while let Some(entry) = read_dir.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_symlink = entry.file_type().await.is_ok_and(|t| t.is_symlink());
        // Follows symlinks, so a link to a directory is listed as one
        let is_dir = fs::metadata(entry.path()).await.is_ok_and(|m| m.is_dir());

        let mut display_name = name.clone();
        let mut link_name = name;
        if is_dir {
            display_name.push('/');
            link_name.push('/');
        }
        if is_symlink {
            display_name = format!("{}@", display_name.trim_end_matches('/'));
        }

        entries.push(ListingEntry {
            display_name,
            link_name,
        });
    }

    entries.sort_by_key(|e| e.link_name.to_lowercase());
    Ok(entries)
}

/// Render the HTML listing for `dir`, titled with the decoded request target
pub async fn render_listing(dir: &Path, target: &str) -> std::io::Result<String> {
    let entries = read_listing(dir).await?;
    let title = format!(
        "Directory listing for {}",
        path::escape_html(&path::decode_percent(target))
    );

    let mut html = String::new();
    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>\n</head>\n<body>");
    let _ = writeln!(html, "<h1>{title}</h1>\n<hr>\n<ul>");
    for entry in &entries {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            path::encode_href(&entry.link_name),
            path::escape_html(&entry.display_name)
        );
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");

    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    async fn body_of(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[test]
    fn test_translate_path_stays_under_root() {
        let root = Path::new("/srv/www");
        let t = translate_path(root, "/../../etc/passwd");
        assert_eq!(t.path, PathBuf::from("/srv/www/etc/passwd"));

        let t = translate_path(root, "/docs/../../../etc/passwd");
        assert_eq!(t.path, PathBuf::from("/srv/www/etc/passwd"));

        let t = translate_path(root, "/%2e%2e/%2E%2E/secret");
        assert_eq!(t.path, PathBuf::from("/srv/www/secret"));
    }

    #[test]
    fn test_translate_path_normalizes_dot_segments() {
        let root = Path::new("/srv/www");
        let t = translate_path(root, "/a/%2e%2e/b/./c.txt?x=1#top");
        assert_eq!(t.path, PathBuf::from("/srv/www/b/c.txt"));
        assert!(!t.trailing_slash);

        let t = translate_path(root, "/sub/../file.txt");
        assert_eq!(t.path, PathBuf::from("/srv/www/file.txt"));

        let t = translate_path(root, "/a/b/..");
        assert_eq!(t.path, PathBuf::from("/srv/www/a"));
    }

    #[test]
    fn test_translate_path_trailing_slash_and_escapes() {
        let root = Path::new("/srv/www");
        let t = translate_path(root, "/docs/");
        assert_eq!(t.path, PathBuf::from("/srv/www/docs"));
        assert!(t.trailing_slash);

        let t = translate_path(root, "/my%20notes.txt");
        assert_eq!(t.path, PathBuf::from("/srv/www/my notes.txt"));

        let t = translate_path(root, "/");
        assert_eq!(t.path, PathBuf::from("/srv/www"));
        assert!(t.trailing_slash);
    }

    #[test]
    fn test_directory_redirect_keeps_query() {
        assert_eq!(directory_redirect("/docs"), "/docs/");
        assert_eq!(directory_redirect("/docs?page=2"), "/docs/?page=2");
    }

    #[tokio::test]
    async fn test_serves_file_bytes_with_type() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("style.css"), "body { color: red; }").unwrap();
        let state = AppState::new(dir.path(), Settings::default());

        let resp = serve(&state, "/style.css", false).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "text/css; charset=utf-8");
        assert!(resp.headers().contains_key("Last-Modified"));
        assert_eq!(body_of(resp).await, Bytes::from_static(b"body { color: red; }"));
    }

    #[tokio::test]
    async fn test_parent_segment_resolves_to_sibling_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("file.txt"), "top level").unwrap();
        let state = AppState::new(dir.path(), Settings::default());

        let resp = serve(&state, "/sub/../file.txt", false).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_of(resp).await, Bytes::from_static(b"top level"));
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(dir.path(), Settings::default());

        let resp = serve(&state, "/nope.html", false).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_file_with_trailing_slash_is_404() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("page.html"), "<p>hi</p>").unwrap();
        let state = AppState::new(dir.path(), Settings::default());

        let resp = serve(&state, "/page.html/", false).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_directory_without_slash_redirects() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        let state = AppState::new(dir.path(), Settings::default());

        let resp = serve(&state, "/docs", false).await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()["Location"], "/docs/");
    }

    #[tokio::test]
    async fn test_index_file_served_for_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.htm"), "fallback").unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>home</h1>").unwrap();
        let state = AppState::new(dir.path(), Settings::default());

        let resp = serve(&state, "/", false).await;
        assert_eq!(resp.headers()["Content-Type"], "text/html; charset=utf-8");
        assert_eq!(body_of(resp).await, Bytes::from_static(b"<h1>home</h1>"));
    }

    #[tokio::test]
    async fn test_listing_when_no_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b file.txt"), "b").unwrap();
        std::fs::write(dir.path().join("A.txt"), "a").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("<x>.txt"), "x").unwrap();
        let state = AppState::new(dir.path(), Settings::default());

        let resp = serve(&state, "/", false).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = String::from_utf8(body_of(resp).await.to_vec()).unwrap();

        assert!(html.contains("<title>Directory listing for /</title>"));
        assert!(html.contains("<li><a href=\"sub/\">sub/</a></li>"));
        assert!(html.contains("<li><a href=\"b%20file.txt\">b file.txt</a></li>"));
        assert!(html.contains("<li><a href=\"%3Cx%3E.txt\">&lt;x&gt;.txt</a></li>"));

        // case-insensitive order: <x>.txt, A.txt, b file.txt, sub/
        let a = html.find("A.txt").unwrap();
        let b = html.find("b file.txt").unwrap();
        let sub = html.find("sub/").unwrap();
        assert!(a < b && b < sub);
    }

    #[tokio::test]
    async fn test_head_file_has_length_but_no_body() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.json"), "{\"a\":1}").unwrap();
        let state = AppState::new(dir.path(), Settings::default());

        let resp = serve(&state, "/data.json", true).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Length"], "7");
        assert!(body_of(resp).await.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_listing_marks_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let html = render_listing(dir.path(), "/").await.unwrap();
        assert!(html.contains("<li><a href=\"link/\">link@</a></li>"));
        assert!(html.contains("<li><a href=\"real/\">real/</a></li>"));
    }
}
