//! Filesystem persistence for captured upstream responses.

use axum::http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Error type for capture persistence.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to create responses directory: {0}")]
    CreateDir(#[source] std::io::Error),

    #[error("failed to marshal response: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write response file: {0}")]
    Write(#[source] std::io::Error),
}

/// A persisted record of one upstream response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedResponse {
    pub service: String,
    pub path: String,
    pub timestamp: String,
    pub status_code: u16,
    pub headers: HashMap<String, Vec<String>>,
    pub body: String,
}

/// Writes response artifacts into a fixed directory.
#[derive(Debug, Clone)]
pub struct CaptureStore {
    dir: PathBuf,
}

impl CaptureStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist one response as a pretty-printed JSON artifact.
    ///
    /// `path` is the upstream request path ("/widgets"), or the empty
    /// string when the request targeted the upstream root. Returns the
    /// path of the written artifact.
    pub async fn save(
        &self,
        service: &str,
        path: &str,
        status: StatusCode,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<PathBuf, CaptureError> {
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f").to_string();

        let record = CapturedResponse {
            service: service.to_string(),
            path: path.to_string(),
            timestamp: timestamp.clone(),
            status_code: status.as_u16(),
            headers: headers_to_map(headers),
            body: String::from_utf8_lossy(body).into_owned(),
        };
        let json = serde_json::to_string_pretty(&record)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(CaptureError::CreateDir)?;

        let filename = self
            .dir
            .join(format!("{}-{}-{}.json", service, sanitize_path(path), timestamp));
        tokio::fs::write(&filename, json)
            .await
            .map_err(CaptureError::Write)?;

        tracing::info!(file = %filename.display(), "Response saved");
        Ok(filename)
    }
}

/// Make a request path usable as a filename component: '/' becomes
/// '_', and the empty path becomes the literal token "root".
fn sanitize_path(path: &str) -> String {
    if path.is_empty() {
        "root".to_string()
    } else {
        path.replace('/', "_")
    }
}

/// Flatten a header map into name → list-of-values, preserving
/// repeated headers. Non-UTF-8 values are replaced lossily.
fn headers_to_map(headers: &HeaderMap) -> HashMap<String, Vec<String>> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers.iter() {
        map.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn sanitize_replaces_slashes() {
        assert_eq!(sanitize_path("/widgets"), "_widgets");
        assert_eq!(sanitize_path("/a/b/c"), "_a_b_c");
    }

    #[test]
    fn sanitize_empty_path_is_root() {
        assert_eq!(sanitize_path(""), "root");
    }

    #[test]
    fn repeated_headers_are_kept() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", HeaderValue::from_static("a=1"));
        headers.append("set-cookie", HeaderValue::from_static("b=2"));
        headers.insert("content-type", HeaderValue::from_static("text/plain"));

        let map = headers_to_map(&headers);
        assert_eq!(map["set-cookie"], vec!["a=1", "b=2"]);
        assert_eq!(map["content-type"], vec!["text/plain"]);
    }

    #[tokio::test]
    async fn save_writes_a_json_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let store = CaptureStore::new(dir.path());

        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let file = store
            .save("api", "/widgets", StatusCode::CREATED, &headers, br#"{"ok":true}"#)
            .await
            .unwrap();

        let name = file.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("api-_widgets-"));
        assert!(name.ends_with(".json"));

        let content = std::fs::read_to_string(&file).unwrap();
        let record: CapturedResponse = serde_json::from_str(&content).unwrap();
        assert_eq!(record.service, "api");
        assert_eq!(record.path, "/widgets");
        assert_eq!(record.status_code, 201);
        assert_eq!(record.body, r#"{"ok":true}"#);
        assert_eq!(record.headers["content-type"], vec!["application/json"]);

        // camelCase field name on disk
        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(raw["statusCode"], 201);
    }

    #[tokio::test]
    async fn save_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("responses");
        let store = CaptureStore::new(&nested);

        store
            .save("api", "", StatusCode::OK, &HeaderMap::new(), b"ok")
            .await
            .unwrap();

        assert!(nested.is_dir());
        let name = std::fs::read_dir(&nested)
            .unwrap()
            .next()
            .unwrap()
            .unwrap()
            .file_name();
        assert!(name.to_str().unwrap().starts_with("api-root-"));
    }

    #[tokio::test]
    async fn saves_at_different_timestamps_never_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = CaptureStore::new(dir.path());

        store
            .save("api", "/widgets", StatusCode::OK, &HeaderMap::new(), b"one")
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store
            .save("api", "/widgets", StatusCode::OK, &HeaderMap::new(), b"two")
            .await
            .unwrap();

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }
}
