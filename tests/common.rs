//! Shared test host for HTTP integration tests.
//!
//! Builds the real router over temporary storage and drives it in-process
//! with `tower::ServiceExt::oneshot`, so no port is bound.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use catalog::CatalogService;
use catalog::config::{BackendKind, Config};
use http_body_util::BodyExt;
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "catalog-test-boundary";
pub const PLACEHOLDER_BYTES: &[u8] = b"\xFF\xD8placeholder\xFF\xD9";

/// Router plus the temporary directory holding its storage.
pub struct TestHost {
    router: Router,
    pub config: Config,
    dir: TempDir,
}

pub struct TestHostBuilder {
    backend: BackendKind,
    max_upload_bytes: Option<usize>,
    placeholder: bool,
    dir: Option<TempDir>,
}

impl TestHost {
    pub fn builder() -> TestHostBuilder {
        TestHostBuilder {
            backend: BackendKind::Snapshot,
            max_upload_bytes: None,
            placeholder: true,
            dir: None,
        }
    }

    pub fn images_dir(&self) -> PathBuf {
        self.config.storage.images_dir.clone()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    /// Posts a multipart form; each part is `(field, filename, bytes)`.
    pub async fn post_form(&self, parts: &[(&str, Option<&str>, &[u8])]) -> Response<Body> {
        let request = Request::post("/items")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        self.send(request).await
    }

    pub async fn add_item(&self, name: &str, category: &str, image: &[u8]) -> serde_json::Value {
        let response = self
            .post_form(&[
                ("name", None, name.as_bytes()),
                ("category", None, category.as_bytes()),
                ("image", Some("photo.jpg"), image),
            ])
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await
    }
}

impl TestHostBuilder {
    pub fn backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = Some(limit);
        self
    }

    pub fn without_placeholder(mut self) -> Self {
        self.placeholder = false;
        self
    }

    /// Reuses storage from an earlier host (simulates a restart).
    pub fn dir(mut self, dir: TempDir) -> Self {
        self.dir = Some(dir);
        self
    }

    pub async fn start(self) -> TestHost {
        let dir = match self.dir {
            Some(dir) => dir,
            None => TempDir::new().unwrap(),
        };

        let mut config = Config::default();
        config.storage.backend = self.backend;
        config.storage.images_dir = dir.path().join("images");
        config.storage.snapshot_path = dir.path().join("items.json");
        config.storage.database_path = dir.path().join("db").join("catalog.sqlite3");
        if let Some(limit) = self.max_upload_bytes {
            config.server.max_upload_bytes = limit;
        }

        if self.placeholder {
            std::fs::create_dir_all(&config.storage.images_dir).unwrap();
            std::fs::write(
                config.storage.images_dir.join("default.jpg"),
                PLACEHOLDER_BYTES,
            )
            .unwrap();
        }

        let service = CatalogService::open(&config.storage).await.unwrap();
        let router = catalog::http::router(service, &config.server).unwrap();

        TestHost {
            router,
            config,
            dir,
        }
    }
}

impl TestHost {
    /// Stops the host and hands back its storage directory.
    pub fn into_dir(self) -> TempDir {
        self.dir
    }
}

pub fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: image/jpeg\r\n\r\n"
                    )
                    .as_bytes(),
                );
            },
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            },
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Failed to parse JSON")
}
