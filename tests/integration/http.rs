//! Pipeline and CLI behavior against a mock Maven repository

use assert_cmd::cargo::cargo_bin_cmd;
use depinject::context::{AppendToSearchPath, SearchPath};
use depinject::{Coordinate, ErrorKind, Pipeline, Repository};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JAR: &[u8] = b"PK\x03\x04 pretend this is a jar";

fn coordinate(server: &MockServer, shorthand: &str) -> Coordinate {
    let repo = Repository::new(format!("{}/maven2", server.uri())).unwrap();
    Coordinate::parse_with_repository(shorthand, repo).unwrap()
}

async fn serve(server: &MockServer, artifact_path: &str, status: u16, times: u64) {
    Mock::given(method("GET"))
        .and(path(artifact_path))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(JAR.to_vec()))
        .expect(times)
        .mount(server)
        .await;
}

fn pipeline(dir: &TempDir) -> Pipeline<AppendToSearchPath> {
    Pipeline::builder(AppendToSearchPath)
        .cache_root(dir.path().join("cache"))
        .build()
        .unwrap()
}

fn part_files(dir: &Path) -> usize {
    if !dir.exists() {
        return 0;
    }
    fs::read_dir(dir)
        .unwrap()
        .filter(|e| {
            e.as_ref()
                .unwrap()
                .file_name()
                .to_string_lossy()
                .ends_with(".part")
        })
        .count()
}

#[tokio::test(flavor = "multi_thread")]
async fn fetches_once_then_hits_cache() {
    let server = MockServer::start().await;
    serve(&server, "/maven2/org/example/lib/1.0.0/lib-1.0.0.jar", 200, 1).await;

    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    let c = coordinate(&server, "org.example:lib:1.0.0");

    let (first, second, target) = tokio::task::spawn_blocking(move || {
        let target = SearchPath::new();
        let first = pipeline.inject(&c, &target).unwrap();
        let second = pipeline.inject(&c, &target).unwrap();
        (first, second, target)
    })
    .await
    .unwrap();

    assert!(!first.was_cache_hit());
    assert!(second.was_cache_hit());
    assert_eq!(first.fetched.as_ref().map(|f| f.bytes), Some(JAR.len() as u64));
    assert_eq!(target.entries(), [first.path.clone()]);
    assert!(first
        .path
        .ends_with("cache/org/example/lib/1.0.0/lib-1.0.0.jar"));
}

#[tokio::test(flavor = "multi_thread")]
async fn cached_copy_matches_direct_download() {
    let server = MockServer::start().await;
    serve(&server, "/maven2/org/example/lib/2.0/lib-2.0.jar", 200, 2).await;

    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    let c = coordinate(&server, "org.example:lib:2.0");

    let (cached, direct) = tokio::task::spawn_blocking(move || {
        let cached = pipeline.ensure(&c).unwrap();
        let direct = ureq::get(cached.url.as_str())
            .call()
            .unwrap()
            .body_mut()
            .read_to_vec()
            .unwrap();
        (cached, direct)
    })
    .await
    .unwrap();

    assert_eq!(fs::read(&cached.path).unwrap(), direct);
}

#[tokio::test(flavor = "multi_thread")]
async fn not_found_is_download_failure() {
    let server = MockServer::start().await;
    serve(&server, "/maven2/org/example/missing/1.0/missing-1.0.jar", 404, 1).await;

    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    let c = coordinate(&server, "org.example:missing:1.0");
    let expected_path = pipeline.cache().path_for(&c);

    let err = tokio::task::spawn_blocking(move || pipeline.ensure(&c).unwrap_err())
        .await
        .unwrap();

    assert_eq!(err.kind(), Some(ErrorKind::DependencyDownloadFailure));
    assert!(err.to_string().contains("HTTP 404"));
    assert!(err.to_string().contains("missing-1.0"));
    assert!(!expected_path.exists());
    assert_eq!(part_files(expected_path.parent().unwrap()), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_requests_download_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maven2/org/example/lib/3.0/lib-3.0.jar"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(JAR.to_vec())
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let pipeline = Arc::new(pipeline(&dir));
    let target = SearchPath::new();
    let c = coordinate(&server, "org.example:lib:3.0");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pipeline = Arc::clone(&pipeline);
            let target = target.clone();
            let c = c.clone();
            tokio::task::spawn_blocking(move || pipeline.inject(&c, &target))
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let path = pipeline.cache().path_for(&c);
    assert_eq!(fs::read(&path).unwrap(), JAR);
    assert_eq!(target.len(), 1);
    assert_eq!(part_files(path.parent().unwrap()), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn inject_all_stops_at_first_failure() {
    let server = MockServer::start().await;
    serve(&server, "/maven2/org/example/one/1.0/one-1.0.jar", 200, 1).await;
    serve(&server, "/maven2/org/example/two/1.0/two-1.0.jar", 500, 1).await;
    serve(&server, "/maven2/org/example/three/1.0/three-1.0.jar", 200, 0).await;

    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    let coordinates: Vec<_> = ["org.example:one:1.0", "org.example:two:1.0", "org.example:three:1.0"]
        .iter()
        .map(|s| coordinate(&server, s))
        .collect();

    let (err, target) = tokio::task::spawn_blocking(move || {
        let target = SearchPath::new();
        let err = pipeline.inject_all(&coordinates, &target).unwrap_err();
        (err, target)
    })
    .await
    .unwrap();

    assert_eq!(err.kind(), Some(ErrorKind::DependencyDownloadFailure));
    assert!(err.to_string().contains("HTTP 500"));
    assert_eq!(target.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_classpath_downloads_and_prints() {
    let server = MockServer::start().await;
    serve(&server, "/maven2/org/example/lib/1.0.0/lib-1.0.0.jar", 200, 1).await;

    let dir = TempDir::new().unwrap();
    let repo = format!("{}/maven2", server.uri());
    let config = dir.path().join("config.toml");
    let cache = dir.path().join("cache");

    let assert = tokio::task::spawn_blocking(move || {
        cargo_bin_cmd!("depinject")
            .env("DEPINJECT_CONFIG", &config)
            .args(["--cache-dir"])
            .arg(&cache)
            .args(["classpath", "org.example:lib:1.0.0", "-r", &repo])
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("org/example/lib/1.0.0/lib-1.0.0.jar"));
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn cli_exec_extends_child_environment() {
    let server = MockServer::start().await;
    serve(&server, "/maven2/org/example/lib/1.0.0/lib-1.0.0.jar", 200, 1).await;

    let dir = TempDir::new().unwrap();
    let repo = format!("{}/maven2", server.uri());
    let config = dir.path().join("config.toml");
    let cache = dir.path().join("cache");

    let assert = tokio::task::spawn_blocking(move || {
        cargo_bin_cmd!("depinject")
            .env("DEPINJECT_CONFIG", &config)
            .env_remove("DEPINJECT_EXEC_TEST_PATH")
            .arg("--cache-dir")
            .arg(&cache)
            .args([
                "exec",
                "org.example:lib:1.0.0",
                "-r",
                &repo,
                "--var",
                "DEPINJECT_EXEC_TEST_PATH",
                "--",
                "sh",
                "-c",
                "echo \"$DEPINJECT_EXEC_TEST_PATH\"; exit 3",
            ])
            .assert()
    })
    .await
    .unwrap();

    assert
        .code(3)
        .stdout(predicate::str::contains("lib-1.0.0.jar"));
}
