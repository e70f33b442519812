//! Full pipeline runs (fetch → gate → sync → plan) against a mock server.
//! Everything stops short of handing the process over to the runtime.

use std::path::{Path, PathBuf};

use bootstrapper_lib::commands::{postinstall, prepare_launch, LaunchOptions};
use bootstrapper_lib::core::channel::Channel;
use bootstrapper_lib::core::error::{ErrorCategory, LauncherError};
use bootstrapper_lib::core::launch::{
    ArgSources, HardwareAccelerationMode, HostRuntime, LaunchStrategy,
};
use bootstrapper_lib::core::platform::HostPlatform;
use bootstrapper_lib::core::progress::LogProgress;
use bootstrapper_lib::core::state::{BootstrapConfig, LauncherPaths};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HELLO: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";
const WORLD: &str = "486ea46224d1bb4fb680f34f7c9ad96a8f24ec88be73ea8e5a6c65260e9cb8a7";

fn config(base: &Path, server: &MockServer, launcher: &str, runtime: &str) -> BootstrapConfig {
    BootstrapConfig {
        paths: LauncherPaths::new(base),
        launcher_version: launcher.into(),
        host: HostPlatform::new("Linux", "amd64"),
        runtime: HostRuntime {
            binary: PathBuf::from("java"),
            version: Some(runtime.into()),
        },
        entry_point: "net.example.Client".into(),
        manifest_url_override: Some(format!("{}/manifest", server.uri())),
    }
}

fn options(strategy: LaunchStrategy) -> LaunchOptions {
    LaunchOptions {
        channel: Channel::Stable,
        strategy,
        insecure_skip_tls_verification: false,
        use_jre_truststore: false,
        scale: None,
        mode: HardwareAccelerationMode::Off,
        args: ArgSources {
            passthrough: vec!["--world".into(), "301".into()],
            ..ArgSources::default()
        },
    }
}

async fn serve_manifest(server: &MockServer, manifest: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/manifest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(manifest))
        .mount(server)
        .await;
}

async fn forbid_artifact(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string("unexpected"))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn cached_artifact_is_used_without_downloading() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    let repo = home.path().join("repository");
    std::fs::create_dir_all(&repo).unwrap();
    std::fs::write(repo.join("b.jar"), "world").unwrap();
    std::fs::write(repo.join("stale.jar"), "old").unwrap();

    serve_manifest(
        &server,
        json!({
            "artifacts": [
                {
                    "name": "a.jar",
                    "path": format!("{}/a.jar", server.uri()),
                    "hash": HELLO,
                    "size": 5,
                    "platform": [{ "name": "Windows" }]
                },
                {
                    "name": "b.jar",
                    "path": format!("{}/b.jar", server.uri()),
                    "hash": WORLD,
                    "size": 5,
                    "platform": []
                }
            ]
        }),
    )
    .await;
    forbid_artifact(&server, "/a.jar").await;
    forbid_artifact(&server, "/b.jar").await;

    let cfg = config(home.path(), &server, "1.0.0", "17.0.9");
    let plan = prepare_launch(&cfg, &options(LaunchStrategy::ChildProcess), &LogProgress)
        .await
        .unwrap();

    let b = std::fs::canonicalize(repo.join("b.jar")).unwrap();
    assert_eq!(plan.classpath, b.to_string_lossy());
    assert!(!repo.join("stale.jar").exists());
    assert!(!repo.join("a.jar").exists());
    assert_eq!(plan.entry_point, "net.example.Client");
    assert_eq!(plan.args, vec!["--world", "301"]);

    let vm_args = read_vm_args(home.path());
    assert_eq!(vm_args["vmArgs"], json!(plan.properties.parameters));
}

fn read_vm_args(home: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(home.join("launcher_vmargs.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn missing_artifact_is_downloaded_and_verified() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    serve_manifest(
        &server,
        json!({
            "requiredRuntimeVersion": "11",
            "artifacts": [{
                "name": "client.jar",
                "path": format!("{}/client.jar", server.uri()),
                "hash": HELLO,
                "size": 5
            }]
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/client.jar"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = config(home.path(), &server, "1.0.0", "17.0.9");
    prepare_launch(&cfg, &options(LaunchStrategy::ChildProcess), &LogProgress)
        .await
        .unwrap();

    let cached = home.path().join("repository").join("client.jar");
    assert_eq!(std::fs::read_to_string(cached).unwrap(), "hello");
}

#[tokio::test]
async fn corrupted_download_fails_final_verification() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    serve_manifest(
        &server,
        json!({
            "artifacts": [{
                "name": "client.jar",
                "path": format!("{}/client.jar", server.uri()),
                "hash": HELLO,
                "size": 5
            }]
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/client.jar"))
        .respond_with(ResponseTemplate::new(200).set_body_string("tampered"))
        .mount(&server)
        .await;

    let cfg = config(home.path(), &server, "1.0.0", "17.0.9");
    let err = prepare_launch(&cfg, &options(LaunchStrategy::ChildProcess), &LogProgress)
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Verification);
}

#[tokio::test]
async fn old_runtime_aborts_before_any_artifact_request() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    serve_manifest(
        &server,
        json!({
            "requiredRuntimeVersion": "17",
            "artifacts": [{
                "name": "client.jar",
                "path": format!("{}/client.jar", server.uri()),
                "hash": HELLO,
                "size": 5
            }]
        }),
    )
    .await;
    forbid_artifact(&server, "/client.jar").await;

    let cfg = config(home.path(), &server, "1.0.0", "11");
    let err = prepare_launch(&cfg, &options(LaunchStrategy::InProcess), &LogProgress)
        .await
        .unwrap_err();

    assert!(matches!(err, LauncherError::RuntimeTooOld { .. }));
    assert_eq!(err.category(), ErrorCategory::VersionIncompatible);
    assert!(!home.path().join("repository").join("client.jar").exists());
    assert!(!home.path().join("launcher_vmargs.json").exists());
}

#[tokio::test]
async fn postinstall_writes_vm_args_without_gating() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    serve_manifest(
        &server,
        json!({
            "requiredRuntimeVersion": "17",
            "minimumLauncherVersion": "2.0.0",
            "artifacts": [{
                "name": "client.jar",
                "path": format!("{}/client.jar", server.uri()),
                "hash": HELLO,
                "size": 5
            }]
        }),
    )
    .await;
    forbid_artifact(&server, "/client.jar").await;

    let cfg = config(home.path(), &server, "1.9.9", "11");
    postinstall(&cfg, &options(LaunchStrategy::ChildProcess))
        .await
        .unwrap();

    let vm_args = read_vm_args(home.path());
    let args = vm_args["vmArgs"].as_array().unwrap();
    assert_eq!(args.len(), 1);
    assert!(args[0].as_str().unwrap().starts_with("-XX:ErrorFile="));
}

#[tokio::test]
async fn unsafe_artifact_name_is_rejected_before_touching_the_cache() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    serve_manifest(
        &server,
        json!({
            "artifacts": [{
                "name": "../escape.jar",
                "path": format!("{}/escape.jar", server.uri()),
                "hash": HELLO,
                "size": 5
            }]
        }),
    )
    .await;
    forbid_artifact(&server, "/escape.jar").await;

    let cfg = config(home.path(), &server, "1.0.0", "17.0.9");
    let err = prepare_launch(&cfg, &options(LaunchStrategy::ChildProcess), &LogProgress)
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Parse);
    assert!(!home.path().join("escape.jar").exists());
}

#[tokio::test]
async fn outdated_launcher_gets_its_own_message() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    serve_manifest(
        &server,
        json!({
            "minimumLauncherVersion": "2.0.0",
            "artifacts": []
        }),
    )
    .await;

    let cfg = config(home.path(), &server, "1.9.9", "17.0.9");
    let err = prepare_launch(&cfg, &options(LaunchStrategy::ChildProcess), &LogProgress)
        .await
        .unwrap_err();

    assert!(matches!(err, LauncherError::LauncherOutdated { .. }));
    assert_eq!(err.category(), ErrorCategory::VersionIncompatible);

    let runtime_message = LauncherError::RuntimeTooOld {
        required: "17".into(),
        current: "11".into(),
    }
    .user_message();
    assert_ne!(err.user_message(), runtime_message);
}

#[tokio::test]
async fn manifest_error_status_is_a_network_failure() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/manifest"))
        .respond_with(ResponseTemplate::new(500).set_body_string("{\"artifacts\": []}"))
        .mount(&server)
        .await;

    let cfg = config(home.path(), &server, "1.0.0", "17.0.9");
    let err = prepare_launch(&cfg, &options(LaunchStrategy::ChildProcess), &LogProgress)
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Network);
}
