#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static BIN: &str = env!("CARGO_BIN_EXE_sinopia-auth");

// Running the binary with `--npm sh` from inside the temp dir turns
// `npm config get registry` into `sh config get registry`, which executes
// this script instead of npm. Every call is appended to `npm.log`.
const FAKE_NPM: &str = r#"
echo "$*" >> npm.log
case "$1" in
    get)
        [ -n "$FAIL_GET" ] && { echo "npm ERR! broken" >&2; exit 7; }
        printf '%s\n' "$FAKE_REGISTRY"
        ;;
    set)
        [ -n "$FAIL_SET" ] && exit 1
        ;;
esac
exit 0
"#;

fn fake_npm() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("config"), FAKE_NPM).expect("Failed to write fake npm");
    dir
}

fn sinopia_auth(dir: &Path, registry: &str) -> Command {
    let mut cmd = Command::new(BIN);
    cmd.current_dir(dir)
        .arg("--npm")
        .arg("sh")
        .arg("--config")
        .arg(dir.join("sinopia-auth.toml"))
        .env("FAKE_REGISTRY", registry)
        .env_remove("RUST_LOG")
        .env_remove("FAIL_GET")
        .env_remove("FAIL_SET")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

fn npm_calls(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("npm.log"))
        .unwrap_or_default()
        .lines()
        .map(String::from)
        .collect()
}

fn format_output(output: &Output) -> String {
    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    let stderr = std::str::from_utf8(&output.stderr).unwrap();
    format!("stderr:\n{stderr}\nstdout:\n{stdout}")
}

#[test]
fn refuses_default_registry() {
    let dir = fake_npm();
    let output = sinopia_auth(dir.path(), "https://registry.npmjs.org/")
        .output()
        .expect("Failed to execute process");

    assert_eq!(output.status.code(), Some(1), "{}", format_output(&output));
    assert_eq!(
        std::str::from_utf8(&output.stdout).unwrap(),
        "You are using default npm registry. Please update your registry.\n\
         Command: npm config set registry <url>\n"
    );
    assert!(
        !std::str::from_utf8(&output.stderr)
            .unwrap()
            .contains("certificate verification"),
        "{}",
        format_output(&output)
    );
    assert_eq!(npm_calls(dir.path()), vec!["get registry"]);
}

#[test]
fn quiet_default_registry_still_fails() {
    let dir = fake_npm();
    let output = sinopia_auth(dir.path(), "https://registry.npmjs.org/")
        .arg("--quiet")
        .output()
        .expect("Failed to execute process");

    assert_eq!(output.status.code(), Some(1), "{}", format_output(&output));
    assert!(output.stdout.is_empty());
}

#[test]
fn failed_registry_lookup_aborts() {
    let dir = fake_npm();
    let output = sinopia_auth(dir.path(), "http://127.0.0.1:1/")
        .env("FAIL_GET", "1")
        .output()
        .expect("Failed to execute process");

    assert!(!output.status.success(), "{}", format_output(&output));
    assert!(output.stdout.is_empty());
    assert!(std::str::from_utf8(&output.stderr)
        .unwrap()
        .contains("broken"));
    assert_eq!(npm_calls(dir.path()), vec!["get registry"]);
}

#[test]
fn unreachable_registry_aborts_before_writes() {
    let dir = fake_npm();
    let output = sinopia_auth(dir.path(), "http://127.0.0.1:1/")
        .output()
        .expect("Failed to execute process");

    assert!(!output.status.success(), "{}", format_output(&output));
    assert_eq!(npm_calls(dir.path()), vec!["get registry"]);
}

#[async_std::test]
async fn configures_private_registry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oauth/authorize"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = fake_npm();
    let registry = mock_server.uri();
    let mut cmd = sinopia_auth(dir.path(), &registry);
    let output = async_std::task::spawn_blocking(move || cmd.output())
        .await
        .expect("Failed to execute process");

    assert!(output.status.success(), "{}", format_output(&output));
    assert_eq!(
        std::str::from_utf8(&output.stdout).unwrap(),
        format!("Your sinopia registry is {registry}\n\n")
    );
    assert!(std::str::from_utf8(&output.stderr)
        .unwrap()
        .contains("TLS certificate verification is disabled"));
    let scope = registry.trim_start_matches("http:");
    assert_eq!(
        npm_calls(dir.path()),
        vec![
            "get registry".to_owned(),
            format!("set {scope}:_authToken asdasdas"),
            format!("set {scope}:always-auth true"),
        ]
    );
}

#[async_std::test]
async fn failed_second_write_keeps_first() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("//oauth/authorize"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let dir = fake_npm();
    let registry = format!("{}/", mock_server.uri());
    // Only the first `set` may succeed.
    fs::write(
        dir.path().join("config"),
        FAKE_NPM.replace(
            r#"[ -n "$FAIL_SET" ] && exit 1"#,
            r#"grep -q always-auth npm.log && exit 1"#,
        ),
    )
    .expect("Failed to write fake npm");
    let mut cmd = sinopia_auth(dir.path(), &registry);
    let output = async_std::task::spawn_blocking(move || cmd.output())
        .await
        .expect("Failed to execute process");

    assert!(!output.status.success(), "{}", format_output(&output));
    let scope = registry.trim_start_matches("http:");
    assert_eq!(
        npm_calls(dir.path()),
        vec![
            "get registry".to_owned(),
            format!("set {scope}:_authToken asdasdas"),
            format!("set {scope}:always-auth true"),
        ]
    );
}
