//! End-to-end tests that spawn the `queuewatch` binary.

use std::io::Write;
use std::net::TcpListener;
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;

use tempfile::{NamedTempFile, TempDir};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// A local port with nothing listening on it.
fn closed_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

fn write_config(session_path: &Path) -> NamedTempFile {
    let base_url = format!(
        "http://127.0.0.1:{}/.netlify/functions/ticket",
        closed_port()
    );
    write_config_for(&base_url, "timeout_secs = 2", session_path)
}

fn write_config_for(base_url: &str, timeout: &str, session_path: &Path) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[backend]
base_url = "{}"
{}

[ticket]
refresh_interval_ms = 200

[session]
path = "{}"
landing_url = "https://queue.example.org/"
"#,
        base_url,
        timeout,
        session_path.display()
    )
    .unwrap();
    file.flush().unwrap();
    file
}

/// Backend that answers status polls but never answers any other request.
async fn spawn_stalling_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                if buf[..n].starts_with(b"GET ") {
                    let body = r#"{"queueId":"q-1","queueName":"Main","ticketDesc":"","numberOfTicketsAhead":2}"#;
                    let response = format!(
                        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                } else {
                    std::future::pending::<()>().await;
                }
            });
        }
    });

    format!("http://{}/.netlify/functions/ticket", addr)
}

/// Run the binary, feed it `input` on stdin, and wait for it to exit.
async fn run_queuewatch(config: &Path, args: &[&str], input: &str) -> Output {
    run_queuewatch_logging(config, args, input, "error").await // Quiet logs during tests
}

async fn run_queuewatch_logging(
    config: &Path,
    args: &[&str],
    input: &str,
    rust_log: &str,
) -> Output {
    let mut child = tokio::process::Command::new(env!("CARGO_BIN_EXE_queuewatch"))
        .args(args)
        .env("QUEUEWATCH_CONFIG", config)
        .env("RUST_LOG", rust_log)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn queuewatch");

    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(input.as_bytes()).await.unwrap();
    drop(stdin);

    tokio::time::timeout(Duration::from_secs(10), child.wait_with_output())
        .await
        .expect("queuewatch did not exit in time")
        .expect("Failed to wait for queuewatch")
}

#[tokio::test]
async fn test_missing_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_queuewatch(
        &temp_dir.path().join("missing.toml"),
        &["ticket=t-1&queue=q-1&ticketNumber=3"],
        "",
    )
    .await;

    assert!(!output.status.success());
}

#[tokio::test]
async fn test_no_ticket_context_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir.path().join("session.json"));

    let output = run_queuewatch(config.path(), &[], "").await;

    assert!(!output.status.success());
}

#[tokio::test]
async fn test_unreachable_backend_shows_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let session_path = temp_dir.path().join("session.json");
    let config = write_config(&session_path);

    let output = run_queuewatch(
        config.path(),
        &["https://queue.example.org/ticket?ticket=t-1&queue=q-1&ticketNumber=3"],
        "quit\n",
    )
    .await;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Ticket not found."), "stdout: {}", stdout);

    // The failed poll removed the saved ticket
    let jar = std::fs::read_to_string(&session_path).unwrap();
    let jar: serde_json::Value = serde_json::from_str(&jar).unwrap();
    assert!(jar.get("ticket").is_none());
}

#[tokio::test]
async fn test_startup_logs_ticket_endpoint() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir.path().join("session.json"));

    let output = run_queuewatch_logging(
        config.path(),
        &["ticket=t-1&queue=q-1&ticketNumber=3"],
        "quit\n",
        "info",
    )
    .await;

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Ticket endpoint: http://127.0.0.1:"), "stderr: {}", stderr);
    assert!(stderr.contains("(http)"), "stderr: {}", stderr);
}

#[tokio::test]
async fn test_leave_exits_while_removal_request_hangs() {
    let temp_dir = TempDir::new().unwrap();
    let session_path = temp_dir.path().join("session.json");
    let base_url = spawn_stalling_backend().await;
    let config = write_config_for(&base_url, "", &session_path);

    let output = run_queuewatch(
        config.path(),
        &["ticket=t-1&queue=q-1&ticketNumber=3"],
        "leave\ny\n",
    )
    .await;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 ahead of you."), "stdout: {}", stdout);
    assert!(
        stdout.contains("You have left the queue. Join again at https://queue.example.org/"),
        "stdout: {}",
        stdout
    );

    let jar = std::fs::read_to_string(&session_path).unwrap();
    let jar: serde_json::Value = serde_json::from_str(&jar).unwrap();
    assert!(jar.get("ticket").is_none());
}
