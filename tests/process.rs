// Runs the `serve` binary as a child process and stops it with SIGINT
#![cfg(unix)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

fn get_healthz(port: u16) -> Option<String> {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).ok()?;
    stream
        .write_all(b"GET /healthz HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .ok()?;
    let mut raw = String::new();
    stream.read_to_string(&mut raw).ok()?;
    Some(raw)
}

fn wait_until_serving(port: u16, child: &mut Child) -> String {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(resp) = get_healthz(port) {
            return resp;
        }
        if let Some(status) = child.try_wait().unwrap() {
            panic!("serve exited early with {status}");
        }
        assert!(Instant::now() < deadline, "serve never accepted connections");
        thread::sleep(Duration::from_millis(50));
    }
}

#[test]
fn sigint_exits_cleanly_after_warning_about_missing_index() {
    let site = tempfile::tempdir().unwrap();
    std::fs::write(site.path().join("notes.txt"), "no index here").unwrap();
    let port = free_port();

    let mut child = Command::new(env!("CARGO_BIN_EXE_serve"))
        .args(["--host", "127.0.0.1", "--port", &port.to_string(), "--dir"])
        .arg(site.path())
        // no serve.toml in the site dir, so built-in settings apply
        .current_dir(site.path())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let resp = wait_until_serving(port, &mut child);
    assert!(resp.starts_with("HTTP/1.1 200"), "{resp}");
    assert!(resp.ends_with("ok"), "{resp}");

    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0), "stdout: {stdout}\nstderr: {stderr}");
    assert!(stdout.contains("Shutting down..."), "{stdout}");
    assert!(stderr.contains("[WARN] index.html not found"), "{stderr}");
}

#[test]
fn port_in_use_is_fatal() {
    let taken = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = taken.local_addr().unwrap().port();
    let site = tempfile::tempdir().unwrap();
    std::fs::write(site.path().join("index.html"), "<h1>home</h1>").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_serve"))
        .args(["--host", "127.0.0.1", "--port", &port.to_string(), "--dir"])
        .arg(site.path())
        .current_dir(site.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    drop(taken);
}
