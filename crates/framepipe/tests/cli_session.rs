use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_framepipe"))
}

#[test]
fn version_prints_and_succeeds() {
    let output = bin().arg("version").output().expect("binary should run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("framepipe"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let output = bin().arg("frobnicate").output().expect("binary should run");
    assert!(!output.status.success());
}

#[test]
fn serve_and_ping_complete_a_session() {
    let mut server = bin()
        .args([
            "serve",
            "127.0.0.1:0",
            "--once",
            "--count",
            "2",
            "--interval",
            "0ms",
            "--format",
            "pretty",
        ])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("server should start");

    // The server logs its bound address; 127.0.0.1:0 means the OS picked
    // the port, so fish it out of the log line.
    let stderr = server.stderr.take().expect("stderr should be piped");
    let mut stderr_reader = BufReader::new(stderr);
    let addr = loop {
        let mut line = String::new();
        let n = stderr_reader
            .read_line(&mut line)
            .expect("server stderr should be readable");
        assert_ne!(n, 0, "server exited before announcing its address");
        if let Some(rest) = line.split("local=").nth(1) {
            break rest.trim().to_string();
        }
    };

    let client = bin()
        .args(["ping", &addr])
        .output()
        .expect("client should run");
    assert!(
        client.status.success(),
        "ping failed: {}",
        String::from_utf8_lossy(&client.stderr)
    );

    let status = server.wait().expect("server should exit");
    assert!(status.success());

    let mut stdout = String::new();
    server
        .stdout
        .take()
        .expect("stdout should be piped")
        .read_to_string(&mut stdout)
        .expect("server stdout should be readable");
    assert_eq!(stdout.matches("payload=PONG").count(), 2, "stdout: {stdout}");
}
