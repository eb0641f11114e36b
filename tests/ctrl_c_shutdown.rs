// tests/ctrl_c_shutdown.rs

#![cfg(unix)]

use std::error::Error;
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn ctrl_c_while_waiting_on_open_stdin_exits_cleanly() -> TestResult {
    // An empty directory, so no Rebuildwatch.toml is picked up.
    let dir = tempfile::tempdir()?;

    let mut child = Command::new(env!("CARGO_BIN_EXE_rebuildwatch"))
        .arg("--no-color")
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    // Held open: the binary must not rely on end-of-input to stop.
    let stdin = child.stdin.take();
    let mut stdout = BufReader::new(child.stdout.take().ok_or("no stdout")?);

    let mut first = String::new();
    stdout.read_line(&mut first)?;
    assert_eq!(first.trim_end(), "Starting");

    // Give the signal listener time to be installed.
    thread::sleep(Duration::from_millis(300));
    let kill = Command::new("kill")
        .arg("-INT")
        .arg(child.id().to_string())
        .status()?;
    assert!(kill.success());

    let deadline = Instant::now() + Duration::from_secs(5);
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err("process still running 5s after SIGINT".into());
        }
        thread::sleep(Duration::from_millis(50));
    };
    drop(stdin);

    assert!(status.success(), "unexpected exit status: {status}");

    let mut rest = String::new();
    stdout.read_to_string(&mut rest)?;
    assert!(rest.lines().any(|l| l == "Done"), "missing Done banner in {rest:?}");
    Ok(())
}
