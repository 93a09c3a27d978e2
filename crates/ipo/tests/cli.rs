use std::process::Command;

// run the binary from its own empty directory so no `.env` file is picked up
fn ipo(name: &str, vars: &[(&str, &str)]) -> std::process::Output {
    let dir = std::env::temp_dir().join(format!("ipo-cli-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_ipo"))
        .env_clear()
        .envs(vars.iter().copied())
        .current_dir(&dir)
        .output();

    std::fs::remove_dir_all(&dir).ok();
    output.unwrap()
}

#[test]
fn missing_sender_exits_with_failure() {
    let output = ipo(
        "sender",
        &[("GMAIL_PASS", "app-password"), ("RECIPIENT", "inbox@example.com")],
    );

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("missing environment variable: GMAIL_USER"));
}

#[test]
fn missing_recipient_exits_with_failure() {
    let output = ipo(
        "recipient",
        &[("GMAIL_USER", "sender@gmail.com"), ("GMAIL_PASS", "app-password")],
    );

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("missing environment variable: RECIPIENT"));
}

#[test]
fn bad_timezone_exits_with_failure() {
    let output = ipo(
        "timezone",
        &[
            ("GMAIL_USER", "sender@gmail.com"),
            ("GMAIL_PASS", "app-password"),
            ("RECIPIENT", "inbox@example.com"),
            ("TIMEZONE", "Not/AZone"),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("invalid environment variable TIMEZONE"));
}
