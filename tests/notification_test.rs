use employee_directory::config::toml_config::NotificationConfig;
use employee_directory::{
    build_notifier, CsvExporter, Directory, EmployeeDraft, HttpMailNotifier, LocalStorage,
    NotificationStatus, Shell, Validator,
};
use httpmock::prelude::*;
use tempfile::TempDir;

fn notification_config(server: &MockServer) -> NotificationConfig {
    NotificationConfig {
        enabled: true,
        endpoint: Some(server.url("/v1/send")),
        sender: Some("hr@bitfutura.test".to_string()),
        password: Some("app-password".to_string()),
        timeout_seconds: Some(5),
    }
}

#[tokio::test]
async fn test_welcome_email_submitted_on_add() {
    let server = MockServer::start();
    let mail_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/send")
            .header_exists("authorization")
            .json_body_partial(
                r#"{"from": "hr@bitfutura.test", "to": "alice@example.com", "recipient_name": "Alice", "subject": "Welcome to BitFutura"}"#,
            );
        then.status(200);
    });

    let notifier = HttpMailNotifier::from_config(&notification_config(&server)).unwrap();
    let mut directory = Directory::new(Validator::default(), notifier);

    let outcome = directory
        .add(EmployeeDraft::new("E11111111", "Alice", "IT", "7000", "alice@example.com"))
        .await
        .unwrap();

    assert_eq!(outcome.notification, NotificationStatus::Sent);
    mail_mock.assert();
}

#[tokio::test]
async fn test_relay_failure_does_not_roll_back_add() {
    let server = MockServer::start();
    let mail_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/send");
        then.status(503);
    });

    let temp_dir = TempDir::new().unwrap();
    let notifier = build_notifier(Some(&notification_config(&server)), false).unwrap();
    let directory = Directory::new(Validator::default(), notifier);
    let exporter = CsvExporter::new(
        LocalStorage::new(temp_dir.path().to_str().unwrap()),
        "employees.csv",
    );

    let script = "1\nE12345678\nJohn Doe\nHR\n5000\njohn.doe@example.com\n2\nE12345678\n8\n";
    let mut shell = Shell::new(directory, exporter, script.as_bytes(), Vec::new());
    shell.run().await.unwrap();

    let (directory, output) = shell.into_parts();
    let output = String::from_utf8(output).unwrap();

    mail_mock.assert();
    assert!(directory.find_by_id("E12345678").is_some());
    assert!(output.contains("✅ Employee John Doe added."));
    assert!(output.contains("❌ Failed to send email"));
    assert!(output.contains("Salary: $5000.00"));
}

#[tokio::test]
async fn test_unreachable_relay_is_reported() {
    // 沒有服務在監聽的埠
    let config = NotificationConfig {
        enabled: true,
        endpoint: Some("http://127.0.0.1:9/send".to_string()),
        sender: Some("hr@bitfutura.test".to_string()),
        password: None,
        timeout_seconds: Some(1),
    };
    let notifier = HttpMailNotifier::from_config(&config).unwrap();
    let mut directory = Directory::new(Validator::default(), notifier);

    let outcome = directory
        .add(EmployeeDraft::new("E22222222", "Bob", "Ops", "4500", "bob@example.com"))
        .await
        .unwrap();

    assert!(matches!(outcome.notification, NotificationStatus::Failed(_)));
    assert_eq!(directory.len(), 1);
}
