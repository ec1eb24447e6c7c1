use employee_directory::core::Notifier;
use employee_directory::{
    CsvExporter, Directory, EmployeeDraft, LocalStorage, NoopNotifier, Shell, Validator,
};
use tempfile::TempDir;

async fn run_session<N: Notifier>(
    directory: Directory<N>,
    script: &str,
    export_dir: &TempDir,
) -> (Directory<N>, String) {
    let storage = LocalStorage::new(export_dir.path().to_str().unwrap());
    let exporter = CsvExporter::new(storage, "employees.csv");
    let mut shell = Shell::new(directory, exporter, script.as_bytes(), Vec::new());

    shell.run().await.unwrap();

    let (directory, output) = shell.into_parts();
    (directory, String::from_utf8(output).unwrap())
}

async fn seeded(drafts: &[(&str, &str, &str, &str, &str)]) -> Directory<NoopNotifier> {
    let mut directory = Directory::new(Validator::default(), NoopNotifier);
    for (id, name, department, salary, contact) in drafts {
        directory
            .add(EmployeeDraft::new(*id, *name, *department, *salary, *contact))
            .await
            .unwrap();
    }
    directory
}

#[tokio::test]
async fn test_add_then_view() {
    let temp_dir = TempDir::new().unwrap();
    let directory = seeded(&[]).await;

    let script = "1\nE12345678\nJohn Doe\nHR\n5000\njohn.doe@example.com\n2\nE12345678\n8\n";
    let (directory, output) = run_session(directory, script, &temp_dir).await;

    assert_eq!(directory.len(), 1);
    assert!(output.contains("✅ Employee John Doe added."));
    assert!(output.contains("Name: John Doe, Dept: HR, Salary: $5000.00"));
    assert!(output.contains("👋 Exiting. Goodbye!"));
}

#[tokio::test]
async fn test_add_accented_name_and_free_form_department() {
    let temp_dir = TempDir::new().unwrap();
    let script = "1\nE20000001\nJosé García\nCustomer Service (EU)\n4200\njose@example.com\n\
                  1\nE20000002\nZoë Brontë\nSales/Marketing\n3900\nzoe@example.com\n\
                  6\ncustomer service (eu)\n8\n";
    let (directory, output) = run_session(seeded(&[]).await, script, &temp_dir).await;

    assert_eq!(directory.len(), 2);
    assert!(output.contains("✅ Employee José García added."));
    assert!(output.contains("✅ Employee Zoë Brontë added."));
    assert_eq!(
        directory.find_by_id("E20000002").unwrap().department,
        "Sales/Marketing"
    );
    assert!(output.contains("Total Budgeted Salary for 'Customer Service (Eu)': $4200.00"));
    assert!(!output.contains("❌ Invalid"));
}

#[tokio::test]
async fn test_view_shows_enrollment_time() {
    let temp_dir = TempDir::new().unwrap();
    let directory =
        seeded(&[("E12345678", "John Doe", "HR", "5000", "john.doe@example.com")]).await;
    let enrolled = directory
        .find_by_id("E12345678")
        .unwrap()
        .enrolled_at
        .format("%Y-%m-%d")
        .to_string();

    let (_, output) = run_session(directory, "2\nE12345678\n8\n", &temp_dir).await;
    assert!(output.contains(&format!("Enrolled: {}", enrolled)));
}

#[tokio::test]
async fn test_view_employee_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let (_, output) = run_session(seeded(&[]).await, "2\nE99999999\n8\n", &temp_dir).await;

    assert!(output.contains("Employee not found"));
}

#[tokio::test]
async fn test_invalid_add_keeps_directory_empty() {
    let temp_dir = TempDir::new().unwrap();
    let script = "1\nE12345678\nJohn Doe\nHR\nlots\njohn.doe@example.com\n8\n";
    let (directory, output) = run_session(seeded(&[]).await, script, &temp_dir).await;

    assert!(directory.is_empty());
    assert!(output.contains("❌ Invalid salary"));
    // 錯誤後回到選單
    assert_eq!(output.matches("Choose an option:").count(), 2);
}

#[tokio::test]
async fn test_duplicate_add_reports_error() {
    let temp_dir = TempDir::new().unwrap();
    let directory =
        seeded(&[("E10000001", "Jane", "IT", "7000", "jane@example.com")]).await;

    let script = "1\nE10000001\nAlice\nIT\n7000\nalice@example.com\n8\n";
    let (directory, output) = run_session(directory, script, &temp_dir).await;

    assert_eq!(directory.len(), 1);
    assert_eq!(directory.find_by_id("E10000001").unwrap().name, "Jane");
    assert!(output.contains("already exists"));
}

#[tokio::test]
async fn test_update_employee_confirmed() {
    let temp_dir = TempDir::new().unwrap();
    let directory =
        seeded(&[("E12345678", "Original", "HR", "8000", "original@example.com")]).await;

    let script =
        "3\nE12345678\nUpdated Name\nAdmin\n9000\nupdated@example.com\nyes\n8\n";
    let (directory, output) = run_session(directory, script, &temp_dir).await;

    let updated = directory.find_by_id("E12345678").unwrap();
    assert_eq!(updated.name, "Updated Name");
    assert_eq!(updated.department, "Admin");
    assert_eq!(updated.salary, 9000.0);
    assert_eq!(updated.contact, "updated@example.com");
    assert!(output.contains("✅ Employee updated."));
}

#[tokio::test]
async fn test_update_without_confirmation_keeps_salary() {
    let temp_dir = TempDir::new().unwrap();
    let directory =
        seeded(&[("E12345678", "John Doe", "HR", "5000", "john.doe@example.com")]).await;

    let script = "3\nE12345678\n\n\n9000\n\nno\n8\n";
    let (directory, output) = run_session(directory, script, &temp_dir).await;

    assert_eq!(directory.find_by_id("E12345678").unwrap().salary, 5000.0);
    assert!(output.contains("Update cancelled."));
}

#[tokio::test]
async fn test_partial_update_keeps_blank_fields() {
    let temp_dir = TempDir::new().unwrap();
    let directory =
        seeded(&[("E12345678", "John Doe", "HR", "5000", "john.doe@example.com")]).await;

    let script = "3\nE12345678\n\n\n9000\n\ny\n8\n";
    let (directory, _) = run_session(directory, script, &temp_dir).await;

    let employee = directory.find_by_id("E12345678").unwrap();
    assert_eq!(employee.salary, 9000.0);
    assert_eq!(employee.name, "John Doe");
    assert_eq!(employee.department, "HR");
    assert_eq!(employee.contact, "john.doe@example.com");
}

#[tokio::test]
async fn test_delete_employee() {
    let temp_dir = TempDir::new().unwrap();
    let directory =
        seeded(&[("E12345678", "ToDelete", "Ops", "6000", "delete@example.com")]).await;

    let (directory, output) = run_session(directory, "4\nE12345678\nyes\n8\n", &temp_dir).await;

    assert!(directory.is_empty());
    assert!(output.contains("✅ Employee deleted."));
}

#[tokio::test]
async fn test_delete_declined() {
    let temp_dir = TempDir::new().unwrap();
    let directory =
        seeded(&[("E12345678", "Keeper", "Ops", "6000", "keep@example.com")]).await;

    let (directory, output) = run_session(directory, "4\nE12345678\nn\n8\n", &temp_dir).await;

    assert_eq!(directory.len(), 1);
    assert!(output.contains("Deletion cancelled."));
}

#[tokio::test]
async fn test_department_wise_report() {
    let temp_dir = TempDir::new().unwrap();
    let directory = seeded(&[
        ("E10000001", "Alpha", "HR", "4000", "a@example.com"),
        ("E10000002", "Beta", "HR", "6000", "b@example.com"),
        ("E10000003", "Gamma", "IT", "5000", "c@example.com"),
    ])
    .await;

    let (_, output) = run_session(directory, "6\nHR\n8\n", &temp_dir).await;

    assert!(output.contains("Alpha"));
    assert!(output.contains("Beta"));
    assert!(!output.contains("Gamma"));
    assert!(output.contains("Total Budgeted Salary for 'Hr': $10000.00"));
}

#[tokio::test]
async fn test_report_all_departments() {
    let temp_dir = TempDir::new().unwrap();
    let directory = seeded(&[
        ("E10000001", "Alpha", "HR", "4000", "a@example.com"),
        ("E10000003", "Gamma", "IT", "5000", "c@example.com"),
    ])
    .await;

    let (_, output) = run_session(directory, "6\n\n8\n", &temp_dir).await;

    assert!(output.contains("Total Budgeted Salary for 'Hr': $4000.00"));
    assert!(output.contains("Total Budgeted Salary for 'It': $5000.00"));
}

#[tokio::test]
async fn test_list_and_invalid_option() {
    let temp_dir = TempDir::new().unwrap();
    let directory = seeded(&[
        ("E10000001", "Alpha", "HR", "4000", "a@example.com"),
        ("E10000002", "Beta", "IT", "6000", "b@example.com"),
    ])
    .await;

    let (_, output) = run_session(directory, "9\n5\n8\n", &temp_dir).await;

    assert!(output.contains("❌ Invalid option. Try again."));
    let alpha = output.find("ID: E10000001").unwrap();
    let beta = output.find("ID: E10000002").unwrap();
    assert!(alpha < beta);
}

#[tokio::test]
async fn test_end_of_input_exits_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    // 在確認前就結束輸入
    let directory =
        seeded(&[("E12345678", "John Doe", "HR", "5000", "john.doe@example.com")]).await;

    let (directory, output) = run_session(directory, "4\nE12345678\n", &temp_dir).await;

    assert_eq!(directory.len(), 1);
    assert!(!output.contains("Goodbye"));
}
