use crate::domain::model::Employee;
use crate::domain::ports::Storage;
use crate::utils::error::{DirectoryError, Result};

/// 以 `ID,Name,Department,Salary,Contact` 格式輸出員工資料
pub struct CsvExporter<S: Storage> {
    storage: S,
    file_name: String,
    append_target: String,
}

impl<S: Storage> CsvExporter<S> {
    /// `file_name` 可包含 `{timestamp}`，每次完整匯出時重新展開；
    /// 逐筆追加則固定寫入建立時展開的檔案
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let append_target = expand_file_name(&file_name);
        Self {
            storage,
            file_name,
            append_target,
        }
    }

    /// 寫出目前所有員工的快照，回傳完整路徑
    pub async fn export_all(&self, employees: &[Employee]) -> Result<String> {
        let target = expand_file_name(&self.file_name);
        let data = to_csv(employees, true)?;

        tracing::debug!("Writing {} employees ({} bytes) to {}", employees.len(), data.len(), target);
        self.storage.write_file(&target, &data).await?;

        let location = self.storage.describe(&target);
        tracing::info!("📁 Exported {} employees to {}", employees.len(), location);
        Ok(location)
    }

    /// 追加一筆；檔案不存在時先寫標題列
    pub async fn append(&self, employee: &Employee) -> Result<String> {
        let target = &self.append_target;
        let needs_header = !self.storage.exists(target).await;
        let data = to_csv(std::slice::from_ref(employee), needs_header)?;

        self.storage.append_file(target, &data).await?;
        tracing::debug!("Appended {} to {}", employee.id, target);
        Ok(self.storage.describe(target))
    }
}

pub fn to_csv(employees: &[Employee], with_header: bool) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(with_header)
        .from_writer(Vec::new());

    for employee in employees {
        writer.serialize(employee.to_record())?;
    }

    // 沒有資料時 serde 不會產生標題列，手動補上
    if employees.is_empty() && with_header {
        writer.write_record(["ID", "Name", "Department", "Salary", "Contact"])?;
    }

    writer
        .into_inner()
        .map_err(|e| DirectoryError::IoError(e.into_error()))
}

fn expand_file_name(template: &str) -> String {
    template.replace(
        "{timestamp}",
        &chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string(),
    )
}
