use super::toml_config::TomlConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "employee-directory")]
#[command(about = "Interactive employee record manager")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "Company name used in welcome emails")]
    pub company: Option<String>,

    #[arg(long, help = "Directory for CSV exports")]
    pub export_path: Option<String>,

    #[arg(long, help = "Export file name, may contain {timestamp}")]
    pub export_file: Option<String>,

    #[arg(long, help = "Append each new employee to the export file")]
    pub append_on_add: bool,

    #[arg(long, value_delimiter = ',', help = "Allowed department names")]
    pub departments: Vec<String>,

    #[arg(long, help = "Do not send welcome emails")]
    pub no_notify: bool,

    #[arg(long, help = "Write logs as JSON")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 命令列參數覆蓋設定檔
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(company) = &self.company {
            config.company.name = company.clone();
            tracing::debug!("🔧 Company overridden to: {}", company);
        }
        if let Some(path) = &self.export_path {
            config.export.output_path = path.clone();
            tracing::debug!("🔧 Export path overridden to: {}", path);
        }
        if let Some(file) = &self.export_file {
            config.export.file_name = file.clone();
        }
        if self.append_on_add {
            config.export.append_on_add = true;
        }
        if !self.departments.is_empty() {
            config.validation.departments = self.departments.clone();
        }
        if self.no_notify {
            if let Some(notification) = config.notification.as_mut() {
                notification.enabled = false;
            }
        }
    }
}
