use crate::domain::validation::ValidationRules;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn append_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
    /// 給使用者看的完整位置
    fn describe(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn company_name(&self) -> &str;
    fn validation_rules(&self) -> ValidationRules;
    fn export_path(&self) -> &str;
    fn export_file_name(&self) -> &str;
    fn append_on_add(&self) -> bool;
}

/// 寄信的外部協作者；失敗不會回滾已完成的操作
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(
        &self,
        recipient_name: &str,
        recipient_address: &str,
        subject: &str,
        body: &str,
    ) -> Result<()>;

    /// 關閉通知時回傳 false，呼叫端據此標記為略過
    fn is_enabled(&self) -> bool {
        true
    }
}

#[async_trait]
impl<T: Notifier + ?Sized> Notifier for Box<T> {
    async fn send(
        &self,
        recipient_name: &str,
        recipient_address: &str,
        subject: &str,
        body: &str,
    ) -> Result<()> {
        (**self)
            .send(recipient_name, recipient_address, subject, body)
            .await
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}
