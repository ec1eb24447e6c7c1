use crate::config::toml_config::NotificationConfig;
use crate::core::Notifier;
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::required;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Serialize)]
pub struct MailMessage<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub recipient_name: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
}

/// 透過 HTTPS 寄信服務送出郵件，使用寄件者帳號密碼登入 (basic auth)
pub struct HttpMailNotifier {
    client: Client,
    endpoint: String,
    sender: String,
    password: Option<String>,
}

impl HttpMailNotifier {
    pub fn new(
        endpoint: impl Into<String>,
        sender: impl Into<String>,
        password: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            sender: sender.into(),
            password,
        })
    }

    pub fn from_config(config: &NotificationConfig) -> Result<Self> {
        let endpoint = required("notification.endpoint", &config.endpoint)?;
        let sender = required("notification.sender", &config.sender)?;
        let timeout = config.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        Self::new(
            endpoint.clone(),
            sender.clone(),
            config.password.clone(),
            Duration::from_secs(timeout),
        )
    }
}

#[async_trait]
impl Notifier for HttpMailNotifier {
    async fn send(
        &self,
        recipient_name: &str,
        recipient_address: &str,
        subject: &str,
        body: &str,
    ) -> Result<()> {
        let message = MailMessage {
            from: &self.sender,
            to: recipient_address,
            recipient_name,
            subject,
            body,
        };

        tracing::debug!("Submitting mail for {} to {}", recipient_address, self.endpoint);
        let mut request = self.client.post(&self.endpoint).json(&message);
        if let Some(password) = &self.password {
            request = request.basic_auth(&self.sender, Some(password));
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Mail relay response status: {}", status);

        if !status.is_success() {
            return Err(DirectoryError::NotificationError {
                message: format!("mail relay returned {}", status),
            });
        }
        Ok(())
    }
}

/// 通知關閉時使用
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send(&self, _: &str, _: &str, _: &str, _: &str) -> Result<()> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// 依設定決定寄信方式；沒有設定或被關閉時回傳 NoopNotifier
pub fn build_notifier(
    config: Option<&NotificationConfig>,
    force_disabled: bool,
) -> Result<Box<dyn Notifier>> {
    match config {
        Some(config) if config.enabled && !force_disabled => {
            tracing::info!("📧 Welcome emails enabled");
            Ok(Box::new(HttpMailNotifier::from_config(config)?))
        }
        _ => {
            tracing::debug!("Welcome emails disabled");
            Ok(Box::new(NoopNotifier))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn notifier(server: &MockServer, password: Option<&str>) -> HttpMailNotifier {
        HttpMailNotifier::new(
            server.url("/send"),
            "hr@example.com",
            password.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_send_posts_message() {
        let server = MockServer::start();
        let mail_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/send")
                .header_exists("authorization")
                .json_body_partial(
                    r#"{"from": "hr@example.com", "to": "john.doe@example.com", "subject": "Welcome"}"#,
                );
            then.status(202);
        });

        let result = notifier(&server, Some("app-password"))
            .send("John Doe", "john.doe@example.com", "Welcome", "Hello")
            .await;

        assert!(result.is_ok());
        mail_mock.assert();
    }

    #[tokio::test]
    async fn test_error_status_is_notification_failure() {
        let server = MockServer::start();
        let mail_mock = server.mock(|when, then| {
            when.method(POST).path("/send");
            then.status(535);
        });

        let err = notifier(&server, None)
            .send("John Doe", "john.doe@example.com", "Welcome", "Hello")
            .await
            .unwrap_err();

        assert!(matches!(err, DirectoryError::NotificationError { .. }));
        assert!(err.to_string().contains("535"));
        mail_mock.assert();
    }

    #[test]
    fn test_build_notifier_respects_flags() {
        let config = NotificationConfig {
            enabled: true,
            endpoint: Some("https://mail.example.com/send".to_string()),
            sender: Some("hr@example.com".to_string()),
            password: None,
            timeout_seconds: None,
        };

        assert!(build_notifier(Some(&config), false).unwrap().is_enabled());
        assert!(!build_notifier(Some(&config), true).unwrap().is_enabled());
        assert!(!build_notifier(None, false).unwrap().is_enabled());
    }

    #[test]
    fn test_missing_endpoint_is_config_error() {
        let config = NotificationConfig {
            enabled: true,
            endpoint: None,
            sender: Some("hr@example.com".to_string()),
            password: None,
            timeout_seconds: None,
        };

        assert!(matches!(
            HttpMailNotifier::from_config(&config),
            Err(DirectoryError::MissingConfigError { .. })
        ));
    }
}
