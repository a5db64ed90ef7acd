use anyhow::{bail, Context, Result};
use log::debug;
use reqwest::Client;

const NOTIFY_API: &str = "https://notify-api.line.me/api/notify";

/// Sends plain text messages through the push notification service.
pub struct Notifier {
    client: Client,
    token: String,
    endpoint: String,
}

impl Notifier {
    pub fn new(token: String) -> Self {
        Self::with_endpoint(token, NOTIFY_API.into())
    }

    pub fn with_endpoint(token: String, endpoint: String) -> Self {
        Self {
            client: Client::new(),
            token,
            endpoint,
        }
    }

    pub async fn send(&self, message: &str) -> Result<()> {
        let body = format!("message: {message}");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .form(&[("message", body.as_str())])
            .send()
            .await
            .context("Failed to reach notification service")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Notification service responded with {status}");
        }

        debug!("Sent message ({} chars)", message.chars().count());
        Ok(())
    }

    /// Sends in order and stops at the first failure.
    pub async fn send_all<S: AsRef<str>>(&self, messages: &[S]) -> Result<()> {
        for (idx, message) in messages.iter().enumerate() {
            self.send(message.as_ref())
                .await
                .with_context(|| format!("Message {} of {} was not sent", idx + 1, messages.len()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn notifier(server: &MockServer) -> Notifier {
        Notifier::with_endpoint("secret".into(), format!("{}/api/notify", server.uri()))
    }

    #[tokio::test]
    async fn sends_every_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/notify"))
            .and(header("authorization", "Bearer secret"))
            .and(body_string_contains("message=message%3A"))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&server)
            .await;

        notifier(&server)
            .await
            .send_all(&["first", "second"])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn stops_at_first_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let err = notifier(&server)
            .await
            .send_all(&["first", "second"])
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("401"));
    }
}
