use crate::config::toml_config::ServerConfig;
use crate::domain::model::{ProbeOutcome, SignupShape, TestUser};
use crate::utils::error::Result;
use reqwest::{Client, Method};
use std::error::Error as StdError;
use std::fmt;
use url::Url;

/// 對後端發出單次請求，不重試
pub struct HttpProber {
    client: Client,
    server: ServerConfig,
}

impl HttpProber {
    pub fn new(server: ServerConfig) -> Result<Self> {
        let client = Client::builder().timeout(server.timeout()).build()?;
        Ok(Self { client, server })
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    pub fn endpoint(&self, path: &str) -> std::result::Result<Url, url::ParseError> {
        let base = self.server.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{}/{}", base, path))
    }

    pub async fn health(&self) -> ProbeOutcome {
        self.send(Method::GET, &self.server.health_path, None).await
    }

    pub async fn signup(&self, user: &TestUser) -> ProbeOutcome {
        let body = match serde_json::to_value(user) {
            Ok(body) => body,
            Err(e) => {
                return ProbeOutcome::RequestError {
                    reason: format!("could not serialize payload: {}", e),
                }
            }
        };
        self.send(Method::POST, &self.server.signup_path, Some(body))
            .await
    }

    /// 模擬前端的註冊請求並檢查回應結構
    pub async fn frontend_probe(&self, user: &TestUser) -> FrontendProbeReport {
        let outcome = self.signup(user).await;
        let shape = outcome.body().map(SignupShape::inspect);
        FrontendProbeReport { outcome, shape }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ProbeOutcome {
        let url = match self.endpoint(path) {
            Ok(url) => url,
            Err(e) => {
                return ProbeOutcome::RequestError {
                    reason: format!("invalid URL for {}: {}", path, e),
                }
            }
        };

        tracing::debug!("Making {} request to: {}", method, url);
        let mut request = self.client.request(method, url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return classify_error(&e),
        };

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        // 回應已到達，body 讀取失敗不算本地請求錯誤
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return ProbeOutcome::NoResponse {
                    reason: format!(
                        "response body from status {} could not be read: {}",
                        status,
                        error_chain(&e)
                    ),
                }
            }
        };

        if status.is_success() {
            ProbeOutcome::Success {
                status: status.as_u16(),
                body,
            }
        } else {
            ProbeOutcome::ErrorStatus {
                status: status.as_u16(),
                body,
            }
        }
    }
}

/// 沒收到回應 vs. 本地建立請求失敗
fn classify_error(e: &reqwest::Error) -> ProbeOutcome {
    let reason = error_chain(e);
    if e.is_builder() {
        ProbeOutcome::RequestError { reason }
    } else if e.is_connect()
        || e.is_timeout()
        || e.is_request()
        || e.is_body()
        || e.is_decode()
    {
        ProbeOutcome::NoResponse { reason }
    } else {
        ProbeOutcome::RequestError { reason }
    }
}

fn error_chain(e: &dyn StdError) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[derive(Debug, Clone)]
pub struct FrontendProbeReport {
    pub outcome: ProbeOutcome,
    pub shape: Option<SignupShape>,
}

impl FrontendProbeReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success() && self.shape.is_some_and(|s| s.is_complete())
    }
}

impl fmt::Display for FrontendProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.outcome, &self.shape) {
            (ProbeOutcome::Success { status, .. }, Some(shape)) => {
                write!(f, "✅ Status: {}\n{}", status, shape)?;
                if !shape.is_complete() {
                    write!(f, "\n⚠️ Response is missing fields the frontend expects")?;
                }
                Ok(())
            }
            (outcome, _) => write!(f, "{}", outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn prober_for(base_url: String) -> HttpProber {
        HttpProber::new(ServerConfig {
            base_url,
            timeout_seconds: 5,
            ..ServerConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let prober = prober_for("http://localhost:5000/".to_string());
        assert_eq!(
            prober.endpoint("/health").unwrap().as_str(),
            "http://localhost:5000/health"
        );

        let prefixed = prober_for("http://localhost:5000/app".to_string());
        assert_eq!(
            prefixed.endpoint("/api/auth/signup").unwrap().as_str(),
            "http://localhost:5000/app/api/auth/signup"
        );
    }

    #[tokio::test]
    async fn test_health_ok() {
        let server = MockServer::start();
        let health_mock = server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(200).body(r#"{"status":"ok"}"#);
        });

        let outcome = prober_for(server.base_url()).health().await;

        health_mock.assert();
        assert_eq!(
            outcome,
            ProbeOutcome::Success {
                status: 200,
                body: r#"{"status":"ok"}"#.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/signup");
            then.status(400)
                .json_body(serde_json::json!({"message": "User already exists"}));
        });

        let outcome = prober_for(server.base_url())
            .signup(&TestUser::generate())
            .await;

        assert_eq!(outcome.status(), Some(400));
        assert!(outcome.body().unwrap().contains("User already exists"));
        assert!(!outcome.is_success());
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_request_error() {
        let prober = prober_for("http://[::1".to_string());
        let outcome = prober.health().await;
        assert!(matches!(outcome, ProbeOutcome::RequestError { .. }));
    }

    #[tokio::test]
    async fn test_truncated_body_is_not_a_request_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            // Content-Length 比實際 body 長，送完就斷線
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nshort")
                .await;
        });

        let outcome = prober_for(format!("http://{}", addr)).health().await;

        match &outcome {
            ProbeOutcome::NoResponse { reason } => {
                assert!(reason.contains("could not be read"))
            }
            other => panic!("expected NoResponse, got {:?}", other),
        }
        assert!(!outcome.to_string().contains("setting up the request"));
    }

    #[tokio::test]
    async fn test_frontend_probe_reports_missing_token() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/signup");
            then.status(201)
                .json_body(serde_json::json!({"user": {"name": "Test User"}}));
        });

        let report = prober_for(server.base_url())
            .frontend_probe(&TestUser::generate())
            .await;

        let shape = report.shape.unwrap();
        assert!(!shape.has_token);
        assert!(shape.has_user);
        assert!(!report.is_success());
        assert!(report.to_string().contains("token: ❌ missing"));
    }
}
