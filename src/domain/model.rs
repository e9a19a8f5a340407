use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static USER_SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// 一次性的測試使用者，每次執行產生、用完即丟
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl TestUser {
    pub fn generate() -> Self {
        let seq = USER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self {
            name: "Test User".to_string(),
            email: format!("test_{}_{}@example.com", Utc::now().timestamp_millis(), seq),
            password: "password123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvClassification {
    NotSet,
    Local,
    Remote,
}

impl fmt::Display for EnvClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSet => write!(f, "NOT SET"),
            Self::Local => write!(f, "LOCAL"),
            Self::Remote => write!(f, "REMOTE"),
        }
    }
}

/// 單次 HTTP 請求的結果，只有四種可能
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success { status: u16, body: String },
    ErrorStatus { status: u16, body: String },
    NoResponse { reason: String },
    RequestError { reason: String },
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Success { status, .. } | Self::ErrorStatus { status, .. } => Some(*status),
            Self::NoResponse { .. } | Self::RequestError { .. } => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Success { body, .. } | Self::ErrorStatus { body, .. } => Some(body),
            Self::NoResponse { .. } | Self::RequestError { .. } => None,
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { status, body } => {
                write!(f, "✅ Status: {}\n📦 Body: {}", status, body)
            }
            Self::ErrorStatus { status, body } => {
                write!(
                    f,
                    "❌ Server responded with error status {}\n📦 Body: {}",
                    status, body
                )
            }
            Self::NoResponse { reason } => {
                write!(
                    f,
                    "❌ No response received (is the server running?)\n🔌 {}",
                    reason
                )
            }
            Self::RequestError { reason } => {
                write!(f, "❌ Error setting up the request: {}", reason)
            }
        }
    }
}

/// 回應 body 裡是否有 `token` 和 `user`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignupShape {
    pub has_token: bool,
    pub has_user: bool,
}

impl SignupShape {
    pub fn inspect(body: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::Object(obj)) => Self {
                has_token: obj.get("token").is_some_and(|v| !v.is_null()),
                has_user: obj.get("user").is_some_and(|v| !v.is_null()),
            },
            _ => Self::default(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.has_token && self.has_user
    }
}

impl fmt::Display for SignupShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |present: bool| if present { "✅ present" } else { "❌ missing" };
        write!(
            f,
            "token: {}\nuser: {}",
            mark(self.has_token),
            mark(self.has_user)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    Succeeded,
    Failed { code: Option<i32> },
    NotLaunched { reason: String },
}

impl DeployOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbStep {
    Open,
    Insert,
    Delete,
    Close,
}

impl DbStep {
    pub const SEQUENCE: [DbStep; 4] = [Self::Open, Self::Insert, Self::Delete, Self::Close];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Close => "close",
        }
    }
}

impl fmt::Display for DbStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DbCheckReport {
    pub completed: Vec<DbStep>,
    pub failure: Option<(DbStep, String)>,
}

impl DbCheckReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none() && self.completed == DbStep::SEQUENCE
    }
}
