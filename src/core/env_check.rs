use crate::config::env::read_var;
use crate::domain::model::EnvClassification;
use std::fmt;
use url::Url;

const LOCAL_MARKERS: [&str; 2] = ["localhost", "127.0.0.1"];

pub fn classify(value: Option<&str>) -> EnvClassification {
    match value {
        None => EnvClassification::NotSet,
        Some(v) if v.trim().is_empty() => EnvClassification::NotSet,
        Some(v) if LOCAL_MARKERS.iter().any(|marker| v.contains(marker)) => {
            EnvClassification::Local
        }
        Some(_) => EnvClassification::Remote,
    }
}

/// 把連線字串裡的密碼換成 `****`，無法解析的字串原樣回傳
pub fn redact_connection_string(value: &str) -> String {
    match Url::parse(value) {
        Ok(mut url) if url.password().is_some() => {
            if url.set_password(Some("****")).is_err() {
                return value.to_string();
            }
            url.to_string()
        }
        _ => value.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct EnvReport {
    pub variable: String,
    pub value: Option<String>,
    pub classification: EnvClassification,
}

impl EnvReport {
    pub fn from_value(variable: &str, value: Option<String>) -> Self {
        let classification = classify(value.as_deref());
        Self {
            variable: variable.to_string(),
            value,
            classification,
        }
    }

    pub fn from_env(variable: &str) -> Self {
        let report = Self::from_value(variable, read_var(variable));
        tracing::debug!(
            "{} classified as {}",
            report.variable,
            report.classification
        );
        report
    }
}

impl fmt::Display for EnvReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.value, self.classification) {
            (None, _) | (_, EnvClassification::NotSet) => {
                write!(f, "❌ {}: NOT SET", self.variable)
            }
            (Some(value), _) => {
                let icon = match self.classification {
                    EnvClassification::Local => "🏠",
                    _ => "🌐",
                };
                write!(
                    f,
                    "🔑 {} = {}\n{} Database: {}",
                    self.variable,
                    redact_connection_string(value),
                    icon,
                    self.classification
                )
            }
        }
    }
}
