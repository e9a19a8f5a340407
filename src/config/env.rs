use crate::utils::error::{DiagError, Result};
use std::path::Path;

/// 載入 `.env`，不存在時靜默略過
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!("⚠️ Failed to load .env: {}", e),
    }
}

/// 明確指定的檔案載入失敗視為配置錯誤
pub fn load_dotenv_from<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    dotenvy::from_path(path).map_err(|e| {
        DiagError::config(format!("failed to load env file {}: {}", path.display(), e))
    })?;
    tracing::debug!("Loaded environment from {}", path.display());
    Ok(())
}

/// 讀取環境變數，空字串視為未設定
pub fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
