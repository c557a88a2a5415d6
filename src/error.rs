//! 导入流程错误类型
//!
//! 三类错误全部在本地恢复：流程回到空闲状态并向用户弹出提示，不会终止进程。

use thiserror::Error;

/// 通用导入失败提示（格式无关，不区分 xpub 与地址）
pub const WATCH_ONLY_IMPORT_ERROR: &str =
    "Only xpub/ypub/zpub or a single bitcoin address can be imported in this app.";

/// 重复导入提示
pub const DUPLICATE_WALLET_ERROR: &str = "This wallet has been previously imported.";

/// 提示框标题
pub const ALERT_TITLE_ERROR: &str = "Error";

pub type Result<T> = std::result::Result<T, ImportError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// 既不是合法的扩展公钥，也不是合法的单地址
    #[error("invalid watch-only secret")]
    InvalidSecret,

    /// 钱包标识已存在
    #[error("wallet already imported")]
    DuplicateWallet,

    /// 钱包存储写入失败（携带底层错误消息，若有）
    #[error("failed to persist wallet: {}", .0.as_deref().unwrap_or("unknown error"))]
    PersistenceFailure(Option<String>),
}

impl ImportError {
    /// 从存储层错误构造，消息包含完整的错误链，空消息视为无消息
    pub fn persistence(err: &anyhow::Error) -> Self {
        let message = format!("{:#}", err);
        if message.trim().is_empty() {
            Self::PersistenceFailure(None)
        } else {
            Self::PersistenceFailure(Some(message))
        }
    }

    /// 稳定的错误代码（日志与上层匹配用）
    pub fn kind(&self) -> &'static str {
        match self {
            ImportError::InvalidSecret => "invalid_secret",
            ImportError::DuplicateWallet => "duplicate_wallet",
            ImportError::PersistenceFailure(_) => "persistence_failure",
        }
    }

    /// 面向用户的提示文案
    pub fn user_message(&self) -> String {
        match self {
            ImportError::InvalidSecret => WATCH_ONLY_IMPORT_ERROR.to_string(),
            ImportError::DuplicateWallet => DUPLICATE_WALLET_ERROR.to_string(),
            ImportError::PersistenceFailure(Some(message)) => message.clone(),
            ImportError::PersistenceFailure(None) => WATCH_ONLY_IMPORT_ERROR.to_string(),
        }
    }
}

/// 剪贴板访问错误，仅记录日志，不向用户展示
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard access denied")]
    PermissionDenied,
}
