// 导入流程的外部协作者接口
// 存储、剪贴板、导航、提示框均由外层提供

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;

use crate::{
    domain::watch_only::{WalletDescriptor, WalletId},
    error::ClipboardError,
};

// ============ 钱包存储 ============

#[async_trait]
pub trait WalletStore: Send + Sync {
    /// 当前已导入钱包的标识集合
    async fn wallet_ids(&self) -> HashSet<WalletId>;

    /// 追加并持久化钱包
    async fn add_and_save(&self, id: &WalletId, descriptor: &WalletDescriptor) -> Result<()>;
}

// ============ 剪贴板 ============

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn has_string(&self) -> std::result::Result<bool, ClipboardError>;

    async fn set_string(&self, value: &str) -> std::result::Result<(), ClipboardError>;
}

// ============ 导航 / 提示 ============

#[async_trait]
pub trait Navigator: Send + Sync {
    /// 导入成功后关闭导入页面
    async fn dismiss(&self);
}

#[async_trait]
pub trait AlertPresenter: Send + Sync {
    async fn present_alert(&self, title: &str, message: &str);
}
