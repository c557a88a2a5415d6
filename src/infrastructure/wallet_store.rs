// 观察钱包存储实现
// 内存实现用于测试与嵌入，JSON 文件实现用于命令行

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    domain::watch_only::{WalletDescriptor, WalletId},
    service::collaborators::WalletStore,
};

// ============ 存储模型 ============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredWallet {
    pub id: WalletId,
    pub label: String,
    #[serde(flatten)]
    pub descriptor: WalletDescriptor,
    pub imported_at: chrono::DateTime<chrono::Utc>,
}

impl StoredWallet {
    pub fn new(id: &WalletId, descriptor: &WalletDescriptor) -> Self {
        Self {
            id: id.clone(),
            label: descriptor.label().to_string(),
            descriptor: descriptor.clone(),
            imported_at: chrono::Utc::now(),
        }
    }
}

// ============ 内存实现 ============

#[derive(Default)]
pub struct InMemoryWalletStore {
    wallets: RwLock<Vec<StoredWallet>>,
}

impl InMemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn wallets(&self) -> Vec<StoredWallet> {
        self.wallets.read().await.clone()
    }
}

#[async_trait]
impl WalletStore for InMemoryWalletStore {
    async fn wallet_ids(&self) -> HashSet<WalletId> {
        self.wallets.read().await.iter().map(|w| w.id.clone()).collect()
    }

    async fn add_and_save(&self, id: &WalletId, descriptor: &WalletDescriptor) -> Result<()> {
        self.wallets
            .write()
            .await
            .push(StoredWallet::new(id, descriptor));
        Ok(())
    }
}

// ============ JSON 文件实现 ============

pub struct JsonFileWalletStore {
    path: PathBuf,
    wallets: RwLock<Vec<StoredWallet>>,
}

impl JsonFileWalletStore {
    /// 打开存储文件，不存在时视为空集合
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let wallets: Vec<StoredWallet> = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("Failed to parse wallet store: {:?}", path))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read wallet store: {:?}", path))
            }
        };

        tracing::debug!(path = ?path, count = wallets.len(), "Wallet store opened");

        Ok(Self {
            path,
            wallets: RwLock::new(wallets),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn wallets(&self) -> Vec<StoredWallet> {
        self.wallets.read().await.clone()
    }

    /// 先写临时文件再 rename，写入失败时内存集合不变
    async fn persist(&self, wallets: &[StoredWallet]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(wallets).context("Failed to serialize wallets")?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .with_context(|| format!("Failed to write wallet store: {:?}", tmp))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace wallet store: {:?}", self.path))?;

        Ok(())
    }
}

#[async_trait]
impl WalletStore for JsonFileWalletStore {
    async fn wallet_ids(&self) -> HashSet<WalletId> {
        self.wallets.read().await.iter().map(|w| w.id.clone()).collect()
    }

    async fn add_and_save(&self, id: &WalletId, descriptor: &WalletDescriptor) -> Result<()> {
        let mut wallets = self.wallets.write().await;

        let mut next = wallets.clone();
        next.push(StoredWallet::new(id, descriptor));
        self.persist(&next).await?;

        *wallets = next;
        Ok(())
    }
}
