//! 测试辅助模块
//! 提供协作者的记录型替身和会话构造函数

#![allow(dead_code)]

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};
use watchguard::{
    config::ImportConfig,
    domain::{BitcoinKeyValidator, KeyValidator, SecretClassifier, WalletDescriptor, WalletId},
    infrastructure::{InMemoryWalletStore, MemoryClipboard},
    service::{AlertPresenter, ImportCollaborators, Navigator, WalletStore, WatchOnlyImportSession},
};

// BIP32 test vector 1, chain m
pub const XPUB: &str = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";
pub const ADDRESS: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
pub const BECH32: &str = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";

pub fn test_import_config() -> ImportConfig {
    ImportConfig {
        network: "bitcoin".into(),
        echo_window_ms: 1500,
        wallet_store_path: String::new(),
    }
}

// ============ 校验器 ============

/// 统计分类调用次数的校验器
pub struct CountingValidator {
    inner: BitcoinKeyValidator,
    pub calls: AtomicUsize,
}

impl CountingValidator {
    pub fn new() -> Self {
        Self {
            inner: BitcoinKeyValidator::default(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl KeyValidator for CountingValidator {
    fn is_hd(&self, candidate: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.is_hd(candidate)
    }

    fn is_valid_xpub(&self, candidate: &str) -> bool {
        self.inner.is_valid_xpub(candidate)
    }

    fn is_valid_address(&self, candidate: &str) -> bool {
        self.inner.is_valid_address(candidate)
    }

    fn identity(&self, descriptor: &WalletDescriptor) -> WalletId {
        self.inner.identity(descriptor)
    }
}

// ============ 存储 ============

/// 总是写入失败的存储
pub struct FailingStore {
    pub message: String,
}

#[async_trait]
impl WalletStore for FailingStore {
    async fn wallet_ids(&self) -> HashSet<WalletId> {
        HashSet::new()
    }

    async fn add_and_save(&self, _id: &WalletId, _descriptor: &WalletDescriptor) -> Result<()> {
        Err(anyhow::anyhow!("{}", self.message))
    }
}

/// 持久化阶段挂起，直到测试放行
#[derive(Default)]
pub struct GatedStore {
    pub inner: InMemoryWalletStore,
    pub entered: Notify,
    pub release: Notify,
}

#[async_trait]
impl WalletStore for GatedStore {
    async fn wallet_ids(&self) -> HashSet<WalletId> {
        self.inner.wallet_ids().await
    }

    async fn add_and_save(&self, id: &WalletId, descriptor: &WalletDescriptor) -> Result<()> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.add_and_save(id, descriptor).await
    }
}

// ============ 导航 / 提示 ============

#[derive(Default)]
pub struct RecordingNavigator {
    pub dismissals: AtomicUsize,
}

impl RecordingNavigator {
    pub fn dismissals(&self) -> usize {
        self.dismissals.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn dismiss(&self) {
        self.dismissals.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingAlerts {
    pub alerts: Mutex<Vec<(String, String)>>,
}

impl RecordingAlerts {
    pub async fn messages(&self) -> Vec<String> {
        self.alerts
            .lock()
            .await
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }
}

#[async_trait]
impl AlertPresenter for RecordingAlerts {
    async fn present_alert(&self, title: &str, message: &str) {
        self.alerts
            .lock()
            .await
            .push((title.to_string(), message.to_string()));
    }
}

// ============ 会话构造 ============

pub struct Harness {
    pub validator: Arc<CountingValidator>,
    pub clipboard: Arc<MemoryClipboard>,
    pub navigator: Arc<RecordingNavigator>,
    pub alerts: Arc<RecordingAlerts>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            validator: Arc::new(CountingValidator::new()),
            clipboard: Arc::new(MemoryClipboard::with_contents("xpub-from-clipboard")),
            navigator: Arc::new(RecordingNavigator::default()),
            alerts: Arc::new(RecordingAlerts::default()),
        }
    }

    pub fn classifier(&self) -> SecretClassifier {
        SecretClassifier::new(self.validator.clone())
    }

    pub fn collaborators(&self, store: Arc<dyn WalletStore>) -> ImportCollaborators {
        ImportCollaborators {
            store,
            clipboard: self.clipboard.clone(),
            navigator: self.navigator.clone(),
            alerts: self.alerts.clone(),
        }
    }

    pub fn session(&self, store: Arc<dyn WalletStore>) -> WatchOnlyImportSession {
        WatchOnlyImportSession::new(
            self.classifier(),
            self.collaborators(store),
            &test_import_config(),
            None,
        )
    }
}
