//! 观察钱包导入会话
//!
//! 每个导入页面实例持有一个会话：输入框文本、导入阶段、最近扫码记录都是
//! 会话私有状态，不存在跨实例的全局状态。
//!
//! # 状态转换
//! ```text
//! Idle -> Validating            导入请求（按钮 / 自动触发 / 扫码）
//! Validating -> Idle(failure)   InvalidSecret / DuplicateWallet
//! Validating -> Importing       分类与查重通过
//! Importing -> Idle(success)    持久化成功，关闭页面
//! Importing -> Idle(failure)    PersistenceFailure
//! ```
//! 非 Idle 阶段到达的请求直接丢弃，不排队、不合并、不取消进行中的导入。

use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use crate::{
    config::ImportConfig,
    domain::{
        secret_classifier::SecretClassifier,
        watch_only::{WalletDescriptor, WalletId},
    },
    error::{ImportError, ALERT_TITLE_ERROR},
    infrastructure::log_redact::redact_secret,
    service::{
        collaborators::{AlertPresenter, Clipboard, Navigator, WalletStore},
        duplicate_guard::DuplicateGuard,
        echo_suppressor::EchoSuppressor,
    },
    utils::{is_blank, sanitize_import_text},
};

/// 导入阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPhase {
    Idle,
    Validating,
    Importing,
}

/// 导入请求来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSource {
    /// 手动输入 / 粘贴后点击导入
    Manual,
    /// 扫码直接投递
    Scan,
    /// 路由参数自动触发
    AutoTrigger,
}

impl ImportSource {
    /// 失败时是否清空输入框（手动输入的值保留以便修改）
    pub fn clears_input_on_error(&self) -> bool {
        matches!(self, ImportSource::Scan | ImportSource::AutoTrigger)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportSource::Manual => "manual",
            ImportSource::Scan => "scan",
            ImportSource::AutoTrigger => "auto_trigger",
        }
    }
}

/// 一次导入请求的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported(WalletId),
    Rejected(ImportError),
    /// 空输入或已有导入进行中
    Dropped,
}

impl ImportOutcome {
    pub fn is_imported(&self) -> bool {
        matches!(self, ImportOutcome::Imported(_))
    }
}

/// 扫码通道文本变更的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextChange {
    Applied,
    EchoSuppressed,
}

/// 页面入口参数
#[derive(Debug, Clone, Default)]
pub struct ImportRouteParams {
    /// 预填文本
    pub label: Option<String>,
    /// 打开页面即导入预填文本
    pub trigger_import: bool,
    /// 扫码页返回的待处理结果
    pub scanned: Option<String>,
}

/// 外部协作者集合
#[derive(Clone)]
pub struct ImportCollaborators {
    pub store: Arc<dyn WalletStore>,
    pub clipboard: Arc<dyn Clipboard>,
    pub navigator: Arc<dyn Navigator>,
    pub alerts: Arc<dyn AlertPresenter>,
}

pub struct WatchOnlyImportSession {
    classifier: SecretClassifier,
    collaborators: ImportCollaborators,
    echo: Mutex<EchoSuppressor>,
    text: watch::Sender<String>,
    phase: watch::Sender<ImportPhase>,
}

impl WatchOnlyImportSession {
    pub fn new(
        classifier: SecretClassifier,
        collaborators: ImportCollaborators,
        config: &ImportConfig,
        label: Option<&str>,
    ) -> Self {
        let initial = label.map(sanitize_import_text).unwrap_or_default();
        let (text, _) = watch::channel(initial);
        let (phase, _) = watch::channel(ImportPhase::Idle);

        Self {
            classifier,
            collaborators,
            echo: Mutex::new(EchoSuppressor::new(config.echo_window())),
            text,
            phase,
        }
    }

    /// 按入口参数打开页面：先投递待处理的扫码结果，再处理自动导入
    pub async fn open(
        classifier: SecretClassifier,
        collaborators: ImportCollaborators,
        config: &ImportConfig,
        params: ImportRouteParams,
    ) -> (Self, Vec<ImportOutcome>) {
        let session = Self::new(classifier, collaborators, config, params.label.as_deref());
        let mut outcomes = Vec::new();

        if let Some(scanned) = params.scanned.as_deref() {
            outcomes.push(session.on_bar_scanned(scanned).await);
        }
        if params.trigger_import {
            let value = session.on_blur();
            outcomes.push(
                session
                    .import_watch_only(&value, ImportSource::AutoTrigger)
                    .await,
            );
        }

        (session, outcomes)
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 只读响应式状态
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn phase(&self) -> ImportPhase {
        *self.phase.borrow()
    }

    pub fn is_importing(&self) -> bool {
        self.phase() != ImportPhase::Idle
    }

    /// 导入按钮是否可用
    pub fn can_import(&self) -> bool {
        !is_blank(&self.text.borrow()) && !self.is_importing()
    }

    pub fn subscribe_text(&self) -> watch::Receiver<String> {
        self.text.subscribe()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<ImportPhase> {
        self.phase.subscribe()
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 输入事件
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// 键盘输入（原样保存，失焦时再规范化）
    pub fn on_text_changed(&self, raw: &str) {
        self.text.send_replace(raw.to_string());
    }

    /// 输入框失焦：规范化并返回当前文本
    pub fn on_blur(&self) -> String {
        let sanitized = sanitize_import_text(&self.text.borrow());
        self.text.send_replace(sanitized.clone());
        sanitized
    }

    pub fn on_paste(&self, raw: &str) {
        self.text.send_replace(sanitize_import_text(raw));
    }

    pub fn on_clear(&self) {
        self.text.send_replace(String::new());
    }

    /// 导入按钮
    pub async fn handle_import(&self) -> ImportOutcome {
        let value = self.on_blur();
        self.import_watch_only(&value, ImportSource::Manual).await
    }

    /// 扫码结果直接投递，总会完整走一次导入
    pub async fn on_bar_scanned(&self, raw: &str) -> ImportOutcome {
        let scanned = sanitize_import_text(raw);
        if scanned.is_empty() {
            return ImportOutcome::Dropped;
        }

        self.echo.lock().await.record_scan(&scanned);
        tracing::debug!(secret = %redact_secret(&scanned), "QR scan recorded");

        self.import_watch_only(&scanned, ImportSource::Scan).await
    }

    /// 扫码按钮的通用文本变更通道
    ///
    /// 窗口期内与最近扫码同值的事件是回显：不触发导入，也不写入输入框。
    ///
    /// 回显不会被静默写回输入框，输入框保持扫码投递后已确定的内容（成功时为
    /// 该值，失败时已被清空）。写回会撤销扫码失败时的清空。
    pub async fn on_scanner_text_changed(&self, raw: &str) -> TextChange {
        let sanitized = sanitize_import_text(raw);
        if self.echo.lock().await.is_echo(&sanitized) {
            tracing::debug!(secret = %redact_secret(&sanitized), "QR echo suppressed");
            return TextChange::EchoSuppressed;
        }

        self.text.send_replace(sanitized);
        TextChange::Applied
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 导入事务
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub async fn import_watch_only(&self, value: &str, source: ImportSource) -> ImportOutcome {
        let secret = sanitize_import_text(value);
        if secret.is_empty() {
            return ImportOutcome::Dropped;
        }

        if !self.try_begin() {
            tracing::debug!(source = source.as_str(), "Import already in progress, request dropped");
            return ImportOutcome::Dropped;
        }

        let (id, descriptor) = match self.validate(&secret).await {
            Ok(validated) => validated,
            Err(err) => return self.fail(err, source).await,
        };

        self.text.send_replace(secret);
        self.phase.send_replace(ImportPhase::Importing);

        self.clear_clipboard().await;

        if let Err(e) = self
            .collaborators
            .store
            .add_and_save(&id, &descriptor)
            .await
        {
            tracing::error!(error = %e, wallet_id = %redact_secret(id.as_str()), "Failed to persist wallet");
            return self.fail(ImportError::persistence(&e), source).await;
        }

        tracing::info!(
            wallet_id = %redact_secret(id.as_str()),
            kind = descriptor.kind(),
            source = source.as_str(),
            "Watch-only wallet imported"
        );

        self.phase.send_replace(ImportPhase::Idle);
        self.collaborators.navigator.dismiss().await;

        ImportOutcome::Imported(id)
    }

    /// Idle -> Validating 的原子检查与设置
    fn try_begin(&self) -> bool {
        self.phase.send_if_modified(|phase| {
            if *phase == ImportPhase::Idle {
                *phase = ImportPhase::Validating;
                true
            } else {
                false
            }
        })
    }

    async fn validate(&self, secret: &str) -> Result<(WalletId, WalletDescriptor), ImportError> {
        let descriptor = self.classifier.classify(secret)?;
        let wallet_set = self.collaborators.store.wallet_ids().await;

        let (id, duplicate) = DuplicateGuard::check(&self.classifier, &descriptor, &wallet_set);
        if duplicate {
            return Err(ImportError::DuplicateWallet);
        }

        Ok((id, descriptor))
    }

    /// 尽力清空剪贴板，失败只记日志
    async fn clear_clipboard(&self) {
        let clipboard = &self.collaborators.clipboard;
        let result = match clipboard.has_string().await {
            Ok(true) => clipboard.set_string("").await,
            Ok(false) => Ok(()),
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            tracing::error!(error = %e, "Failed to clear clipboard");
        }
    }

    async fn fail(&self, err: ImportError, source: ImportSource) -> ImportOutcome {
        tracing::warn!(kind = err.kind(), source = source.as_str(), "Watch-only import rejected");

        if source.clears_input_on_error() {
            self.text.send_replace(String::new());
        }
        self.phase.send_replace(ImportPhase::Idle);

        self.collaborators
            .alerts
            .present_alert(ALERT_TITLE_ERROR, &err.user_message())
            .await;

        ImportOutcome::Rejected(err)
    }
}
