//! 扫码回显抑制
//!
//! 扫码结果回填到输入框时会再触发一次同值的文本变更事件。窗口期内出现的
//! 同值事件视为回显而被忽略。窗口是启发式的：窗口内对同一值的快速重复扫码
//! 与回显无法区分，也会被忽略。

use std::time::Duration;

use tokio::time::Instant;

use crate::{config::DEFAULT_ECHO_WINDOW_MS, utils::sanitize_import_text};

/// 最近一次扫码记录
#[derive(Debug, Clone)]
pub struct EchoRecord {
    pub value: String,
    pub at: Instant,
}

#[derive(Debug)]
pub struct EchoSuppressor {
    window: Duration,
    last_scan: Option<EchoRecord>,
}

impl EchoSuppressor {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_scan: None,
        }
    }

    /// 记录一次确认的扫码结果（覆盖旧记录）
    pub fn record_scan(&mut self, scanned: &str) {
        self.last_scan = Some(EchoRecord {
            value: sanitize_import_text(scanned),
            at: Instant::now(),
        });
    }

    pub fn last_scan(&self) -> Option<&EchoRecord> {
        self.last_scan.as_ref()
    }

    /// 文本变更事件是否为最近扫码的回显
    pub fn is_echo(&self, incoming: &str) -> bool {
        self.is_echo_at(incoming, Instant::now())
    }

    pub fn is_echo_at(&self, incoming: &str, now: Instant) -> bool {
        let sanitized = sanitize_import_text(incoming);
        if sanitized.is_empty() {
            return false;
        }

        match &self.last_scan {
            Some(record) => {
                record.value == sanitized
                    && now.saturating_duration_since(record.at) <= self.window
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.last_scan = None;
    }
}

impl Default for EchoSuppressor {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_ECHO_WINDOW_MS))
    }
}
