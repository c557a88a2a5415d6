// 进程内剪贴板
// 平台剪贴板由宿主注入，这里提供无平台依赖的实现

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{error::ClipboardError, service::collaborators::Clipboard};

#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(value: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(value.into())),
        }
    }

    pub async fn contents(&self) -> Option<String> {
        self.contents.lock().await.clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn has_string(&self) -> Result<bool, ClipboardError> {
        Ok(self
            .contents
            .lock()
            .await
            .as_deref()
            .is_some_and(|s| !s.is_empty()))
    }

    async fn set_string(&self, value: &str) -> Result<(), ClipboardError> {
        *self.contents.lock().await = Some(value.to_string());
        Ok(())
    }
}
