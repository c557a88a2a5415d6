// 导航与提示框实现
// 通过通道把关闭页面事件交给外层界面

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::service::collaborators::{AlertPresenter, Navigator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// 返回上一级页面
    Dismiss,
}

pub struct ChannelNavigator {
    sender: mpsc::UnboundedSender<NavigationEvent>,
}

impl ChannelNavigator {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<NavigationEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl Navigator for ChannelNavigator {
    async fn dismiss(&self) {
        if self.sender.send(NavigationEvent::Dismiss).is_err() {
            tracing::debug!("Navigation receiver dropped, dismiss ignored");
        }
    }
}

/// 把提示框写入日志（命令行模式）
pub struct TracingAlertPresenter;

#[async_trait]
impl AlertPresenter for TracingAlertPresenter {
    async fn present_alert(&self, title: &str, message: &str) {
        tracing::warn!(title, "{}", message);
    }
}
