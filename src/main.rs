//! Watchguard 命令行入口
//! 逐条导入命令行参数（或标准输入的每一行）为观察钱包

use std::{process::ExitCode, sync::Arc};

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use watchguard::{
    infrastructure::{
        logging, ChannelNavigator, JsonFileWalletStore, MemoryClipboard, TracingAlertPresenter,
    },
    prelude::*,
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // 1. 加载环境变量
    dotenvy::dotenv().ok();

    // 2. 加载配置（CONFIG_PATH 可选）
    let config_path = std::env::var("CONFIG_PATH").ok();
    let config = Config::from_env_and_file(config_path.as_deref())?;
    config.validate()?;

    // 3. 初始化日志
    let _log_guard = logging::init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let network = config.import.network()?;
    tracing::info!(network = %network, "Starting watchguard");

    // 4. 组装协作者
    let store = Arc::new(JsonFileWalletStore::open(&config.import.wallet_store_path).await?);
    let (navigator, mut navigation_events) = ChannelNavigator::channel();
    let collaborators = ImportCollaborators {
        store: store.clone(),
        clipboard: Arc::new(MemoryClipboard::new()),
        navigator: Arc::new(navigator),
        alerts: Arc::new(TracingAlertPresenter),
    };
    let classifier = SecretClassifier::new(Arc::new(BitcoinKeyValidator::new(network)));

    // 5. 收集待导入文本
    let mut inputs: Vec<String> = std::env::args().skip(1).collect();
    if inputs.is_empty() {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            inputs.push(line);
        }
    }

    // 6. 每条输入对应一次页面访问
    let mut rejected = 0usize;
    for input in inputs {
        let session =
            WatchOnlyImportSession::new(classifier.clone(), collaborators.clone(), &config.import, None);
        session.on_paste(&input);

        match session.handle_import().await {
            ImportOutcome::Imported(id) => {
                println!("imported {}", id);
            }
            ImportOutcome::Rejected(err) => {
                rejected += 1;
                println!("rejected [{}] {}", err.kind(), err.user_message());
            }
            ImportOutcome::Dropped => {}
        }
    }

    while let Ok(event) = navigation_events.try_recv() {
        tracing::debug!(?event, "Navigation event");
    }

    tracing::info!(
        wallets = store.wallets().await.len(),
        path = ?store.path(),
        "Wallet store updated"
    );

    // 不可用 process::exit：日志 guard 须析构以刷新文件
    if rejected > 0 {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
