//! Domain 模块
//!
//! 观察钱包的领域模型与秘密串分类

pub mod secret_classifier;
pub mod watch_only;

// 重新导出常用类型
pub use secret_classifier::{BitcoinKeyValidator, KeyValidator, SecretClassifier};
pub use watch_only::{WalletDescriptor, WalletId};
