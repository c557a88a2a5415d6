//! Watchguard - 观察钱包导入管线
//!
//! 把用户输入、粘贴或扫码得到的文本安全地转换为一个观察钱包：
//! 规范化、分类（xpub / 单地址）、查重，再执行一次性的异步导入事务。

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod service;
pub mod utils;

// 重新导出常用类型
pub use error::{ImportError, Result};

pub mod prelude {
    pub use crate::{
        config::{Config, ImportConfig},
        domain::{BitcoinKeyValidator, KeyValidator, SecretClassifier, WalletDescriptor, WalletId},
        error::ImportError,
        service::{
            ImportCollaborators, ImportOutcome, ImportPhase, ImportRouteParams, ImportSource,
            WatchOnlyImportSession,
        },
    };
}
