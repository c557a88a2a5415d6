//! 观察钱包领域模型
//!
//! 观察钱包只持有公开材料（xpub 或单地址），没有任何签名私钥。

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// 分类成功后的钱包描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WalletDescriptor {
    /// HD 扩展公钥（xpub/ypub/zpub 等）
    ExtendedKey {
        key: String,
        /// PSBT 导出/硬件钱包签名流程，扩展公钥恒为 true
        use_with_hardware_wallet: bool,
    },
    /// 单个链上地址（非 HD）
    Address { address: String },
}

impl WalletDescriptor {
    pub fn extended_key(key: impl Into<String>) -> Self {
        WalletDescriptor::ExtendedKey {
            key: key.into(),
            use_with_hardware_wallet: true,
        }
    }

    pub fn address(address: impl Into<String>) -> Self {
        WalletDescriptor::Address {
            address: address.into(),
        }
    }

    /// 原始秘密串（xpub 或地址）
    pub fn secret(&self) -> &str {
        match self {
            WalletDescriptor::ExtendedKey { key, .. } => key,
            WalletDescriptor::Address { address } => address,
        }
    }

    pub fn is_hd(&self) -> bool {
        matches!(self, WalletDescriptor::ExtendedKey { .. })
    }

    pub fn use_with_hardware_wallet(&self) -> bool {
        match self {
            WalletDescriptor::ExtendedKey {
                use_with_hardware_wallet,
                ..
            } => *use_with_hardware_wallet,
            WalletDescriptor::Address { .. } => false,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            WalletDescriptor::ExtendedKey { .. } => "extended_key",
            WalletDescriptor::Address { .. } => "address",
        }
    }

    /// 默认钱包名称
    pub fn label(&self) -> &'static str {
        match self {
            WalletDescriptor::ExtendedKey { .. } => "Imported xpub",
            WalletDescriptor::Address { .. } => "Imported watch-only",
        }
    }
}

/// 钱包标识：规范化秘密串的 SHA-256（hex）
///
/// 只取决于内容，与导入顺序和时间无关。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletId(String);

impl WalletId {
    pub fn from_canonical_secret(canonical: &str) -> Self {
        let digest = Sha256::digest(canonical.as_bytes());
        WalletId(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_key_is_hardware_eligible() {
        let d = WalletDescriptor::extended_key("xpub123");
        assert!(d.is_hd());
        assert!(d.use_with_hardware_wallet());
        assert_eq!(d.secret(), "xpub123");

        let a = WalletDescriptor::address("1abc");
        assert!(!a.is_hd());
        assert!(!a.use_with_hardware_wallet());
    }

    #[test]
    fn test_wallet_id_deterministic() {
        let a = WalletId::from_canonical_secret("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
        let b = WalletId::from_canonical_secret("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
        assert_ne!(a, WalletId::from_canonical_secret("other"));
    }

    #[test]
    fn test_descriptor_serde_tag() {
        let json = serde_json::to_value(WalletDescriptor::address("1abc")).unwrap();
        assert_eq!(json["kind"], "address");
        assert_eq!(json["address"], "1abc");
    }
}
