//! 观察钱包秘密串分类
//!
//! 输入格式对用户而言是模糊的（xpub 还是地址），所以所有失败都折叠为
//! [`ImportError::InvalidSecret`]，不区分“坏的 xpub”与“坏的地址”。

use std::sync::Arc;

use bitcoin::{address::NetworkUnchecked, base58, bip32::Xpub, Address, Network};

use crate::{
    domain::watch_only::{WalletDescriptor, WalletId},
    error::{ImportError, Result},
};

/// 密钥/地址校验协作者
pub trait KeyValidator: Send + Sync {
    /// 是否具有 HD 扩展公钥的外形
    fn is_hd(&self, candidate: &str) -> bool;

    /// HD 外形的串是否为合法扩展公钥
    fn is_valid_xpub(&self, candidate: &str) -> bool;

    /// 是否为合法的单个链上地址
    fn is_valid_address(&self, candidate: &str) -> bool;

    /// 已校验描述的稳定标识
    fn identity(&self, descriptor: &WalletDescriptor) -> WalletId;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SLIP-132 版本字节
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

struct KeyVersion {
    prefix: &'static str,
    version: [u8; 4],
    mainnet: bool,
}

const KEY_VERSIONS: &[KeyVersion] = &[
    KeyVersion { prefix: "xpub", version: [0x04, 0x88, 0xB2, 0x1E], mainnet: true },
    KeyVersion { prefix: "ypub", version: [0x04, 0x9D, 0x7C, 0xB2], mainnet: true },
    KeyVersion { prefix: "zpub", version: [0x04, 0xB2, 0x47, 0x46], mainnet: true },
    KeyVersion { prefix: "tpub", version: [0x04, 0x35, 0x87, 0xCF], mainnet: false },
    KeyVersion { prefix: "upub", version: [0x04, 0x4A, 0x52, 0x62], mainnet: false },
    KeyVersion { prefix: "vpub", version: [0x04, 0x5F, 0x1C, 0xF6], mainnet: false },
];

const XPUB_VERSION: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E];
const TPUB_VERSION: [u8; 4] = [0x04, 0x35, 0x87, 0xCF];
const EXTENDED_KEY_LEN: usize = 78;

/// 基于 bitcoin crate 的校验实现
#[derive(Debug, Clone, Copy)]
pub struct BitcoinKeyValidator {
    network: Network,
}

impl BitcoinKeyValidator {
    pub fn new(network: Network) -> Self {
        Self { network }
    }

    /// 解码任意 SLIP-132 版本的扩展公钥
    ///
    /// ypub/zpub 等只是换了版本字节，改写为 xpub/tpub 版本后交给 `Xpub::decode`。
    fn decode_extended_key(&self, candidate: &str) -> Option<Xpub> {
        let mut data = base58::decode_check(candidate).ok()?;
        if data.len() != EXTENDED_KEY_LEN {
            return None;
        }

        let version = KEY_VERSIONS
            .iter()
            .find(|v| data[..4] == v.version && candidate.starts_with(v.prefix))?;

        if version.mainnet != (self.network == Network::Bitcoin) {
            return None;
        }

        let canonical = if version.mainnet {
            XPUB_VERSION
        } else {
            TPUB_VERSION
        };
        data[..4].copy_from_slice(&canonical);

        Xpub::decode(&data).ok()
    }

    fn parse_address(&self, candidate: &str) -> Option<Address> {
        candidate
            .parse::<Address<NetworkUnchecked>>()
            .ok()?
            .require_network(self.network)
            .ok()
    }
}

impl Default for BitcoinKeyValidator {
    fn default() -> Self {
        Self::new(Network::Bitcoin)
    }
}

impl KeyValidator for BitcoinKeyValidator {
    fn is_hd(&self, candidate: &str) -> bool {
        KEY_VERSIONS.iter().any(|v| candidate.starts_with(v.prefix))
    }

    fn is_valid_xpub(&self, candidate: &str) -> bool {
        self.decode_extended_key(candidate).is_some()
    }

    fn is_valid_address(&self, candidate: &str) -> bool {
        self.parse_address(candidate).is_some()
    }

    fn identity(&self, descriptor: &WalletDescriptor) -> WalletId {
        match descriptor {
            // base58 区分大小写，原样即规范形式
            WalletDescriptor::ExtendedKey { key, .. } => WalletId::from_canonical_secret(key),
            // bech32 大小写不敏感，Display 输出小写
            WalletDescriptor::Address { address } => match self.parse_address(address) {
                Some(parsed) => WalletId::from_canonical_secret(&parsed.to_string()),
                None => WalletId::from_canonical_secret(address),
            },
        }
    }
}

/// 秘密串分类器
#[derive(Clone)]
pub struct SecretClassifier {
    validator: Arc<dyn KeyValidator>,
}

impl SecretClassifier {
    pub fn new(validator: Arc<dyn KeyValidator>) -> Self {
        Self { validator }
    }

    /// 分类规范化后的候选串
    ///
    /// HD 外形但校验失败的串直接拒绝，不会降级为地址处理。
    pub fn classify(&self, candidate: &str) -> Result<WalletDescriptor> {
        if candidate.is_empty() {
            return Err(ImportError::InvalidSecret);
        }

        if self.validator.is_hd(candidate) {
            if self.validator.is_valid_xpub(candidate) {
                return Ok(WalletDescriptor::extended_key(candidate));
            }
            return Err(ImportError::InvalidSecret);
        }

        if self.validator.is_valid_address(candidate) {
            return Ok(WalletDescriptor::address(candidate));
        }

        Err(ImportError::InvalidSecret)
    }

    pub fn identity(&self, descriptor: &WalletDescriptor) -> WalletId {
        self.validator.identity(descriptor)
    }
}
