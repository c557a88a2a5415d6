//! 重复导入检查
//!
//! 按钱包标识比较，而不是按原始输入串比较。标识是否能归一化等价表示
//! （例如大小写不同的 bech32 地址）取决于 [`KeyValidator::identity`]。
//!
//! [`KeyValidator::identity`]: crate::domain::KeyValidator::identity

use std::collections::HashSet;

use crate::domain::{
    secret_classifier::SecretClassifier,
    watch_only::{WalletDescriptor, WalletId},
};

pub struct DuplicateGuard;

impl DuplicateGuard {
    /// 标识是否已在钱包集合中
    pub fn is_duplicate(id: &WalletId, wallet_set: &HashSet<WalletId>) -> bool {
        wallet_set.contains(id)
    }

    /// 计算标识并检查，返回标识供后续持久化使用
    pub fn check(
        classifier: &SecretClassifier,
        descriptor: &WalletDescriptor,
        wallet_set: &HashSet<WalletId>,
    ) -> (WalletId, bool) {
        let id = classifier.identity(descriptor);
        let duplicate = Self::is_duplicate(&id, wallet_set);
        (id, duplicate)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::BitcoinKeyValidator;

    #[test]
    fn test_duplicate_by_identity() {
        let classifier = SecretClassifier::new(Arc::new(BitcoinKeyValidator::default()));
        let descriptor = classifier
            .classify("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa")
            .unwrap();

        let mut set = HashSet::new();
        let (id, duplicate) = DuplicateGuard::check(&classifier, &descriptor, &set);
        assert!(!duplicate);

        set.insert(id);
        let (_, duplicate) = DuplicateGuard::check(&classifier, &descriptor, &set);
        assert!(duplicate);
    }

    #[test]
    fn test_mixed_case_bech32_is_duplicate() {
        let classifier = SecretClassifier::new(Arc::new(BitcoinKeyValidator::default()));
        let lower = classifier
            .classify("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4")
            .unwrap();
        let upper = classifier
            .classify("BC1QW508D6QEJXTDG4Y5R3ZARVARY0C5XW7KV8F3T4")
            .unwrap();

        let set: HashSet<_> = [classifier.identity(&lower)].into_iter().collect();
        assert!(DuplicateGuard::check(&classifier, &upper, &set).1);
    }
}
