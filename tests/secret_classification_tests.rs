//! 秘密串分类验证
//!
//! 使用公开测试向量验证 xpub / 地址的分类结果与标识稳定性

mod common;

use std::sync::Arc;

use bitcoin::Network;
use common::{ADDRESS, BECH32, XPUB};
use tokio_test::{assert_err, assert_ok};
use watchguard::{prelude::*, utils::sanitize_import_text};

fn mainnet() -> SecretClassifier {
    SecretClassifier::new(Arc::new(BitcoinKeyValidator::new(Network::Bitcoin)))
}

#[test]
fn test_pasted_xpub_with_line_breaks() {
    let pasted = format!("{}\n{}\n", &XPUB[..40], &XPUB[40..]);
    let candidate = sanitize_import_text(&pasted);

    let descriptor = assert_ok!(mainnet().classify(&candidate));
    assert!(descriptor.is_hd());
    assert!(descriptor.use_with_hardware_wallet());
}

#[test]
fn test_pasted_address_with_byte_order_mark() {
    let candidate = sanitize_import_text(&format!("\u{FEFF}{}", ADDRESS));

    let descriptor = assert_ok!(mainnet().classify(&candidate));
    assert_eq!(descriptor, WalletDescriptor::address(ADDRESS));
}

#[test]
fn test_address_formats() {
    for address in [ADDRESS, BECH32] {
        let descriptor = assert_ok!(mainnet().classify(address));
        assert_eq!(descriptor, WalletDescriptor::address(address));
        assert!(!descriptor.use_with_hardware_wallet());
    }
}

#[test]
fn test_rejections_share_one_kind() {
    let candidates = [
        "",
        "xpub661MyMwAqRbc",
        "zpubnotbase58!!",
        "1A1zP1eP5QGefi2DMPTfTL5SLmv7Divf",
        "0x52908400098527886E0F7030069857D2E4169EE7",
        "abandon abandon abandon",
    ];

    for candidate in candidates {
        let err = assert_err!(mainnet().classify(&sanitize_import_text(candidate)));
        assert_eq!(err, ImportError::InvalidSecret, "candidate {}", candidate);
    }
}

#[test]
fn test_network_mismatch_rejected() {
    let testnet = SecretClassifier::new(Arc::new(BitcoinKeyValidator::new(Network::Testnet)));
    assert_err!(testnet.classify(XPUB));
    assert_err!(testnet.classify(ADDRESS));
    assert_ok!(testnet.classify("tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx"));
}

#[test]
fn test_identity_is_content_derived() {
    let classifier = mainnet();
    let a = assert_ok!(classifier.classify(XPUB));
    let b = assert_ok!(classifier.classify(XPUB));
    assert_eq!(classifier.identity(&a), classifier.identity(&b));

    let address = assert_ok!(classifier.classify(ADDRESS));
    assert_ne!(classifier.identity(&a), classifier.identity(&address));
}
