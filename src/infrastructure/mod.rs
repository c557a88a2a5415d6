pub mod clipboard;
pub mod log_redact;
pub mod logging;
pub mod navigation;
pub mod wallet_store;

pub use clipboard::MemoryClipboard;
pub use navigation::{ChannelNavigator, NavigationEvent, TracingAlertPresenter};
pub use wallet_store::{InMemoryWalletStore, JsonFileWalletStore, StoredWallet};
