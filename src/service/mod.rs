pub mod collaborators;
pub mod duplicate_guard;
pub mod echo_suppressor;
pub mod watch_only_import; // 导入事务与页面会话

pub use collaborators::{AlertPresenter, Clipboard, Navigator, WalletStore};
pub use duplicate_guard::DuplicateGuard;
pub use echo_suppressor::EchoSuppressor;
pub use watch_only_import::{
    ImportCollaborators, ImportOutcome, ImportPhase, ImportRouteParams, ImportSource, TextChange,
    WatchOnlyImportSession,
};
