pub mod document;
pub mod paths;
pub mod reader;
pub mod sync;
pub mod writer;

pub use document::PrefsDocument;
pub use sync::SyncConfig;
