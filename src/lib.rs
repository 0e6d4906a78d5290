pub mod classifier;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod grabber;
pub mod output;
pub mod program;
pub mod scope;
pub mod workspace;

pub use error::ScopeError;
pub use program::ProgramHandle;
pub use scope::{AssetType, ClassifiedScope, ScopeAsset, ScopeRow};
