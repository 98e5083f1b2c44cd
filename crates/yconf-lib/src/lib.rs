//! `yconf-lib` - per-application YAML configuration store.
//!
//! Each store is one YAML (or JSON) document at
//! `{base_dir}/{id}/config.yaml`. Writes replace the whole document under a
//! cross-process lock; reads and queries never fail, they come back empty.
//! There is deliberately no way to set a single key: mutate by overwriting
//! the whole document or by editing the file.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::collections::BTreeMap;
//! use yconf_lib::{ConfigHandle, ConfigStore};
//!
//! let store = ConfigStore::new(ConfigHandle::new("mytool"));
//!
//! store.overwrite(&BTreeMap::from([("editor", "vim")])).unwrap();
//! assert_eq!(store.query(".editor"), "vim");
//! ```

pub mod configurer;
pub mod editor;
pub mod error;
pub mod handle;
pub mod lock;
pub mod persist;
pub mod query;
pub mod store;

pub use configurer::Configurer;
pub use editor::{Editor, SystemEditor};
pub use error::{ConfigError, Result};
pub use handle::{ConfigHandle, DEFAULT_FILE_NAME};
pub use lock::FileLock;
pub use query::{Evaluator, JqEvaluator, NativeEvaluator, OutputFormat};
pub use store::ConfigStore;
