//! Object-safe store interface for host tools.
//!
//! A command framework that embeds configuration holds a
//! `Box<dyn Configurer>` and never names [`ConfigStore`] directly, so the
//! store can be swapped for another backend or a fake in tests.

use std::path::PathBuf;

use crate::error::Result;
use crate::store::ConfigStore;

/// The lifecycle operations of one bound configuration store.
///
/// Reads never fail (missing or unreadable data is empty); writes and
/// editing report errors.
pub trait Configurer: Send + Sync {
    /// Identifier the store is bound to.
    fn id(&self) -> &str;

    /// Resolved config file path, `None` if unresolved.
    fn path(&self) -> Option<PathBuf>;

    /// Resolved store directory, `None` if unresolved.
    fn dir(&self) -> Option<PathBuf>;

    /// Destructively reset to an empty config file.
    ///
    /// # Errors
    ///
    /// Returns `Unresolved` or `Io`.
    fn init(&self) -> Result<()>;

    /// Raw document text, empty when there is none.
    fn data(&self) -> String;

    /// Print [`data`](Self::data) plus a newline to stdout.
    fn print(&self);

    /// Open the config file in an editor and wait for it.
    ///
    /// # Errors
    ///
    /// Returns `Unresolved`, `Io`, `NoEditor`, or `Editor`.
    fn edit(&self) -> Result<()>;

    /// Replace the whole document with YAML text.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` for invalid YAML, otherwise `Unresolved` or
    /// `Io`.
    fn write(&self, yaml: &str) -> Result<()>;

    /// Query result text, empty on no match or failure.
    fn query(&self, selector: &str) -> String;

    /// Print [`query`](Self::query) plus a newline to stdout.
    fn query_print(&self, selector: &str);
}

impl Configurer for ConfigStore {
    fn id(&self) -> &str {
        self.handle().id()
    }

    fn path(&self) -> Option<PathBuf> {
        Self::path(self)
    }

    fn dir(&self) -> Option<PathBuf> {
        Self::dir(self)
    }

    fn init(&self) -> Result<()> {
        Self::init(self)
    }

    fn data(&self) -> String {
        Self::data(self)
    }

    fn print(&self) {
        Self::print(self);
    }

    fn edit(&self) -> Result<()> {
        Self::edit(self)
    }

    fn write(&self, yaml: &str) -> Result<()> {
        self.overwrite_raw(yaml)
    }

    fn query(&self, selector: &str) -> String {
        Self::query(self, selector)
    }

    fn query_print(&self, selector: &str) {
        Self::query_print(self, selector);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::ConfigHandle;
    use std::sync::Mutex;

    fn boxed(base: &std::path::Path, id: &str) -> Box<dyn Configurer> {
        Box::new(ConfigStore::new(ConfigHandle::new(id).with_base_dir(base)))
    }

    #[test]
    fn test_store_through_trait_object() {
        let tmp = tempfile::tempdir().unwrap();
        let conf = boxed(tmp.path(), "app");

        assert_eq!(conf.id(), "app");
        assert_eq!(conf.dir().unwrap(), tmp.path().join("app"));
        assert_eq!(conf.data(), "");

        conf.write("name: demo\nport: 8080\n").unwrap();
        assert_eq!(conf.data(), "name: demo\nport: 8080\n");
        assert_eq!(conf.query(".port"), "8080");
        assert_eq!(conf.query(".missing"), "");

        conf.init().unwrap();
        assert_eq!(conf.data(), "");
        assert!(conf.path().unwrap().exists());
    }

    #[test]
    fn test_trait_write_validates() {
        let tmp = tempfile::tempdir().unwrap();
        let conf = boxed(tmp.path(), "app");
        assert!(conf.write("a: [1,").is_err());
        assert!(!conf.path().unwrap().exists());
    }

    /// In-memory stand-in a host tool might use in its own tests.
    #[derive(Default)]
    struct MemoryConfigurer {
        doc: Mutex<String>,
    }

    impl Configurer for MemoryConfigurer {
        fn id(&self) -> &str {
            "memory"
        }
        fn path(&self) -> Option<PathBuf> {
            None
        }
        fn dir(&self) -> Option<PathBuf> {
            None
        }
        fn init(&self) -> Result<()> {
            self.doc.lock().unwrap().clear();
            Ok(())
        }
        fn data(&self) -> String {
            self.doc.lock().unwrap().clone()
        }
        fn print(&self) {}
        fn edit(&self) -> Result<()> {
            Ok(())
        }
        fn write(&self, yaml: &str) -> Result<()> {
            *self.doc.lock().unwrap() = yaml.to_string();
            Ok(())
        }
        fn query(&self, _: &str) -> String {
            String::new()
        }
        fn query_print(&self, _: &str) {}
    }

    fn reset_and_seed(conf: &dyn Configurer) -> Result<String> {
        conf.init()?;
        conf.write("seeded: true\n")?;
        Ok(conf.data())
    }

    #[test]
    fn test_backends_are_interchangeable() {
        let tmp = tempfile::tempdir().unwrap();
        let disk = boxed(tmp.path(), "app");
        let memory = MemoryConfigurer::default();

        assert_eq!(reset_and_seed(disk.as_ref()).unwrap(), "seeded: true\n");
        assert_eq!(reset_and_seed(&memory).unwrap(), "seeded: true\n");
    }
}
