mod builder;
pub use builder::Builder;

use crate::{mapping, Configuration, Error, Progress, Result};
use batis_core::err;
use batis_xml::{resolve_pending, XmlMapperBuilder};
use std::path::Path;
use std::sync::Arc;

/// One load session: the registry every loaded document writes into.
#[derive(Debug, Default)]
pub struct Session {
    config: Configuration,
}

impl Session {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn new(config: Configuration) -> Session {
        Session { config }
    }

    /// Loads a mapper document from source text. `resource` identifies the
    /// document; loading the same resource again is a no-op.
    pub fn load_str(&self, resource: &str, source: &str) -> Result<Progress> {
        XmlMapperBuilder::new(&self.config, resource, source)?.parse()
    }

    /// Loads a mapper document from a file, using its path as the resource.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Progress> {
        let path = path.as_ref();
        let resource = path.display().to_string();

        if self.config.is_resource_loaded(&resource) {
            tracing::debug!(%resource, "mapper document already loaded; skipping");
            return resolve_pending(&self.config);
        }

        let source = std::fs::read_to_string(path)
            .map_err(|cause| Error::from(cause).context(err!("failed to read '{resource}'")))?;

        self.load_str(&resource, &source)
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn result_map(&self, id: &str) -> Result<Arc<mapping::ResultMap>> {
        self.config.result_map(id)
    }

    pub fn mapped_statement(&self, id: &str) -> Result<Arc<mapping::MappedStatement>> {
        self.config.mapped_statement(id)
    }

    /// Retries the pending elements one last time and hands over the
    /// registry. Fails with [`Error::unresolved`] naming every element
    /// that still waits on a reference.
    pub fn finish(self) -> Result<Configuration> {
        resolve_pending(&self.config)?;

        let unresolved = self.config.unresolved();
        if !unresolved.is_empty() {
            return Err(Error::unresolved(unresolved));
        }

        Ok(self.config)
    }
}
