use super::XmlMapperBuilder;
use batis_core::registry::CacheRefResolver;
use batis_core::{Error, Resolution, Result, XNode};

impl XmlMapperBuilder<'_> {
    pub(super) fn cache_ref_element(&self, node: Option<&XNode>) -> Result<()> {
        let Some(node) = node else {
            return Ok(());
        };

        let Some(referenced) = node.attribute("namespace") else {
            return Err(Error::invalid_mapping(
                "cache-ref element requires a namespace attribute.",
            ));
        };

        let namespace = self.assistant.current_namespace()?;
        self.config.add_cache_ref(namespace, referenced);

        if let Resolution::Deferred(reason) = self.assistant.use_cache_ref(referenced)? {
            self.config.add_incomplete_cache_ref(
                CacheRefResolver::new(&self.resource, namespace, referenced),
                reason,
            );
        }

        Ok(())
    }

    pub(super) fn cache_element(&self, node: Option<&XNode>) -> Result<()> {
        let Some(node) = node else {
            return Ok(());
        };

        let types = self.config.types();
        let implementation = types.resolve(node.attribute_or("type", "PERPETUAL"))?;
        let eviction = types.resolve(node.attribute_or("eviction", "LRU"))?;
        let flush_interval = node.parse_attribute::<u64>("flushInterval")?;
        let size = node.parse_attribute::<u32>("size")?;
        let read_write = !node.bool_attribute("readOnly")?.unwrap_or(false);
        let blocking = node.bool_attribute("blocking")?.unwrap_or(false);
        let properties = node.children_as_properties();

        let cache = self.assistant.use_new_cache(|builder| {
            builder
                .implementation(implementation)
                .add_decorator(eviction)
                .flush_interval(flush_interval)
                .size(size)
                .read_write(read_write)
                .blocking(blocking)
                .properties(properties);
        })?;

        tracing::debug!(id = %cache.id, implementation = %cache.implementation, "cache declared");
        Ok(())
    }
}
