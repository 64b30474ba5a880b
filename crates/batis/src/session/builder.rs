use super::Session;
use crate::{Configuration, Settings, TypeDescriptor, TypeRef, TypeRegistry};

#[derive(Debug, Default)]
pub struct Builder {
    settings: Settings,
    types: TypeRegistry,
}

impl Builder {
    /// Registers a type documents may refer to.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> &mut Self {
        self.types.register(descriptor);
        self
    }

    pub fn alias(&mut self, alias: &str, ty: impl Into<TypeRef>) -> &mut Self {
        self.types.alias(alias, ty);
        self
    }

    pub fn settings(&mut self, settings: Settings) -> &mut Self {
        self.settings = settings;
        self
    }

    pub fn use_actual_param_name(&mut self, enabled: bool) -> &mut Self {
        self.settings.use_actual_param_name = enabled;
        self
    }

    pub fn lazy_loading_enabled(&mut self, enabled: bool) -> &mut Self {
        self.settings.lazy_loading_enabled = enabled;
        self
    }

    /// Selects the `databaseId` variant of fragments and statements.
    pub fn database_id(&mut self, database_id: impl Into<String>) -> &mut Self {
        self.settings.database_id = Some(database_id.into());
        self
    }

    pub fn build(&self) -> Session {
        Session::new(
            Configuration::builder()
                .settings(self.settings.clone())
                .types(self.types.clone())
                .build(),
        )
    }
}
