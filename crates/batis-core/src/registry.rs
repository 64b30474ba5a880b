mod configuration;
pub use configuration::{Builder, Configuration};

mod pending;
pub use pending::{CacheRefResolver, Pending, PendingQueue, PendingStatement, ResultMapResolver};

mod settings;
pub use settings::Settings;

mod strict_map;
pub use strict_map::StrictMap;
