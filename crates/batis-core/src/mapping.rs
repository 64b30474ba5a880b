mod cache;
pub use cache::{Cache, CacheBuilder};

mod discriminator;
pub use discriminator::Discriminator;

mod jdbc_type;
pub use jdbc_type::JdbcType;

mod parameter_map;
pub use parameter_map::{ParameterMap, ParameterMapping, ParameterMode};

mod result_map;
pub use result_map::ResultMap;

mod result_mapping;
pub use result_mapping::{ResultFlag, ResultMapping};

mod sql_fragment;
pub use sql_fragment::SqlFragment;

mod statement;
pub use statement::{MappedStatement, SqlText, StatementKind};
