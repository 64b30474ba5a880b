//! Builders that turn declared elements into registered mapping metadata.

mod assistant;
pub use assistant::{
    MapperBuilderAssistant, ParameterMappingSpec, ResultMapSpec, ResultMappingSpec, StatementSpec,
};

mod constructor;
pub use constructor::ConstructorResolver;

mod discriminator;
pub use discriminator::{Case, CaseTarget, DiscriminatorResolver, DiscriminatorSpec, InlineResultMaps};

mod infer;
pub use infer::{infer_type, ElementKind, InferredType, TypeAttributes};

mod result_map;
pub use result_map::ResultMapBuilder;
