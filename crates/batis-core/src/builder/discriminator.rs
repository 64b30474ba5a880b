use super::MapperBuilderAssistant;
use crate::mapping::{Discriminator, JdbcType, ResultMapping};
use crate::{Result, TypeRef};
use indexmap::IndexMap;

/// The column a discriminator switches on.
#[derive(Debug, Clone, Default)]
pub struct DiscriminatorSpec {
    pub column: Option<String>,
    pub java_type: Option<TypeRef>,
    pub jdbc_type: Option<JdbcType>,
    pub type_handler: Option<TypeRef>,
}

/// One `<case>` of a discriminator.
#[derive(Debug, Clone)]
pub struct Case<N> {
    pub value: String,
    pub target: CaseTarget<N>,
}

#[derive(Debug, Clone)]
pub enum CaseTarget<N> {
    /// An explicit result map id
    ResultMap(String),

    /// Inline mappings to build into an anonymous result map
    Inline(N),
}

/// Builds anonymous result maps for inline cases.
///
/// Implemented by the document layer, which owns the element tree.
pub trait InlineResultMaps<N> {
    /// Builds the nested result map declared by `node` on top of the
    /// `accumulated` mappings of the enclosing map and returns its id, or
    /// `None` when the element does not declare a nested map.
    fn build_inline(
        &mut self,
        node: &N,
        accumulated: &[ResultMapping],
        enclosing: &TypeRef,
    ) -> Result<Option<String>>;
}

/// Builds the value to result map table of a discriminator.
#[derive(Debug)]
pub struct DiscriminatorResolver<'a, 'c> {
    assistant: &'a MapperBuilderAssistant<'c>,
}

impl<'a, 'c> DiscriminatorResolver<'a, 'c> {
    pub fn new(assistant: &'a MapperBuilderAssistant<'c>) -> Self {
        DiscriminatorResolver { assistant }
    }

    /// Resolves every case in order. A case repeating an earlier value
    /// replaces it.
    pub fn resolve<N>(
        &self,
        spec: DiscriminatorSpec,
        cases: &[Case<N>],
        result_type: &TypeRef,
        accumulated: &[ResultMapping],
        inline: &mut impl InlineResultMaps<N>,
    ) -> Result<Discriminator> {
        let mut discriminator_map = IndexMap::new();

        for case in cases {
            let id = match &case.target {
                CaseTarget::ResultMap(id) => Some(id.clone()),
                CaseTarget::Inline(node) => inline.build_inline(node, accumulated, result_type)?,
            };

            if let Some(id) = id {
                discriminator_map.insert(case.value.clone(), id);
            }
        }

        self.assistant
            .build_discriminator(result_type, spec, discriminator_map)
    }
}
