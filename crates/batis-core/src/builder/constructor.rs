use crate::reflect::Constructor;
use crate::{Configuration, TypeRef, TypeRegistry};
use indexmap::IndexMap;

/// Matches declared constructor arguments against the constructors of a
/// registered type.
#[derive(Debug, Clone, Copy)]
pub struct ConstructorResolver<'a> {
    types: &'a TypeRegistry,
    use_actual_param_name: bool,
}

impl<'a> ConstructorResolver<'a> {
    pub fn new(types: &'a TypeRegistry, use_actual_param_name: bool) -> Self {
        ConstructorResolver {
            types,
            use_actual_param_name,
        }
    }

    pub fn for_config(config: &'a Configuration) -> Self {
        ConstructorResolver::new(config.types(), config.settings().use_actual_param_name)
    }

    /// Finds the first constructor of `ty` whose parameter names are exactly
    /// `arg_names` (in any order) and whose parameter types agree with every
    /// declared type. Returns that constructor's parameter names in
    /// declaration order.
    ///
    /// `result_map` only labels log output.
    pub fn resolve(
        &self,
        result_map: &str,
        ty: &TypeRef,
        arg_names: &[String],
        declared_types: &IndexMap<String, TypeRef>,
    ) -> Option<Vec<String>> {
        let descriptor = self.types.get(ty)?;

        descriptor
            .constructors
            .iter()
            .filter(|constructor| constructor.len() == arg_names.len())
            .find_map(|constructor| {
                let param_names = self.param_names(constructor);

                if !param_names.iter().all(|name| arg_names.contains(name)) {
                    return None;
                }

                if !self.types_match(result_map, constructor, &param_names, arg_names, declared_types) {
                    return None;
                }

                Some(param_names)
            })
    }

    /// Names of a constructor's parameters: the explicit tag, else the
    /// declared name when enabled, else `argN`.
    pub fn param_names(&self, constructor: &Constructor) -> Vec<String> {
        constructor
            .params
            .iter()
            .enumerate()
            .map(|(index, param)| {
                param
                    .name_tag
                    .clone()
                    .or_else(|| {
                        self.use_actual_param_name
                            .then(|| param.actual_name.clone())
                            .flatten()
                    })
                    .unwrap_or_else(|| format!("arg{index}"))
            })
            .collect()
    }

    fn types_match(
        &self,
        result_map: &str,
        constructor: &Constructor,
        param_names: &[String],
        arg_names: &[String],
        declared_types: &IndexMap<String, TypeRef>,
    ) -> bool {
        for arg_name in arg_names {
            let Some(specified) = declared_types.get(arg_name) else {
                continue;
            };

            let Some(position) = param_names.iter().position(|name| name == arg_name) else {
                return false;
            };

            let actual = &constructor.params[position].ty;
            if actual != specified {
                tracing::debug!(
                    result_map,
                    ?arg_names,
                    arg = %arg_name,
                    %specified,
                    declared = %actual,
                    "constructor candidate rejected: argument type did not match"
                );
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{Param, TypeDescriptor};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn positional_fallback_names() {
        let types = TypeRegistry::new();
        let resolver = ConstructorResolver::new(&types, false);
        let constructor = Constructor::new()
            .param(Param::new("int").actual("id"))
            .tagged("name", "String");

        assert_eq!(resolver.param_names(&constructor), names(&["arg0", "name"]));

        let resolver = ConstructorResolver::new(&types, true);
        assert_eq!(resolver.param_names(&constructor), names(&["id", "name"]));
    }

    #[test]
    fn unknown_type_has_no_constructor() {
        let types = TypeRegistry::new();
        let resolver = ConstructorResolver::new(&types, true);

        assert_eq!(
            resolver.resolve("ns.map", &TypeRef::new("Missing"), &names(&["id"]), &IndexMap::new()),
            None
        );
    }

    #[test]
    fn first_matching_constructor_wins() {
        let mut types = TypeRegistry::new();
        types.register(
            TypeDescriptor::bean("Pair")
                .constructor(Constructor::new().named("b", "int").named("a", "int"))
                .constructor(Constructor::new().named("a", "int").named("b", "int")),
        );
        let resolver = ConstructorResolver::new(&types, true);

        assert_eq!(
            resolver.resolve("ns.pair", &TypeRef::new("Pair"), &names(&["a", "b"]), &IndexMap::new()),
            Some(names(&["b", "a"]))
        );
    }
}
