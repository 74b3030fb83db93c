use std::collections::HashMap;

use crate::ast::{Ast, Module};
use crate::error::ResolveError;
use crate::options::Options;
use crate::parse::parse_source;
use crate::resolve::{TypeDescriptor, TypeResolver, TypeSite};

pub(crate) fn parse_module_helper(contents: &str) -> Module {
    parse_source("test.jsx", contents).expect("error parsing")
}

pub(crate) fn parse_helper(contents: &str) -> Vec<Ast> {
    parse_module_helper(contents).body
}

pub(crate) fn parse_ts_helper(contents: &str) -> Vec<Ast> {
    parse_source("test.ts", contents).expect("error parsing").body
}

pub(crate) fn migrate_helper(contents: &str) -> String {
    crate::migrate_source("test.jsx", contents, &Options::default()).expect("error migrating")
}

/// Answers with canned types, keyed by the printed expression or the bound name.
/// Anything else is `any`.
#[derive(Default)]
pub(crate) struct StubResolver {
    nodes: HashMap<String, TypeDescriptor>,
    bindings: HashMap<String, TypeDescriptor>,
}

impl StubResolver {
    pub(crate) fn with(mut self, expr: &str, ty: TypeDescriptor) -> Self {
        self.nodes.insert(expr.to_string(), ty);
        self
    }

    pub(crate) fn with_binding(mut self, name: &str, ty: TypeDescriptor) -> Self {
        self.bindings.insert(name.to_string(), ty);
        self
    }
}

impl TypeResolver for StubResolver {
    fn type_at(&self, site: TypeSite<'_>) -> Result<TypeDescriptor, ResolveError> {
        let ty = match site {
            TypeSite::Node(node) => self.nodes.get(&node.to_string()),
            TypeSite::Binding { name, .. } => self.bindings.get(name),
        };
        Ok(ty.cloned().unwrap_or_default())
    }
}

/// Fails every request.
pub(crate) struct FailingResolver;

impl TypeResolver for FailingResolver {
    fn type_at(&self, _site: TypeSite<'_>) -> Result<TypeDescriptor, ResolveError> {
        Err(ResolveError::Failed("stub".to_string()))
    }
}
