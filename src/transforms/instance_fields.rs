use crate::ast::{AstNode, Module};
use crate::compose::field_declarations;
use crate::error::MigrateResult;
use crate::extract::{extract_instance_fields, ComponentClassContext};
use crate::options::Options;
use crate::resolve::TypeResolver;
use crate::splice::insert_before;
use crate::walk::traverse_mut;

/// Declares the instance fields of every class, at any depth.
///
/// The new `name: type;` declarations are sorted by name and placed before the existing members.
pub fn declare_instance_fields(
    module: &Module,
    options: &Options,
    resolver: &dyn TypeResolver,
) -> MigrateResult<Module> {
    let mut module = module.clone();

    traverse_mut(&mut module.body, |node| -> MigrateResult<()> {
        let AstNode::Class(class) = &mut node.ast else {
            return Ok(());
        };

        let context = ComponentClassContext::new(class, options);
        let fields = extract_instance_fields(class, &context, options, resolver)?;
        if fields.is_empty() {
            return Ok(());
        }

        tracing::debug!(class = %context.class_name, count = fields.len(), "declared instance fields");

        let declarations = field_declarations(fields);
        class.members = match class.members.first() {
            Some(first) => insert_before(&class.members, first.id, declarations),
            None => declarations,
        };
        Ok(())
    })?;

    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MigrateError;
    use crate::print::print_module;
    use crate::resolve::LocalResolver;
    use crate::testing::*;

    fn run(source: &str) -> MigrateResult<String> {
        let module = parse_module_helper(source);
        declare_instance_fields(&module, &Options::default(), &LocalResolver)
            .map(|module| print_module(&module))
    }

    #[test]
    fn plain_class() {
        assert_eq!(
            run(r#"class A {
                count = 0;
                constructor() { this.name = ""; this.count = 1; }
            }"#)
            .unwrap(),
            "class A {\n  name: string;\n  count = 0;\n  constructor() {\n    this.name = \"\";\n    this.count = 1;\n  }\n}\n"
        );
    }

    #[test]
    fn sorted_before_existing_members() {
        let out = run(r#"class A {
            constructor() { this.name = ""; this.count = 1; }
        }"#)
        .unwrap();
        assert!(out.starts_with("class A {\n  count: number;\n  name: string;\n  constructor() {"));
    }

    #[test]
    fn nested_classes_get_their_own_fields() {
        let out = run(r#"function f() {
            return class Outer {
                m() { this.a = 1; return new (class Inner { n() { this.b = true; } })(); }
            };
        }"#)
        .unwrap();
        assert!(out.contains("class Outer {\n    a: number;\n"));
        assert!(out.contains("class Inner {\n        b: boolean;\n"));
    }

    #[test]
    fn component_reserved_names() {
        let out = run(r#"class A extends React.Component {
            m() { this.setState({ a: 1 }); this.handler = () => this.props.x; }
        }"#)
        .unwrap();
        assert!(out.starts_with("class A extends React.Component {\n  handler: Function;\n  m() {"));
    }

    #[test]
    fn malformed_usage_aborts() {
        let err = run("class A { m() { this.$ = 1; } }").unwrap_err();
        assert!(matches!(err, MigrateError::MalformedUsageExpression(_)));
    }
}
