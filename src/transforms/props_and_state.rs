use crate::ast::{Ast, Module, TypeExpr};
use crate::compose::{PropsBuilder, StateBuilder, TypeDeclaration};
use crate::error::MigrateResult;
use crate::extract::{extract_props, extract_state, ComponentClassContext};
use crate::options::Options;
use crate::resolve::TypeResolver;
use crate::splice::{insert_before, replace, with_type_arguments};

/// Declares the props and state of every top level component class.
///
/// The declarations are inserted right before the class, and the class's base type is given
/// `<IProps, State>` type arguments. A concern with nothing to declare is passed as `{}`.
/// Classes that are not components, or whose heritage has an unsupported shape, are left alone.
pub fn make_props_and_state(
    module: &Module,
    options: &Options,
    resolver: &dyn TypeResolver,
) -> MigrateResult<Module> {
    let mut body = module.body.clone();

    for statement in &module.body {
        let Some(class) = statement.as_class() else {
            continue;
        };

        let context = ComponentClassContext::new(class, options);
        if !context.is_component {
            continue;
        }

        let props = PropsBuilder::new(context.hints.clone())
            .merge(extract_props(class, &context, options))
            .build(&context.class_name, options);
        let state = StateBuilder::default()
            .merge(extract_state(class, &context, options, resolver)?)
            .build(&context.class_name);

        let args = [&props, &state]
            .into_iter()
            .map(|declaration| match declaration {
                Some(declaration) => declaration.reference(),
                None => TypeExpr::Literal(Vec::new()),
            })
            .collect();

        let class = match with_type_arguments(class, args) {
            Ok(class) => class,
            Err(reason) => {
                tracing::debug!(class = %context.class_name, %reason, "heritage left unmodified");
                continue;
            }
        };

        tracing::debug!(
            class = %context.class_name,
            props = props.is_some(),
            state = state.is_some(),
            "declared props and state"
        );

        let declarations: Vec<Ast> = props
            .into_iter()
            .chain(state)
            .map(TypeDeclaration::into_ast)
            .collect();
        body = insert_before(&body, statement.id, declarations);
        body = replace(&body, statement.id, statement.with_class(class));
    }

    Ok(Module {
        body,
        emit_helpers: module.emit_helpers.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MigrateError, ResolveError};
    use crate::print::print_module;
    use crate::resolve::{LocalResolver, TypeDescriptor};
    use crate::testing::*;

    fn run(source: &str) -> String {
        let module = parse_module_helper(source);
        print_module(
            &make_props_and_state(&module, &Options::default(), &LocalResolver).expect("migrated"),
        )
    }

    #[test]
    fn set_state_only() {
        assert_eq!(
            run(r#"export default class MyComponent extends React.Component {
                render() { return <button onClick={this.onclick.bind(this)} />; }
                onclick() { this.setState({ foo: 1, bar: 2 }); }
            }"#),
            r#"type MyComponentState = {
  bar?: number;
  foo?: number;
};
export default class MyComponent extends React.Component<{}, MyComponentState> {
  render() {
    return <button onClick={this.onclick.bind(this)} />;
  }
  onclick() {
    this.setState({ foo: 1, bar: 2 });
  }
}
"#
        );
    }

    #[test]
    fn initial_state_and_mutation() {
        let out = run(r#"class A extends React.Component {
            constructor(props) { super(props); this.state = { foo: 1, bar: "s" }; }
            m() { this.setState({ baz: 2 }); }
        }"#);
        assert!(out.starts_with(
            "type AState = {\n  bar?: string;\n  baz?: number;\n  foo?: number;\n};\nclass A extends React.Component<{}, AState> {"
        ));
    }

    #[test]
    fn destructured_props() {
        let out = run(r#"class A extends React.Component {
            render() { const { title, body } = this.props; return <div>{title}{body}</div>; }
        }"#);
        assert!(out.starts_with(
            "interface IAProps extends React.HTMLAttributes<Element> {\n  body?: any;\n  title?: any;\n}\nclass A extends React.Component<IAProps, {}> {"
        ));
    }

    #[test]
    fn static_prop_types_become_required_members() {
        let out = run(r#"export default class MyComponent extends React.Component {
            static propTypes = { foo: React.PropTypes.string.isRequired };
            render() { return <div>{this.props.bar}</div>; }
        }"#);
        assert!(out.starts_with(
            "interface IMyComponentProps extends React.HTMLAttributes<Element> {\n  bar?: any;\n  foo: string;\n}\nexport default class MyComponent extends React.Component<IMyComponentProps, {}> {\n  static propTypes = { foo: React.PropTypes.string.isRequired };"
        ));
    }

    #[test]
    fn declarations_go_right_before_their_class() {
        let out = run(r#"import * as React from "react";
class A extends React.Component { m() { this.setState({ a: 1 }); } }
const x = 1;
class B extends React.Component { m() { this.setState({ b: 1 }); } }"#);
        let lines: Vec<_> = out.lines().filter(|line| !line.starts_with(' ')).collect();
        assert_eq!(
            lines,
            [
                r#"import * as React from "react";"#,
                "type AState = {",
                "};",
                "class A extends React.Component<{}, AState> {",
                "}",
                "const x = 1;",
                "type BState = {",
                "};",
                "class B extends React.Component<{}, BState> {",
                "}",
            ]
        );
    }

    #[test]
    fn unsupported_heritage_is_passed_through() {
        let source = "class A extends React.Component implements B { m() { this.setState({ a: 1 }); } }";
        let module = crate::parse::parse_source("test.ts", source).expect("parsed");
        let out = make_props_and_state(&module, &Options::default(), &LocalResolver).expect("migrated");
        assert_eq!(print_module(&out), print_module(&module));
        assert_eq!(out.body.len(), 1);
    }

    #[test]
    fn plain_classes_are_untouched() {
        let source = "class A { m() { this.setState({ a: 1 }); } }";
        assert_eq!(run(source), print_module(&parse_module_helper(source)));
    }

    #[test]
    fn component_without_usage_gets_empty_arguments() {
        assert_eq!(
            run("class A extends Component {}"),
            "class A extends Component<{}, {}> {}\n"
        );
    }

    #[test]
    fn same_name_in_props_and_state() {
        let out = run(r#"class A extends React.Component {
            render() { return <div>{this.props.open}{this.state.open}</div>; }
        }"#);
        assert!(out.contains("interface IAProps extends React.HTMLAttributes<Element> {\n  open?: any;\n}"));
        assert!(out.contains("type AState = {\n  open?: any;\n};"));
    }

    #[test]
    fn resolved_state_types() {
        let module = parse_module_helper(
            "class A extends React.Component { m() { this.setState({ node: this.renderNode() }); } }",
        );
        let resolver = StubResolver::default().with(
            "this.renderNode()",
            TypeDescriptor::Named("ReactNode".to_string()),
        );
        let out = make_props_and_state(&module, &Options::default(), &resolver).expect("migrated");
        assert!(print_module(&out).starts_with("type AState = {\n  node?: React.ReactNode;\n};"));
    }

    #[test]
    fn resolution_failures_abort() {
        let module =
            parse_module_helper("class A extends React.Component { m() { this.setState({ a: 1 }); } }");
        let err = make_props_and_state(&module, &Options::default(), &FailingResolver).unwrap_err();
        assert_eq!(err, MigrateError::TypeResolution(ResolveError::Failed("stub".to_string())));
    }

    #[test]
    fn input_is_not_modified_and_helpers_are_kept() {
        let mut module =
            parse_module_helper("class A extends React.Component { m() { this.setState({ a: 1 }); } }");
        module.emit_helpers = vec!["__extends".to_string()];
        let before = print_module(&module);
        let out = make_props_and_state(&module, &Options::default(), &LocalResolver).expect("migrated");
        assert_eq!(print_module(&module), before);
        assert_eq!(out.emit_helpers, ["__extends"]);
        assert_eq!(out.body.len(), 2);
    }
}
