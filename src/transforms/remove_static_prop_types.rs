use crate::ast::Module;
use crate::extract::is_component_class;
use crate::options::Options;
use crate::prop_types::find_prop_types_member;
use crate::splice::{remove, replace};

/// Removes the `static propTypes` member, property or getter, of every top level component class.
///
/// These are the classes whose props [`make_props_and_state`](super::make_props_and_state)
/// declares. Component classes nested in expressions keep their prop types.
pub fn remove_static_prop_types(module: &Module, options: &Options) -> Module {
    let mut body = module.body.clone();

    for statement in &module.body {
        let Some(class) = statement.as_class() else {
            continue;
        };
        if !is_component_class(class, options) {
            continue;
        }
        let Some(member) = find_prop_types_member(class) else {
            continue;
        };

        tracing::debug!(class = ?class.name, "removed static propTypes");
        let mut class = class.clone();
        class.members = remove(&class.members, member.id);
        body = replace(&body, statement.id, statement.with_class(class));
    }

    Module {
        body,
        emit_helpers: module.emit_helpers.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::print::print_module;
    use crate::resolve::LocalResolver;
    use crate::testing::*;
    use crate::transforms::make_props_and_state;

    #[test]
    fn removes_property_and_getter() {
        let module = parse_module_helper(
            r#"class A extends React.Component {
                static propTypes = { foo: PropTypes.string };
                render() { return null; }
            }
            class B extends React.Component {
                static get propTypes() { return { foo: PropTypes.string }; }
            }"#,
        );
        assert_eq!(
            print_module(&remove_static_prop_types(&module, &Options::default())),
            "class A extends React.Component {\n  render() {\n    return null;\n  }\n}\nclass B extends React.Component {}\n"
        );
    }

    #[test]
    fn keeps_other_members() {
        let source = r#"class A extends React.Component {
            propTypes = 1;
            static defaultProps = {};
        }
        class B { static propTypes = {}; }"#;
        let module = parse_module_helper(source);
        assert_eq!(
            print_module(&remove_static_prop_types(&module, &Options::default())),
            print_module(&module)
        );
    }

    #[test]
    fn nested_components_keep_their_prop_types() {
        let source = r#"const A = class extends React.Component {
            static propTypes = { foo: PropTypes.string };
        };
        function withB() {
            return class B extends React.Component {
                static propTypes = { bar: PropTypes.number };
            };
        }"#;
        let module = parse_module_helper(source);
        let options = Options::default();

        let migrated = make_props_and_state(&module, &options, &LocalResolver).expect("migrated");
        let removed = remove_static_prop_types(&migrated, &options);

        assert_eq!(print_module(&removed), print_module(&module));
        assert!(print_module(&removed).contains("static propTypes = { bar: PropTypes.number };"));
    }

    #[test]
    fn leaves_synthesized_declarations_alone() {
        let module = parse_module_helper(
            r#"class A extends React.Component {
                static propTypes = { foo: PropTypes.string.isRequired };
                m() { this.setState({ open: true }); }
            }"#,
        );
        let options = Options::default();
        let migrated = make_props_and_state(&module, &options, &LocalResolver).expect("migrated");
        let removed = remove_static_prop_types(&migrated, &options);

        assert_eq!(removed.body.len(), 3);
        assert_eq!(removed.body[0].to_string(), migrated.body[0].to_string());
        assert_eq!(removed.body[1].to_string(), migrated.body[1].to_string());
        assert_eq!(
            print_module(&removed),
            "interface IAProps extends React.HTMLAttributes<Element> {\n  foo: string;\n}\ntype AState = {\n  open?: boolean;\n};\nclass A extends React.Component<IAProps, AState> {\n  m() {\n    this.setState({ open: true });\n  }\n}\n"
        );
    }
}
