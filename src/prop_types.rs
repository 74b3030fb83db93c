use crate::ast::{Ast, AstNode, ClassDecl, MemberProp, MethodKind, ObjectEntry, TypeExpr, TypeMember};
use crate::options::Options;

const PROP_TYPES: &str = "propTypes";

/// Finds the `static propTypes = {...}` property or `static get propTypes()` getter of `class`.
pub fn find_prop_types_member(class: &ClassDecl) -> Option<&Ast> {
    class.members.iter().find(|member| match &member.ast {
        AstNode::ClassProperty {
            name, is_static, ..
        } => *is_static && name == PROP_TYPES,
        AstNode::Method {
            name,
            kind: MethodKind::Getter,
            is_static,
            ..
        } => *is_static && name == PROP_TYPES,
        _ => false,
    })
}

/// The object literal describing the props, if the class declares one.
fn prop_types_object(class: &ClassDecl) -> Option<&[ObjectEntry]> {
    let member = find_prop_types_member(class)?;
    let value = match &member.ast {
        AstNode::ClassProperty { value, .. } => value.as_deref()?,
        AstNode::Method { body, .. } => match &body.ast {
            AstNode::Block(statements) => statements.iter().find_map(|s| match &s.ast {
                AstNode::Return(value) => value.as_deref(),
                _ => None,
            })?,
            _ => return None,
        },
        _ => return None,
    };

    match &value.ast {
        AstNode::Object(entries) => Some(entries),
        _ => None,
    }
}

/// Members declared by the class's dynamic prop type checks, in declaration order.
///
/// A validator ending in `.isRequired` declares a required member, anything else an optional one.
/// Validators that are not recognized declare `any`.
pub fn prop_type_hints(class: &ClassDecl, options: &Options) -> Vec<TypeMember> {
    let Some(entries) = prop_types_object(class) else {
        return Vec::new();
    };

    members_of(entries, options)
}

fn members_of(entries: &[ObjectEntry], options: &Options) -> Vec<TypeMember> {
    entries
        .iter()
        .filter_map(|entry| {
            let name = entry.key_name()?;
            let (ty, required) = match entry {
                ObjectEntry::KeyValue { value, .. } => hint_of(value, options),
                _ => (TypeExpr::Any, false),
            };
            Some(TypeMember {
                name: name.to_string(),
                optional: !required,
                ty,
            })
        })
        .collect()
}

fn hint_of(validator: &Ast, options: &Options) -> (TypeExpr, bool) {
    match &validator.ast {
        AstNode::Member {
            object,
            property: MemberProp::Ident(name),
        } if name == "isRequired" => (type_of(object, options), true),
        _ => (type_of(validator, options), false),
    }
}

/// `PropTypes.x` or `React.PropTypes.x`.
fn validator_name(ast: &Ast) -> Option<&str> {
    let AstNode::Member {
        object,
        property: MemberProp::Ident(name),
    } = &ast.ast
    else {
        return None;
    };

    match &object.ast {
        AstNode::Identifier(ns) if ns == "PropTypes" => Some(name.as_str()),
        AstNode::Member {
            object,
            property: MemberProp::Ident(ns),
        } if ns == "PropTypes" && matches!(&object.ast, AstNode::Identifier(react) if react == "React") => {
            Some(name.as_str())
        }
        _ => None,
    }
}

fn type_of(validator: &Ast, options: &Options) -> TypeExpr {
    if let Some(name) = validator_name(validator) {
        return match name {
            "string" => TypeExpr::String,
            "number" => TypeExpr::Number,
            "bool" => TypeExpr::Boolean,
            "func" => TypeExpr::named("Function"),
            "array" => TypeExpr::Array(Box::new(TypeExpr::Any)),
            "object" => TypeExpr::Object,
            "symbol" => TypeExpr::Symbol,
            "node" => TypeExpr::named(format!("{}.ReactNode", options.framework_namespace)),
            "element" => TypeExpr::named("JSX.Element"),
            _ => TypeExpr::Any,
        };
    }

    let AstNode::Call { callee, args } = &validator.ast else {
        return TypeExpr::Any;
    };
    let (Some(name), Some(arg)) = (validator_name(callee), args.first()) else {
        return TypeExpr::Any;
    };

    match (name, &arg.ast) {
        ("arrayOf", _) => TypeExpr::Array(Box::new(type_of(arg, options))),
        ("objectOf", _) => TypeExpr::Ref {
            name: "Record".to_string(),
            args: vec![TypeExpr::String, type_of(arg, options)],
        },
        ("oneOf", AstNode::Array(values)) => union(values.iter().map(literal_type).collect()),
        ("oneOfType", AstNode::Array(types)) => {
            union(types.iter().map(|ty| type_of(ty, options)).collect())
        }
        ("instanceOf", _) => TypeExpr::named(arg.to_string()),
        ("shape" | "exact", AstNode::Object(entries)) => {
            TypeExpr::Literal(members_of(entries, options))
        }
        _ => TypeExpr::Any,
    }
}

fn literal_type(value: &Ast) -> TypeExpr {
    match &value.ast {
        AstNode::Str(s) => TypeExpr::StringLiteral(s.clone()),
        AstNode::Number(n) => TypeExpr::NumberLiteral(*n),
        AstNode::Boolean(b) => TypeExpr::BooleanLiteral(*b),
        AstNode::Null => TypeExpr::Null,
        _ => TypeExpr::Any,
    }
}

fn union(mut types: Vec<TypeExpr>) -> TypeExpr {
    types.dedup();
    match types.len() {
        0 => TypeExpr::Any,
        1 => types.remove(0),
        _ => TypeExpr::Union(types),
    }
}
