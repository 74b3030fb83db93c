use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::TypeExpr;
use crate::options::Options;
use crate::resolve::{TypeDescriptor, TypeResolver};

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^"(?:[^"\\]|\\.)*"$"#).unwrap());

/// Turns the type resolved at a usage site into the type a field is declared with.
///
/// The first matching rule wins:
///
/// 1. an indexed target (`this.items[i] = ...`) is `any`;
/// 2. a framework node type is referenced through the framework namespace (`React.ReactNode`);
/// 3. anything rendered as `undefined[]` is `any[]`;
/// 4. `true` and `false` are `boolean`;
/// 5. timer handles and number literals are `number`;
/// 6. a quoted string literal is `string`;
/// 7. anything else is declared as the resolver renders it.
pub fn synthesize(
    ty: &TypeDescriptor,
    index_target: bool,
    resolver: &dyn TypeResolver,
    options: &Options,
) -> TypeExpr {
    if index_target {
        return TypeExpr::Any;
    }

    let rendered = resolver.type_to_string(ty);

    if options.framework_node_types.contains(&rendered) {
        TypeExpr::named(format!("{}.{}", options.framework_namespace, rendered))
    } else if rendered.ends_with("undefined[]") {
        TypeExpr::Array(Box::new(TypeExpr::Any))
    } else if rendered == "true" || rendered == "false" {
        TypeExpr::Boolean
    } else if options.timer_types.contains(&rendered)
        || matches!(ty, TypeDescriptor::NumberLiteral(_))
    {
        TypeExpr::Number
    } else if QUOTED.is_match(&rendered) {
        TypeExpr::String
    } else {
        resolver.type_to_type_expr(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::LocalResolver;

    fn run(ty: TypeDescriptor) -> TypeExpr {
        synthesize(&ty, false, &LocalResolver, &Options::default())
    }

    #[test]
    fn index_target_is_any() {
        let out = synthesize(
            &TypeDescriptor::NumberLiteral(1.0),
            true,
            &LocalResolver,
            &Options::default(),
        );
        assert_eq!(out, TypeExpr::Any);
    }

    #[test]
    fn framework_node() {
        assert_eq!(
            run(TypeDescriptor::Named("ReactNode".to_string())),
            TypeExpr::named("React.ReactNode")
        );
    }

    #[test]
    fn empty_array() {
        assert_eq!(
            run(TypeDescriptor::Array(Box::new(TypeDescriptor::Undefined))),
            TypeExpr::Array(Box::new(TypeExpr::Any))
        );
    }

    #[test]
    fn literals_are_widened() {
        assert_eq!(run(TypeDescriptor::BooleanLiteral(false)), TypeExpr::Boolean);
        assert_eq!(run(TypeDescriptor::NumberLiteral(42.0)), TypeExpr::Number);
        assert_eq!(run(TypeDescriptor::StringLiteral("s".to_string())), TypeExpr::String);
        assert_eq!(
            run(TypeDescriptor::StringLiteral("two words".to_string())),
            TypeExpr::String
        );
    }

    #[test]
    fn timers_are_numbers() {
        assert_eq!(run(TypeDescriptor::Named("Timer".to_string())), TypeExpr::Number);
        assert_eq!(
            run(TypeDescriptor::Named("NodeJS.Timeout".to_string())),
            TypeExpr::Number
        );
    }

    #[test]
    fn partially_quoted_is_not_a_string() {
        let ty = TypeDescriptor::Union(vec![
            TypeDescriptor::StringLiteral("a".to_string()),
            TypeDescriptor::Number,
        ]);
        assert_eq!(
            run(ty),
            TypeExpr::Union(vec![TypeExpr::StringLiteral("a".to_string()), TypeExpr::Number])
        );
    }

    #[test]
    fn falls_through_to_the_resolver() {
        assert_eq!(run(TypeDescriptor::Named("Date".to_string())), TypeExpr::named("Date"));
        assert_eq!(
            run(TypeDescriptor::Object(vec![("a".to_string(), TypeDescriptor::Number)])).to_string(),
            "{ a: number; }"
        );
    }
}
