//! Pure list surgery over ordered sequences.
//!
//! Every primitive locates its anchor by [`NodeId`] and returns a new sequence; the input is never
//! touched. When the anchor is not in the sequence the input comes back unchanged.

use crate::ast::{ClassDecl, ExprWithTypeArgs, HeritageToken, Identified, NodeId, TypeExpr};
use crate::error::UnsupportedHeritage;

fn position<T: Identified>(items: &[T], anchor: NodeId) -> Option<usize> {
    let index = items.iter().position(|item| item.id() == anchor);
    if index.is_none() {
        tracing::debug!(?anchor, "splice anchor not found");
    }
    index
}

/// Returns `items` with `new_items` inserted right before `anchor`, in order.
pub fn insert_before<T: Clone + Identified>(items: &[T], anchor: NodeId, new_items: Vec<T>) -> Vec<T> {
    match position(items, anchor) {
        Some(index) => splice_at(items, index, index, new_items),
        None => items.to_vec(),
    }
}

/// Returns `items` with `new_items` inserted right after `anchor`, in order.
pub fn insert_after<T: Clone + Identified>(items: &[T], anchor: NodeId, new_items: Vec<T>) -> Vec<T> {
    match position(items, anchor) {
        Some(index) => splice_at(items, index + 1, index + 1, new_items),
        None => items.to_vec(),
    }
}

/// Returns `items` with `anchor` replaced by `replacement`.
pub fn replace<T: Clone + Identified>(items: &[T], anchor: NodeId, replacement: T) -> Vec<T> {
    match position(items, anchor) {
        Some(index) => splice_at(items, index, index + 1, vec![replacement]),
        None => items.to_vec(),
    }
}

/// Returns `items` without `anchor`.
pub fn remove<T: Clone + Identified>(items: &[T], anchor: NodeId) -> Vec<T> {
    match position(items, anchor) {
        Some(index) => splice_at(items, index, index + 1, Vec::new()),
        None => items.to_vec(),
    }
}

fn splice_at<T: Clone>(items: &[T], start: usize, end: usize, middle: Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len() + middle.len());
    out.extend_from_slice(&items[..start]);
    out.extend(middle);
    out.extend_from_slice(&items[end..]);
    out
}

/// The base type of a class with exactly one `extends` clause naming at least one type.
pub fn single_base(class: &ClassDecl) -> Result<&ExprWithTypeArgs, UnsupportedHeritage> {
    let clause = match class.heritage.as_slice() {
        [] => return Err(UnsupportedHeritage::NoClause),
        [clause] => clause,
        clauses => return Err(UnsupportedHeritage::MultipleClauses(clauses.len())),
    };

    if clause.token != HeritageToken::Extends {
        return Err(UnsupportedHeritage::NotExtends);
    }

    clause.types.first().ok_or(UnsupportedHeritage::EmptyClause)
}

/// Rebuilds `class` with the type arguments of its base type replaced by `args`.
///
/// Classes whose heritage is not a single `extends` clause are refused and should be passed through
/// unmodified.
pub fn with_type_arguments(
    class: &ClassDecl,
    args: Vec<TypeExpr>,
) -> Result<ClassDecl, UnsupportedHeritage> {
    single_base(class)?;

    let mut class = class.clone();
    class.heritage[0].types[0].type_args = args;
    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Ast, AstNode};
    use crate::testing::*;

    fn names(asts: &[Ast]) -> Vec<String> {
        asts.iter().map(|ast| ast.to_string()).collect()
    }

    fn marker(name: &str) -> Ast {
        Ast::synthetic(AstNode::Identifier(name.to_string()))
    }

    #[test]
    fn insert_before_keeps_order() {
        let asts = parse_helper("a; b; c;");
        let out = insert_before(&asts, asts[1].id, vec![marker("x"), marker("y")]);
        assert_eq!(names(&out), ["a", "x", "y", "b", "c"]);
        assert_eq!(names(&asts), ["a", "b", "c"]);
    }

    #[test]
    fn insert_after_last() {
        let asts = parse_helper("a; b;");
        let out = insert_after(&asts, asts[1].id, vec![marker("x")]);
        assert_eq!(names(&out), ["a", "b", "x"]);
    }

    #[test]
    fn replace_and_remove() {
        let asts = parse_helper("a; b; c;");
        assert_eq!(names(&replace(&asts, asts[0].id, marker("x"))), ["x", "b", "c"]);
        assert_eq!(names(&remove(&asts, asts[2].id)), ["a", "b"]);
    }

    #[test]
    fn missing_anchor_is_a_no_op() {
        let asts = parse_helper("a; b;");
        let out = insert_before(&asts, NodeId(9999), vec![marker("x")]);
        assert_eq!(names(&out), ["a", "b"]);
        assert_eq!(names(&remove(&asts, NodeId(9999))), ["a", "b"]);
    }

    #[test]
    fn anchor_survives_clone() {
        let asts = parse_helper("a; b;");
        let copy = asts.clone();
        let out = replace(&copy, asts[1].id, marker("x"));
        assert_eq!(names(&out), ["a", "x"]);
    }

    #[test]
    fn type_arguments_on_single_extends() {
        let asts = parse_helper("class A extends React.Component {}");
        let class = asts[0].as_class().expect("class");
        let out = with_type_arguments(class, vec![TypeExpr::named("IAProps"), TypeExpr::Literal(vec![])])
            .expect("supported");
        assert_eq!(
            out.heritage[0].types[0].type_args,
            [TypeExpr::named("IAProps"), TypeExpr::Literal(vec![])]
        );
        assert_eq!(asts[0].with_class(out).to_string(), "class A extends React.Component<IAProps, {}> {}");
    }

    #[test]
    fn unsupported_heritage_shapes() {
        let asts = parse_helper("class A {}");
        let class = asts[0].as_class().expect("class");
        assert_eq!(single_base(class).unwrap_err(), UnsupportedHeritage::NoClause);

        let asts = parse_ts_helper("class A extends B implements C {}");
        let class = asts[0].as_class().expect("class");
        assert_eq!(
            with_type_arguments(class, vec![]).unwrap_err(),
            UnsupportedHeritage::MultipleClauses(2)
        );
    }
}
