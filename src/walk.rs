use crate::ast::Ast;

/// Calls `visit` exactly once for every node reachable from `nodes`.
///
/// The walk keeps its own stack rather than recursing. Children are pushed in reverse so nodes come
/// out in pre-order, left to right: a node is visited before its children, and earlier siblings
/// before later ones. Trees are assumed to be finite and acyclic.
pub fn traverse<'a>(nodes: &'a [Ast], mut visit: impl FnMut(&'a Ast)) {
    let mut stack: Vec<&'a Ast> = nodes.iter().rev().collect();

    while let Some(node) = stack.pop() {
        visit(node);
        stack.extend(node.ast.children().into_iter().rev());
    }
}

/// Returns every node reachable from `nodes` that satisfies `predicate`, in traversal order.
pub fn filter<'a>(nodes: &'a [Ast], mut predicate: impl FnMut(&Ast) -> bool) -> Vec<&'a Ast> {
    let mut result = Vec::new();
    traverse(nodes, |node| {
        if predicate(node) {
            result.push(node);
        }
    });
    result
}

/// Like [`filter`], but does not look inside nodes for which `descend` returns false. Those nodes
/// are still tested against `predicate` themselves.
pub fn filter_pruned<'a>(
    nodes: &'a [Ast],
    mut descend: impl FnMut(&Ast) -> bool,
    mut predicate: impl FnMut(&Ast) -> bool,
) -> Vec<&'a Ast> {
    let mut result = Vec::new();
    let mut stack: Vec<&'a Ast> = nodes.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if predicate(node) {
            result.push(node);
        }
        if descend(node) {
            stack.extend(node.ast.children().into_iter().rev());
        }
    }

    result
}

/// Like [`traverse`], but hands out mutable nodes and stops at the first error.
///
/// `visit` sees a node before its children are collected, so children it adds are walked too.
pub fn traverse_mut<E>(
    nodes: &mut [Ast],
    mut visit: impl FnMut(&mut Ast) -> Result<(), E>,
) -> Result<(), E> {
    let mut stack: Vec<&mut Ast> = nodes.iter_mut().rev().collect();

    while let Some(node) = stack.pop() {
        visit(node)?;
        stack.extend(node.ast.children_mut().into_iter().rev());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::ast::AstNode;
    use crate::testing::*;

    #[test]
    fn visits_every_node_once() {
        let asts = parse_helper("if (a) { b = 1 } else { c(2, 3) }");
        let mut seen = Vec::new();
        traverse(&asts, |node| seen.push(node.id));

        let unique: HashSet<_> = seen.iter().collect();
        assert_eq!(seen.len(), unique.len());
        // if, a, block, assign, b, 1, block, call, c, 2, 3
        assert_eq!(seen.len(), 11);
    }

    #[test]
    fn pre_order_left_to_right() {
        let asts = parse_helper("a; b; c;");
        let names: Vec<_> = filter(&asts, |node| matches!(node.ast, AstNode::Identifier(_)))
            .into_iter()
            .map(|node| node.to_string())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn reaches_nested_slots() {
        let asts = parse_helper(
            "class A { m() { for (const x of xs) { while (y) { z ? f(this.q) : <div a={this.r} /> } } } }",
        );
        let members: Vec<_> = filter(&asts, |node| matches!(node.ast, AstNode::Member { .. }))
            .into_iter()
            .map(|node| node.to_string())
            .collect();
        assert_eq!(members, ["this.q", "this.r"]);
    }

    #[test]
    fn reaches_defaults_and_wrapped_expressions() {
        let asts = parse_helper(
            "async function f({ a = this.p } = {}, [b = this.q], c = this.r) { try {} catch ({ d = this.s }) {} return await this.t; }",
        );
        let members: Vec<_> = filter(&asts, |node| matches!(node.ast, AstNode::Member { .. }))
            .into_iter()
            .map(|node| node.to_string())
            .collect();
        assert_eq!(members, ["this.p", "this.q", "this.r", "this.s", "this.t"]);
    }

    #[test]
    fn pruned_nodes_are_tested_but_not_entered() {
        let asts = parse_helper("f(a, g(b), c)");
        let idents: Vec<_> = filter_pruned(
            &asts,
            |node| !matches!(&node.ast, AstNode::Call { callee, .. } if callee.to_string() == "g"),
            |node| matches!(node.ast, AstNode::Identifier(_) | AstNode::Call { .. }),
        )
        .into_iter()
        .map(|node| node.to_string())
        .collect();
        assert_eq!(idents, ["f(a, g(b), c)", "f", "a", "g(b)", "c"]);
    }

    #[test]
    fn empty_input() {
        let mut count = 0;
        traverse(&[], |_| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn traverse_mut_stops_on_error() {
        let mut asts = parse_helper("a; b; c;");
        let mut visited = 0;
        let result = traverse_mut(&mut asts, |node| {
            visited += 1;
            match &node.ast {
                AstNode::Identifier(name) if name == "b" => Err(name.clone()),
                _ => Ok(()),
            }
        });
        assert_eq!(result, Err("b".to_string()));
        assert_eq!(visited, 2);
    }
}
