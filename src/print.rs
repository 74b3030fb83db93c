use std::fmt::Display;

use swc_ecma_ast::{UnaryOp, VarDeclKind};

use crate::ast::{
    Ast, AstNode, CastKind, ClassDecl, HeritageToken, JsxAttr, MemberProp, MethodKind, Module,
    ObjectEntry, ObjectPatProp, Pattern, PropKey, TypeExpr, TypeMember,
};

/// Quotes `s` as a double quoted string literal.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Prints a whole module, one top level statement per line.
pub fn print_module(module: &Module) -> String {
    let mut printer = Printer::default();
    for statement in &module.body {
        printer.stmt(statement);
        printer.out.push('\n');
    }
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    fn node(&mut self, ast: &Ast) {
        if is_statement(&ast.ast) {
            self.stmt(ast);
        } else {
            self.expr(ast);
        }
    }

    fn block(&mut self, statements: &[Ast]) {
        if statements.is_empty() {
            self.push("{}");
            return;
        }

        self.push("{");
        self.indent += 1;
        for statement in statements {
            self.newline();
            self.stmt(statement);
        }
        self.indent -= 1;
        self.newline();
        self.push("}");
    }

    fn stmt(&mut self, ast: &Ast) {
        match &ast.ast {
            AstNode::Block(statements) => self.block(statements),

            AstNode::Declare { kind, decls } => {
                self.declare(*kind, decls);
                self.push(";");
            }

            AstNode::If { cond, then, elsy } => {
                self.push("if (");
                self.expr(cond);
                self.push(") ");
                self.stmt(then);
                if let Some(elsy) = elsy {
                    self.push(" else ");
                    self.stmt(elsy);
                }
            }

            AstNode::While { cond, body } => {
                self.push("while (");
                self.expr(cond);
                self.push(") ");
                self.stmt(body);
            }

            AstNode::DoWhile { body, cond } => {
                self.push("do ");
                self.stmt(body);
                self.push(" while (");
                self.expr(cond);
                self.push(");");
            }

            AstNode::For {
                init,
                test,
                update,
                body,
            } => {
                self.push("for (");
                if let Some(init) = init {
                    match &init.ast {
                        AstNode::Declare { kind, decls } => self.declare(*kind, decls),
                        _ => self.expr(init),
                    }
                }
                self.push(";");
                if let Some(test) = test {
                    self.push(" ");
                    self.expr(test);
                }
                self.push(";");
                if let Some(update) = update {
                    self.push(" ");
                    self.expr(update);
                }
                self.push(") ");
                self.stmt(body);
            }

            AstNode::ForEach {
                of,
                left,
                right,
                body,
            } => {
                self.push("for (");
                self.expr(left);
                self.push(if *of { " of " } else { " in " });
                self.expr(right);
                self.push(") ");
                self.stmt(body);
            }

            AstNode::Return(value) => {
                self.push("return");
                if let Some(value) = value {
                    self.push(" ");
                    self.expr(value);
                }
                self.push(";");
            }

            AstNode::Throw(value) => {
                self.push("throw ");
                self.expr(value);
                self.push(";");
            }

            AstNode::Try {
                block,
                param,
                handler,
                finalizer,
            } => {
                self.push("try ");
                self.stmt(block);
                if let Some(handler) = handler {
                    self.push(" catch ");
                    if let Some(param) = param {
                        self.push("(");
                        self.pattern(param);
                        self.push(") ");
                    }
                    self.stmt(handler);
                }
                if let Some(finalizer) = finalizer {
                    self.push(" finally ");
                    self.stmt(finalizer);
                }
            }

            AstNode::Switch {
                discriminant,
                cases,
            } => {
                self.push("switch (");
                self.expr(discriminant);
                self.push(") {");
                self.indent += 1;
                for case in cases {
                    self.newline();
                    match &case.test {
                        Some(test) => {
                            self.push("case ");
                            self.expr(test);
                            self.push(":");
                        }
                        None => self.push("default:"),
                    }
                    self.indent += 1;
                    for statement in &case.body {
                        self.newline();
                        self.stmt(statement);
                    }
                    self.indent -= 1;
                }
                self.indent -= 1;
                self.newline();
                self.push("}");
            }

            AstNode::Break(label) | AstNode::Continue(label) => {
                self.push(match ast.ast {
                    AstNode::Break(_) => "break",
                    _ => "continue",
                });
                if let Some(label) = label {
                    self.push(" ");
                    self.push(label);
                }
                self.push(";");
            }

            AstNode::Export { default, decl } => {
                self.push(if *default { "export default " } else { "export " });
                self.stmt(decl);
            }

            AstNode::Interface {
                name,
                extends,
                members,
            } => {
                self.push("interface ");
                self.push(name);
                if !extends.is_empty() {
                    self.push(" extends ");
                    self.push(&join(extends, ", "));
                }
                self.push(" ");
                self.type_members(members);
            }

            AstNode::TypeAlias { name, ty } => {
                self.push("type ");
                self.push(name);
                self.push(" = ");
                match ty {
                    TypeExpr::Literal(members) => self.type_members(members),
                    other => self.push(&other.to_string()),
                }
                self.push(";");
            }

            AstNode::Class(class) => self.class(class),

            AstNode::ClassProperty { .. } | AstNode::Method { .. } => self.class_member(ast),

            AstNode::Function { .. } | AstNode::Opaque(_) => self.expr(ast),

            AstNode::Object(_) => {
                self.push("(");
                self.expr(ast);
                self.push(");");
            }

            _ => {
                self.expr(ast);
                self.push(";");
            }
        }
    }

    fn declare(&mut self, kind: VarDeclKind, decls: &[Ast]) {
        self.push(match kind {
            VarDeclKind::Var => "var ",
            VarDeclKind::Let => "let ",
            VarDeclKind::Const => "const ",
        });
        for (i, decl) in decls.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.expr(decl);
        }
    }

    fn type_members(&mut self, members: &[TypeMember]) {
        if members.is_empty() {
            self.push("{}");
            return;
        }

        self.push("{");
        self.indent += 1;
        for member in members {
            self.newline();
            self.push(&member.to_string());
            self.push(";");
        }
        self.indent -= 1;
        self.newline();
        self.push("}");
    }

    fn class(&mut self, class: &ClassDecl) {
        self.push("class");
        if let Some(name) = &class.name {
            self.push(" ");
            self.push(name);
        }
        for clause in &class.heritage {
            self.push(match clause.token {
                HeritageToken::Extends => " extends ",
                HeritageToken::Implements => " implements ",
            });
            for (i, base) in clause.types.iter().enumerate() {
                if i > 0 {
                    self.push(", ");
                }
                self.expr(&base.expr);
                if !base.type_args.is_empty() {
                    self.push("<");
                    self.push(&join(&base.type_args, ", "));
                    self.push(">");
                }
            }
        }
        self.push(" ");
        self.block(&class.members);
    }

    fn class_member(&mut self, ast: &Ast) {
        match &ast.ast {
            AstNode::ClassProperty {
                name,
                is_static,
                type_ann,
                value,
            } => {
                if *is_static {
                    self.push("static ");
                }
                self.push(name);
                if let Some(ty) = type_ann {
                    self.push(": ");
                    self.push(&ty.to_string());
                }
                if let Some(value) = value {
                    self.push(" = ");
                    self.expr(value);
                }
                self.push(";");
            }

            AstNode::Method {
                name,
                kind,
                is_static,
                params,
                body,
                is_async,
                is_generator,
            } => {
                if *is_static {
                    self.push("static ");
                }
                if *is_async {
                    self.push("async ");
                }
                if *is_generator {
                    self.push("*");
                }
                match kind {
                    MethodKind::Getter => self.push("get "),
                    MethodKind::Setter => self.push("set "),
                    MethodKind::Method | MethodKind::Constructor => (),
                }
                self.push(name);
                self.params(params);
                self.push(" ");
                self.stmt(body);
            }

            _ => self.node(ast),
        }
    }

    fn params(&mut self, params: &[Pattern]) {
        self.push("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.pattern(param);
        }
        self.push(")");
    }

    fn list(&mut self, items: &[Ast]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.expr(item);
        }
    }

    fn expr(&mut self, ast: &Ast) {
        match &ast.ast {
            AstNode::Number(v) => self.push(&v.to_string()),
            AstNode::Str(s) => self.push(&quote(s)),
            AstNode::Boolean(v) => self.push(&v.to_string()),
            AstNode::Null => self.push("null"),
            AstNode::This => self.push("this"),
            AstNode::Identifier(var) => self.push(var),
            AstNode::Opaque(text) | AstNode::JsxText(text) => self.push(text),

            AstNode::Template { quasis, exprs } => {
                self.push("`");
                for (i, quasi) in quasis.iter().enumerate() {
                    self.push(quasi);
                    if let Some(expr) = exprs.get(i) {
                        self.push("${");
                        self.expr(expr);
                        self.push("}");
                    }
                }
                self.push("`");
            }

            AstNode::Array(elems) => {
                self.push("[");
                self.list(elems);
                self.push("]");
            }

            AstNode::Object(entries) if entries.is_empty() => self.push("{}"),
            AstNode::Object(entries) => {
                self.push("{ ");
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    match entry {
                        ObjectEntry::KeyValue { key, value } => {
                            match key {
                                PropKey::Ident(name) => self.push(name),
                                PropKey::Str(name) => self.push(&quote(name)),
                                PropKey::Num(n) => self.push(&n.to_string()),
                                PropKey::Computed(key) => {
                                    self.push("[");
                                    self.expr(key);
                                    self.push("]");
                                }
                            }
                            self.push(": ");
                            self.expr(value);
                        }
                        ObjectEntry::Shorthand(value) => self.expr(value),
                        ObjectEntry::Spread(value) => {
                            self.push("...");
                            self.expr(value);
                        }
                        ObjectEntry::Method { method, .. } => self.class_member(method),
                        ObjectEntry::Opaque(text) => self.push(text),
                    }
                }
                self.push(" }");
            }

            AstNode::Spread(value) => {
                self.push("...");
                self.expr(value);
            }

            AstNode::Paren(value) => {
                self.push("(");
                self.expr(value);
                self.push(")");
            }

            AstNode::Unary { op, value } => {
                self.push(&op.to_string());
                if matches!(op, UnaryOp::TypeOf | UnaryOp::Void | UnaryOp::Delete) {
                    self.push(" ");
                }
                self.expr(value);
            }

            AstNode::Update { op, prefix, value } => {
                if *prefix {
                    self.push(&op.to_string());
                    self.expr(value);
                } else {
                    self.expr(value);
                    self.push(&op.to_string());
                }
            }

            AstNode::Binary { op, left, right } => {
                self.expr(left);
                self.push(&format!(" {} ", op));
                self.expr(right);
            }

            AstNode::Assign { op, target, value } => {
                self.expr(target);
                self.push(&format!(" {} ", op));
                self.expr(value);
            }

            AstNode::Ternary { cond, then, elsy } => {
                self.expr(cond);
                self.push(" ? ");
                self.expr(then);
                self.push(" : ");
                self.expr(elsy);
            }

            AstNode::Member { object, property } => {
                self.expr(object);
                self.member_prop(property, false);
            }

            AstNode::Call { callee, args } => {
                self.expr(callee);
                self.push("(");
                self.list(args);
                self.push(")");
            }

            AstNode::OptionalChain(link) => match &link.ast {
                AstNode::Member { object, property } => {
                    self.expr(object);
                    self.member_prop(property, true);
                }
                AstNode::Call { callee, args } => {
                    self.expr(callee);
                    self.push("?.(");
                    self.list(args);
                    self.push(")");
                }
                _ => self.expr(link),
            },

            AstNode::Await(value) => {
                self.push("await ");
                self.expr(value);
            }

            AstNode::Yield { delegate, value } => {
                self.push(if *delegate { "yield*" } else { "yield" });
                if let Some(value) = value {
                    self.push(" ");
                    self.expr(value);
                }
            }

            AstNode::Seq(exprs) => self.list(exprs),

            AstNode::TaggedTemplate { tag, quasi } => {
                self.expr(tag);
                self.expr(quasi);
            }

            AstNode::Cast { value, kind } => match kind {
                CastKind::As(ty) => {
                    self.expr(value);
                    self.push(" as ");
                    self.push(&ty.to_string());
                }
                CastKind::Satisfies(ty) => {
                    self.expr(value);
                    self.push(" satisfies ");
                    self.push(&ty.to_string());
                }
                CastKind::Angle(ty) => {
                    self.push("<");
                    self.push(&ty.to_string());
                    self.push(">");
                    self.expr(value);
                }
                CastKind::NonNull => {
                    self.expr(value);
                    self.push("!");
                }
                CastKind::Const => {
                    self.expr(value);
                    self.push(" as const");
                }
            },

            AstNode::New { callee, args } => {
                self.push("new ");
                self.expr(callee);
                self.push("(");
                self.list(args);
                self.push(")");
            }

            AstNode::Function {
                name,
                params,
                body,
                is_async,
                is_generator,
            } => {
                if *is_async {
                    self.push("async ");
                }
                self.push(if *is_generator { "function*" } else { "function" });
                if let Some(name) = name {
                    self.push(" ");
                    self.push(name);
                }
                self.params(params);
                self.push(" ");
                self.stmt(body);
            }

            AstNode::Arrow {
                params,
                body,
                is_async,
            } => {
                if *is_async {
                    self.push("async ");
                }
                self.params(params);
                self.push(" => ");
                match &body.ast {
                    AstNode::Block(statements) => self.block(statements),
                    _ => self.expr(body),
                }
            }

            AstNode::Class(class) => self.class(class),

            AstNode::JsxElement {
                name,
                attrs,
                children,
                self_closing,
            } => {
                self.push("<");
                self.push(name);
                for attr in attrs {
                    self.push(" ");
                    match attr {
                        JsxAttr::Named { name, value } => {
                            self.push(name);
                            if let Some(value) = value {
                                self.push("=");
                                self.expr(value);
                            }
                        }
                        JsxAttr::Spread(value) => {
                            self.push("{...");
                            self.expr(value);
                            self.push("}");
                        }
                    }
                }
                if *self_closing && children.is_empty() {
                    self.push(" />");
                } else {
                    self.push(">");
                    for child in children {
                        self.expr(child);
                    }
                    self.push("</");
                    self.push(name);
                    self.push(">");
                }
            }

            AstNode::JsxFragment(children) => {
                self.push("<>");
                for child in children {
                    self.expr(child);
                }
                self.push("</>");
            }

            AstNode::JsxExpr(expr) => {
                self.push("{");
                if let Some(expr) = expr {
                    self.expr(expr);
                }
                self.push("}");
            }

            AstNode::VarDeclarator { name, init } => {
                self.pattern(name);
                if let Some(init) = init {
                    self.push(" = ");
                    self.expr(init);
                }
            }

            AstNode::ClassProperty { .. } | AstNode::Method { .. } => self.class_member(ast),

            _ => self.stmt(ast),
        }
    }

    fn member_prop(&mut self, property: &MemberProp, optional: bool) {
        match property {
            MemberProp::Ident(name) => {
                self.push(if optional { "?." } else { "." });
                self.push(name);
            }
            MemberProp::Computed(index) => {
                self.push(if optional { "?.[" } else { "[" });
                self.expr(index);
                self.push("]");
            }
        }
    }

    fn pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Ident(name) | Pattern::Opaque(name) => self.push(name),

            Pattern::Object(props) if props.is_empty() => self.push("{}"),
            Pattern::Object(props) => {
                self.push("{ ");
                for (i, prop) in props.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    match prop {
                        ObjectPatProp::KeyValue { key, value } => {
                            self.push(key);
                            self.push(": ");
                            self.pattern(value);
                        }
                        ObjectPatProp::Shorthand { name, default } => {
                            self.push(name);
                            if let Some(default) = default {
                                self.push(" = ");
                                self.expr(default);
                            }
                        }
                        ObjectPatProp::Rest(rest) => {
                            self.push("...");
                            self.pattern(rest);
                        }
                    }
                }
                self.push(" }");
            }

            Pattern::Array(elems) => {
                self.push("[");
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    if let Some(elem) = elem {
                        self.pattern(elem);
                    }
                }
                self.push("]");
            }

            Pattern::Rest(rest) => {
                self.push("...");
                self.pattern(rest);
            }

            Pattern::Assign { left, right } => {
                self.pattern(left);
                self.push(" = ");
                self.expr(right);
            }
        }
    }
}

fn is_statement(ast: &AstNode) -> bool {
    matches!(
        ast,
        AstNode::Block(_)
            | AstNode::Declare { .. }
            | AstNode::If { .. }
            | AstNode::While { .. }
            | AstNode::DoWhile { .. }
            | AstNode::For { .. }
            | AstNode::ForEach { .. }
            | AstNode::Return(_)
            | AstNode::Throw(_)
            | AstNode::Try { .. }
            | AstNode::Switch { .. }
            | AstNode::Break(_)
            | AstNode::Continue(_)
            | AstNode::Export { .. }
            | AstNode::Interface { .. }
            | AstNode::TypeAlias { .. }
    )
}

fn join(types: &[TypeExpr], separator: &str) -> String {
    types
        .iter()
        .map(|ty| ty.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

impl Display for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut printer = Printer::default();
        printer.node(self);
        write!(f, "{}", printer.out)
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut printer = Printer::default();
        printer.pattern(self);
        write!(f, "{}", printer.out)
    }
}

impl Display for TypeMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}: {}",
            self.name,
            if self.optional { "?" } else { "" },
            self.ty
        )
    }
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeExpr::Any => write!(f, "any"),
            TypeExpr::Number => write!(f, "number"),
            TypeExpr::String => write!(f, "string"),
            TypeExpr::Boolean => write!(f, "boolean"),
            TypeExpr::Symbol => write!(f, "symbol"),
            TypeExpr::Object => write!(f, "object"),
            TypeExpr::Null => write!(f, "null"),
            TypeExpr::Undefined => write!(f, "undefined"),
            TypeExpr::Void => write!(f, "void"),
            TypeExpr::Ref { name, args } if args.is_empty() => write!(f, "{}", name),
            TypeExpr::Ref { name, args } => write!(f, "{}<{}>", name, join(args, ", ")),
            TypeExpr::Array(elem) => match **elem {
                TypeExpr::Union(_) => write!(f, "({})[]", elem),
                _ => write!(f, "{}[]", elem),
            },
            TypeExpr::Literal(members) if members.is_empty() => write!(f, "{{}}"),
            TypeExpr::Literal(members) => {
                write!(f, "{{ ")?;
                for member in members {
                    write!(f, "{}; ", member)?;
                }
                write!(f, "}}")
            }
            TypeExpr::Union(types) => write!(f, "{}", join(types, " | ")),
            TypeExpr::StringLiteral(s) => write!(f, "{}", quote(s)),
            TypeExpr::NumberLiteral(n) => write!(f, "{}", n),
            TypeExpr::BooleanLiteral(b) => write!(f, "{}", b),
            TypeExpr::Raw(text) => write!(f, "{}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn quoting() {
        assert_eq!(quote("a\"b\\c\n"), r#""a\"b\\c\n""#);
    }

    #[test]
    fn statements_are_indented() {
        let module = parse_module_helper("class A { m() { if (a) { b(); } return 1; } }");
        assert_eq!(
            print_module(&module),
            "class A {\n  m() {\n    if (a) {\n      b();\n    }\n    return 1;\n  }\n}\n"
        );
    }

    #[test]
    fn object_statement_is_parenthesized() {
        let asts = parse_helper("({ a: 1 })");
        assert_eq!(asts[0].to_string(), "({ a: 1 })");
    }

    #[test]
    fn type_declarations() {
        let interface = Ast::synthetic(AstNode::Interface {
            name: "IAProps".to_string(),
            extends: vec![TypeExpr::Ref {
                name: "React.HTMLAttributes".to_string(),
                args: vec![TypeExpr::named("Element")],
            }],
            members: vec![TypeMember {
                name: "foo".to_string(),
                optional: true,
                ty: TypeExpr::Any,
            }],
        });
        assert_eq!(
            interface.to_string(),
            "interface IAProps extends React.HTMLAttributes<Element> {\n  foo?: any;\n}"
        );

        let alias = Ast::synthetic(AstNode::TypeAlias {
            name: "AState".to_string(),
            ty: TypeExpr::Literal(vec![TypeMember {
                name: "bar".to_string(),
                optional: false,
                ty: TypeExpr::Array(Box::new(TypeExpr::Union(vec![
                    TypeExpr::String,
                    TypeExpr::Null,
                ]))),
            }]),
        });
        assert_eq!(alias.to_string(), "type AState = {\n  bar: (string | null)[];\n};");
    }

    #[test]
    fn switch_and_try() {
        let module =
            parse_module_helper("switch (x) { case 1: f(); break; default: g(); }\ntry { a() } catch (e) { b() }");
        assert_eq!(
            print_module(&module),
            "switch (x) {\n  case 1:\n    f();\n    break;\n  default:\n    g();\n}\ntry {\n  a();\n} catch (e) {\n  b();\n}\n"
        );
    }
}
