use std::cell::Cell;

use swc_common::sync::Lrc;
use swc_common::{FileName, SourceMap, SourceMapper, Span, Spanned};
use swc_ecma_ast as swc;
use swc_ecma_ast::{Expr, Lit, ModuleDecl, ModuleItem, Pat, PatOrExpr, Stmt};
use swc_ecma_parser::lexer::Lexer;
use swc_ecma_parser::{EsConfig, Parser, StringInput, Syntax, TsConfig};

use crate::ast::{
    Ast, AstNode, CastKind, ClassDecl, ExprWithTypeArgs, HeritageClause, HeritageToken, JsxAttr,
    MemberProp, MethodKind, Module, NodeId, ObjectEntry, ObjectPatProp, Pattern, PropKey,
    SwitchCase, TypeExpr,
};
use crate::error::MigrateError;

/// Parses `source` and lowers it into a [`Module`].
///
/// Files ending in `.ts` or `.tsx` are parsed as TypeScript, everything else as JavaScript with JSX.
///
/// # Example
/// ```rs
/// # use react2ts::parse::parse_source;
/// let module = parse_source("component.jsx", "class A extends React.Component {}")?;
/// println!("{:?}", module.body);
/// ```
pub fn parse_source(file: &str, source: &str) -> Result<Module, MigrateError> {
    let cm = Lrc::<SourceMap>::default();
    let fm = cm.new_source_file(FileName::Custom(file.to_string()), source.to_string());

    let lexer = Lexer::new(
        syntax_for(file),
        // EsVersion defaults to es5
        Default::default(),
        StringInput::from(&*fm),
        None,
    );

    let mut parser = Parser::new_from(lexer);
    let module = parser.parse_module().map_err(|e| MigrateError::Parse {
        file: file.to_string(),
        message: e.kind().msg().to_string(),
    })?;

    for e in parser.take_errors() {
        tracing::warn!(file, error = %e.kind().msg(), "recovered from syntax error");
    }

    Ok(parse(&cm, &module))
}

fn syntax_for(file: &str) -> Syntax {
    if file.ends_with(".ts") || file.ends_with(".tsx") {
        Syntax::Typescript(TsConfig {
            tsx: file.ends_with(".tsx"),
            ..Default::default()
        })
    } else {
        Syntax::Es(EsConfig {
            jsx: true,
            ..Default::default()
        })
    }
}

/// Converts a [`swc_ecma_ast`] module into a [`Module`] for type migration.
///
/// `cm` must be the source map the module was parsed with; constructs the engine does not look into
/// are kept as their source text.
pub fn parse(cm: &SourceMap, module: &swc::Module) -> Module {
    let lowering = Lowering {
        cm,
        next_id: Cell::new(0),
    };

    Module {
        body: module
            .body
            .iter()
            .filter_map(|item| lowering.walk_module_item(item))
            .collect(),
        emit_helpers: Vec::new(),
    }
}

struct Lowering<'a> {
    cm: &'a SourceMap,
    next_id: Cell<u32>,
}

impl Lowering<'_> {
    fn node(&self, ast: AstNode, span: Span) -> Ast {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Ast {
            ast,
            span,
            id: NodeId(id),
        }
    }

    fn snippet(&self, span: Span) -> String {
        self.cm.span_to_snippet(span).unwrap_or_default()
    }

    fn opaque(&self, span: Span) -> Ast {
        self.node(AstNode::Opaque(self.snippet(span)), span)
    }

    fn walk_module_item(&self, item: &ModuleItem) -> Option<Ast> {
        match item {
            ModuleItem::Stmt(statement) => self.walk_statement(statement),

            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => match &export.decl {
                swc::Decl::Class(_) | swc::Decl::Fn(_) | swc::Decl::Var(_) => {
                    let decl = self.walk_decl(&export.decl);
                    Some(self.node(
                        AstNode::Export {
                            default: false,
                            decl: Box::new(decl),
                        },
                        export.span,
                    ))
                }
                _ => Some(self.opaque(export.span)),
            },

            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => {
                let decl = match &export.decl {
                    swc::DefaultDecl::Class(class) => {
                        let name = class.ident.as_ref().map(|id| id.sym.to_string());
                        self.node(
                            AstNode::Class(self.walk_class(name, &class.class)),
                            class.class.span,
                        )
                    }
                    swc::DefaultDecl::Fn(function) => {
                        let name = function.ident.as_ref().map(|id| id.sym.to_string());
                        self.walk_function(name, &function.function)
                    }
                    _ => return Some(self.opaque(export.span)),
                };

                Some(self.node(
                    AstNode::Export {
                        default: true,
                        decl: Box::new(decl),
                    },
                    export.span,
                ))
            }

            ModuleItem::ModuleDecl(decl) => Some(self.opaque(decl.span())),
        }
    }

    fn walk_statement(&self, statement: &Stmt) -> Option<Ast> {
        let span = statement.span();
        let ast = match statement {
            Stmt::Block(block) => return Some(self.walk_block(block)),

            Stmt::Empty(_) => return None,

            Stmt::Expr(e) => return Some(self.walk_expression(&e.expr)),

            Stmt::Decl(decl) => return Some(self.walk_decl(decl)),

            Stmt::Return(ret) => {
                AstNode::Return(ret.arg.as_ref().map(|v| Box::new(self.walk_expression(v))))
            }

            Stmt::Throw(throw) => AstNode::Throw(Box::new(self.walk_expression(&throw.arg))),

            Stmt::Break(b) => AstNode::Break(b.label.as_ref().map(|l| l.sym.to_string())),

            Stmt::Continue(c) => AstNode::Continue(c.label.as_ref().map(|l| l.sym.to_string())),

            Stmt::If(if_) => AstNode::If {
                cond: Box::new(self.walk_expression(&if_.test)),
                then: Box::new(self.walk_body(&if_.cons)),
                elsy: if_.alt.as_ref().map(|v| Box::new(self.walk_body(v))),
            },

            Stmt::While(while_) => AstNode::While {
                cond: Box::new(self.walk_expression(&while_.test)),
                body: Box::new(self.walk_body(&while_.body)),
            },

            Stmt::DoWhile(do_while) => AstNode::DoWhile {
                body: Box::new(self.walk_body(&do_while.body)),
                cond: Box::new(self.walk_expression(&do_while.test)),
            },

            Stmt::For(for_) => AstNode::For {
                init: for_.init.as_ref().map(|init| {
                    Box::new(match init {
                        swc::VarDeclOrExpr::VarDecl(decl) => self.walk_var_decl(decl),
                        swc::VarDeclOrExpr::Expr(e) => self.walk_expression(e),
                    })
                }),
                test: for_.test.as_ref().map(|v| Box::new(self.walk_expression(v))),
                update: for_.update.as_ref().map(|v| Box::new(self.walk_expression(v))),
                body: Box::new(self.walk_body(&for_.body)),
            },

            // Loop heads are kept as written.
            Stmt::ForIn(for_in) => AstNode::ForEach {
                of: false,
                left: Box::new(self.opaque(for_in.left.span())),
                right: Box::new(self.walk_expression(&for_in.right)),
                body: Box::new(self.walk_body(&for_in.body)),
            },

            Stmt::ForOf(for_of) if !self.snippet(span).starts_with("for await") => AstNode::ForEach {
                of: true,
                left: Box::new(self.opaque(for_of.left.span())),
                right: Box::new(self.walk_expression(&for_of.right)),
                body: Box::new(self.walk_body(&for_of.body)),
            },

            Stmt::Try(try_) => AstNode::Try {
                block: Box::new(self.walk_block(&try_.block)),
                param: try_
                    .handler
                    .as_ref()
                    .and_then(|h| h.param.as_ref())
                    .map(|p| self.walk_pattern(p)),
                handler: try_
                    .handler
                    .as_ref()
                    .map(|h| Box::new(self.walk_block(&h.body))),
                finalizer: try_
                    .finalizer
                    .as_ref()
                    .map(|f| Box::new(self.walk_block(f))),
            },

            Stmt::Switch(switch) => AstNode::Switch {
                discriminant: Box::new(self.walk_expression(&switch.discriminant)),
                cases: switch
                    .cases
                    .iter()
                    .map(|case| SwitchCase {
                        test: case.test.as_ref().map(|t| self.walk_expression(t)),
                        body: case
                            .cons
                            .iter()
                            .filter_map(|s| self.walk_statement(s))
                            .collect(),
                    })
                    .collect(),
            },

            _ => AstNode::Opaque(self.snippet(span)),
        };

        Some(self.node(ast, span))
    }

    /// Lowers the body of an `if` or a loop, where an empty statement still needs a node.
    fn walk_body(&self, statement: &Stmt) -> Ast {
        self.walk_statement(statement)
            .unwrap_or_else(|| self.node(AstNode::Block(Vec::new()), statement.span()))
    }

    fn walk_block(&self, block: &swc::BlockStmt) -> Ast {
        self.node(
            AstNode::Block(
                block
                    .stmts
                    .iter()
                    .filter_map(|s| self.walk_statement(s))
                    .collect(),
            ),
            block.span,
        )
    }

    fn walk_decl(&self, decl: &swc::Decl) -> Ast {
        match decl {
            swc::Decl::Class(class) => self.node(
                AstNode::Class(self.walk_class(Some(class.ident.sym.to_string()), &class.class)),
                class.class.span,
            ),
            swc::Decl::Fn(function) => {
                self.walk_function(Some(function.ident.sym.to_string()), &function.function)
            }
            swc::Decl::Var(var) => self.walk_var_decl(var),
            other => self.opaque(other.span()),
        }
    }

    fn walk_var_decl(&self, decl: &swc::VarDecl) -> Ast {
        let decls = decl
            .decls
            .iter()
            .map(|d| {
                self.node(
                    AstNode::VarDeclarator {
                        name: self.walk_pattern(&d.name),
                        init: d.init.as_ref().map(|v| Box::new(self.walk_expression(v))),
                    },
                    d.span,
                )
            })
            .collect();

        self.node(
            AstNode::Declare {
                kind: decl.kind,
                decls,
            },
            decl.span,
        )
    }

    fn walk_function(&self, name: Option<String>, function: &swc::Function) -> Ast {
        self.node(
            AstNode::Function {
                name,
                params: function
                    .params
                    .iter()
                    .map(|p| self.walk_pattern(&p.pat))
                    .collect(),
                body: Box::new(self.walk_function_body(function.body.as_ref(), function.span)),
                is_async: function.is_async,
                is_generator: function.is_generator,
            },
            function.span,
        )
    }

    fn walk_function_body(&self, body: Option<&swc::BlockStmt>, span: Span) -> Ast {
        match body {
            Some(block) => self.walk_block(block),
            None => self.node(AstNode::Block(Vec::new()), span),
        }
    }

    fn walk_class(&self, name: Option<String>, class: &swc::Class) -> ClassDecl {
        let mut heritage = Vec::new();

        if let Some(super_class) = &class.super_class {
            let type_args = class
                .super_type_params
                .iter()
                .flat_map(|params| params.params.iter())
                .map(|ty| TypeExpr::Raw(self.snippet(ty.span())))
                .collect();

            heritage.push(HeritageClause {
                token: HeritageToken::Extends,
                types: vec![ExprWithTypeArgs {
                    expr: self.walk_expression(super_class),
                    type_args,
                }],
            });
        }

        if !class.implements.is_empty() {
            heritage.push(HeritageClause {
                token: HeritageToken::Implements,
                types: class
                    .implements
                    .iter()
                    .map(|implements| ExprWithTypeArgs {
                        expr: self.opaque(implements.span),
                        type_args: Vec::new(),
                    })
                    .collect(),
            });
        }

        ClassDecl {
            name,
            heritage,
            members: class
                .body
                .iter()
                .filter_map(|member| self.walk_class_member(member))
                .collect(),
        }
    }

    fn walk_class_member(&self, member: &swc::ClassMember) -> Option<Ast> {
        let span = member.span();
        let ast = match member {
            swc::ClassMember::Empty(_) => return None,

            swc::ClassMember::Constructor(constructor) => AstNode::Method {
                name: "constructor".to_string(),
                kind: MethodKind::Constructor,
                is_static: false,
                params: constructor
                    .params
                    .iter()
                    .map(|param| match param {
                        swc::ParamOrTsParamProp::Param(param) => self.walk_pattern(&param.pat),
                        swc::ParamOrTsParamProp::TsParamProp(prop) => {
                            Pattern::Opaque(self.snippet(prop.span))
                        }
                    })
                    .collect(),
                body: Box::new(self.walk_function_body(constructor.body.as_ref(), span)),
                is_async: false,
                is_generator: false,
            },

            swc::ClassMember::Method(method) => self.walk_method(
                self.prop_name(&method.key),
                method.kind,
                method.is_static,
                &method.function,
            ),

            swc::ClassMember::ClassProp(prop) => AstNode::ClassProperty {
                name: self.prop_name(&prop.key),
                is_static: prop.is_static,
                type_ann: prop
                    .type_ann
                    .as_ref()
                    .map(|ann| TypeExpr::Raw(self.snippet(ann.type_ann.span()))),
                value: prop.value.as_ref().map(|v| Box::new(self.walk_expression(v))),
            },

            _ => AstNode::Opaque(self.snippet(span)),
        };

        Some(self.node(ast, span))
    }

    fn walk_method(
        &self,
        name: String,
        kind: swc::MethodKind,
        is_static: bool,
        function: &swc::Function,
    ) -> AstNode {
        AstNode::Method {
            name,
            kind: match kind {
                swc::MethodKind::Method => MethodKind::Method,
                swc::MethodKind::Getter => MethodKind::Getter,
                swc::MethodKind::Setter => MethodKind::Setter,
            },
            is_static,
            params: function
                .params
                .iter()
                .map(|p| self.walk_pattern(&p.pat))
                .collect(),
            body: Box::new(self.walk_function_body(function.body.as_ref(), function.span)),
            is_async: function.is_async,
            is_generator: function.is_generator,
        }
    }

    fn prop_name(&self, key: &swc::PropName) -> String {
        match key {
            swc::PropName::Ident(id) => id.sym.to_string(),
            swc::PropName::Str(s) => s.value.to_string(),
            swc::PropName::Num(n) => n.value.to_string(),
            other => self.snippet(other.span()),
        }
    }

    fn walk_prop_key(&self, key: &swc::PropName) -> PropKey {
        match key {
            swc::PropName::Ident(id) => PropKey::Ident(id.sym.to_string()),
            swc::PropName::Str(s) => PropKey::Str(s.value.to_string()),
            swc::PropName::Num(n) => PropKey::Num(n.value),
            swc::PropName::Computed(computed) => {
                PropKey::Computed(Box::new(self.walk_expression(&computed.expr)))
            }
            other => PropKey::Ident(self.snippet(other.span())),
        }
    }

    fn walk_pattern(&self, pat: &Pat) -> Pattern {
        match pat {
            Pat::Ident(binding) => Pattern::Ident(binding.id.sym.to_string()),

            Pat::Object(object) => Pattern::Object(
                object
                    .props
                    .iter()
                    .map(|prop| match prop {
                        swc::ObjectPatProp::KeyValue(kv) => ObjectPatProp::KeyValue {
                            key: self.prop_name(&kv.key),
                            value: self.walk_pattern(&kv.value),
                        },
                        swc::ObjectPatProp::Assign(assign) => ObjectPatProp::Shorthand {
                            name: assign.key.sym.to_string(),
                            default: assign.value.as_ref().map(|v| self.walk_expression(v)),
                        },
                        swc::ObjectPatProp::Rest(rest) => {
                            ObjectPatProp::Rest(self.walk_pattern(&rest.arg))
                        }
                    })
                    .collect(),
            ),

            Pat::Array(array) => Pattern::Array(
                array
                    .elems
                    .iter()
                    .map(|elem| elem.as_ref().map(|p| self.walk_pattern(p)))
                    .collect(),
            ),

            Pat::Rest(rest) => Pattern::Rest(Box::new(self.walk_pattern(&rest.arg))),

            Pat::Assign(assign) => Pattern::Assign {
                left: Box::new(self.walk_pattern(&assign.left)),
                right: Box::new(self.walk_expression(&assign.right)),
            },

            _ => Pattern::Opaque(self.snippet(pat.span())),
        }
    }

    fn walk_args(&self, args: &[swc::ExprOrSpread]) -> Vec<Ast> {
        args.iter().map(|arg| self.walk_expr_or_spread(arg)).collect()
    }

    fn walk_expr_or_spread(&self, arg: &swc::ExprOrSpread) -> Ast {
        let value = self.walk_expression(&arg.expr);
        match arg.spread {
            Some(spread) => self.node(AstNode::Spread(Box::new(value)), spread),
            None => value,
        }
    }

    fn walk_expression(&self, expression: &Expr) -> Ast {
        let span = expression.span();
        let ast = match expression {
            Expr::This(_) => AstNode::This,

            Expr::Ident(var) => AstNode::Identifier(var.sym.to_string()),

            Expr::Lit(Lit::Str(s)) => AstNode::Str(s.value.to_string()),
            Expr::Lit(Lit::Num(n)) => AstNode::Number(n.value),
            Expr::Lit(Lit::Bool(b)) => AstNode::Boolean(b.value),
            Expr::Lit(Lit::Null(_)) => AstNode::Null,

            Expr::Array(array) if array.elems.iter().all(Option::is_some) => AstNode::Array(
                array
                    .elems
                    .iter()
                    .flatten()
                    .map(|elem| self.walk_expr_or_spread(elem))
                    .collect(),
            ),

            Expr::Object(object) => AstNode::Object(
                object
                    .props
                    .iter()
                    .map(|prop| self.walk_object_entry(prop))
                    .collect(),
            ),

            Expr::Fn(function) => {
                let name = function.ident.as_ref().map(|id| id.sym.to_string());
                return self.walk_function(name, &function.function);
            }

            Expr::Unary(unary) => AstNode::Unary {
                op: unary.op,
                value: Box::new(self.walk_expression(&unary.arg)),
            },

            Expr::Update(update) => AstNode::Update {
                op: update.op,
                prefix: update.prefix,
                value: Box::new(self.walk_expression(&update.arg)),
            },

            Expr::Bin(bin) => AstNode::Binary {
                op: bin.op,
                left: Box::new(self.walk_expression(&bin.left)),
                right: Box::new(self.walk_expression(&bin.right)),
            },

            Expr::Assign(assign) => {
                let target = match &assign.left {
                    PatOrExpr::Expr(e) => self.walk_expression(e),
                    PatOrExpr::Pat(pat) => match &**pat {
                        Pat::Expr(e) => self.walk_expression(e),
                        Pat::Ident(binding) => self.node(
                            AstNode::Identifier(binding.id.sym.to_string()),
                            binding.id.span,
                        ),
                        other => self.opaque(other.span()),
                    },
                };

                AstNode::Assign {
                    op: assign.op,
                    target: Box::new(target),
                    value: Box::new(self.walk_expression(&assign.right)),
                }
            }

            Expr::Member(member) => self.walk_member(member),

            Expr::Cond(trinary) => AstNode::Ternary {
                cond: Box::new(self.walk_expression(&trinary.test)),
                then: Box::new(self.walk_expression(&trinary.cons)),
                elsy: Box::new(self.walk_expression(&trinary.alt)),
            },

            Expr::Call(call) => AstNode::Call {
                callee: Box::new(match &call.callee {
                    swc::Callee::Expr(callee) => self.walk_expression(callee),
                    swc::Callee::Super(callee) => self.opaque(callee.span),
                    swc::Callee::Import(callee) => self.opaque(callee.span),
                }),
                args: self.walk_args(&call.args),
            },

            Expr::OptChain(chain) => {
                let link = match &chain.base {
                    swc::OptChainBase::Member(member) => {
                        self.node(self.walk_member(member), member.span)
                    }
                    swc::OptChainBase::Call(call) => self.node(
                        AstNode::Call {
                            callee: Box::new(self.walk_expression(&call.callee)),
                            args: self.walk_args(&call.args),
                        },
                        call.span,
                    ),
                };
                AstNode::OptionalChain(Box::new(link))
            }

            Expr::Await(await_expr) => {
                AstNode::Await(Box::new(self.walk_expression(&await_expr.arg)))
            }

            Expr::Yield(yield_expr) => AstNode::Yield {
                delegate: yield_expr.delegate,
                value: yield_expr.arg.as_ref().map(|v| Box::new(self.walk_expression(v))),
            },

            Expr::Seq(seq) => {
                AstNode::Seq(seq.exprs.iter().map(|e| self.walk_expression(e)).collect())
            }

            Expr::TaggedTpl(tagged) => AstNode::TaggedTemplate {
                tag: Box::new(self.walk_expression(&tagged.tag)),
                quasi: Box::new(self.walk_template(&tagged.tpl)),
            },

            Expr::TsAs(cast) => AstNode::Cast {
                value: Box::new(self.walk_expression(&cast.expr)),
                kind: CastKind::As(self.raw_type(cast.type_ann.span())),
            },

            Expr::TsSatisfies(cast) => AstNode::Cast {
                value: Box::new(self.walk_expression(&cast.expr)),
                kind: CastKind::Satisfies(self.raw_type(cast.type_ann.span())),
            },

            Expr::TsTypeAssertion(cast) => AstNode::Cast {
                value: Box::new(self.walk_expression(&cast.expr)),
                kind: CastKind::Angle(self.raw_type(cast.type_ann.span())),
            },

            Expr::TsNonNull(cast) => AstNode::Cast {
                value: Box::new(self.walk_expression(&cast.expr)),
                kind: CastKind::NonNull,
            },

            Expr::TsConstAssertion(cast) => AstNode::Cast {
                value: Box::new(self.walk_expression(&cast.expr)),
                kind: CastKind::Const,
            },

            Expr::New(new) => AstNode::New {
                callee: Box::new(self.walk_expression(&new.callee)),
                args: new
                    .args
                    .as_deref()
                    .map(|args| self.walk_args(args))
                    .unwrap_or_default(),
            },

            Expr::Paren(paren) => AstNode::Paren(Box::new(self.walk_expression(&paren.expr))),

            Expr::Tpl(tpl) => return self.walk_template(tpl),

            Expr::Arrow(arrow) => {
                let body: &swc::BlockStmtOrExpr = &arrow.body;
                AstNode::Arrow {
                    params: arrow.params.iter().map(|p| self.walk_pattern(p)).collect(),
                    body: Box::new(match body {
                        swc::BlockStmtOrExpr::BlockStmt(block) => self.walk_block(block),
                        swc::BlockStmtOrExpr::Expr(e) => self.walk_expression(e),
                    }),
                    is_async: arrow.is_async,
                }
            }

            Expr::Class(class) => {
                let name = class.ident.as_ref().map(|id| id.sym.to_string());
                AstNode::Class(self.walk_class(name, &class.class))
            }

            Expr::JSXElement(element) => return self.walk_jsx_element(element),

            Expr::JSXFragment(fragment) => return self.walk_jsx_fragment(fragment),

            _ => AstNode::Opaque(self.snippet(span)),
        };

        self.node(ast, span)
    }

    fn walk_member(&self, member: &swc::MemberExpr) -> AstNode {
        AstNode::Member {
            object: Box::new(self.walk_expression(&member.obj)),
            property: match &member.prop {
                swc::MemberProp::Ident(id) => MemberProp::Ident(id.sym.to_string()),
                swc::MemberProp::PrivateName(private) => {
                    MemberProp::Ident(format!("#{}", private.id.sym))
                }
                swc::MemberProp::Computed(computed) => {
                    MemberProp::Computed(Box::new(self.walk_expression(&computed.expr)))
                }
            },
        }
    }

    fn walk_template(&self, tpl: &swc::Tpl) -> Ast {
        self.node(
            AstNode::Template {
                quasis: tpl.quasis.iter().map(|q| q.raw.to_string()).collect(),
                exprs: tpl.exprs.iter().map(|e| self.walk_expression(e)).collect(),
            },
            tpl.span,
        )
    }

    fn raw_type(&self, span: Span) -> TypeExpr {
        TypeExpr::Raw(self.snippet(span))
    }

    fn walk_object_entry(&self, prop: &swc::PropOrSpread) -> ObjectEntry {
        match prop {
            swc::PropOrSpread::Spread(spread) => {
                ObjectEntry::Spread(self.walk_expression(&spread.expr))
            }
            swc::PropOrSpread::Prop(prop) => match &**prop {
                swc::Prop::Shorthand(id) => {
                    ObjectEntry::Shorthand(self.node(AstNode::Identifier(id.sym.to_string()), id.span))
                }
                swc::Prop::KeyValue(kv) => ObjectEntry::KeyValue {
                    key: self.walk_prop_key(&kv.key),
                    value: self.walk_expression(&kv.value),
                },
                swc::Prop::Method(method) => ObjectEntry::Method {
                    key: self.walk_prop_key(&method.key),
                    method: self.node(
                        self.walk_method(
                            self.prop_name(&method.key),
                            swc::MethodKind::Method,
                            false,
                            &method.function,
                        ),
                        method.function.span,
                    ),
                },
                swc::Prop::Getter(getter) => ObjectEntry::Method {
                    key: self.walk_prop_key(&getter.key),
                    method: self.node(
                        AstNode::Method {
                            name: self.prop_name(&getter.key),
                            kind: MethodKind::Getter,
                            is_static: false,
                            params: Vec::new(),
                            body: Box::new(
                                self.walk_function_body(getter.body.as_ref(), getter.span),
                            ),
                            is_async: false,
                            is_generator: false,
                        },
                        getter.span,
                    ),
                },
                swc::Prop::Setter(setter) => ObjectEntry::Method {
                    key: self.walk_prop_key(&setter.key),
                    method: self.node(
                        AstNode::Method {
                            name: self.prop_name(&setter.key),
                            kind: MethodKind::Setter,
                            is_static: false,
                            params: vec![self.walk_pattern(&setter.param)],
                            body: Box::new(
                                self.walk_function_body(setter.body.as_ref(), setter.span),
                            ),
                            is_async: false,
                            is_generator: false,
                        },
                        setter.span,
                    ),
                },
                other => ObjectEntry::Opaque(self.snippet(other.span())),
            },
        }
    }

    fn walk_jsx_element(&self, element: &swc::JSXElement) -> Ast {
        let attrs = element
            .opening
            .attrs
            .iter()
            .map(|attr| match attr {
                swc::JSXAttrOrSpread::JSXAttr(attr) => JsxAttr::Named {
                    name: self.snippet(attr.name.span()),
                    value: attr.value.as_ref().map(|value| self.walk_jsx_attr_value(value)),
                },
                swc::JSXAttrOrSpread::SpreadElement(spread) => {
                    JsxAttr::Spread(self.walk_expression(&spread.expr))
                }
            })
            .collect();

        self.node(
            AstNode::JsxElement {
                name: self.snippet(element.opening.name.span()),
                attrs,
                children: self.walk_jsx_children(&element.children),
                self_closing: element.opening.self_closing,
            },
            element.span,
        )
    }

    fn walk_jsx_fragment(&self, fragment: &swc::JSXFragment) -> Ast {
        self.node(
            AstNode::JsxFragment(self.walk_jsx_children(&fragment.children)),
            fragment.span,
        )
    }

    fn walk_jsx_attr_value(&self, value: &swc::JSXAttrValue) -> Ast {
        match value {
            swc::JSXAttrValue::JSXExprContainer(container) => {
                self.walk_jsx_container(container)
            }
            swc::JSXAttrValue::JSXElement(element) => self.walk_jsx_element(element),
            swc::JSXAttrValue::JSXFragment(fragment) => self.walk_jsx_fragment(fragment),
            // JSX strings have no escapes, so they are kept exactly as written.
            swc::JSXAttrValue::Lit(lit) => self.opaque(lit.span()),
        }
    }

    fn walk_jsx_container(&self, container: &swc::JSXExprContainer) -> Ast {
        let expr = match &container.expr {
            swc::JSXExpr::Expr(e) => Some(Box::new(self.walk_expression(e))),
            swc::JSXExpr::JSXEmptyExpr(_) => None,
        };
        self.node(AstNode::JsxExpr(expr), container.span)
    }

    fn walk_jsx_children(&self, children: &[swc::JSXElementChild]) -> Vec<Ast> {
        children
            .iter()
            .filter_map(|child| match child {
                swc::JSXElementChild::JSXText(text) => {
                    let raw = self.snippet(text.span);
                    if raw.trim().is_empty() && raw.contains('\n') {
                        None
                    } else {
                        Some(self.node(AstNode::JsxText(raw), text.span))
                    }
                }
                swc::JSXElementChild::JSXExprContainer(container) => {
                    Some(self.walk_jsx_container(container))
                }
                swc::JSXElementChild::JSXElement(element) => Some(self.walk_jsx_element(element)),
                swc::JSXElementChild::JSXFragment(fragment) => {
                    Some(self.walk_jsx_fragment(fragment))
                }
                swc::JSXElementChild::JSXSpreadChild(spread) => Some(self.opaque(spread.span)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{AstNode, HeritageToken, MethodKind, Pattern};
    use crate::testing::*;

    fn roundtrip(source: &str) -> String {
        parse_helper(source)
            .iter()
            .map(|ast| ast.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty() {
        assert!(parse_helper("").is_empty());
    }

    #[test]
    fn number() {
        assert_eq!(roundtrip("2"), "2");
        assert_eq!(roundtrip("3.5"), "3.5");
        parse_helper("6e9");
        parse_helper("4e-20");
    }

    #[test]
    fn boolean() {
        assert_eq!(roundtrip("true"), "true");
        assert_eq!(roundtrip("false"), "false");
    }

    #[test]
    fn operators() {
        assert_eq!(roundtrip("1 + 2"), "1 + 2");
        assert_eq!(roundtrip("1 + 2 * 3 / 4"), "1 + 2 * 3 / 4");
        assert_eq!(roundtrip("(true + 2) / false"), "(true + 2) / false");
        assert_eq!(roundtrip("-2"), "-2");
        assert_eq!(roundtrip("typeof x"), "typeof x");
        assert_eq!(roundtrip("x++"), "x++");
        parse_helper("1 === 2");
        parse_helper("1 >>> 2");
    }

    #[test]
    fn ternary() {
        assert_eq!(roundtrip("true ? 42 : false"), "true ? 42 : false");
    }

    #[test]
    fn variables() {
        assert_eq!(roundtrip("x = 3"), "x = 3");
        assert_eq!(roundtrip("var x, y = 4"), "var x, y = 4;");
        assert_eq!(
            roundtrip("const { a, b: c, ...d } = this.props"),
            "const { a, b: c, ...d } = this.props;"
        );
    }

    #[test]
    fn if_() {
        parse_helper("if (true) 2");
        parse_helper("if (true) 2\nelse 3");
        parse_helper("if (true) {2; 3} else {3; 5}");
        parse_helper("if (true) ;");
    }

    #[test]
    fn loops() {
        parse_helper("while (true) 2");
        parse_helper("do { x-- } while (x)");
        parse_helper("for (let i = 0; i < 3; i++) { f(i) }");
        parse_helper("for (const k in o) {}");
        parse_helper("for (const v of [1, 2, 3]) {}");
    }

    #[test]
    fn unsupported_is_kept_verbatim() {
        let asts = parse_helper("import * as React from 'react';");
        assert!(matches!(&asts[0].ast, AstNode::Opaque(text) if text == "import * as React from 'react';"));
    }

    #[test]
    fn class_with_heritage() {
        let asts = parse_helper("export default class A extends React.Component { m() {} }");
        let class = asts[0].as_class().expect("class");
        assert_eq!(class.name.as_deref(), Some("A"));
        assert_eq!(class.heritage.len(), 1);
        assert_eq!(class.heritage[0].token, HeritageToken::Extends);
        assert_eq!(class.heritage[0].types[0].expr.to_string(), "React.Component");
        assert!(matches!(
            &class.members[0].ast,
            AstNode::Method { name, kind: MethodKind::Method, .. } if name == "m"
        ));
    }

    #[test]
    fn typescript_implements_is_a_second_clause() {
        let asts = parse_ts_helper("class A extends B<X> implements C, D {}");
        let class = asts[0].as_class().expect("class");
        assert_eq!(class.heritage.len(), 2);
        assert_eq!(class.heritage[0].types[0].type_args.len(), 1);
        assert_eq!(class.heritage[1].token, HeritageToken::Implements);
        assert_eq!(class.heritage[1].types.len(), 2);
    }

    #[test]
    fn constructor_and_params() {
        let asts = parse_helper("class A { constructor(props, { a } = {}) { super(props); } }");
        let class = asts[0].as_class().expect("class");
        match &class.members[0].ast {
            AstNode::Method { kind, params, .. } => {
                assert_eq!(*kind, MethodKind::Constructor);
                assert!(matches!(&params[0], Pattern::Ident(name) if name == "props"));
                assert!(matches!(&params[1], Pattern::Assign { .. }));
            }
            other => panic!("expected constructor, found {:?}", other),
        }
    }

    #[test]
    fn jsx() {
        assert_eq!(
            roundtrip("<button onClick={this.onclick.bind(this)} />"),
            "<button onClick={this.onclick.bind(this)} />"
        );
        assert_eq!(
            roundtrip(r#"<div className="x">hi {name}</div>"#),
            r#"<div className="x">hi {name}</div>"#
        );
    }

    #[test]
    fn async_and_generators() {
        assert_eq!(
            roundtrip("async function f() { await g(); }"),
            "async function f() {\n  await g();\n}"
        );
        assert_eq!(
            roundtrip("function* g() { yield; yield* h(); }"),
            "function* g() {\n  yield;\n  yield* h();\n}"
        );
        assert_eq!(
            roundtrip("class A { async m() { await x; } *n() {} }"),
            "class A {\n  async m() {\n    await x;\n  }\n  *n() {}\n}"
        );
    }

    #[test]
    fn optional_chains() {
        assert_eq!(roundtrip("a?.b"), "a?.b");
        assert_eq!(roundtrip("a?.[0]"), "a?.[0]");
        assert_eq!(roundtrip("f?.(x, y)"), "f?.(x, y)");
        assert!(matches!(
            &parse_helper("this.props.onReady?.()")[0].ast,
            AstNode::OptionalChain(link) if matches!(link.ast, AstNode::Call { .. })
        ));
    }

    #[test]
    fn sequences_and_tagged_templates() {
        assert_eq!(roundtrip("a, b"), "a, b");
        assert_eq!(roundtrip("css`color: ${c};`"), "css`color: ${c};`");
    }

    #[test]
    fn typescript_casts() {
        let printed: Vec<String> = parse_ts_helper("x as any; y!; <T>z; w as const")
            .iter()
            .map(|ast| ast.to_string())
            .collect();
        assert_eq!(printed, ["x as any", "y!", "<T>z", "w as const"]);
    }

    #[test]
    fn object_methods() {
        assert_eq!(
            roundtrip("({ f(a) { return a; }, get g() { return 1; }, h: 2 })"),
            "({ f(a) {\n  return a;\n}, get g() {\n  return 1;\n}, h: 2 })"
        );
        assert!(matches!(
            &parse_helper("({ async f() {} })")[0].ast,
            AstNode::Paren(inner) if matches!(
                &inner.ast,
                AstNode::Object(entries) if entries[0].key_name() == Some("f")
            )
        ));
    }

    #[test]
    fn ids_are_unique() {
        let asts = parse_helper("a + b; c(d)");
        let mut ids = Vec::new();
        crate::walk::traverse(&asts, |node| ids.push(node.id));
        let len = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), len);
    }

    #[test]
    fn syntax_error_is_reported() {
        let err = crate::parse::parse_source("broken.js", "class {").unwrap_err();
        assert!(err.to_string().contains("broken.js"));
    }
}
