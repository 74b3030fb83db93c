use swc_common::{Span, DUMMY_SP};
use swc_ecma_ast::{AssignOp, BinaryOp, UnaryOp, UpdateOp, VarDeclKind};

/// Identity of a node, assigned once at lowering time.
///
/// Cloning a node keeps its id, so a node rebuilt by a pass can still be found
/// in a statement list by the id of the node it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The id carried by every node synthesized by a pass.
    pub const DUMMY: NodeId = NodeId(u32::MAX);
}

/// Anything that can be located by identity inside a list.
pub trait Identified {
    /// The identity of the element.
    fn id(&self) -> NodeId;
}

/// A parsed source unit.
#[derive(Debug, Clone, Default)]
pub struct Module {
    /// The top level statements, in source order.
    pub body: Vec<Ast>,

    /// Runtime-support metadata attached by earlier stages. Passes never look at it, they only
    /// carry it over to the tree they return so the printer stage still sees it.
    pub emit_helpers: Vec<String>,
}

/// Represents an AST annotated with metadata such as identity and location info.
#[derive(Debug, Clone)]
pub struct Ast {
    /// The variant of the AST.
    pub ast: AstNode,

    /// The location in the file of the AST.
    pub span: Span,

    /// The identity of the node.
    pub id: NodeId,
}

impl Ast {
    /// Wraps a node built by a pass rather than by the parser.
    pub fn synthetic(ast: AstNode) -> Self {
        Ast {
            ast,
            span: DUMMY_SP,
            id: NodeId::DUMMY,
        }
    }

    /// Returns the class declared by this statement, looking through `export`.
    pub fn as_class(&self) -> Option<&ClassDecl> {
        match &self.ast {
            AstNode::Class(class) => Some(class),
            AstNode::Export { decl, .. } => decl.as_class(),
            _ => None,
        }
    }

    /// Rebuilds this statement around a new class, keeping any `export` wrapper and the
    /// identity of both nodes.
    pub fn with_class(&self, class: ClassDecl) -> Ast {
        let ast = match &self.ast {
            AstNode::Export { default, decl } => AstNode::Export {
                default: *default,
                decl: Box::new(decl.with_class(class)),
            },
            _ => AstNode::Class(class),
        };

        Ast {
            ast,
            span: self.span,
            id: self.id,
        }
    }

    /// Returns true if this is `this`.
    pub fn is_this(&self) -> bool {
        matches!(self.ast, AstNode::This)
    }
}

impl Identified for Ast {
    fn id(&self) -> NodeId {
        self.id
    }
}

/// Represents the various shapes of nodes the engine understands.
#[derive(Debug, Clone)]
pub enum AstNode {
    /// A numeric value. This can be either an integer or a float.
    Number(f64),

    /// A string literal.
    Str(String),

    /// A boolean value.
    Boolean(bool),

    /// `null`.
    Null,

    /// `this`.
    This,

    /// An identifier (for variables and constants).
    Identifier(String),

    /// A template literal. `quasis` holds the raw text and always has one more entry than `exprs`.
    Template {
        /// The raw text between the substitutions.
        quasis: Vec<String>,

        /// The substitutions.
        exprs: Vec<Ast>,
    },

    /// An array literal.
    Array(Vec<Ast>),

    /// An object literal.
    Object(Vec<ObjectEntry>),

    /// A spread element (ie, `...xs`) inside an array literal or an argument list.
    Spread(Box<Ast>),

    /// A parenthesized expression.
    Paren(Box<Ast>),

    /// A prefix operator.
    Unary {
        /// The operator being applied.
        op: UnaryOp,

        /// The argument of the operator.
        value: Box<Ast>,
    },

    /// `++` or `--`.
    Update {
        /// The operator being applied.
        op: UpdateOp,

        /// Whether the operator comes before the argument.
        prefix: bool,

        /// The argument of the operator.
        value: Box<Ast>,
    },

    /// An infix or binary operator.
    Binary {
        /// The operator being applied.
        op: BinaryOp,

        /// The left hand side.
        left: Box<Ast>,

        /// The right hand side.
        right: Box<Ast>,
    },

    /// An assignment, simple or compound.
    Assign {
        /// The assignment operator.
        op: AssignOp,

        /// The place being assigned to.
        target: Box<Ast>,

        /// The expression to assign.
        value: Box<Ast>,
    },

    /// The ternary operator (ie, cond ? then : elsy)
    Ternary {
        /// The condition of the operator.
        cond: Box<Ast>,

        /// The value on true.
        then: Box<Ast>,

        /// The value on false.
        elsy: Box<Ast>,
    },

    /// A property access (ie, `a.b` or `a[b]`).
    Member {
        /// The object being accessed.
        object: Box<Ast>,

        /// The property.
        property: MemberProp,
    },

    /// A call.
    Call {
        /// The function being called.
        callee: Box<Ast>,

        /// The arguments.
        args: Vec<Ast>,
    },

    /// A `new` expression.
    New {
        /// The constructor.
        callee: Box<Ast>,

        /// The arguments.
        args: Vec<Ast>,
    },

    /// A function declaration or expression.
    Function {
        /// The name, if any.
        name: Option<String>,

        /// The parameters.
        params: Vec<Pattern>,

        /// The body. Always a [`AstNode::Block`].
        body: Box<Ast>,

        /// Whether the function is `async`.
        is_async: bool,

        /// Whether the function is a generator.
        is_generator: bool,
    },

    /// An arrow function.
    Arrow {
        /// The parameters.
        params: Vec<Pattern>,

        /// The body, either a block or an expression.
        body: Box<Ast>,

        /// Whether the function is `async`.
        is_async: bool,
    },

    /// A class declaration or expression.
    Class(ClassDecl),

    /// `await value`
    Await(Box<Ast>),

    /// `yield value` or `yield* value`.
    Yield {
        /// Whether this is `yield*`.
        delegate: bool,

        /// The yielded value, if any.
        value: Option<Box<Ast>>,
    },

    /// Comma separated expressions (ie, `a, b`).
    Seq(Vec<Ast>),

    /// A tagged template (ie, `` tag`a${b}` ``).
    TaggedTemplate {
        /// The tag.
        tag: Box<Ast>,

        /// The template. Always a [`AstNode::Template`].
        quasi: Box<Ast>,
    },

    /// One optional link of a chain (ie, `a?.b`, `a?.[b]` or `f?.()`). The wrapped node is always
    /// a [`AstNode::Member`] or a [`AstNode::Call`], and `?.` goes in front of its last access.
    OptionalChain(Box<Ast>),

    /// A TypeScript expression that only changes the static type of its operand.
    Cast {
        /// The operand.
        value: Box<Ast>,

        /// How the type is changed.
        kind: CastKind,
    },

    /// A class field (ie, `static foo: string = ""`).
    ClassProperty {
        /// The name of the field.
        name: String,

        /// Whether the field is `static`.
        is_static: bool,

        /// The declared type, if any.
        type_ann: Option<TypeExpr>,

        /// The initializer, if any.
        value: Option<Box<Ast>>,
    },

    /// A method, getter, setter or constructor of a class.
    Method {
        /// The name of the method.
        name: String,

        /// What kind of method it is.
        kind: MethodKind,

        /// Whether the method is `static`.
        is_static: bool,

        /// The parameters.
        params: Vec<Pattern>,

        /// The body. Always a [`AstNode::Block`].
        body: Box<Ast>,

        /// Whether the method is `async`.
        is_async: bool,

        /// Whether the method is a generator.
        is_generator: bool,
    },

    /// A JSX element.
    JsxElement {
        /// The tag name as written.
        name: String,

        /// The attributes.
        attrs: Vec<JsxAttr>,

        /// The children.
        children: Vec<Ast>,

        /// Whether the element was written as `<a />`.
        self_closing: bool,
    },

    /// A JSX fragment (ie, `<>...</>`).
    JsxFragment(Vec<Ast>),

    /// Raw text inside a JSX element.
    JsxText(String),

    /// An expression container inside JSX (ie, `{expr}`).
    JsxExpr(Option<Box<Ast>>),

    /// A block of statements.
    Block(Vec<Ast>),

    /// A declaration (ie, var x = 2). Every entry of `decls` is a [`AstNode::VarDeclarator`].
    Declare {
        /// `var`, `let` or `const`.
        kind: VarDeclKind,

        /// The declarators.
        decls: Vec<Ast>,
    },

    /// One entry of a declaration.
    VarDeclarator {
        /// The binding.
        name: Pattern,

        /// The init value.
        init: Option<Box<Ast>>,
    },

    /// An if statement
    If {
        /// The condition of the if statement.
        cond: Box<Ast>,

        /// The then clause of the if statement.
        then: Box<Ast>,

        /// The else clause of the if statement.
        elsy: Option<Box<Ast>>,
    },

    /// A while loop.
    While {
        /// The condition of the while loop.
        cond: Box<Ast>,

        /// The body of the while loop.
        body: Box<Ast>,
    },

    /// A do-while loop.
    DoWhile {
        /// The body of the loop.
        body: Box<Ast>,

        /// The condition of the loop.
        cond: Box<Ast>,
    },

    /// A C style for loop.
    For {
        /// The initializer.
        init: Option<Box<Ast>>,

        /// The test.
        test: Option<Box<Ast>>,

        /// The update.
        update: Option<Box<Ast>>,

        /// The body.
        body: Box<Ast>,
    },

    /// A for-in or for-of loop.
    ForEach {
        /// `true` for `for..of`, `false` for `for..in`.
        of: bool,

        /// The loop variable, either a declaration or an assignment target.
        left: Box<Ast>,

        /// The iterated expression.
        right: Box<Ast>,

        /// The body.
        body: Box<Ast>,
    },

    /// A return statement.
    Return(Option<Box<Ast>>),

    /// A throw statement.
    Throw(Box<Ast>),

    /// A try statement.
    Try {
        /// The protected block.
        block: Box<Ast>,

        /// The catch binding, if any.
        param: Option<Pattern>,

        /// The catch block, if any.
        handler: Option<Box<Ast>>,

        /// The finally block, if any.
        finalizer: Option<Box<Ast>>,
    },

    /// A switch statement.
    Switch {
        /// The value being switched on.
        discriminant: Box<Ast>,

        /// The cases, in order.
        cases: Vec<SwitchCase>,
    },

    /// `break`, with an optional label.
    Break(Option<String>),

    /// `continue`, with an optional label.
    Continue(Option<String>),

    /// An exported declaration.
    Export {
        /// Whether this is `export default`.
        default: bool,

        /// The exported declaration.
        decl: Box<Ast>,
    },

    /// An interface declaration.
    Interface {
        /// The name of the interface.
        name: String,

        /// The types it extends.
        extends: Vec<TypeExpr>,

        /// The members.
        members: Vec<TypeMember>,
    },

    /// A type alias declaration.
    TypeAlias {
        /// The name of the alias.
        name: String,

        /// The aliased type.
        ty: TypeExpr,
    },

    /// Source the engine does not look into, kept verbatim.
    Opaque(String),
}

/// One entry of an object literal.
#[derive(Debug, Clone)]
pub enum ObjectEntry {
    /// `key: value`.
    KeyValue {
        /// The key.
        key: PropKey,

        /// The value.
        value: Ast,
    },

    /// `{ name }`. The node is always an [`AstNode::Identifier`].
    Shorthand(Ast),

    /// `...value`.
    Spread(Ast),

    /// A method, getter or setter.
    Method {
        /// The key.
        key: PropKey,

        /// The method. Always a non-static [`AstNode::Method`] named after the key as written.
        method: Ast,
    },

    /// Entries kept verbatim.
    Opaque(String),
}

impl ObjectEntry {
    /// The statically known key of this entry, if any.
    pub fn key_name(&self) -> Option<&str> {
        match self {
            ObjectEntry::KeyValue { key, .. } | ObjectEntry::Method { key, .. } => key.name(),
            ObjectEntry::Shorthand(Ast {
                ast: AstNode::Identifier(name),
                ..
            }) => Some(name.as_str()),
            _ => None,
        }
    }

    /// The value of this entry, if any.
    pub fn value(&self) -> Option<&Ast> {
        match self {
            ObjectEntry::KeyValue { value, .. }
            | ObjectEntry::Shorthand(value)
            | ObjectEntry::Spread(value)
            | ObjectEntry::Method { method: value, .. } => Some(value),
            ObjectEntry::Opaque(_) => None,
        }
    }
}

/// The key of an object literal entry.
#[derive(Debug, Clone)]
pub enum PropKey {
    /// `foo: ...`
    Ident(String),

    /// `"foo": ...`
    Str(String),

    /// `1: ...`
    Num(f64),

    /// `[expr]: ...`
    Computed(Box<Ast>),
}

impl PropKey {
    /// The statically known name of the key.
    pub fn name(&self) -> Option<&str> {
        match self {
            PropKey::Ident(name) | PropKey::Str(name) => Some(name.as_str()),
            PropKey::Num(_) | PropKey::Computed(_) => None,
        }
    }
}

/// The property of a member access.
#[derive(Debug, Clone)]
pub enum MemberProp {
    /// `a.b`, also `a.#b` with the `#` kept in the name.
    Ident(String),

    /// `a[b]`
    Computed(Box<Ast>),
}

/// A JSX attribute.
#[derive(Debug, Clone)]
pub enum JsxAttr {
    /// `name` or `name=value`. The value is a [`AstNode::Str`], [`AstNode::JsxExpr`] or an element.
    Named {
        /// The attribute name.
        name: String,

        /// The value, if any.
        value: Option<Ast>,
    },

    /// `{...value}`
    Spread(Ast),
}

/// One `case` (or `default`) of a switch statement.
#[derive(Debug, Clone)]
pub struct SwitchCase {
    /// The test, `None` for `default`.
    pub test: Option<Ast>,

    /// The statements.
    pub body: Vec<Ast>,
}

/// A binding pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// `x`
    Ident(String),

    /// `{ a, b: c, ...rest }`
    Object(Vec<ObjectPatProp>),

    /// `[a, , b]`
    Array(Vec<Option<Pattern>>),

    /// `...rest`
    Rest(Box<Pattern>),

    /// `x = default`
    Assign {
        /// The binding.
        left: Box<Pattern>,

        /// The default value.
        right: Box<Ast>,
    },

    /// Patterns the engine does not look into, kept verbatim.
    Opaque(String),
}

impl Pattern {
    /// Every default value in the pattern, in source order.
    pub fn defaults(&self) -> Vec<&Ast> {
        let mut out = Vec::new();
        self.collect_defaults(&mut out);
        out
    }

    /// Every default value in the pattern, in source order, mutably.
    pub fn defaults_mut(&mut self) -> Vec<&mut Ast> {
        let mut out = Vec::new();
        self.collect_defaults_mut(&mut out);
        out
    }

    fn collect_defaults<'a>(&'a self, out: &mut Vec<&'a Ast>) {
        match self {
            Pattern::Ident(_) | Pattern::Opaque(_) => (),
            Pattern::Object(props) => {
                for prop in props {
                    match prop {
                        ObjectPatProp::KeyValue { value, .. } => value.collect_defaults(out),
                        ObjectPatProp::Shorthand { default, .. } => out.extend(default),
                        ObjectPatProp::Rest(rest) => rest.collect_defaults(out),
                    }
                }
            }
            Pattern::Array(elems) => {
                for elem in elems.iter().flatten() {
                    elem.collect_defaults(out);
                }
            }
            Pattern::Rest(rest) => rest.collect_defaults(out),
            Pattern::Assign { left, right } => {
                left.collect_defaults(out);
                out.push(&**right);
            }
        }
    }

    fn collect_defaults_mut<'a>(&'a mut self, out: &mut Vec<&'a mut Ast>) {
        match self {
            Pattern::Ident(_) | Pattern::Opaque(_) => (),
            Pattern::Object(props) => {
                for prop in props {
                    match prop {
                        ObjectPatProp::KeyValue { value, .. } => value.collect_defaults_mut(out),
                        ObjectPatProp::Shorthand { default, .. } => out.extend(default.as_mut()),
                        ObjectPatProp::Rest(rest) => rest.collect_defaults_mut(out),
                    }
                }
            }
            Pattern::Array(elems) => {
                for elem in elems.iter_mut().flatten() {
                    elem.collect_defaults_mut(out);
                }
            }
            Pattern::Rest(rest) => rest.collect_defaults_mut(out),
            Pattern::Assign { left, right } => {
                left.collect_defaults_mut(out);
                out.push(&mut **right);
            }
        }
    }
}

/// One entry of an object pattern.
#[derive(Debug, Clone)]
pub enum ObjectPatProp {
    /// `key: binding`
    KeyValue {
        /// The property read.
        key: String,

        /// Where it is bound.
        value: Pattern,
    },

    /// `name` or `name = default`
    Shorthand {
        /// The property read, which is also the bound name.
        name: String,

        /// The default value.
        default: Option<Ast>,
    },

    /// `...rest`
    Rest(Pattern),
}

impl ObjectPatProp {
    /// The name of the property this entry reads, if it reads one.
    pub fn key(&self) -> Option<&str> {
        match self {
            ObjectPatProp::KeyValue { key, .. } => Some(key.as_str()),
            ObjectPatProp::Shorthand { name, .. } => Some(name.as_str()),
            ObjectPatProp::Rest(_) => None,
        }
    }
}

/// What kind of class method this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// `constructor(...) {}`
    Constructor,

    /// `foo() {}`
    Method,

    /// `get foo() {}`
    Getter,

    /// `set foo(v) {}`
    Setter,
}

/// A class declaration or expression.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    /// The name of the class, if any.
    pub name: Option<String>,

    /// The `extends` and `implements` clauses, in source order.
    pub heritage: Vec<HeritageClause>,

    /// The members. Every entry is a [`AstNode::ClassProperty`], a [`AstNode::Method`] or an
    /// [`AstNode::Opaque`].
    pub members: Vec<Ast>,
}

impl ClassDecl {
    /// Names of every declared member, static or not.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().filter_map(|member| match &member.ast {
            AstNode::ClassProperty { name, .. } => Some(name.as_str()),
            AstNode::Method { name, kind, .. } if *kind != MethodKind::Constructor => {
                Some(name.as_str())
            }
            _ => None,
        })
    }
}

/// How a [`AstNode::Cast`] changes the type of its operand.
#[derive(Debug, Clone)]
pub enum CastKind {
    /// `value as T`
    As(TypeExpr),

    /// `value satisfies T`
    Satisfies(TypeExpr),

    /// `<T>value`
    Angle(TypeExpr),

    /// `value!`
    NonNull,

    /// `value as const`
    Const,
}

/// A heritage clause of a class.
#[derive(Debug, Clone)]
pub struct HeritageClause {
    /// `extends` or `implements`.
    pub token: HeritageToken,

    /// The base types.
    pub types: Vec<ExprWithTypeArgs>,
}

/// The keyword of a heritage clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeritageToken {
    /// `extends`
    Extends,

    /// `implements`
    Implements,
}

/// A base type reference, ie `React.Component<P, S>`.
#[derive(Debug, Clone)]
pub struct ExprWithTypeArgs {
    /// The referenced expression.
    pub expr: Ast,

    /// The type arguments.
    pub type_args: Vec<TypeExpr>,
}

/// A declared type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// `any`
    Any,

    /// `number`
    Number,

    /// `string`
    String,

    /// `boolean`
    Boolean,

    /// `symbol`
    Symbol,

    /// `object`
    Object,

    /// `null`
    Null,

    /// `undefined`
    Undefined,

    /// `void`
    Void,

    /// A named type with optional arguments, ie `Record<string, any>`.
    Ref {
        /// The (possibly qualified) name.
        name: String,

        /// The type arguments.
        args: Vec<TypeExpr>,
    },

    /// `T[]`
    Array(Box<TypeExpr>),

    /// `{ a: T; b?: U }`
    Literal(Vec<TypeMember>),

    /// `A | B`
    Union(Vec<TypeExpr>),

    /// `"foo"`
    StringLiteral(String),

    /// `1`
    NumberLiteral(f64),

    /// `true`
    BooleanLiteral(bool),

    /// A type written in the source, kept verbatim.
    Raw(String),
}

impl TypeExpr {
    /// A reference to a named type without arguments.
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Ref {
            name: name.into(),
            args: Vec::new(),
        }
    }
}

/// A member of an interface or type literal.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMember {
    /// The member name.
    pub name: String,

    /// Whether the member is optional.
    pub optional: bool,

    /// The member type.
    pub ty: TypeExpr,
}

impl AstNode {
    /// Every child node, in source order.
    pub fn children(&self) -> Vec<&Ast> {
        let mut out = Vec::new();
        match self {
            AstNode::Number(_)
            | AstNode::Str(_)
            | AstNode::Boolean(_)
            | AstNode::Null
            | AstNode::This
            | AstNode::Identifier(_)
            | AstNode::JsxText(_)
            | AstNode::Break(_)
            | AstNode::Continue(_)
            | AstNode::Interface { .. }
            | AstNode::TypeAlias { .. }
            | AstNode::Opaque(_) => (),

            AstNode::Template { exprs, .. } => out.extend(exprs),
            AstNode::Array(elems) => out.extend(elems),
            AstNode::Object(entries) => {
                for entry in entries {
                    if let ObjectEntry::KeyValue {
                        key: PropKey::Computed(key),
                        ..
                    }
                    | ObjectEntry::Method {
                        key: PropKey::Computed(key),
                        ..
                    } = entry
                    {
                        out.push(&**key);
                    }
                    out.extend(entry.value());
                }
            }
            AstNode::Spread(value)
            | AstNode::Paren(value)
            | AstNode::Unary { value, .. }
            | AstNode::Update { value, .. }
            | AstNode::Throw(value)
            | AstNode::Await(value)
            | AstNode::OptionalChain(value)
            | AstNode::Cast { value, .. } => out.push(&**value),
            AstNode::Yield { value, .. } => out.extend(value.as_deref()),
            AstNode::Seq(exprs) => out.extend(exprs),
            AstNode::TaggedTemplate { tag, quasi } => {
                out.push(&**tag);
                out.push(&**quasi);
            }
            AstNode::Binary { left, right, .. } => {
                out.push(&**left);
                out.push(&**right);
            }
            AstNode::Assign { target, value, .. } => {
                out.push(&**target);
                out.push(&**value);
            }
            AstNode::Ternary { cond, then, elsy } => {
                out.push(&**cond);
                out.push(&**then);
                out.push(&**elsy);
            }
            AstNode::Member { object, property } => {
                out.push(&**object);
                if let MemberProp::Computed(index) = property {
                    out.push(&**index);
                }
            }
            AstNode::Call { callee, args } | AstNode::New { callee, args } => {
                out.push(&**callee);
                out.extend(args);
            }
            AstNode::Function { params, body, .. }
            | AstNode::Arrow { params, body, .. }
            | AstNode::Method { params, body, .. } => {
                out.extend(params.iter().flat_map(Pattern::defaults));
                out.push(&**body);
            }
            AstNode::Class(class) => out.extend(&class.members),
            AstNode::ClassProperty { value, .. } => out.extend(value.as_deref()),
            AstNode::JsxElement {
                attrs, children, ..
            } => {
                for attr in attrs {
                    match attr {
                        JsxAttr::Named { value, .. } => out.extend(value),
                        JsxAttr::Spread(value) => out.push(value),
                    }
                }
                out.extend(children);
            }
            AstNode::JsxFragment(children) | AstNode::Block(children) => out.extend(children),
            AstNode::JsxExpr(expr) | AstNode::Return(expr) => out.extend(expr.as_deref()),
            AstNode::Declare { decls, .. } => out.extend(decls),
            AstNode::VarDeclarator { name, init } => {
                out.extend(name.defaults());
                out.extend(init.as_deref());
            }
            AstNode::If { cond, then, elsy } => {
                out.push(&**cond);
                out.push(&**then);
                out.extend(elsy.as_deref());
            }
            AstNode::While { cond, body } => {
                out.push(&**cond);
                out.push(&**body);
            }
            AstNode::DoWhile { body, cond } => {
                out.push(&**body);
                out.push(&**cond);
            }
            AstNode::For {
                init,
                test,
                update,
                body,
            } => {
                out.extend(init.as_deref());
                out.extend(test.as_deref());
                out.extend(update.as_deref());
                out.push(&**body);
            }
            AstNode::ForEach {
                left, right, body, ..
            } => {
                out.push(&**left);
                out.push(&**right);
                out.push(&**body);
            }
            AstNode::Try {
                block,
                param,
                handler,
                finalizer,
            } => {
                out.push(&**block);
                out.extend(param.iter().flat_map(Pattern::defaults));
                out.extend(handler.as_deref());
                out.extend(finalizer.as_deref());
            }
            AstNode::Switch {
                discriminant,
                cases,
            } => {
                out.push(&**discriminant);
                for case in cases {
                    out.extend(&case.test);
                    out.extend(&case.body);
                }
            }
            AstNode::Export { decl, .. } => out.push(&**decl),
        }
        out
    }

    /// Every child node, in source order, mutably. Visits the same slots as [`AstNode::children`].
    pub fn children_mut(&mut self) -> Vec<&mut Ast> {
        let mut out = Vec::new();
        match self {
            AstNode::Number(_)
            | AstNode::Str(_)
            | AstNode::Boolean(_)
            | AstNode::Null
            | AstNode::This
            | AstNode::Identifier(_)
            | AstNode::JsxText(_)
            | AstNode::Break(_)
            | AstNode::Continue(_)
            | AstNode::Interface { .. }
            | AstNode::TypeAlias { .. }
            | AstNode::Opaque(_) => (),

            AstNode::Template { exprs, .. } => out.extend(exprs),
            AstNode::Array(elems) => out.extend(elems),
            AstNode::Object(entries) => {
                for entry in entries {
                    match entry {
                        ObjectEntry::KeyValue { key, value } => {
                            if let PropKey::Computed(key) = key {
                                out.push(&mut **key);
                            }
                            out.push(value);
                        }
                        ObjectEntry::Method { key, method } => {
                            if let PropKey::Computed(key) = key {
                                out.push(&mut **key);
                            }
                            out.push(method);
                        }
                        ObjectEntry::Shorthand(value) | ObjectEntry::Spread(value) => {
                            out.push(value)
                        }
                        ObjectEntry::Opaque(_) => (),
                    }
                }
            }
            AstNode::Spread(value)
            | AstNode::Paren(value)
            | AstNode::Unary { value, .. }
            | AstNode::Update { value, .. }
            | AstNode::Throw(value)
            | AstNode::Await(value)
            | AstNode::OptionalChain(value)
            | AstNode::Cast { value, .. } => out.push(&mut **value),
            AstNode::Yield { value, .. } => out.extend(value.as_deref_mut()),
            AstNode::Seq(exprs) => out.extend(exprs),
            AstNode::TaggedTemplate { tag, quasi } => {
                out.push(&mut **tag);
                out.push(&mut **quasi);
            }
            AstNode::Binary { left, right, .. } => {
                out.push(&mut **left);
                out.push(&mut **right);
            }
            AstNode::Assign { target, value, .. } => {
                out.push(&mut **target);
                out.push(&mut **value);
            }
            AstNode::Ternary { cond, then, elsy } => {
                out.push(&mut **cond);
                out.push(&mut **then);
                out.push(&mut **elsy);
            }
            AstNode::Member { object, property } => {
                out.push(&mut **object);
                if let MemberProp::Computed(index) = property {
                    out.push(&mut **index);
                }
            }
            AstNode::Call { callee, args } | AstNode::New { callee, args } => {
                out.push(&mut **callee);
                out.extend(args);
            }
            AstNode::Function { params, body, .. }
            | AstNode::Arrow { params, body, .. }
            | AstNode::Method { params, body, .. } => {
                out.extend(params.iter_mut().flat_map(Pattern::defaults_mut));
                out.push(&mut **body);
            }
            AstNode::Class(class) => out.extend(&mut class.members),
            AstNode::ClassProperty { value, .. } => out.extend(value.as_deref_mut()),
            AstNode::JsxElement {
                attrs, children, ..
            } => {
                for attr in attrs {
                    match attr {
                        JsxAttr::Named { value, .. } => out.extend(value),
                        JsxAttr::Spread(value) => out.push(value),
                    }
                }
                out.extend(children);
            }
            AstNode::JsxFragment(children) | AstNode::Block(children) => out.extend(children),
            AstNode::JsxExpr(expr) | AstNode::Return(expr) => out.extend(expr.as_deref_mut()),
            AstNode::Declare { decls, .. } => out.extend(decls),
            AstNode::VarDeclarator { name, init } => {
                out.extend(name.defaults_mut());
                out.extend(init.as_deref_mut());
            }
            AstNode::If { cond, then, elsy } => {
                out.push(&mut **cond);
                out.push(&mut **then);
                out.extend(elsy.as_deref_mut());
            }
            AstNode::While { cond, body } => {
                out.push(&mut **cond);
                out.push(&mut **body);
            }
            AstNode::DoWhile { body, cond } => {
                out.push(&mut **body);
                out.push(&mut **cond);
            }
            AstNode::For {
                init,
                test,
                update,
                body,
            } => {
                out.extend(init.as_deref_mut());
                out.extend(test.as_deref_mut());
                out.extend(update.as_deref_mut());
                out.push(&mut **body);
            }
            AstNode::ForEach {
                left, right, body, ..
            } => {
                out.push(&mut **left);
                out.push(&mut **right);
                out.push(&mut **body);
            }
            AstNode::Try {
                block,
                param,
                handler,
                finalizer,
            } => {
                out.push(&mut **block);
                out.extend(param.iter_mut().flat_map(Pattern::defaults_mut));
                out.extend(handler.as_deref_mut());
                out.extend(finalizer.as_deref_mut());
            }
            AstNode::Switch {
                discriminant,
                cases,
            } => {
                out.push(&mut **discriminant);
                for case in cases {
                    out.extend(&mut case.test);
                    out.extend(&mut case.body);
                }
            }
            AstNode::Export { decl, .. } => out.push(&mut **decl),
        }
        out
    }
}
