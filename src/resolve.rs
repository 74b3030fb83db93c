use std::fmt::Display;

use swc_ecma_ast::{BinaryOp, UnaryOp};

use crate::ast::{Ast, AstNode, CastKind, ObjectEntry, TypeExpr, TypeMember};
use crate::error::ResolveError;
use crate::print::quote;

/// A resolved type, as computed by a [`TypeResolver`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TypeDescriptor {
    /// Nothing is known about the value.
    #[default]
    Any,

    /// `undefined`
    Undefined,

    /// `null`
    Null,

    /// `number`
    Number,

    /// `string`
    String,

    /// `boolean`
    Boolean,

    /// A number literal type, ie `1`.
    NumberLiteral(f64),

    /// A string literal type, ie `"foo"`.
    StringLiteral(String),

    /// `true` or `false`.
    BooleanLiteral(bool),

    /// `T[]`
    Array(Box<TypeDescriptor>),

    /// An object type with its members, in declaration order.
    Object(Vec<(String, TypeDescriptor)>),

    /// A nominal type known only by name, ie `Date` or `ReactNode`.
    Named(String),

    /// Any callable.
    Function,

    /// `A | B`
    Union(Vec<TypeDescriptor>),
}

impl TypeDescriptor {
    /// Widens literal types to their primitive, the way a mutable location would be typed.
    pub fn widen(&self) -> TypeDescriptor {
        match self {
            TypeDescriptor::NumberLiteral(_) => TypeDescriptor::Number,
            TypeDescriptor::StringLiteral(_) => TypeDescriptor::String,
            TypeDescriptor::BooleanLiteral(_) => TypeDescriptor::Boolean,
            TypeDescriptor::Array(elem) => TypeDescriptor::Array(Box::new(elem.widen())),
            TypeDescriptor::Object(fields) => TypeDescriptor::Object(
                fields
                    .iter()
                    .map(|(name, ty)| (name.clone(), ty.widen()))
                    .collect(),
            ),
            TypeDescriptor::Union(types) => union(types.iter().map(TypeDescriptor::widen)),
            other => other.clone(),
        }
    }

    /// Converts the descriptor into a declarable type expression.
    pub fn to_type_expr(&self) -> TypeExpr {
        match self {
            TypeDescriptor::Any => TypeExpr::Any,
            TypeDescriptor::Undefined => TypeExpr::Undefined,
            TypeDescriptor::Null => TypeExpr::Null,
            TypeDescriptor::Number => TypeExpr::Number,
            TypeDescriptor::String => TypeExpr::String,
            TypeDescriptor::Boolean => TypeExpr::Boolean,
            TypeDescriptor::NumberLiteral(n) => TypeExpr::NumberLiteral(*n),
            TypeDescriptor::StringLiteral(s) => TypeExpr::StringLiteral(s.clone()),
            TypeDescriptor::BooleanLiteral(b) => TypeExpr::BooleanLiteral(*b),
            TypeDescriptor::Array(elem) => TypeExpr::Array(Box::new(elem.to_type_expr())),
            TypeDescriptor::Object(fields) => TypeExpr::Literal(
                fields
                    .iter()
                    .map(|(name, ty)| TypeMember {
                        name: name.clone(),
                        optional: false,
                        ty: ty.to_type_expr(),
                    })
                    .collect(),
            ),
            TypeDescriptor::Named(name) => TypeExpr::named(name.clone()),
            TypeDescriptor::Function => TypeExpr::named("Function"),
            TypeDescriptor::Union(types) => {
                TypeExpr::Union(types.iter().map(TypeDescriptor::to_type_expr).collect())
            }
        }
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeDescriptor::Any => write!(f, "any"),
            TypeDescriptor::Undefined => write!(f, "undefined"),
            TypeDescriptor::Null => write!(f, "null"),
            TypeDescriptor::Number => write!(f, "number"),
            TypeDescriptor::String => write!(f, "string"),
            TypeDescriptor::Boolean => write!(f, "boolean"),
            TypeDescriptor::NumberLiteral(n) => write!(f, "{}", n),
            TypeDescriptor::StringLiteral(s) => write!(f, "{}", quote(s)),
            TypeDescriptor::BooleanLiteral(b) => write!(f, "{}", b),
            TypeDescriptor::Array(elem) => match **elem {
                TypeDescriptor::Union(_) => write!(f, "({})[]", elem),
                _ => write!(f, "{}[]", elem),
            },
            TypeDescriptor::Object(fields) if fields.is_empty() => write!(f, "{{}}"),
            TypeDescriptor::Object(fields) => {
                write!(f, "{{ ")?;
                for (name, ty) in fields {
                    write!(f, "{}: {}; ", name, ty)?;
                }
                write!(f, "}}")
            }
            TypeDescriptor::Named(name) => write!(f, "{}", name),
            TypeDescriptor::Function => write!(f, "Function"),
            TypeDescriptor::Union(types) => {
                let mut first = true;
                for ty in types {
                    if first {
                        first = false;
                    } else {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", ty)?;
                }
                Ok(())
            }
        }
    }
}

/// Builds the union of `types`, dropping duplicates. A single type stays as is and no types at all
/// is `any`.
pub fn union(types: impl IntoIterator<Item = TypeDescriptor>) -> TypeDescriptor {
    let mut members: Vec<TypeDescriptor> = Vec::new();
    for ty in types {
        let flattened = match ty {
            TypeDescriptor::Union(inner) => inner,
            other => vec![other],
        };
        for ty in flattened {
            if !members.contains(&ty) {
                members.push(ty);
            }
        }
    }

    match members.len() {
        0 => TypeDescriptor::Any,
        1 => members.remove(0),
        _ => TypeDescriptor::Union(members),
    }
}

/// The place whose type is asked for.
#[derive(Debug, Clone, Copy)]
pub enum TypeSite<'a> {
    /// The value of an expression.
    Node(&'a Ast),

    /// A name bound by a destructuring declarator, ie `b` in `const { b } = this.state`.
    Binding {
        /// The [`AstNode::VarDeclarator`] doing the binding.
        declarator: &'a Ast,

        /// The bound property.
        name: &'a str,
    },
}

/// The type-resolution capability the passes are given.
///
/// The passes never inspect types on their own: everything they know about a value comes from
/// [`TypeResolver::type_at`] and one of the two renderings.
pub trait TypeResolver {
    /// Computes the type at `site`.
    fn type_at(&self, site: TypeSite<'_>) -> Result<TypeDescriptor, ResolveError>;

    /// Renders a type as text.
    fn type_to_string(&self, ty: &TypeDescriptor) -> String {
        ty.to_string()
    }

    /// Renders a type as a declarable type expression.
    fn type_to_type_expr(&self, ty: &TypeDescriptor) -> TypeExpr {
        ty.to_type_expr()
    }
}

/// A resolver that only looks at the expression itself.
///
/// Literals get literal types, object and array literals get their widened member types, and a
/// handful of well known calls and constructors are recognized. Everything else, including every
/// destructured binding, is `any`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalResolver;

impl TypeResolver for LocalResolver {
    fn type_at(&self, site: TypeSite<'_>) -> Result<TypeDescriptor, ResolveError> {
        Ok(match site {
            TypeSite::Node(node) => type_of(node),
            TypeSite::Binding { .. } => TypeDescriptor::Any,
        })
    }
}

fn type_of(node: &Ast) -> TypeDescriptor {
    match &node.ast {
        AstNode::Number(n) => TypeDescriptor::NumberLiteral(*n),
        AstNode::Str(s) => TypeDescriptor::StringLiteral(s.clone()),
        AstNode::Boolean(b) => TypeDescriptor::BooleanLiteral(*b),
        AstNode::Null => TypeDescriptor::Null,
        AstNode::Template { .. } => TypeDescriptor::String,

        AstNode::Identifier(name) => match name.as_str() {
            "undefined" => TypeDescriptor::Undefined,
            "NaN" | "Infinity" => TypeDescriptor::Number,
            _ => TypeDescriptor::Any,
        },

        AstNode::Array(elems) if elems.is_empty() => {
            TypeDescriptor::Array(Box::new(TypeDescriptor::Undefined))
        }
        AstNode::Array(elems) => TypeDescriptor::Array(Box::new(union(elems.iter().map(
            |elem| match &elem.ast {
                AstNode::Spread(_) => TypeDescriptor::Any,
                _ => type_of(elem).widen(),
            },
        )))),

        AstNode::Object(entries) => TypeDescriptor::Object(
            entries
                .iter()
                .filter_map(|entry| match entry {
                    ObjectEntry::KeyValue { value, .. }
                    | ObjectEntry::Shorthand(value)
                    | ObjectEntry::Method { method: value, .. } => {
                        Some((entry.key_name()?.to_string(), type_of(value).widen()))
                    }
                    _ => None,
                })
                .collect(),
        ),

        AstNode::Paren(inner) => type_of(inner),
        AstNode::Seq(exprs) => exprs.last().map(type_of).unwrap_or_default(),
        AstNode::Cast { value, kind } => match kind {
            CastKind::NonNull | CastKind::Satisfies(_) | CastKind::Const => type_of(value),
            CastKind::As(_) | CastKind::Angle(_) => TypeDescriptor::Any,
        },
        AstNode::Assign { value, .. } => type_of(value),

        AstNode::Unary { op, .. } => match op {
            UnaryOp::Bang | UnaryOp::Delete => TypeDescriptor::Boolean,
            UnaryOp::TypeOf => TypeDescriptor::String,
            UnaryOp::Void => TypeDescriptor::Undefined,
            _ => TypeDescriptor::Number,
        },
        AstNode::Update { .. } => TypeDescriptor::Number,

        AstNode::Binary { op, left, right } => match op {
            BinaryOp::Add => {
                let (left, right) = (type_of(left).widen(), type_of(right).widen());
                if left == TypeDescriptor::String || right == TypeDescriptor::String {
                    TypeDescriptor::String
                } else if left == TypeDescriptor::Number && right == TypeDescriptor::Number {
                    TypeDescriptor::Number
                } else {
                    TypeDescriptor::Any
                }
            }
            BinaryOp::EqEq
            | BinaryOp::NotEq
            | BinaryOp::EqEqEq
            | BinaryOp::NotEqEq
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq
            | BinaryOp::In
            | BinaryOp::InstanceOf => TypeDescriptor::Boolean,
            BinaryOp::LogicalAnd | BinaryOp::LogicalOr | BinaryOp::NullishCoalescing => {
                union([type_of(left).widen(), type_of(right).widen()])
            }
            _ => TypeDescriptor::Number,
        },

        AstNode::Ternary { then, elsy, .. } => union([type_of(then).widen(), type_of(elsy).widen()]),

        AstNode::Call { callee, .. } => match &callee.ast {
            AstNode::Identifier(name) => match name.as_str() {
                "setTimeout" | "setInterval" => TypeDescriptor::Named("Timer".to_string()),
                "String" => TypeDescriptor::String,
                "Number" | "parseInt" | "parseFloat" => TypeDescriptor::Number,
                "Boolean" | "isNaN" => TypeDescriptor::Boolean,
                _ => TypeDescriptor::Any,
            },
            _ => TypeDescriptor::Any,
        },

        AstNode::New { callee, .. } => match &callee.ast {
            AstNode::Identifier(name) if name == "Array" => {
                TypeDescriptor::Array(Box::new(TypeDescriptor::Any))
            }
            AstNode::Identifier(name) => TypeDescriptor::Named(name.clone()),
            _ => TypeDescriptor::Any,
        },

        AstNode::Function { .. } | AstNode::Arrow { .. } | AstNode::Method { .. } => {
            TypeDescriptor::Function
        }

        AstNode::JsxElement { .. } | AstNode::JsxFragment(_) => {
            TypeDescriptor::Named("JSX.Element".to_string())
        }

        _ => TypeDescriptor::Any,
    }
}
