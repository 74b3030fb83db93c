use crate::ast::{Ast, AstNode, TypeExpr, TypeMember};
use crate::extract::{FieldSet, InferredField};
use crate::options::Options;

/// A synthesized top level type declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDeclaration {
    /// `interface <name> extends <extends> { <members> }`
    Interface {
        /// The declared name.
        name: String,

        /// The extended types.
        extends: Vec<TypeExpr>,

        /// The members, sorted by name.
        members: Vec<TypeMember>,
    },

    /// `type <name> = <ty>;`
    Alias {
        /// The declared name.
        name: String,

        /// The aliased type.
        ty: TypeExpr,
    },
}

impl TypeDeclaration {
    /// The declared name.
    pub fn name(&self) -> &str {
        match self {
            TypeDeclaration::Interface { name, .. } | TypeDeclaration::Alias { name, .. } => name,
        }
    }

    /// A reference to the declared type.
    pub fn reference(&self) -> TypeExpr {
        TypeExpr::named(self.name())
    }

    /// The statement declaring the type.
    pub fn into_ast(self) -> Ast {
        Ast::synthetic(match self {
            TypeDeclaration::Interface {
                name,
                extends,
                members,
            } => AstNode::Interface {
                name,
                extends,
                members,
            },
            TypeDeclaration::Alias { name, ty } => AstNode::TypeAlias { name, ty },
        })
    }
}

fn member_of(field: InferredField) -> TypeMember {
    TypeMember {
        name: field.name,
        optional: field.optional,
        ty: field.ty,
    }
}

/// Accumulates the props of one component. Declared hints win over inferred props.
#[derive(Debug, Clone, Default)]
pub struct PropsBuilder {
    members: Vec<TypeMember>,
}

impl PropsBuilder {
    /// Starts from the members declared by dynamic prop type checks.
    pub fn new(hints: Vec<TypeMember>) -> Self {
        let mut builder = PropsBuilder::default();
        for hint in hints {
            builder.add(hint);
        }
        builder
    }

    fn add(&mut self, member: TypeMember) {
        if !self.members.iter().any(|m| m.name == member.name) {
            self.members.push(member);
        }
    }

    /// Adds the inferred props whose names are not declared yet.
    pub fn merge(mut self, fields: FieldSet) -> Self {
        for field in fields {
            self.add(member_of(field));
        }
        self
    }

    /// Builds `interface I<class>Props`, or nothing when there are no props.
    pub fn build(mut self, class_name: &str, options: &Options) -> Option<TypeDeclaration> {
        if self.members.is_empty() {
            return None;
        }

        self.members.sort_by(|a, b| a.name.cmp(&b.name));
        Some(TypeDeclaration::Interface {
            name: format!("I{}Props", class_name),
            extends: vec![options.props_base_type.clone()],
            members: self.members,
        })
    }
}

/// Accumulates the state of one component. The first type seen for a name wins.
#[derive(Debug, Clone, Default)]
pub struct StateBuilder {
    fields: Vec<InferredField>,
}

impl StateBuilder {
    /// Adds the fields whose names are not known yet.
    pub fn merge(mut self, fields: FieldSet) -> Self {
        for field in fields {
            if !self.fields.iter().any(|f| f.name == field.name) {
                self.fields.push(field);
            }
        }
        self
    }

    /// Builds `type <class>State = {...}`, or nothing when there is no state.
    pub fn build(mut self, class_name: &str) -> Option<TypeDeclaration> {
        if self.fields.is_empty() {
            return None;
        }

        self.fields.sort_by(|a, b| a.name.cmp(&b.name));
        Some(TypeDeclaration::Alias {
            name: format!("{}State", class_name),
            ty: TypeExpr::Literal(self.fields.into_iter().map(member_of).collect()),
        })
    }
}

/// Builds one class property declaration per instance field, sorted by name.
pub fn field_declarations(fields: FieldSet) -> Vec<Ast> {
    fields
        .into_iter()
        .map(|field| {
            Ast::synthetic(AstNode::ClassProperty {
                name: field.name,
                is_static: false,
                type_ann: Some(field.ty),
                value: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::FieldUsageSite;

    fn field_set(fields: &[(&str, TypeExpr)]) -> FieldSet {
        let mut set = FieldSet::default();
        for (name, ty) in fields {
            set.record(
                FieldUsageSite {
                    field_name: name.to_string(),
                    source: format!("this.{}", name),
                    ty: ty.clone(),
                },
                true,
            );
        }
        set
    }

    #[test]
    fn hints_win_over_inference() {
        let hints = vec![TypeMember {
            name: "foo".to_string(),
            optional: false,
            ty: TypeExpr::String,
        }];
        let props = PropsBuilder::new(hints)
            .merge(field_set(&[("foo", TypeExpr::Any), ("bar", TypeExpr::Any)]))
            .build("A", &Options::default())
            .expect("props");
        assert_eq!(
            props.into_ast().to_string(),
            "interface IAProps extends React.HTMLAttributes<Element> {\n  bar?: any;\n  foo: string;\n}"
        );
    }

    #[test]
    fn empty_declarations_are_not_built() {
        assert!(PropsBuilder::new(vec![]).build("A", &Options::default()).is_none());
        assert!(StateBuilder::default().merge(FieldSet::default()).build("A").is_none());
    }

    #[test]
    fn state_alias() {
        let state = StateBuilder::default()
            .merge(field_set(&[("foo", TypeExpr::Number), ("bar", TypeExpr::String)]))
            .merge(field_set(&[("foo", TypeExpr::String)]))
            .build("A")
            .expect("state");
        assert_eq!(state.name(), "AState");
        assert_eq!(state.reference(), TypeExpr::named("AState"));
        assert_eq!(
            state.into_ast().to_string(),
            "type AState = {\n  bar?: string;\n  foo?: number;\n};"
        );
    }

    #[test]
    fn instance_field_declarations() {
        let mut set = FieldSet::default();
        for (name, ty) in [("name", TypeExpr::String), ("count", TypeExpr::Number)] {
            set.record(
                FieldUsageSite {
                    field_name: name.to_string(),
                    source: String::new(),
                    ty,
                },
                false,
            );
        }
        let printed: Vec<_> = field_declarations(set).iter().map(|ast| ast.to_string()).collect();
        assert_eq!(printed, ["count: number;", "name: string;"]);
    }
}
