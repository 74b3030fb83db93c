//! Field-usage extraction.
//!
//! Each extractor scans the members of one class and records, per field name, the first usage site
//! it recognizes. The three concerns (state, props and instance fields) are extracted independently
//! of each other.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;
use swc_ecma_ast::AssignOp;

use crate::ast::{Ast, AstNode, ClassDecl, MemberProp, ObjectEntry, Pattern, TypeExpr, TypeMember};
use crate::error::{MigrateError, MigrateResult};
use crate::options::Options;
use crate::prop_types::prop_type_hints;
use crate::resolve::{TypeResolver, TypeSite};
use crate::splice::single_base;
use crate::synthesize::synthesize;
use crate::walk::filter_pruned;

/// What is known about a class before any of its fields are extracted.
#[derive(Debug, Clone)]
pub struct ComponentClassContext {
    /// The class name, empty for anonymous classes.
    pub class_name: String,

    /// Whether the class extends a component base type.
    pub is_component: bool,

    /// Names of the members the class already declares.
    pub existing_member_names: BTreeSet<String>,

    /// Props declared by dynamic prop type checks. Always empty for non-component classes.
    pub hints: Vec<TypeMember>,
}

impl ComponentClassContext {
    /// Classifies `class`.
    pub fn new(class: &ClassDecl, options: &Options) -> Self {
        let is_component = is_component_class(class, options);
        let hints = if is_component {
            prop_type_hints(class, options)
        } else {
            Vec::new()
        };

        ComponentClassContext {
            class_name: class.name.clone().unwrap_or_default(),
            is_component,
            existing_member_names: class.member_names().map(str::to_string).collect(),
            hints,
        }
    }
}

/// Whether `class` has a single `extends` clause whose base type names a component marker.
pub fn is_component_class(class: &ClassDecl, options: &Options) -> bool {
    match single_base(class) {
        Ok(base) => {
            let base = base.expr.to_string();
            options
                .component_markers
                .iter()
                .any(|marker| base.contains(marker.as_str()))
        }
        Err(reason) => {
            tracing::trace!(class = ?class.name, %reason, "not a component class");
            false
        }
    }
}

/// One recognized usage of a field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUsageSite {
    /// The normalized field name.
    pub field_name: String,

    /// The usage expression as written.
    pub source: String,

    /// The type inferred at this site.
    pub ty: TypeExpr,
}

/// A field to declare.
#[derive(Debug, Clone, PartialEq)]
pub struct InferredField {
    /// The field name.
    pub name: String,

    /// The declared type.
    pub ty: TypeExpr,

    /// Whether the field is declared optional.
    pub optional: bool,
}

/// The fields extracted for one concern, keyed and ordered by name.
///
/// A name is recorded the first time it is seen; later sightings never change its type.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: BTreeMap<String, InferredField>,
}

impl FieldSet {
    /// Records `site`, unless its field was already recorded.
    pub fn record(&mut self, site: FieldUsageSite, optional: bool) {
        tracing::trace!(field = %site.field_name, source = %site.source, ty = %site.ty, "usage site");

        match self.fields.entry(site.field_name) {
            Entry::Vacant(entry) => {
                let name = entry.key().clone();
                entry.insert(InferredField {
                    name,
                    ty: site.ty,
                    optional,
                });
            }
            Entry::Occupied(entry) => {
                if entry.get().ty != site.ty {
                    tracing::debug!(
                        field = %entry.key(),
                        kept = %entry.get().ty,
                        dropped = %site.ty,
                        "conflicting field type discarded"
                    );
                }
            }
        }
    }

    /// Whether `name` was recorded.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The number of recorded fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The recorded fields, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &InferredField> {
        self.fields.values()
    }
}

impl IntoIterator for FieldSet {
    type Item = InferredField;
    type IntoIter = std::collections::btree_map::IntoValues<String, InferredField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_values()
    }
}

static CALL_ARGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\w*\)").unwrap());
static INDEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.+\]").unwrap());
static QUALIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^this\.").unwrap());
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{Alphabetic}_$][\w$]*").unwrap());

/// Reduces a usage expression such as `this.items[0]` or `this.load().then` to its field name.
pub fn normalize_field_name(text: &str) -> MigrateResult<String> {
    let stripped = CALL_ARGS.replace(text, "");
    let stripped = INDEX.replace(&stripped, "");
    let stripped = QUALIFIER.replace(&stripped, "");

    IDENTIFIER.find(&stripped)
        .map(|word| word.as_str().to_string())
        .ok_or_else(|| MigrateError::MalformedUsageExpression(text.to_string()))
}

/// Whether `ast` is `this.<slot>`.
fn is_slot(ast: &Ast, slot: &str) -> bool {
    matches!(
        &ast.ast,
        AstNode::Member { object, property: MemberProp::Ident(name) }
            if object.is_this() && name == slot
    )
}

/// `this` is rebound inside nested classes, so extraction never enters them.
fn within_class(node: &Ast) -> bool {
    !matches!(node.ast, AstNode::Class(_))
}

fn entries_of(ast: &Ast) -> Option<&[ObjectEntry]> {
    match &ast.ast {
        AstNode::Object(entries) => Some(entries),
        _ => None,
    }
}

/// The destructured names of a `const { a, b: c } = this.<slot>` declarator.
fn destructured<'a>(declarator: &'a Ast, slot: &str) -> Vec<&'a str> {
    match &declarator.ast {
        AstNode::VarDeclarator {
            name: Pattern::Object(props),
            init: Some(init),
        } if is_slot(init, slot) => props.iter().filter_map(|prop| prop.key()).collect(),
        _ => Vec::new(),
    }
}

/// The field read by `this.<slot>.<name>`.
fn slot_member<'a>(ast: &'a Ast, slot: &str) -> Option<&'a str> {
    match &ast.ast {
        AstNode::Member {
            object,
            property: MemberProp::Ident(name),
        } if is_slot(object, slot) => Some(name.as_str()),
        _ => None,
    }
}

fn record_entries(
    fields: &mut FieldSet,
    entries: &[ObjectEntry],
    options: &Options,
    resolver: &dyn TypeResolver,
) -> MigrateResult<()> {
    for entry in entries {
        let (Some(name), Some(value)) = (entry.key_name(), entry.value()) else {
            continue;
        };
        let ty = resolver.type_at(TypeSite::Node(value))?;
        fields.record(
            FieldUsageSite {
                field_name: name.to_string(),
                source: value.to_string(),
                ty: synthesize(&ty, false, resolver, options),
            },
            true,
        );
    }
    Ok(())
}

/// Extracts the state fields of a component class.
///
/// Members are scanned in order. Within a member, bulk assignments to the state slot are looked at
/// first, then calls to the state mutator, then destructuring of the state slot and finally direct
/// reads of it. Every state field is optional.
pub fn extract_state(
    class: &ClassDecl,
    context: &ComponentClassContext,
    options: &Options,
    resolver: &dyn TypeResolver,
) -> MigrateResult<FieldSet> {
    let mut fields = FieldSet::default();
    if !context.is_component {
        return Ok(fields);
    }
    let slot = options.state_slot.as_str();

    for member in &class.members {
        let member = std::slice::from_ref(member);

        let assignments = filter_pruned(member, within_class, |node| {
            matches!(
                &node.ast,
                AstNode::Assign { op: AssignOp::Assign, target, value }
                    if is_slot(target, slot) && entries_of(value).is_some()
            )
        });
        for node in assignments {
            if let AstNode::Assign { value, .. } = &node.ast {
                record_entries(&mut fields, entries_of(value).unwrap_or_default(), options, resolver)?;
            }
        }

        let mutations = filter_pruned(member, within_class, |node| match &node.ast {
            AstNode::Call { callee, args } => {
                is_slot(callee, &options.state_mutator)
                    && args.first().and_then(entries_of).is_some()
            }
            _ => false,
        });
        for node in mutations {
            if let AstNode::Call { args, .. } = &node.ast {
                let entries = args.first().and_then(entries_of).unwrap_or_default();
                record_entries(&mut fields, entries, options, resolver)?;
            }
        }

        let declarators = filter_pruned(member, within_class, |node| {
            !destructured(node, slot).is_empty()
        });
        for declarator in declarators {
            for name in destructured(declarator, slot) {
                let ty = resolver.type_at(TypeSite::Binding { declarator, name })?;
                fields.record(
                    FieldUsageSite {
                        field_name: name.to_string(),
                        source: declarator.to_string(),
                        ty: synthesize(&ty, false, resolver, options),
                    },
                    true,
                );
            }
        }

        let reads = filter_pruned(member, within_class, |node| slot_member(node, slot).is_some());
        for node in reads {
            if let Some(name) = slot_member(node, slot) {
                let ty = resolver.type_at(TypeSite::Node(node))?;
                fields.record(
                    FieldUsageSite {
                        field_name: name.to_string(),
                        source: node.to_string(),
                        ty: synthesize(&ty, false, resolver, options),
                    },
                    true,
                );
            }
        }
    }

    Ok(fields)
}

/// Extracts the props read by a component class.
///
/// Props are never resolved: every one of them is an optional `any`.
pub fn extract_props(
    class: &ClassDecl,
    context: &ComponentClassContext,
    options: &Options,
) -> FieldSet {
    let mut fields = FieldSet::default();
    if !context.is_component {
        return fields;
    }
    let slot = options.props_slot.as_str();

    let uses = filter_pruned(&class.members, within_class, |node| {
        slot_member(node, slot).is_some() || !destructured(node, slot).is_empty()
    });
    for node in uses {
        let names = match slot_member(node, slot) {
            Some(name) => vec![name],
            None => destructured(node, slot),
        };
        for name in names {
            fields.record(
                FieldUsageSite {
                    field_name: name.to_string(),
                    source: node.to_string(),
                    ty: TypeExpr::Any,
                },
                true,
            );
        }
    }

    fields
}

/// Extracts the instance fields a class assigns or reads through `this`.
///
/// An assignment is typed by its right hand side, a read by the read itself. Names the class
/// already declares are skipped, and so are the reserved names on component classes.
pub fn extract_instance_fields(
    class: &ClassDecl,
    context: &ComponentClassContext,
    options: &Options,
    resolver: &dyn TypeResolver,
) -> MigrateResult<FieldSet> {
    let mut fields = FieldSet::default();

    let uses = filter_pruned(&class.members, within_class, |node| {
        matches!(node.ast, AstNode::Assign { .. } | AstNode::Member { .. })
    });
    for node in uses {
        let (target, typed) = match &node.ast {
            AstNode::Assign { target, value, .. } => (&**target, &**value),
            _ => (node, node),
        };

        let text = target.to_string();
        if !text.starts_with("this.") {
            continue;
        }

        let name = normalize_field_name(&text)?;
        if (context.is_component && options.is_reserved(&name))
            || context.existing_member_names.contains(&name)
            || fields.contains(&name)
        {
            continue;
        }

        let ty = resolver.type_at(TypeSite::Node(typed))?;
        fields.record(
            FieldUsageSite {
                ty: synthesize(&ty, text.contains('['), resolver, options),
                field_name: name,
                source: text,
            },
            false,
        );
    }

    Ok(fields)
}
