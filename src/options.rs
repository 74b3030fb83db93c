use crate::ast::TypeExpr;

/// Configuration of the migration passes
#[derive(Debug, Clone)]
pub struct Options {
    /// A class is a component class when its single `extends` base type contains one of these.
    pub component_markers: Vec<String>,

    /// Name of the slot holding the component state (`this.state`).
    pub state_slot: String,

    /// Name of the slot holding the component props (`this.props`).
    pub props_slot: String,

    /// Name of the state mutation operation (`this.setState(...)`).
    pub state_mutator: String,

    /// Names never declared as instance fields on a component class, compared case-insensitively.
    pub reserved_members: Vec<String>,

    /// The type every synthesized props interface extends.
    pub props_base_type: TypeExpr,

    /// Namespace the framework types live in.
    pub framework_namespace: String,

    /// Resolved type names recognized as framework nodes, declared as `<namespace>.<name>`.
    pub framework_node_types: Vec<String>,

    /// Resolved type names that are timer handles, declared as `number`.
    pub timer_types: Vec<String>,

    /// Whether to declare instance fields of every class.
    pub instance_fields: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            component_markers: vec!["Component".to_string()],
            state_slot: "state".to_string(),
            props_slot: "props".to_string(),
            state_mutator: "setState".to_string(),
            reserved_members: vec![
                "state".to_string(),
                "props".to_string(),
                "setState".to_string(),
            ],
            props_base_type: TypeExpr::Ref {
                name: "React.HTMLAttributes".to_string(),
                args: vec![TypeExpr::named("Element")],
            },
            framework_namespace: "React".to_string(),
            framework_node_types: vec!["ReactNode".to_string()],
            timer_types: vec![
                "Timer".to_string(),
                "NodeJS.Timer".to_string(),
                "NodeJS.Timeout".to_string(),
            ],
            instance_fields: true,
        }
    }
}

impl Options {
    /// Create a new options instance that only rewrites components
    pub fn components_only() -> Self {
        Self {
            instance_fields: false,
            ..Default::default()
        }
    }

    /// Adds a marker recognizing further component base types
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.component_markers.push(marker.into());
        self
    }

    /// Whether `name` is reserved on component classes.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_members
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(name))
    }
}
