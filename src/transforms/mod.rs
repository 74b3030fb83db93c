//! The migration passes. Each pass takes a module and returns a new one, leaving its input as it
//! was and carrying the module's emit helpers over.

mod instance_fields;
mod props_and_state;
mod remove_static_prop_types;

pub use instance_fields::declare_instance_fields;
pub use props_and_state::make_props_and_state;
pub use remove_static_prop_types::remove_static_prop_types;
