pub mod find_or_default;
pub mod if_to_conditional;

use crate::rule::registry::RuleRegistry;

pub fn register_all(registry: &mut RuleRegistry) {
    registry.register(Box::new(if_to_conditional::IfToConditional));
    registry.register(Box::new(find_or_default::FindOrDefault::new()));
}
