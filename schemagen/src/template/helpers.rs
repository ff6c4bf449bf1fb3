//! String helpers available inside templates
//!
//! ```text
//! {{upper_first field_name}}         userId        → UserId
//! {{lower_first simple_name}}        UserProfile   → userProfile
//! {{camel_case table.table_name}}    user_profile  → userProfile
//! {{pascal_case table.table_name}}   user_profile  → UserProfile
//! {{snake_case simple_name}}         UserProfile   → user_profile
//! {{join implements ", "}}           [A, B]        → A, B
//! ```

use handlebars::{handlebars_helper, Handlebars};
use inflector::Inflector;
use serde_json::Value;

handlebars_helper!(upper_first_helper: |input: str| upper_first(input));
handlebars_helper!(lower_first_helper: |input: str| lower_first(input));
handlebars_helper!(camel_case_helper: |input: str| input.to_camel_case());
handlebars_helper!(pascal_case_helper: |input: str| input.to_pascal_case());
handlebars_helper!(snake_case_helper: |input: str| input.to_snake_case());
handlebars_helper!(join_helper: |items: array, separator: str| join(items, separator));

/// Register every helper on `registry`
pub fn register(registry: &mut Handlebars<'_>) {
    registry.register_helper("upper_first", Box::new(upper_first_helper));
    registry.register_helper("lower_first", Box::new(lower_first_helper));
    registry.register_helper("camel_case", Box::new(camel_case_helper));
    registry.register_helper("pascal_case", Box::new(pascal_case_helper));
    registry.register_helper("snake_case", Box::new(snake_case_helper));
    registry.register_helper("join", Box::new(join_helper));
}

/// Uppercase the first character, leave the rest alone
///
/// # Examples
///
/// ```
/// # use schemagen::template::helpers::upper_first;
/// assert_eq!(upper_first("userId"), "UserId");
/// assert_eq!(upper_first(""), "");
/// ```
#[must_use]
pub fn upper_first(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Lowercase the first character, leave the rest alone
///
/// # Examples
///
/// ```
/// # use schemagen::template::helpers::lower_first;
/// assert_eq!(lower_first("UserProfile"), "userProfile");
/// ```
#[must_use]
pub fn lower_first(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

fn join(items: &[Value], separator: &str) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(separator)
}
