//! CLI command implementations

pub mod generate;
pub mod templates;

pub use generate::GenerateCommand;
pub use templates::TemplatesCommand;

use console::style;
use similar::{ChangeTag, TextDiff};

/// Print a line diff from `old` to `new`
pub(crate) fn print_diff(old: &str, new: &str) {
    let diff = TextDiff::from_lines(old, new);

    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => {
                print!("{}", style(format!("-{change}")).red());
            }
            ChangeTag::Insert => {
                print!("{}", style(format!("+{change}")).green());
            }
            ChangeTag::Equal => {
                print!(" {change}");
            }
        }
    }
    println!();
}
