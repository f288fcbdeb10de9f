//! Output formatting for CLI commands.

mod icons;
mod printer;
mod table;

use std::io::IsTerminal;

pub use icons::IconContext;
pub use longecho_core::truncate;
pub use printer::Output;
pub use table::{Column, Table};

/// Whether stderr is attached to a terminal.
pub fn stderr_is_terminal() -> bool {
    std::io::stderr().is_terminal()
}
