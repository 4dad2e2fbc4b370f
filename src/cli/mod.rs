//! Command-line entry points.
//!
//! | Command    | Writes | Output                                   |
//! |------------|--------|------------------------------------------|
//! | `bundle`   | yes    | url and output file of the bundle        |
//! | `resource` | yes    | url and output file of the resource      |
//! | `url`      | no     | url of a file inside the output root     |
//! | `resolve`  | no     | output path for a logical name           |

pub mod args;
mod emit;

pub use args::{Cli, Commands};
pub use emit::run;
