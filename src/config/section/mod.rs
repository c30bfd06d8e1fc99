//! Configuration section definitions.
//!
//! Each module corresponds to a section in `kolam.toml`:
//!
//! | Module    | TOML Section  | Purpose                               |
//! |-----------|---------------|---------------------------------------|
//! | `source`  | `[source]`    | Base URL and request timeout          |
//! | `animate` | `[animate]`   | Padding, timing and path bounds mode  |
//! | `serve`   | `[serve]`     | Preview server                        |

mod animate;
mod serve;
mod source;

pub use animate::AnimateConfig;
pub use serve::ServeConfig;
pub use source::SourceConfig;
