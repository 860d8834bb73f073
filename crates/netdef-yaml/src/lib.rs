//! # netdef-yaml
//!
//! Loads network definitions with `yaml-rust2`, keeping the position of
//! every node so later checks can report located errors.
//!
//! Syntax failures are turned into `InvalidYaml` errors through
//! `netdef-error-reporting`; semantic checks report against a node's
//! [`Node::mark`] and the [`SourceUnit`] path.
//!
//! ```rust,no_run
//! use netdef_error_reporting::report_semantic;
//! use netdef_yaml::{SourceUnit, parse};
//!
//! let unit = SourceUnit::read("/etc/netplan/01-netcfg.yaml").unwrap();
//! let root = parse(&unit).unwrap();
//!
//! let mut error = None;
//! if root.get("network").is_none() {
//!     report_semantic!(&mut error, unit.path(), None, "missing 'network' key");
//! }
//! ```

mod error;
mod node;
mod parser;
mod position;
mod source;

pub use error::{Error, Result};
pub use node::{Node, NodeEntry};
pub use parser::parse;
pub use source::SourceUnit;
