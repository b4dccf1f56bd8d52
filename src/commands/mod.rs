//! CLI command implementations
//!
//! Every command works against a single [`MtdIndex`](mtdname_index::MtdIndex),
//! so the MTD table is read at most once per invocation.

mod list;
mod resolve;

pub use list::cmd_list;
pub use resolve::{cmd_path, cmd_resolve, cmd_select};
