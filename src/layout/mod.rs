//! Dashboard page
//!
//! - **node**: The page tree and its builder API
//! - **table**: Data table → table nodes
//! - **page**: Static page composition
//! - **html**: Page tree → HTML document

pub mod html;
pub mod node;
pub mod page;
pub mod table;

pub use html::{render_document, render_fragment};
pub use node::{Element, Graph, Node};
pub use page::{build_page, country_dropdown, PAGE_TITLE};
pub use table::{render_data_table, render_table};
