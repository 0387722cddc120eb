pub mod catalog;
pub mod column;
pub mod command;
pub mod data_type;
pub mod database;
pub mod error;
pub mod parser;
pub mod table;
pub mod tokenizer;
pub mod value;

pub use catalog::{Catalog, ColumnDef, TableSchema};
pub use command::{ColumnSpec, Command, Predicate};
pub use data_type::DataType;
pub use database::{Database, Outcome, RowSet};
pub use error::{DbError, Result};
pub use table::{Row, Table};
pub use value::Value;
