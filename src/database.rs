use std::collections::HashMap;

use log::debug;

use crate::catalog::{Catalog, TableSchema};
use crate::command::Command;
use crate::error::{DbError, Result};
use crate::parser;
use crate::table::{Row, Table};

/// The process-wide session: schema registry and row storage, owned as
/// peers, plus the command executor that mediates every access.
///
/// One `Database` value is created at process start and dropped at exit;
/// nothing outside it retains references to rows or schemas — results are
/// owned snapshots.
#[derive(Debug, Default)]
pub struct Database {
    catalog: Catalog,
    tables: HashMap<String, Table>,
}

/// A set of rows returned by `select` or `insert`, paired with the column
/// names of the owning schema (`ID` first).
#[derive(Debug, Clone, PartialEq)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// The success payload of one executed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `create_table`: the schema as defined, implicit `ID` included.
    TableCreated(TableSchema),
    /// `list_tables`: every schema, in creation order.
    Tables(Vec<TableSchema>),
    /// `drop_table`: the name of the removed table.
    TableDropped(String),
    /// `insert`: the created row, `ID` included.
    Inserted(RowSet),
    /// `select`: the matching rows, in storage order.
    Rows(RowSet),
    /// `update`: number of rows changed (0 is valid).
    Updated(usize),
    /// `delete`: number of rows removed (0 is valid).
    Deleted(usize),
    /// `help`: the front end renders its command summary.
    Help,
    /// `exit`/`quit`: the front end ends the session.
    Exit,
}

impl Database {
    /// Creates a new, empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and executes one command line.
    ///
    /// # Errors
    /// Any [DbError]: syntax errors from the parser, or validation errors
    /// from execution. Failed commands never partially mutate the session.
    ///
    /// # Example
    /// ```
    /// use minirel::{Database, Outcome};
    ///
    /// let mut db = Database::new();
    /// db.run("create_table users name:str age:int").unwrap();
    /// db.run("insert into users values ('Ann', 30)").unwrap();
    ///
    /// match db.run("select from users where age = 30").unwrap() {
    ///     Outcome::Rows(set) => assert_eq!(set.rows.len(), 1),
    ///     other => panic!("unexpected outcome: {:?}", other),
    /// }
    /// ```
    pub fn run(&mut self, line: &str) -> Result<Outcome> {
        let command = parser::parse(line)?;
        self.execute(command)
    }

    /// Executes one parsed command against the session.
    ///
    /// Metadata checks go through the catalog first, then data operations
    /// through the matching table storage, so every error is raised before
    /// any mutation.
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        debug!("execute: {:?}", command);

        match command {
            Command::CreateTable { name, columns } => {
                let schema = self.catalog.define(&name, &columns)?.clone();
                self.tables.insert(name, Table::new(&schema));
                Ok(Outcome::TableCreated(schema))
            }
            Command::ListTables => Ok(Outcome::Tables(self.catalog.list().cloned().collect())),
            Command::DropTable { name } => {
                // Schema and storage go together or not at all
                self.catalog.remove(&name)?;
                self.tables.remove(&name);
                Ok(Outcome::TableDropped(name))
            }
            Command::Insert { table, values } => {
                let columns = self.catalog.lookup(&table)?.column_names();
                let row = self.table_mut(&table)?.insert(values)?;
                Ok(Outcome::Inserted(RowSet {
                    columns,
                    rows: vec![row],
                }))
            }
            Command::Select { table, predicate } => {
                let columns = self.catalog.lookup(&table)?.column_names();
                let rows = self.table(&table)?.scan(predicate.as_ref())?;
                Ok(Outcome::Rows(RowSet { columns, rows }))
            }
            Command::Update {
                table,
                column,
                value,
                predicate,
            } => {
                self.catalog.lookup(&table)?;
                let count = self.table_mut(&table)?.update(&column, &value, &predicate)?;
                Ok(Outcome::Updated(count))
            }
            Command::Delete { table, predicate } => {
                self.catalog.lookup(&table)?;
                let count = self.table_mut(&table)?.delete(&predicate)?;
                Ok(Outcome::Deleted(count))
            }
            Command::Help => Ok(Outcome::Help),
            Command::Exit => Ok(Outcome::Exit),
        }
    }

    fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| DbError::UnknownTable(name.to_string()))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| DbError::UnknownTable(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn fresh_users() -> Database {
        let mut db = Database::new();
        db.run("create_table users name:str age:int active:bool")
            .unwrap();
        db
    }

    fn select_rows(db: &mut Database, line: &str) -> Vec<Row> {
        match db.run(line).unwrap() {
            Outcome::Rows(set) => set.rows,
            other => panic!("expected rows, got {:?}", other),
        }
    }

    #[test]
    fn test_create_table_outcome() {
        let mut db = Database::new();
        let outcome = db.run("create_table users name:str").unwrap();

        match outcome {
            Outcome::TableCreated(schema) => {
                assert_eq!(schema.name, "users");
                assert_eq!(schema.columns[0].name, "ID");
                assert_eq!(schema.columns[1].name, "name");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_create_duplicate_table() {
        let mut db = fresh_users();
        assert_eq!(
            db.run("create_table users name:str"),
            Err(DbError::DuplicateTable("users".into()))
        );
    }

    #[test]
    fn test_list_tables_in_creation_order() {
        let mut db = Database::new();
        db.run("create_table posts title:str").unwrap();
        db.run("create_table users name:str").unwrap();

        match db.run("list_tables").unwrap() {
            Outcome::Tables(schemas) => {
                let names: Vec<&str> = schemas.iter().map(|s| s.name.as_str()).collect();
                assert_eq!(names, vec!["posts", "users"]);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_drop_table_removes_schema_and_rows() {
        let mut db = fresh_users();
        db.run("insert into users values ('Ann', 30, true)").unwrap();

        assert_eq!(
            db.run("drop_table users").unwrap(),
            Outcome::TableDropped("users".into())
        );

        // Both halves gone: the name can be redefined and starts empty
        db.run("create_table users name:str age:int active:bool")
            .unwrap();
        assert!(select_rows(&mut db, "select from users").is_empty());
    }

    #[test]
    fn test_drop_unknown_table_changes_nothing() {
        let mut db = fresh_users();
        assert_eq!(
            db.run("drop_table ghosts"),
            Err(DbError::UnknownTable("ghosts".into()))
        );

        // Registry intact
        match db.run("list_tables").unwrap() {
            Outcome::Tables(schemas) => assert_eq!(schemas.len(), 1),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_insert_returns_created_row() {
        let mut db = fresh_users();

        match db.run("insert into users values ('Ann', 30, true)").unwrap() {
            Outcome::Inserted(set) => {
                assert_eq!(set.columns, vec!["ID", "name", "age", "active"]);
                assert_eq!(
                    set.rows,
                    vec![vec![
                        Value::Int(1),
                        Value::from("Ann"),
                        Value::Int(30),
                        Value::Bool(true)
                    ]]
                );
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_operations_on_unknown_table() {
        let mut db = Database::new();

        assert_eq!(
            db.run("insert into ghosts values (1)"),
            Err(DbError::UnknownTable("ghosts".into()))
        );
        assert_eq!(
            db.run("select from ghosts"),
            Err(DbError::UnknownTable("ghosts".into()))
        );
        assert_eq!(
            db.run("update ghosts set x = 1 where x = 2"),
            Err(DbError::UnknownTable("ghosts".into()))
        );
        assert_eq!(
            db.run("delete from ghosts where x = 1"),
            Err(DbError::UnknownTable("ghosts".into()))
        );
    }

    #[test]
    fn test_select_count_after_inserts_and_deletes() {
        let mut db = fresh_users();
        for i in 0..6 {
            db.run(&format!("insert into users values ('u{}', {}, true)", i, i))
                .unwrap();
        }
        assert_eq!(db.run("delete from users where age = 2"), Ok(Outcome::Deleted(1)));
        assert_eq!(db.run("delete from users where age = 4"), Ok(Outcome::Deleted(1)));

        let rows = select_rows(&mut db, "select from users");
        assert_eq!(rows.len(), 4);

        // Original relative order preserved
        let ids: Vec<i64> = rows.iter().filter_map(|r| r[0].as_int()).collect();
        assert_eq!(ids, vec![1, 2, 4, 6]);
    }

    #[test]
    fn test_full_scenario() {
        let mut db = fresh_users();

        db.run(r#"insert into users values ("Ann", 30, true)"#).unwrap();
        let rows = select_rows(&mut db, "select from users");
        assert_eq!(
            rows,
            vec![vec![
                Value::Int(1),
                Value::from("Ann"),
                Value::Int(30),
                Value::Bool(true)
            ]]
        );

        assert_eq!(
            db.run(r#"update users set active = false where name = "Ann""#),
            Ok(Outcome::Updated(1))
        );
        let rows = select_rows(&mut db, "select from users where active = false");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][3], Value::Bool(false));

        assert_eq!(
            db.run("delete from users where age = 30"),
            Ok(Outcome::Deleted(1))
        );
        assert!(select_rows(&mut db, "select from users").is_empty());
    }

    #[test]
    fn test_update_zero_rows_affected() {
        let mut db = fresh_users();
        db.run("insert into users values ('Ann', 30, true)").unwrap();

        let before = select_rows(&mut db, "select from users");
        assert_eq!(
            db.run("update users set age = 99 where name = 'Zed'"),
            Ok(Outcome::Updated(0))
        );
        assert_eq!(select_rows(&mut db, "select from users"), before);
    }

    #[test]
    fn test_insert_type_mismatch_leaves_row_count_unchanged() {
        let mut db = fresh_users();
        db.run("insert into users values ('Ann', 30, true)").unwrap();

        let err = db
            .run("insert into users values ('Bob', 'old', true)")
            .unwrap_err();
        assert!(matches!(err, DbError::TypeMismatch { .. }));

        assert_eq!(select_rows(&mut db, "select from users").len(), 1);
    }

    #[test]
    fn test_insert_arity_mismatch() {
        let mut db = fresh_users();
        assert_eq!(
            db.run("insert into users values ('Ann', 30)"),
            Err(DbError::ArityMismatch { expected: 3, got: 2 })
        );
    }

    #[test]
    fn test_where_unknown_column() {
        let mut db = fresh_users();
        assert_eq!(
            db.run("select from users where height = 180"),
            Err(DbError::UnknownColumn("height".into()))
        );
        assert_eq!(
            db.run("update users set height = 180 where name = 'Ann'"),
            Err(DbError::UnknownColumn("height".into()))
        );
        assert_eq!(
            db.run("delete from users where height = 180"),
            Err(DbError::UnknownColumn("height".into()))
        );
    }

    #[test]
    fn test_quoted_digits_never_match_int_column() {
        let mut db = fresh_users();
        db.run("insert into users values ('Ann', 30, true)").unwrap();

        assert!(select_rows(&mut db, "select from users where age = '30'").is_empty());
        assert_eq!(select_rows(&mut db, "select from users where age = 30").len(), 1);
    }

    #[test]
    fn test_help_and_exit_outcomes() {
        let mut db = Database::new();
        assert_eq!(db.run("help"), Ok(Outcome::Help));
        assert_eq!(db.run("exit"), Ok(Outcome::Exit));
        assert_eq!(db.run("quit"), Ok(Outcome::Exit));
    }

    #[test]
    fn test_syntax_error_surfaces() {
        let mut db = Database::new();
        assert!(matches!(
            db.run("create_table"),
            Err(DbError::Syntax(_))
        ));
    }
}
