//! Column tables for each resource
//!
//! Every list screen and headless command is driven by these tables; adding a
//! column here is all it takes for it to be rendered, searched and sorted.

pub mod applications;
pub mod companies;
pub mod master_data;
pub mod users;

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::i18n::Catalog;
    use crate::models::{Application, Company, MasterDataEntry, Record, User};
    use crate::table::{ColumnSpec, DEFAULT_MIN_WIDTH};

    fn check_table<R>(columns: &[ColumnSpec<R>]) {
        let catalog = Catalog::english();
        let mut keys = HashSet::new();
        for column in columns {
            assert!(keys.insert(column.key), "duplicate column {}", column.key);
            assert!(column.width >= DEFAULT_MIN_WIDTH, "{} too narrow", column.key);
            assert!(catalog.contains(column.label), "no label for {}", column.label);
        }
        assert!(columns.iter().any(ColumnSpec::is_searchable));
        assert!(columns.iter().any(ColumnSpec::is_sortable));
    }

    #[test]
    fn test_column_tables_are_consistent() {
        check_table(Company::columns());
        check_table(Application::columns());
        check_table(User::columns());
        check_table(MasterDataEntry::columns());
    }

    #[test]
    fn test_absent_fields_extract_as_empty() {
        let user: User = serde_json::from_str(r#"{"id": 9}"#).unwrap();
        for column in User::columns() {
            if let Some(extract) = column.search {
                let _ = extract(&user);
            }
            if let Some(project) = column.sort {
                let _ = project(&user);
            }
            let _ = (column.render)(&user);
        }
    }
}
