use log::{debug, error, info};

use crate::db::{Store, StoreError, StoreTx, Table};

/// Children before parents, so no delete trips a foreign key.
pub const RESET_ORDER: [Table; 5] = [
    Table::Assignments,
    Table::Salaries,
    Table::Projects,
    Table::Employees,
    Table::Departments,
];

/// Empties every table inside `tx`. Returns the total number of rows removed.
pub async fn clear_all(tx: &mut dyn StoreTx) -> Result<u64, StoreError> {
    let mut removed = 0;
    for table in RESET_ORDER {
        let count = tx.delete_all(table).await?;
        debug!("Cleared {} rows from {}", count, table);
        removed += count;
    }
    Ok(removed)
}

/// Empties every table in its own transaction. Either all rows go or none do.
pub async fn reset(store: &dyn Store) -> Result<u64, StoreError> {
    let mut tx = store.begin().await?;
    let cleared = clear_all(&mut *tx).await;
    match cleared {
        Ok(removed) => {
            tx.commit().await?;
            info!("Reset removed {} rows", removed);
            Ok(removed)
        }
        Err(err) => {
            error!("Reset failed, rolling back: {}", err);
            if let Err(rollback_err) = tx.rollback().await {
                error!("Rollback after failed reset also failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::NewDepartment;
    use chrono::NaiveDate;

    async fn seed_department(store: &MemoryStore, name: &str) {
        let mut tx = store.begin().await.unwrap();
        tx.insert_department(&NewDepartment {
            name: name.to_string(),
            location: "Denver, CO".to_string(),
            budget: 200_000.0,
            head_of_department: "Jo Park".to_string(),
            established_date: NaiveDate::from_ymd_opt(2021, 4, 4).unwrap(),
            employee_count: 0,
        })
        .await
        .unwrap();
        tx.commit().await.unwrap();
    }

    #[test]
    fn reset_order_puts_dependents_first() {
        let position = |t: Table| RESET_ORDER.iter().position(|x| *x == t).unwrap();
        assert!(position(Table::Assignments) < position(Table::Employees));
        assert!(position(Table::Assignments) < position(Table::Projects));
        assert!(position(Table::Salaries) < position(Table::Employees));
        assert!(position(Table::Employees) < position(Table::Departments));
        assert!(position(Table::Projects) < position(Table::Departments));
    }

    #[tokio::test]
    async fn reset_empties_the_store() {
        let store = MemoryStore::new();
        seed_department(&store, "HR").await;
        seed_department(&store, "Sales").await;

        assert_eq!(reset(&store).await.unwrap(), 2);

        let mut tx = store.begin().await.unwrap();
        assert!(tx.list_departments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reset_of_empty_store_is_a_no_op() {
        let store = MemoryStore::new();
        assert_eq!(reset(&store).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_delete_leaves_every_row_in_place() {
        use crate::db::faulty::FaultyStore;
        use crate::generator::{run, GenerationRequest};
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let store = MemoryStore::new();
        let request = GenerationRequest {
            departments: 2,
            employees_per_dept: 3,
            projects_per_dept: 1,
            salaries_per_employee: 2,
            seed: None,
        };
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        run(&store, &request, &mut StdRng::seed_from_u64(3), today)
            .await
            .unwrap();

        // assignments and salaries go first, then the employees delete fails
        let faulty = FaultyStore {
            inner: store.clone(),
            fail_on: Table::Employees,
        };
        let err = reset(&faulty).await.unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));

        let mut tx = store.begin().await.unwrap();
        assert_eq!(tx.list_departments().await.unwrap().len(), 2);
        assert_eq!(tx.list_employees().await.unwrap().len(), 6);
        assert_eq!(tx.list_projects().await.unwrap().len(), 2);
        assert_eq!(tx.list_salaries().await.unwrap().len(), 12);
        assert!(tx.list_assignments().await.unwrap().len() >= 4);
    }
}
