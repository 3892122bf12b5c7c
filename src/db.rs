use crate::error::{AppError, AppResult};
use crate::models::{Employee, STATUS_ENABLE};
use crate::password::hash_password;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

/// In-place change applied to a stored employee while the repository holds it.
pub type EmployeeMutation = Box<dyn FnOnce(&mut Employee) + Send>;

/// Storage seam behind the employee service.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn get_by_username(&self, username: &str) -> AppResult<Option<Employee>>;

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Employee>>;

    /// Stores a new employee, ignoring `employee.id`, and returns it with its assigned id.
    async fn insert(&self, employee: Employee) -> AppResult<Employee>;

    /// Applies `mutate` to the stored employee atomically. Concurrent updates of
    /// the same employee never overwrite each other's columns.
    async fn update_with(&self, id: i64, mutate: EmployeeMutation) -> AppResult<()>;

    /// Returns the number of matches and the requested slice, newest first.
    async fn page_query(
        &self,
        name: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> AppResult<(u64, Vec<Employee>)>;
}

#[derive(Default)]
struct Store {
    employees: BTreeMap<i64, Employee>,
    last_id: i64,
}

impl Store {
    fn username_taken(&self, username: &str, except: Option<i64>) -> bool {
        self.employees
            .values()
            .any(|e| e.username == username && Some(e.id) != except)
    }
}

#[derive(Default)]
pub struct InMemoryEmployeeRepository {
    store: Mutex<Store>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn get_by_username(&self, username: &str) -> AppResult<Option<Employee>> {
        let store = self.store.lock().await;
        Ok(store
            .employees
            .values()
            .find(|e| e.username == username)
            .cloned())
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Employee>> {
        Ok(self.store.lock().await.employees.get(&id).cloned())
    }

    async fn insert(&self, mut employee: Employee) -> AppResult<Employee> {
        let mut store = self.store.lock().await;
        if store.username_taken(&employee.username, None) {
            return Err(AppError::DuplicateUsername(employee.username));
        }
        store.last_id += 1;
        employee.id = store.last_id;
        store.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn update_with(&self, id: i64, mutate: EmployeeMutation) -> AppResult<()> {
        let mut store = self.store.lock().await;
        let mut employee = store
            .employees
            .get(&id)
            .cloned()
            .ok_or(AppError::EmployeeNotFound(id))?;
        mutate(&mut employee);
        employee.id = id;

        if store.username_taken(&employee.username, Some(id)) {
            return Err(AppError::DuplicateUsername(employee.username));
        }
        store.employees.insert(id, employee);
        Ok(())
    }

    async fn page_query(
        &self,
        name: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> AppResult<(u64, Vec<Employee>)> {
        let store = self.store.lock().await;
        let mut matches: Vec<&Employee> = store
            .employees
            .values()
            .filter(|e| name.map_or(true, |n| e.name.contains(n)))
            .collect();
        matches.sort_by(|a, b| {
            b.create_time
                .cmp(&a.create_time)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = matches.len() as u64;
        let records = matches
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok((total, records))
    }
}

/// Creates the `admin` account unless it already exists.
pub async fn seed_admin(
    repo: &dyn EmployeeRepository,
    password: &str,
    cost: u32,
) -> AppResult<()> {
    if repo.get_by_username("admin").await?.is_some() {
        return Ok(());
    }

    let hashed = hash_password(password, cost).await?;

    let now = chrono::Local::now().naive_local();
    let admin = repo
        .insert(Employee {
            id: 0,
            username: "admin".to_string(),
            name: "Administrator".to_string(),
            password: hashed,
            phone: String::new(),
            sex: "1".to_string(),
            id_number: String::new(),
            status: STATUS_ENABLE,
            create_time: now,
            update_time: now,
            create_user: None,
            update_user: None,
        })
        .await?;
    tracing::info!(id = admin.id, "seeded admin account");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn at(minute: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
            + Duration::minutes(minute)
    }

    fn employee(username: &str, name: &str, minute: i64) -> Employee {
        Employee {
            id: 0,
            username: username.to_string(),
            name: name.to_string(),
            password: "hash".to_string(),
            phone: String::new(),
            sex: "0".to_string(),
            id_number: String::new(),
            status: STATUS_ENABLE,
            create_time: at(minute),
            update_time: at(minute),
            create_user: Some(1),
            update_user: Some(1),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryEmployeeRepository::new();
        let first = repo.insert(employee("a", "Alice", 0)).await.unwrap();
        let second = repo.insert(employee("b", "Bob", 1)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.get_by_username("b").await.unwrap().unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let repo = InMemoryEmployeeRepository::new();
        repo.insert(employee("a", "Alice", 0)).await.unwrap();
        let err = repo.insert(employee("a", "Another", 1)).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateUsername(ref u) if u == "a"));
    }

    #[tokio::test]
    async fn test_update_checks_existence_and_uniqueness() {
        let repo = InMemoryEmployeeRepository::new();
        repo.insert(employee("a", "Alice", 0)).await.unwrap();
        let bob = repo.insert(employee("b", "Bob", 1)).await.unwrap();

        let err = repo
            .update_with(bob.id, Box::new(|e: &mut Employee| e.username = "a".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateUsername(_)));
        // a rejected change leaves the stored record untouched
        assert_eq!(repo.get_by_id(bob.id).await.unwrap().unwrap().username, "b");

        assert!(matches!(
            repo.update_with(99, Box::new(|e: &mut Employee| e.name = "Ghost".to_string())).await,
            Err(AppError::EmployeeNotFound(99))
        ));

        repo.update_with(bob.id, Box::new(|e: &mut Employee| e.username = "bobby".to_string()))
            .await
            .unwrap();
        assert!(repo.get_by_username("bobby").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_with_keeps_other_columns() {
        let repo = InMemoryEmployeeRepository::new();
        let alice = repo.insert(employee("a", "Alice", 0)).await.unwrap();

        repo.update_with(alice.id, Box::new(|e: &mut Employee| e.status = 0))
            .await
            .unwrap();
        repo.update_with(alice.id, Box::new(|e: &mut Employee| e.name = "Alicia".to_string()))
            .await
            .unwrap();

        let stored = repo.get_by_id(alice.id).await.unwrap().unwrap();
        assert_eq!(stored.status, 0);
        assert_eq!(stored.name, "Alicia");
        assert_eq!(stored.id, alice.id);
    }

    #[tokio::test]
    async fn test_page_query_filters_and_orders_newest_first() {
        let repo = InMemoryEmployeeRepository::new();
        repo.insert(employee("a", "Zhang Wei", 0)).await.unwrap();
        repo.insert(employee("b", "Li Na", 5)).await.unwrap();
        repo.insert(employee("c", "Zhang Min", 10)).await.unwrap();

        let (total, records) = repo.page_query(Some("Zhang"), 0, 10).await.unwrap();
        assert_eq!(total, 2);
        let names: Vec<_> = records.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Zhang Min", "Zhang Wei"]);

        let (total, records) = repo.page_query(None, 1, 1).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Li Na");
    }

    #[tokio::test]
    async fn test_seed_admin_is_idempotent() {
        let repo = InMemoryEmployeeRepository::new();
        seed_admin(&repo, "123456", 4).await.unwrap();
        seed_admin(&repo, "123456", 4).await.unwrap();

        let (total, _) = repo.page_query(None, 0, 10).await.unwrap();
        assert_eq!(total, 1);
        let admin = repo.get_by_username("admin").await.unwrap().unwrap();
        assert!(bcrypt::verify("123456", &admin.password).unwrap());
    }
}
