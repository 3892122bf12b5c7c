use crate::db::EmployeeRepository;
use crate::error::{AppError, AppResult};
use crate::models::{
    Employee, EmployeeDto, EmployeeLoginDto, EmployeePageQueryDto, DEFAULT_PASSWORD,
    MASKED_PASSWORD, STATUS_DISABLE, STATUS_ENABLE,
};
use crate::password::{hash_password, verify_password};
use crate::result::PageResult;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::sync::Arc;

/// Business operations behind the employee admin endpoints.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    async fn login(&self, dto: EmployeeLoginDto) -> AppResult<Employee>;

    async fn save(&self, dto: EmployeeDto, operator: i64) -> AppResult<()>;

    async fn page_query(&self, query: EmployeePageQueryDto) -> AppResult<PageResult<Employee>>;

    async fn start_or_stop(&self, status: i32, id: i64, operator: i64) -> AppResult<()>;

    /// `Ok(None)` when no employee has this id.
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Employee>>;

    async fn update(&self, dto: EmployeeDto, operator: i64) -> AppResult<()>;
}

pub struct EmployeeServiceImpl {
    repo: Arc<dyn EmployeeRepository>,
    bcrypt_cost: u32,
}

impl EmployeeServiceImpl {
    pub fn new(repo: Arc<dyn EmployeeRepository>) -> Self {
        Self::with_cost(repo, bcrypt::DEFAULT_COST)
    }

    pub fn with_cost(repo: Arc<dyn EmployeeRepository>, bcrypt_cost: u32) -> Self {
        Self { repo, bcrypt_cost }
    }
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

#[async_trait]
impl EmployeeService for EmployeeServiceImpl {
    async fn login(&self, dto: EmployeeLoginDto) -> AppResult<Employee> {
        let employee = self
            .repo
            .get_by_username(&dto.username)
            .await?
            .ok_or(AppError::AccountNotFound)?;

        if !verify_password(dto.password, employee.password.clone()).await? {
            return Err(AppError::PasswordMismatch);
        }

        if employee.status == STATUS_DISABLE {
            return Err(AppError::AccountLocked);
        }

        Ok(employee)
    }

    async fn save(&self, dto: EmployeeDto, operator: i64) -> AppResult<()> {
        let password = hash_password(DEFAULT_PASSWORD, self.bcrypt_cost).await?;
        let now = now();

        let employee = self
            .repo
            .insert(Employee {
                id: 0,
                username: dto.username,
                name: dto.name,
                password,
                phone: dto.phone.unwrap_or_default(),
                sex: dto.sex.unwrap_or_default(),
                id_number: dto.id_number.unwrap_or_default(),
                status: STATUS_ENABLE,
                create_time: now,
                update_time: now,
                create_user: Some(operator),
                update_user: Some(operator),
            })
            .await?;
        tracing::debug!(id = employee.id, operator, "employee created");
        Ok(())
    }

    async fn page_query(&self, query: EmployeePageQueryDto) -> AppResult<PageResult<Employee>> {
        let page = query.page.max(1) as usize;
        let page_size = query.page_size.max(1) as usize;
        let name = query.name.as_deref().filter(|n| !n.is_empty());

        let (total, records) = self
            .repo
            .page_query(name, (page - 1).saturating_mul(page_size), page_size)
            .await?;
        Ok(PageResult { total, records })
    }

    async fn start_or_stop(&self, status: i32, id: i64, operator: i64) -> AppResult<()> {
        if status != STATUS_ENABLE && status != STATUS_DISABLE {
            return Err(AppError::InvalidStatus(status));
        }

        let now = now();
        self.repo
            .update_with(
                id,
                Box::new(move |employee: &mut Employee| {
                    employee.status = status;
                    employee.update_time = now;
                    employee.update_user = Some(operator);
                }),
            )
            .await
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Employee>> {
        Ok(self.repo.get_by_id(id).await?.map(|mut employee| {
            employee.password = MASKED_PASSWORD.to_string();
            employee
        }))
    }

    async fn update(&self, dto: EmployeeDto, operator: i64) -> AppResult<()> {
        let id = dto
            .id
            .ok_or_else(|| AppError::BadRequest("employee id is required".to_string()))?;

        let now = now();
        self.repo
            .update_with(
                id,
                Box::new(move |employee: &mut Employee| {
                    employee.username = dto.username;
                    employee.name = dto.name;
                    if let Some(phone) = dto.phone {
                        employee.phone = phone;
                    }
                    if let Some(sex) = dto.sex {
                        employee.sex = sex;
                    }
                    if let Some(id_number) = dto.id_number {
                        employee.id_number = id_number;
                    }
                    employee.update_time = now;
                    employee.update_user = Some(operator);
                }),
            )
            .await
    }
}
