use crate::auth::{validator, TokenIssuer};
use crate::error::AppError;
use crate::models::{
    CurrentEmployee, EmployeeDto, EmployeeLoginDto, EmployeeLoginVo, EmployeePageQueryDto,
    StatusParam,
};
use crate::result::ApiResult;
use crate::service::EmployeeService;
use actix_web::{get, post, web, Either, HttpResponse};
use actix_web_httpauth::middleware::HttpAuthentication;
use std::fmt::Display;

#[post("/login")]
pub async fn login(
    service: web::Data<dyn EmployeeService>,
    issuer: web::Data<dyn TokenIssuer>,
    body: web::Json<EmployeeLoginDto>,
) -> Result<HttpResponse, AppError> {
    let dto = body.into_inner();
    tracing::info!("employee login: {:?}", dto);

    let employee = service.login(dto).await?;

    let token = issuer.issue(employee.id)?;

    Ok(HttpResponse::Ok().json(ApiResult::success(EmployeeLoginVo {
        id: employee.id,
        username: employee.username,
        name: employee.name,
        token,
    })))
}

/// Tokens are stateless and expire on their own.
#[post("/logout")]
pub async fn logout() -> HttpResponse {
    tracing::info!("employee logout");
    HttpResponse::Ok().json(ApiResult::ok())
}

pub async fn save(
    service: web::Data<dyn EmployeeService>,
    operator: web::ReqData<CurrentEmployee>,
    body: web::Json<EmployeeDto>,
) -> Result<HttpResponse, AppError> {
    let dto = body.into_inner();
    tracing::info!("create employee: {:?}", dto);

    service.save(dto, operator.0).await?;
    Ok(HttpResponse::Ok().json(ApiResult::ok()))
}

#[get("/page")]
pub async fn page(
    service: web::Data<dyn EmployeeService>,
    query: web::Query<EmployeePageQueryDto>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    tracing::info!("employee page query: {:?}", query);

    let page = service.page_query(query).await?;
    Ok(HttpResponse::Ok().json(ApiResult::success(page)))
}

#[post("/status/{status}")]
pub async fn start_or_stop(
    service: web::Data<dyn EmployeeService>,
    operator: web::ReqData<CurrentEmployee>,
    status: web::Path<i32>,
    param: Either<web::Query<StatusParam>, web::Form<StatusParam>>,
) -> Result<HttpResponse, AppError> {
    let status = status.into_inner();
    let id = match param {
        Either::Left(query) => query.id,
        Either::Right(form) => form.id,
    };
    tracing::info!("enable/disable employee: status={}, id={}", status, id);

    service.start_or_stop(status, id, operator.0).await?;
    Ok(HttpResponse::Ok().json(ApiResult::ok()))
}

#[get("/{id}")]
pub async fn get_by_id(
    service: web::Data<dyn EmployeeService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    tracing::info!("get employee by id: {}", id);

    let employee = service.get_by_id(id).await?;
    // absent employees serialize as `data: null`
    Ok(HttpResponse::Ok().json(ApiResult::success(employee)))
}

pub async fn update(
    service: web::Data<dyn EmployeeService>,
    operator: web::ReqData<CurrentEmployee>,
    body: web::Json<EmployeeDto>,
) -> Result<HttpResponse, AppError> {
    let dto = body.into_inner();
    tracing::info!("update employee: {:?}", dto);

    service.update(dto, operator.0).await?;
    Ok(HttpResponse::Ok().json(ApiResult::ok()))
}

fn bad_request(err: impl Display) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Mounts the employee routes under `/admin/employee`.
///
/// Expects `web::Data<dyn EmployeeService>`, `web::Data<dyn TokenIssuer>` and
/// `web::Data<JwtProperties>` in app data.
/// Everything except login and logout requires an admin bearer token.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/employee")
            .app_data(web::JsonConfig::default().error_handler(|err, _| bad_request(err)))
            .app_data(web::QueryConfig::default().error_handler(|err, _| bad_request(err)))
            .app_data(web::PathConfig::default().error_handler(|err, _| bad_request(err)))
            .app_data(web::FormConfig::default().error_handler(|err, _| bad_request(err)))
            .service(login)
            .service(logout)
            .service(
                web::scope("")
                    .wrap(HttpAuthentication::with_fn(validator))
                    .service(
                        web::resource("")
                            .route(web::post().to(save))
                            .route(web::put().to(update)),
                    )
                    // before `/{id}`, which would otherwise capture it
                    .service(page)
                    .service(start_or_stop)
                    .service(get_by_id),
            ),
    );
}
