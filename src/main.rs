use actix_web::{middleware::Logger, web, App, HttpServer};
use sky_admin::auth::{JwtTokenIssuer, TokenIssuer};
use sky_admin::config::AppConfig;
use sky_admin::db::{seed_admin, InMemoryEmployeeRepository};
use sky_admin::employee_handlers;
use sky_admin::service::{EmployeeService, EmployeeServiceImpl};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    let repo = Arc::new(InMemoryEmployeeRepository::new());
    seed_admin(repo.as_ref(), &config.admin_initial_password, bcrypt::DEFAULT_COST).await?;

    let service: Arc<dyn EmployeeService> = Arc::new(EmployeeServiceImpl::new(repo));
    let service = web::Data::from(service);
    let issuer: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::new(config.jwt.clone()));
    let issuer = web::Data::from(issuer);
    let jwt = web::Data::new(config.jwt.clone());

    let addr = config.server.addr();
    tracing::info!(%addr, "employee admin api listening");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(service.clone())
            .app_data(issuer.clone())
            .app_data(jwt.clone())
            .configure(employee_handlers::configure)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
