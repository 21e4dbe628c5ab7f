use actix_web::web;

pub mod customers;
pub mod health;

/// Register every route. Used by `main` and by the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.service(web::scope("/customers").configure(customers::configure_routes));
}
