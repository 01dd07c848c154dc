use actix_web::web;

use crate::handlers::home::{home, not_found};

mod contacts;
mod json_error;
mod projects;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(json_error::config_routes);

    cfg.service(home);

    cfg.service(
        web::scope("/api")
            .configure(projects::config_routes)
            .configure(contacts::config_routes)
    );

    cfg.default_service(web::to(not_found));
}
