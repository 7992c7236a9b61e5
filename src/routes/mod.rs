// Route exports
pub mod admin;
pub mod auth;
pub mod directory;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(directory::configure)
            .configure(auth::configure)
            .configure(admin::configure),
    );
}
