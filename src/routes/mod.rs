// Route exports
pub mod breeds;

pub use breeds::AppState;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(breeds::configure),
    );
}
