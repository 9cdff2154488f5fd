use actix_web::web;

use crate::handlers::candidates;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/candidates")
            .service(
                web::resource("")
                    .route(web::get().to(candidates::list_candidates))
                    .route(web::post().to(candidates::create_candidate)),
            )
            .service(
                web::resource("/{candidate_id}/skills/{skill_id}")
                    .route(web::put().to(candidates::link_skill))
                    .route(web::delete().to(candidates::unlink_skill)),
            )
            .service(
                web::resource("/{candidate_id}")
                    .route(web::get().to(candidates::get_candidate))
                    .route(web::put().to(candidates::update_candidate))
                    .route(web::delete().to(candidates::delete_candidate)),
            ),
    );
}
