use actix_web::web;

mod activities;
mod auth;
mod attendance;
mod candidates;
mod certificates;
mod documents;
mod invoices;
mod jobs;
mod opportunity;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(web::scope("/auth")
            .configure(auth::config))
        .service(web::scope("/candidates")
            .configure(candidates::config))
        .service(web::scope("/opportunity")
            .configure(opportunity::config))
        .service(web::scope("/certificates")
            .configure(certificates::config))
        .service(web::scope("/activities")
            .configure(activities::config))
        .service(web::scope("/documents")
            .configure(documents::config))
        .service(web::scope("/jobs")
            .configure(jobs::config))
        .service(web::scope("/attendance")
            .configure(attendance::config))
        .service(web::scope("/invoices")
            .configure(invoices::config));
}
