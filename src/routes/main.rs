use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_not_found, render_template};
use crate::services::main::show_index as show_index_service;

#[get("/")]
pub async fn root() -> impl Responder {
    redirect("/catalog")
}

#[get("/catalog")]
pub async fn index(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let summary = show_index_service(repo.get_ref());

    let mut context = base_context(&flash_messages, "index", "KBStore Catalog");
    context.insert("summary", &summary);
    render_template(&tera, "main/index.html", &context)
}

/// Fallback for unmatched paths.
pub async fn not_found(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_not_found(&tera, &flash_messages)
}
