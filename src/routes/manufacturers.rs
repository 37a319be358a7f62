use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::manufacturers::ManufacturerPageDto;
use crate::forms::manufacturers::{ManufacturerDraft, ManufacturerForm};
use crate::domain::types::ManufacturerId;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_not_found, render_template};
use crate::services::manufacturers::{
    create_manufacturer as create_manufacturer_service,
    delete_manufacturer as delete_manufacturer_service, load_manufacturer_form,
    show_delete_manufacturer as show_delete_manufacturer_service,
    show_manufacturer as show_manufacturer_service,
    show_manufacturers as show_manufacturers_service,
    update_manufacturer as update_manufacturer_service,
};
use crate::services::{DeleteOutcome, FormOutcome, ServiceError};

const LIST_URL: &str = "/catalog/manufacturers";

fn render_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    title: &str,
    draft: &ManufacturerDraft,
    errors: &[String],
) -> HttpResponse {
    let mut context = base_context(flash_messages, "manufacturers", title);
    context.insert("manufacturer", draft);
    context.insert("errors", errors);
    render_template(tera, "manufacturers/form.html", &context)
}

fn render_delete(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    page: &ManufacturerPageDto,
) -> HttpResponse {
    let mut context = base_context(flash_messages, "manufacturers", "Delete manufacturer");
    context.insert("manufacturer", &page.manufacturer);
    context.insert("keyboards", &page.keyboards);
    render_template(tera, "manufacturers/delete.html", &context)
}

#[get("/catalog/manufacturers")]
pub async fn show_manufacturers(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_manufacturers_service(repo.get_ref()) {
        Ok(manufacturers) => {
            let mut context =
                base_context(&flash_messages, "manufacturers", "List of manufacturers");
            context.insert("manufacturers", &manufacturers);
            render_template(&tera, "manufacturers/list.html", &context)
        }
        Err(ServiceError::NotFound) => render_not_found(&tera, &flash_messages),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[get("/catalog/manufacturer/create")]
pub async fn create_manufacturer_form(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_form(
        &tera,
        &flash_messages,
        "Create manufacturer",
        &ManufacturerDraft::default(),
        &[],
    )
}

#[post("/catalog/manufacturer/create")]
pub async fn create_manufacturer(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ManufacturerForm>,
) -> impl Responder {
    match create_manufacturer_service(form, repo.get_ref()) {
        Ok(FormOutcome::Saved(id)) => {
            FlashMessage::success("Manufacturer saved.").send();
            redirect(&format!("/catalog/manufacturer/{id}"))
        }
        Ok(FormOutcome::Invalid(invalid)) => render_form(
            &tera,
            &flash_messages,
            "Create manufacturer",
            &invalid.draft,
            &invalid.errors,
        ),
        Err(ServiceError::NotFound) => render_not_found(&tera, &flash_messages),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[get("/catalog/manufacturer/{manufacturer_id}")]
pub async fn show_manufacturer(
    manufacturer_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(manufacturer_id) = ManufacturerId::parse(&manufacturer_id) else {
        return render_not_found(&tera, &flash_messages);
    };
    match show_manufacturer_service(manufacturer_id.get(), repo.get_ref()) {
        Ok(page) => {
            let mut context =
                base_context(&flash_messages, "manufacturers", "Manufacturer detail");
            context.insert("manufacturer", &page.manufacturer);
            context.insert("keyboards", &page.keyboards);
            render_template(&tera, "manufacturers/detail.html", &context)
        }
        Err(ServiceError::NotFound) => render_not_found(&tera, &flash_messages),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[get("/catalog/manufacturer/{manufacturer_id}/update")]
pub async fn update_manufacturer_form(
    manufacturer_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(manufacturer_id) = ManufacturerId::parse(&manufacturer_id) else {
        return render_not_found(&tera, &flash_messages);
    };
    match load_manufacturer_form(manufacturer_id.get(), repo.get_ref()) {
        Ok(draft) => render_form(&tera, &flash_messages, "Update manufacturer", &draft, &[]),
        Err(ServiceError::NotFound) => render_not_found(&tera, &flash_messages),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[post("/catalog/manufacturer/{manufacturer_id}/update")]
pub async fn update_manufacturer(
    manufacturer_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ManufacturerForm>,
) -> impl Responder {
    let Ok(manufacturer_id) = ManufacturerId::parse(&manufacturer_id) else {
        return render_not_found(&tera, &flash_messages);
    };
    match update_manufacturer_service(manufacturer_id.get(), form, repo.get_ref()) {
        Ok(FormOutcome::Saved(id)) => {
            FlashMessage::success("Manufacturer updated.").send();
            redirect(&format!("/catalog/manufacturer/{id}"))
        }
        Ok(FormOutcome::Invalid(invalid)) => render_form(
            &tera,
            &flash_messages,
            "Update manufacturer",
            &invalid.draft,
            &invalid.errors,
        ),
        Err(ServiceError::NotFound) => render_not_found(&tera, &flash_messages),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[get("/catalog/manufacturer/{manufacturer_id}/delete")]
pub async fn delete_manufacturer_form(
    manufacturer_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(manufacturer_id) = ManufacturerId::parse(&manufacturer_id) else {
        return redirect(LIST_URL);
    };
    match show_delete_manufacturer_service(manufacturer_id.get(), repo.get_ref()) {
        Ok(Some(page)) => render_delete(&tera, &flash_messages, &page),
        Ok(None) | Err(ServiceError::NotFound) => redirect(LIST_URL),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[post("/catalog/manufacturer/{manufacturer_id}/delete")]
pub async fn delete_manufacturer(
    manufacturer_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(manufacturer_id) = ManufacturerId::parse(&manufacturer_id) else {
        return redirect(LIST_URL);
    };
    match delete_manufacturer_service(manufacturer_id.get(), repo.get_ref()) {
        Ok(DeleteOutcome::Deleted) => {
            FlashMessage::success("Manufacturer deleted.").send();
            redirect(LIST_URL)
        }
        Ok(DeleteOutcome::AlreadyDeleted) | Err(ServiceError::NotFound) => redirect(LIST_URL),
        Ok(DeleteOutcome::Blocked(page)) => render_delete(&tera, &flash_messages, &page),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}
