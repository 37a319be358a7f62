use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::keyboards::KeyboardDto;
use crate::forms::keyboards::{KeyboardDraft, KeyboardForm};
use crate::domain::types::KeyboardId;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_not_found, render_template};
use crate::services::keyboards::{
    create_keyboard as create_keyboard_service, delete_keyboard as delete_keyboard_service,
    keyboard_form_options, load_keyboard_form, show_delete_keyboard as show_delete_keyboard_service,
    show_keyboard as show_keyboard_service, show_keyboards as show_keyboards_service,
    update_keyboard as update_keyboard_service,
};
use crate::services::{DeleteOutcome, FormOutcome, ServiceError};

const LIST_URL: &str = "/catalog/keyboards";

/// Render the keyboard form with every manufacturer and category to choose from.
fn render_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    repo: &DieselRepository,
    title: &str,
    draft: &KeyboardDraft,
    errors: &[String],
) -> HttpResponse {
    let options = match keyboard_form_options(&draft.category, repo) {
        Ok(options) => options,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    let mut context = base_context(flash_messages, "keyboards", title);
    context.insert("keyboard", draft);
    context.insert("manufacturers", &options.manufacturers);
    context.insert("categories", &options.categories);
    context.insert("errors", errors);
    render_template(tera, "keyboards/form.html", &context)
}

fn render_delete(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    keyboard: &KeyboardDto,
) -> HttpResponse {
    let mut context = base_context(flash_messages, "keyboards", "Delete keyboard");
    context.insert("keyboard", keyboard);
    render_template(tera, "keyboards/delete.html", &context)
}

#[get("/catalog/keyboards")]
pub async fn show_keyboards(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_keyboards_service(repo.get_ref()) {
        Ok(keyboards) => {
            let mut context = base_context(&flash_messages, "keyboards", "List of keyboards");
            context.insert("keyboards", &keyboards);
            render_template(&tera, "keyboards/list.html", &context)
        }
        Err(ServiceError::NotFound) => render_not_found(&tera, &flash_messages),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[get("/catalog/keyboard/create")]
pub async fn create_keyboard_form(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_form(
        &tera,
        &flash_messages,
        repo.get_ref(),
        "Create keyboard",
        &KeyboardDraft::default(),
        &[],
    )
}

#[post("/catalog/keyboard/create")]
pub async fn create_keyboard(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(pairs): web::Form<Vec<(String, String)>>,
) -> impl Responder {
    match create_keyboard_service(KeyboardForm::from(pairs), repo.get_ref()) {
        Ok(FormOutcome::Saved(id)) => {
            FlashMessage::success("Keyboard saved.").send();
            redirect(&format!("/catalog/keyboard/{id}"))
        }
        Ok(FormOutcome::Invalid(invalid)) => render_form(
            &tera,
            &flash_messages,
            repo.get_ref(),
            "Create keyboard",
            &invalid.draft,
            &invalid.errors,
        ),
        Err(ServiceError::NotFound) => render_not_found(&tera, &flash_messages),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[get("/catalog/keyboard/{keyboard_id}")]
pub async fn show_keyboard(
    keyboard_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(keyboard_id) = KeyboardId::parse(&keyboard_id) else {
        return render_not_found(&tera, &flash_messages);
    };
    match show_keyboard_service(keyboard_id.get(), repo.get_ref()) {
        Ok(keyboard) => {
            let mut context = base_context(&flash_messages, "keyboards", "Keyboard detail");
            context.insert("keyboard", &keyboard);
            render_template(&tera, "keyboards/detail.html", &context)
        }
        Err(ServiceError::NotFound) => render_not_found(&tera, &flash_messages),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[get("/catalog/keyboard/{keyboard_id}/update")]
pub async fn update_keyboard_form(
    keyboard_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(keyboard_id) = KeyboardId::parse(&keyboard_id) else {
        return render_not_found(&tera, &flash_messages);
    };
    match load_keyboard_form(keyboard_id.get(), repo.get_ref()) {
        Ok(draft) => render_form(
            &tera,
            &flash_messages,
            repo.get_ref(),
            "Update keyboard",
            &draft,
            &[],
        ),
        Err(ServiceError::NotFound) => render_not_found(&tera, &flash_messages),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[post("/catalog/keyboard/{keyboard_id}/update")]
pub async fn update_keyboard(
    keyboard_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(pairs): web::Form<Vec<(String, String)>>,
) -> impl Responder {
    let Ok(keyboard_id) = KeyboardId::parse(&keyboard_id) else {
        return render_not_found(&tera, &flash_messages);
    };
    match update_keyboard_service(
        keyboard_id.get(),
        KeyboardForm::from(pairs),
        repo.get_ref(),
    ) {
        Ok(FormOutcome::Saved(id)) => {
            FlashMessage::success("Keyboard updated.").send();
            redirect(&format!("/catalog/keyboard/{id}"))
        }
        Ok(FormOutcome::Invalid(invalid)) => render_form(
            &tera,
            &flash_messages,
            repo.get_ref(),
            "Update keyboard",
            &invalid.draft,
            &invalid.errors,
        ),
        Err(ServiceError::NotFound) => render_not_found(&tera, &flash_messages),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[get("/catalog/keyboard/{keyboard_id}/delete")]
pub async fn delete_keyboard_form(
    keyboard_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(keyboard_id) = KeyboardId::parse(&keyboard_id) else {
        return redirect(LIST_URL);
    };
    match show_delete_keyboard_service(keyboard_id.get(), repo.get_ref()) {
        Ok(Some(keyboard)) => render_delete(&tera, &flash_messages, &keyboard),
        Ok(None) | Err(ServiceError::NotFound) => redirect(LIST_URL),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[post("/catalog/keyboard/{keyboard_id}/delete")]
pub async fn delete_keyboard(
    keyboard_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Ok(keyboard_id) = KeyboardId::parse(&keyboard_id) else {
        return redirect(LIST_URL);
    };
    match delete_keyboard_service(keyboard_id.get(), repo.get_ref()) {
        Ok(DeleteOutcome::Deleted) => {
            FlashMessage::success("Keyboard deleted.").send();
            redirect(LIST_URL)
        }
        Ok(DeleteOutcome::AlreadyDeleted) | Err(ServiceError::NotFound) => redirect(LIST_URL),
        Ok(DeleteOutcome::Blocked(never)) => match never {},
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}
