use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::categories::CategoryPageDto;
use crate::forms::categories::{CategoryDraft, CategoryForm};
use crate::domain::types::CategoryId;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_not_found, render_template};
use crate::services::categories::{
    create_category as create_category_service, delete_category as delete_category_service,
    load_category_form, show_categories as show_categories_service,
    show_category as show_category_service, show_delete_category as show_delete_category_service,
    update_category as update_category_service,
};
use crate::services::{DeleteOutcome, FormOutcome, ServiceError};

const LIST_URL: &str = "/catalog/categories";

fn render_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    title: &str,
    draft: &CategoryDraft,
    errors: &[String],
) -> HttpResponse {
    let mut context = base_context(flash_messages, "categories", title);
    context.insert("category", draft);
    context.insert("errors", errors);
    render_template(tera, "categories/form.html", &context)
}

fn render_delete(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    page: &CategoryPageDto,
) -> HttpResponse {
    let mut context = base_context(flash_messages, "categories", "Delete category");
    context.insert("category", &page.category);
    context.insert("keyboards", &page.keyboards);
    render_template(tera, "categories/delete.html", &context)
}

#[get("/catalog/categories")]
pub async fn show_categories(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_categories_service(repo.get_ref()) {
        Ok(categories) => {
            let mut context = base_context(&flash_messages, "categories", "List of categories");
            context.insert("categories", &categories);
            render_template(&tera, "categories/list.html", &context)
        }
        Err(ServiceError::NotFound) => render_not_found(&tera, &flash_messages),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[get("/catalog/category/create")]
pub async fn create_category_form(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_form(
        &tera,
        &flash_messages,
        "Create category",
        &CategoryDraft::default(),
        &[],
    )
}

#[post("/catalog/category/create")]
pub async fn create_category(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CategoryForm>,
) -> impl Responder {
    match create_category_service(form, repo.get_ref()) {
        Ok(FormOutcome::Saved(id)) => {
            FlashMessage::success("Category saved.").send();
            redirect(&format!("/catalog/category/{id}"))
        }
        Ok(FormOutcome::Invalid(invalid)) => render_form(
            &tera,
            &flash_messages,
            "Create category",
            &invalid.draft,
            &invalid.errors,
        ),
        Err(ServiceError::NotFound) => render_not_found(&tera, &flash_messages),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[get("/catalog/category/{category_id}")]
pub async fn show_category(
    category_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(category_id) = CategoryId::parse(&category_id) else {
        return render_not_found(&tera, &flash_messages);
    };
    match show_category_service(category_id.get(), repo.get_ref()) {
        Ok(page) => {
            let mut context = base_context(&flash_messages, "categories", "Category detail");
            context.insert("category", &page.category);
            context.insert("keyboards", &page.keyboards);
            render_template(&tera, "categories/detail.html", &context)
        }
        Err(ServiceError::NotFound) => render_not_found(&tera, &flash_messages),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[get("/catalog/category/{category_id}/update")]
pub async fn update_category_form(
    category_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(category_id) = CategoryId::parse(&category_id) else {
        return render_not_found(&tera, &flash_messages);
    };
    match load_category_form(category_id.get(), repo.get_ref()) {
        Ok(draft) => render_form(&tera, &flash_messages, "Update category", &draft, &[]),
        Err(ServiceError::NotFound) => render_not_found(&tera, &flash_messages),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[post("/catalog/category/{category_id}/update")]
pub async fn update_category(
    category_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CategoryForm>,
) -> impl Responder {
    let Ok(category_id) = CategoryId::parse(&category_id) else {
        return render_not_found(&tera, &flash_messages);
    };
    match update_category_service(category_id.get(), form, repo.get_ref()) {
        Ok(FormOutcome::Saved(id)) => {
            FlashMessage::success("Category updated.").send();
            redirect(&format!("/catalog/category/{id}"))
        }
        Ok(FormOutcome::Invalid(invalid)) => render_form(
            &tera,
            &flash_messages,
            "Update category",
            &invalid.draft,
            &invalid.errors,
        ),
        Err(ServiceError::NotFound) => render_not_found(&tera, &flash_messages),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[get("/catalog/category/{category_id}/delete")]
pub async fn delete_category_form(
    category_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(category_id) = CategoryId::parse(&category_id) else {
        return redirect(LIST_URL);
    };
    match show_delete_category_service(category_id.get(), repo.get_ref()) {
        Ok(Some(page)) => render_delete(&tera, &flash_messages, &page),
        Ok(None) | Err(ServiceError::NotFound) => redirect(LIST_URL),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

#[post("/catalog/category/{category_id}/delete")]
pub async fn delete_category(
    category_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(category_id) = CategoryId::parse(&category_id) else {
        return redirect(LIST_URL);
    };
    match delete_category_service(category_id.get(), repo.get_ref()) {
        Ok(DeleteOutcome::Deleted) => {
            FlashMessage::success("Category deleted.").send();
            redirect(LIST_URL)
        }
        Ok(DeleteOutcome::AlreadyDeleted) | Err(ServiceError::NotFound) => redirect(LIST_URL),
        Ok(DeleteOutcome::Blocked(page)) => render_delete(&tera, &flash_messages, &page),
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}
