use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use kbstore_catalog::repository::DieselRepository;
use kbstore_catalog::routes::categories::{delete_category_form, show_category};
use kbstore_catalog::routes::keyboards::{delete_keyboard, update_keyboard_form};
use tera::Tera;

mod common;

#[actix_web::test]
async fn malformed_ids_are_treated_as_missing() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let tera = Tera::new("templates/**/*").expect("templates should parse");
    let store = CookieMessageStore::builder(Key::generate()).build();

    let app = test::init_service(
        App::new()
            .wrap(FlashMessagesFramework::builder(store).build())
            .service(show_category)
            .service(delete_category_form)
            .service(update_keyboard_form)
            .service(delete_keyboard)
            .app_data(web::Data::new(repo))
            .app_data(web::Data::new(tera)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/catalog/category/abc/delete")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/catalog/categories"
    );

    let req = test::TestRequest::post()
        .uri("/catalog/keyboard/-4/delete")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/catalog/keyboards"
    );

    for uri in ["/catalog/category/abc", "/catalog/keyboard/0/update"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("The page you asked for does not exist."));
    }
}
