use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use dotenvy::dotenv;
use tera::Tera;

use kbstore_catalog::db::{establish_connection_pool, run_migrations};
use kbstore_catalog::models::config::ServerConfig;
use kbstore_catalog::repository::DieselRepository;
use kbstore_catalog::routes::categories::{
    create_category, create_category_form, delete_category, delete_category_form,
    show_categories, show_category, update_category, update_category_form,
};
use kbstore_catalog::routes::keyboards::{
    create_keyboard, create_keyboard_form, delete_keyboard, delete_keyboard_form, show_keyboard,
    show_keyboards, update_keyboard, update_keyboard_form,
};
use kbstore_catalog::routes::main::{index, not_found, root};
use kbstore_catalog::routes::manufacturers::{
    create_manufacturer, create_manufacturer_form, delete_manufacturer, delete_manufacturer_form,
    show_manufacturer, show_manufacturers, update_manufacturer, update_manufacturer_form,
};

/// Cookie signing key. A short or missing secret gets a random key, which
/// invalidates pending flash messages on restart.
fn flash_key(secret: &str) -> Key {
    match Key::try_from(secret.as_bytes()) {
        Ok(key) => key,
        Err(_) => {
            log::warn!("Secret is shorter than 64 bytes, generating a random signing key");
            Key::generate()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load server config: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run database migrations: {e}");
        std::process::exit(1);
    }

    let tera = match Tera::new(&server_config.templates_dir) {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Failed to parse templates: {e}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);
    let message_store = CookieMessageStore::builder(flash_key(&server_config.secret)).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting catalog on http://{}:{}",
        server_config.address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(root)
            .service(index)
            .service(show_categories)
            .service(create_category_form)
            .service(create_category)
            .service(show_category)
            .service(update_category_form)
            .service(update_category)
            .service(delete_category_form)
            .service(delete_category)
            .service(show_manufacturers)
            .service(create_manufacturer_form)
            .service(create_manufacturer)
            .service(show_manufacturer)
            .service(update_manufacturer_form)
            .service(update_manufacturer)
            .service(delete_manufacturer_form)
            .service(delete_manufacturer)
            .service(show_keyboards)
            .service(create_keyboard_form)
            .service(create_keyboard)
            .service(show_keyboard)
            .service(update_keyboard_form)
            .service(update_keyboard)
            .service(delete_keyboard_form)
            .service(delete_keyboard)
            .default_service(web::route().to(not_found))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(tera.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
