//! Fill the configured database with a small demo catalog.
//!
//! Records go through the regular create services, so running the seeder
//! twice leaves one copy of each fixture.

use dotenvy::dotenv;

use kbstore_catalog::db::{establish_connection_pool, run_migrations};
use kbstore_catalog::forms::categories::CategoryForm;
use kbstore_catalog::forms::keyboards::KeyboardForm;
use kbstore_catalog::forms::manufacturers::ManufacturerForm;
use kbstore_catalog::models::config::ServerConfig;
use kbstore_catalog::repository::DieselRepository;
use kbstore_catalog::services::FormOutcome;
use kbstore_catalog::services::categories::create_category;
use kbstore_catalog::services::keyboards::create_keyboard;
use kbstore_catalog::services::manufacturers::create_manufacturer;

const MANUFACTURERS: &[(&str, &str)] = &[
    (
        "Logitech",
        "Logitech International S.A. is a Swiss multinational manufacturer of computer peripherals and software, with headquarters in Lausanne, Switzerland, and Newark, California.",
    ),
    (
        "Roccat",
        "Roccat GmbH is a German computer accessories manufacturer based in Hamburg. It was also the titular sponsor of former German professional esports organization Team ROCCAT.",
    ),
    (
        "HyperX",
        "HyperX is the gaming division of a American multination computer technology company Kingston Technology.",
    ),
    (
        "Razer",
        "Razer Inc. is an American-Singaporean multinational technology company that designs, develops, and sells consumer electronics, financial services, and gaming hardware.",
    ),
    (
        "Dell",
        "Dell is an American technology company that develops, sells, repairs, and supports computers and related products and services and is owned by its parent company, Dell Technologies.",
    ),
];

const CATEGORIES: &[(&str, &str)] = &[
    (
        "Wireless",
        "Relying on a radio frequency antenna or infrared to keep you connected, wireless RF keyboards offer a bit of freedom in your computing activities.",
    ),
    (
        "Wired",
        "The \"traditional\" keyboard with a wire, sacrificing comfort for stability and speed.",
    ),
    (
        "Mechanical",
        "Designed in the likeness of old-fashioned typewriters, QWERTY is the most common keyboard layout. Generations of typists have come to know the QWERTY keyboard, and most students learn to type with this kind keyboard layout.",
    ),
    (
        "Membrane",
        "Membrane keyboards are designed without space between the individual keys. The keys are pressure-sensitive, with the different characters outlined on a flat surface.",
    ),
];

struct KeyboardFixture {
    name: &'static str,
    /// Index into `MANUFACTURERS`.
    manufacturer: usize,
    /// Indexes into `CATEGORIES`.
    categories: &'static [usize],
    description: &'static str,
    price: &'static str,
    stock: &'static str,
}

const KEYBOARDS: &[KeyboardFixture] = &[
    KeyboardFixture {
        name: "Razer BlackWidow V3 Mechanical Gaming Keyboard",
        manufacturer: 3,
        categories: &[1, 2],
        description: "Razer Yellow Mechanical Switches: Built for speed with an actuation point of just 1.2mm, these smooth switches have no tactile feedback and include sound dampeners to reduce its already low sound profile even further.",
        price: "139.99",
        stock: "5",
    },
    KeyboardFixture {
        name: "Logitech G613 LIGHTSPEED Wireless Mechanical Gaming Keyboard",
        manufacturer: 0,
        categories: &[0, 2],
        description: "Romer G mechanical switches deliver quiet, precise mechanical performance and 70 million click life for incredible feel and durability",
        price: "87.99",
        stock: "6",
    },
    KeyboardFixture {
        name: "Logitech G PRO Mechanical Gaming Keyboard",
        manufacturer: 0,
        categories: &[1, 2],
        description: "Built with and for esports athletes for competition-level performance, speed and precision.",
        price: "120.99",
        stock: "10",
    },
    KeyboardFixture {
        name: "ROCCAT Vulcan TKL",
        manufacturer: 1,
        categories: &[1, 2],
        description: "TITAN SWITCH MECHANICAL (TACTILE) - Designed and built entirely by ROCCAT engineers and developed for gamers who love the feel of mechanical switches, but demand the feel of the crisp, tactile bump and instant responsiveness",
        price: "129.99",
        stock: "2",
    },
    KeyboardFixture {
        name: "Dell Wired Keyboard - Black KB216",
        manufacturer: 4,
        categories: &[1, 3],
        description: "The Dell Wired Keyboard provides a convenient keyboard solution for everyday home or office computing uses.",
        price: "25.99",
        stock: "5",
    },
    KeyboardFixture {
        name: "Logitech K350",
        manufacturer: 0,
        categories: &[0, 3],
        description: "Wave design with Constant Curve layout: Curved layout guides hands into just the right position",
        price: "27.99",
        stock: "9",
    },
    KeyboardFixture {
        name: "Test Keyboard",
        manufacturer: 3,
        categories: &[0, 3],
        description: "Description of test keyboard",
        price: "5.99",
        stock: "3",
    },
];

fn saved_id<I: std::fmt::Display, D>(
    what: &str,
    outcome: FormOutcome<I, D>,
) -> Result<String, String> {
    match outcome {
        FormOutcome::Saved(id) => {
            log::info!("{what}: {id}");
            Ok(id.to_string())
        }
        FormOutcome::Invalid(invalid) => {
            Err(format!("{what} rejected: {}", invalid.errors.join(" ")))
        }
    }
}

fn populate(repo: &DieselRepository) -> Result<(), String> {
    let mut manufacturer_ids = Vec::with_capacity(MANUFACTURERS.len());
    for (name, description) in MANUFACTURERS {
        let form = ManufacturerForm {
            name: name.to_string(),
            description: description.to_string(),
        };
        let outcome = create_manufacturer(form, repo).map_err(|e| e.to_string())?;
        manufacturer_ids.push(saved_id(&format!("Manufacturer {name}"), outcome)?);
    }

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for (name, description) in CATEGORIES {
        let form = CategoryForm {
            name: name.to_string(),
            description: description.to_string(),
        };
        let outcome = create_category(form, repo).map_err(|e| e.to_string())?;
        category_ids.push(saved_id(&format!("Category {name}"), outcome)?);
    }

    for fixture in KEYBOARDS {
        let mut pairs = vec![
            ("name".to_string(), fixture.name.to_string()),
            (
                "manufacturer".to_string(),
                manufacturer_ids[fixture.manufacturer].clone(),
            ),
            ("description".to_string(), fixture.description.to_string()),
            ("price".to_string(), fixture.price.to_string()),
            ("stock".to_string(), fixture.stock.to_string()),
        ];
        pairs.extend(
            fixture
                .categories
                .iter()
                .map(|&index| ("category".to_string(), category_ids[index].clone())),
        );

        let outcome =
            create_keyboard(KeyboardForm::from(pairs), repo).map_err(|e| e.to_string())?;
        saved_id(&format!("Keyboard {}", fixture.name), outcome)?;
    }

    Ok(())
}

fn main() {
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

    let repo = DieselRepository::new(pool);
    if let Err(e) = populate(&repo) {
        log::error!("Seeding failed: {e}");
        std::process::exit(1);
    }

    log::info!("Catalog populated");
}
