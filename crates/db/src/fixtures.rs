use rust_decimal::Decimal;

use catalog_core::domain::product::ProductDraft;

use crate::repositories::{ProductRepository, RepositoryError};

struct SeedProduct {
    name: &'static str,
    category: &'static str,
    summary: &'static str,
    description: &'static str,
    image_file: &'static str,
    /// Price in cents.
    price_cents: i64,
}

/// Demo catalog loaded into an empty store.
const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "IPhone X",
        category: "Smart Phone",
        summary: "Edge-to-edge OLED display with face unlock.",
        description: "5.8-inch display, dual rear cameras, wireless charging.",
        image_file: "product-1.png",
        price_cents: 95000,
    },
    SeedProduct {
        name: "Samsung 10",
        category: "Smart Phone",
        summary: "Infinity display with ultrasonic fingerprint reader.",
        description: "6.1-inch dynamic AMOLED, triple camera, reverse wireless charging.",
        image_file: "product-2.png",
        price_cents: 84000,
    },
    SeedProduct {
        name: "Bosch Serie 6 Washer",
        category: "White Appliances",
        summary: "Compact front-loading washer with steam care.",
        description: "8 kg drum, 1400 rpm spin, energy class A+++.",
        image_file: "product-3.png",
        price_cents: 65000,
    },
    SeedProduct {
        name: "Beko Fridge Freezer",
        category: "White Appliances",
        summary: "Frost-free fridge freezer with inverter compressor.",
        description: "330 litre capacity, multi-airflow cooling, quiet operation.",
        image_file: "product-4.png",
        price_cents: 47000,
    },
    SeedProduct {
        name: "HTC U11+ Plus",
        category: "Smart Phone",
        summary: "Squeezable edge sense frame and liquid surface glass.",
        description: "6-inch display, 6 GB RAM, HTC USonic audio.",
        image_file: "product-5.png",
        price_cents: 38000,
    },
    SeedProduct {
        name: "Panasonic Inverter Microwave",
        category: "Home Kitchen",
        summary: "Countertop microwave with smart inverter heating.",
        description: "25 litre cavity, grill mode, auto defrost by weight.",
        image_file: "product-6.png",
        price_cents: 24000,
    },
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedResult {
    pub inserted: usize,
    pub skipped_existing: bool,
}

pub struct CatalogSeed;

impl CatalogSeed {
    pub fn drafts() -> Vec<ProductDraft> {
        SEED_PRODUCTS
            .iter()
            .map(|seed| ProductDraft {
                name: seed.name.to_string(),
                category: seed.category.to_string(),
                summary: Some(seed.summary.to_string()),
                description: Some(seed.description.to_string()),
                image_file: Some(seed.image_file.to_string()),
                price: Decimal::new(seed.price_cents, 2),
            })
            .collect()
    }

    /// Inserts the demo catalog unless the store already holds products.
    pub async fn load(repository: &dyn ProductRepository) -> Result<SeedResult, RepositoryError> {
        if !repository.list_all().await?.is_empty() {
            return Ok(SeedResult { inserted: 0, skipped_existing: true });
        }

        let mut inserted = 0;
        for draft in Self::drafts() {
            repository.insert(draft).await?;
            inserted += 1;
        }

        Ok(SeedResult { inserted, skipped_existing: false })
    }
}
