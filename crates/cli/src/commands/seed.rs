use crate::commands::{load_sqlite_config, runtime, CommandResult};
use catalog_db::{connect_with_settings, migrations, CatalogSeed, SeedResult, SqlProductRepository};

pub fn run() -> CommandResult {
    let config = match load_sqlite_config("seed") {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let runtime = match runtime("seed") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        if let Err(error) = migrations::run_pending(&pool).await {
            pool.close().await;
            return Err(("migration", error.to_string(), 5u8));
        }

        let repository = SqlProductRepository::new(pool);
        let seeded = CatalogSeed::load(&repository)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), 5u8));
        repository.pool().close().await;
        seeded
    });

    match result {
        Ok(seeded) => CommandResult::success("seed", seed_message(&seeded)),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}

fn seed_message(result: &SeedResult) -> String {
    if result.skipped_existing {
        "catalog already holds products; seed skipped".to_string()
    } else {
        format!("seeded {} demo products", result.inserted)
    }
}
