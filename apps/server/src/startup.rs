//! Server startup and initialization
//!
//! Optional sample data for fresh databases.

use crate::{
    models::{Country, Entity, Greeting},
    services::CrudService,
    state::AppState,
    Result,
};

const SAMPLE_COUNTRIES: &[(&str, &str)] = &[("Germany", "Berlin"), ("France", "Paris")];
const SAMPLE_GREETINGS: &[(&str, &str)] = &[("Hello World!", "en"), ("Hola Mundo!", "es")];

/// Insert a few countries and greetings, but only into tables that are still empty.
pub async fn seed_sample_data(state: &AppState) -> Result<()> {
    let countries: Vec<Country> = SAMPLE_COUNTRIES
        .iter()
        .map(|&(name, capital)| Country::new(name, capital))
        .collect();
    seed(state.country_service.as_ref(), countries).await?;

    let greetings: Vec<Greeting> = SAMPLE_GREETINGS
        .iter()
        .map(|&(text, language)| Greeting::new(text, language))
        .collect();
    seed(state.greeting_service.as_ref(), greetings).await?;

    Ok(())
}

async fn seed<E: Entity>(service: &CrudService<E>, samples: Vec<E>) -> Result<()> {
    if !service.find_all().await?.is_empty() {
        tracing::debug!(entity = E::NAME, "Table not empty, skipping sample data");
        return Ok(());
    }

    let inserted = samples.len();
    for sample in samples {
        service.create(sample).await?;
    }

    tracing::info!(entity = E::NAME, inserted, "Seeded sample data");
    Ok(())
}
