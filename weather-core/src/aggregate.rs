use crate::{
    model::{AggregatedTable, ReferenceCity},
    provider::WeatherProvider,
};

/// Fetch every reference city one after another and collect what succeeded.
///
/// A city whose request fails is logged and left out of the table; the loop
/// carries on with the rest. The caller replaces its previous table with the
/// result wholesale.
pub async fn aggregate(provider: &dyn WeatherProvider, cities: &[ReferenceCity]) -> AggregatedTable {
    let mut table = AggregatedTable::new();

    for city in cities {
        match provider.current(city.name).await {
            Ok(observation) => {
                table.insert(city.name.to_string(), observation);
            }
            Err(e) => {
                tracing::warn!(message = "failed to fetch reference city", city = %city.name, error = %e);
            }
        }
    }

    tracing::debug!(
        message = "aggregation finished",
        fetched = table.len(),
        requested = cities.len(),
    );

    table
}
