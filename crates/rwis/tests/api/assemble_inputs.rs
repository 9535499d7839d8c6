use crate::helpers::{base_config, init_logger, station, value, MODEL_ID};
use rwis::{
    assemble_inputs,
    catalog::{
        FORECASTED_AIR_TEMPERATURE_2M, FORECASTED_CLOUD_COVER_OCTAS, FORECASTED_DEW_POINT_2M,
        FORECASTED_PRESSURE_MSL, FORECASTED_RAIN_ACCUMULATION_1H,
        FORECASTED_SNOW_ACCUMULATION_1H_CM, FORECASTED_SOLAR_FLUX, FORECASTED_WIND_SPEED_10M,
        MEASURED_AIR_TEMPERATURE_150CM, MEASURED_DEW_POINT_150CM,
        MEASURED_PRECIPITATION_INTENSITY, MEASURED_ROAD_CONDITION,
        MEASURED_ROAD_SURFACE_TEMPERATURE, MEASURED_WIND_SPEED_10M,
    },
    Catalog, DataSource, DescriptionConfig, ForecastTag, Location, MemoryStore,
    MetroLocationDescription, ObservationTag, ResolutionError, Resolver, SourcePriorityList,
};
use std::sync::Arc;

/// Fills the store with a value for every base source except sub-surface
/// temperature.
async fn store_without_subsurface(config: DescriptionConfig) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let at = station();
    for (parameter, sensor_id, reading) in [
        (MEASURED_AIR_TEMPERATURE_150CM, "rws-1", -3.4),
        (MEASURED_DEW_POINT_150CM, "rws-1", -5.1),
        (MEASURED_PRECIPITATION_INTENSITY, "rws-1", 0.0),
        (MEASURED_WIND_SPEED_10M, "rws-1", 5.0),
        (MEASURED_ROAD_CONDITION, "dsc-1", 1.0),
        (MEASURED_ROAD_SURFACE_TEMPERATURE, "dsc-1", -2.2),
    ] {
        store
            .record_measurement(parameter, sensor_id, &at, value(reading))
            .await;
    }
    for (parameter, reading) in [
        (FORECASTED_AIR_TEMPERATURE_2M, -2.9),
        (FORECASTED_DEW_POINT_2M, -4.0),
        (FORECASTED_RAIN_ACCUMULATION_1H, 0.2),
        (FORECASTED_SNOW_ACCUMULATION_1H_CM, 0.0),
        (FORECASTED_WIND_SPEED_10M, 5.0),
        (FORECASTED_PRESSURE_MSL, 101_325.0),
        (FORECASTED_CLOUD_COVER_OCTAS, 6.0),
        (FORECASTED_SOLAR_FLUX, 120.0),
    ] {
        store
            .record_forecast(parameter, "harmonie", &at, value(reading))
            .await;
    }
    store
        .upsert_description(MetroLocationDescription::try_from(config).unwrap())
        .await;
    store
}

fn resolver_over(store: Arc<MemoryStore>) -> Resolver {
    init_logger();
    Resolver::new(
        Arc::new(Catalog::standard().unwrap()),
        store.clone(),
        store,
    )
}

fn config_with_solar_flux(factor: f64) -> DescriptionConfig {
    let mut config = base_config();
    config.run_mode.use_solar_flux_forecast = true;
    config.flux_corrections.solar = factor;
    config.forecast_mappings.insert(
        ForecastTag::SolarFlux,
        SourcePriorityList::from(vec![DataSource::forecast(
            FORECASTED_SOLAR_FLUX,
            "harmonie",
            station(),
        )]),
    );
    config
}

#[tokio::test]
async fn applies_flux_correction_to_resolved_solar_flux() {
    let store = store_without_subsurface(config_with_solar_flux(0.5)).await;
    let resolver = resolver_over(store);

    let inputs = assemble_inputs(&resolver, &station(), MODEL_ID)
        .await
        .unwrap();

    let solar = &inputs.forecasts[&ForecastTag::SolarFlux];
    assert!((solar.value - 60.0).abs() < 1e-9);
    // uncorrected tags keep their converted value
    let pressure = &inputs.forecasts[&ForecastTag::Pressure];
    assert!((pressure.value - 1013.25).abs() < 1e-9);

    let infrared = ForecastTag::InfraredFlux;
    assert!(!inputs.forecasts.contains_key(&infrared));
    assert!(!inputs.missing_forecasts.contains_key(&infrared));
}

#[tokio::test]
async fn reports_unresolved_tags_without_failing_the_run() {
    let store = store_without_subsurface(config_with_solar_flux(1.0)).await;
    let resolver = resolver_over(store);

    let inputs = assemble_inputs(&resolver, &station(), MODEL_ID)
        .await
        .unwrap();

    assert!(!inputs.is_complete());
    assert_eq!(inputs.observations.len(), ObservationTag::ALL.len() - 1);
    assert!(matches!(
        inputs.missing_observations[&ObservationTag::SubSurfaceTemperature],
        ResolutionError::AllSourcesExhausted { .. }
    ));
    let observation = |tag: ObservationTag| inputs.observations[&tag].value;
    assert!((observation(ObservationTag::WindSpeed) - 18.0).abs() < 1e-9);
    assert_eq!(observation(ObservationTag::RoadCondition), 33.0);
    assert_eq!(observation(ObservationTag::PrecipitationPresence), 0.0);
    assert!(inputs.missing_forecasts.is_empty());

    let json = serde_json::to_value(&inputs).unwrap();
    assert_eq!(
        json["missing_observations"]["sst"],
        "All 1 data sources for observation <sst> failed"
    );
    assert_eq!(json["observations"]["st"]["value"], -2.2);
    let timestamp = &json["observations"]["st"]["timestamp"];
    assert_eq!(timestamp, "2024-01-10T06:00:00Z");
}

#[tokio::test]
async fn complete_inputs_when_every_tag_resolves() {
    let config = config_with_solar_flux(1.0);
    let store = store_without_subsurface(config).await;
    store
        .record_measurement(
            rwis::catalog::MEASURED_ROAD_SUBSURFACE_TEMPERATURE,
            "rws-1",
            &station(),
            value(0.3),
        )
        .await;
    let resolver = resolver_over(store);

    let inputs = assemble_inputs(&resolver, &station(), MODEL_ID)
        .await
        .unwrap();

    assert!(inputs.is_complete());
    assert_eq!(inputs.location, station());
    assert_eq!(inputs.model_id, MODEL_ID);
    assert_eq!(inputs.forecasts.len(), 8);
}

#[tokio::test]
async fn unknown_location_has_no_inputs() {
    let store = store_without_subsurface(base_config()).await;
    let resolver = resolver_over(store);

    let elsewhere = Location::new(61.5, 23.8);
    let error = assemble_inputs(&resolver, &elsewhere, MODEL_ID)
        .await
        .unwrap_err();
    assert!(matches!(error, ResolutionError::NoDescription { .. }));
}
