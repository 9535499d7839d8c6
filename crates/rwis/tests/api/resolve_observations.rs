use crate::helpers::{
    descriptions_returning, nearby, queried, query_log, resolver, sensor, station, value,
    with_observation_sources, MockDescriptions, MockValues, MODEL_ID,
};
use rwis::{
    catalog::{
        road_condition::{SENSOR_CRITICAL, SENSOR_UNKNOWN, SSI_ICING_RAIN},
        ConversionError, InvalidValue, MEASURED_PRECIPITATION_INTENSITY,
        MEASURED_RELATIVE_HUMIDITY, MEASURED_ROAD_CONDITION, MEASURED_ROAD_SURFACE_TEMPERATURE,
        MEASURED_WIND_SPEED_10M,
    },
    store::Error,
    CandidateFailure, DataSource, MetroTag, ObservationTag, ResolutionError, TimedValue,
    ValueStore,
};
use std::{sync::Arc, time::Duration};

#[tokio::test]
async fn falls_back_past_unavailable_sources_in_priority_order() {
    let log = query_log();
    let recorder = log.clone();
    let mut values = MockValues::new();
    values
        .expect_latest_measurement()
        .times(3)
        .returning(move |_, sensor_id, _| {
            recorder.lock().unwrap().push(sensor_id.to_owned());
            match sensor_id {
                "rws-3" => Ok(Some(value(10.0))),
                "rws-4" => Ok(Some(value(2.0))),
                _ => Ok(None),
            }
        });
    let description = with_observation_sources(
        ObservationTag::WindSpeed,
        vec![
            sensor(MEASURED_WIND_SPEED_10M, "rws-1"),
            sensor(MEASURED_WIND_SPEED_10M, "rws-2"),
            sensor(MEASURED_WIND_SPEED_10M, "rws-3"),
            sensor(MEASURED_WIND_SPEED_10M, "rws-4"),
        ],
    );
    let resolver = resolver(values, descriptions_returning(description));

    let resolved = resolver
        .resolve_observation_tag(ObservationTag::WindSpeed, &station(), MODEL_ID)
        .await
        .unwrap();

    assert_eq!(resolved.value, 36.0);
    assert_eq!(resolved.priority, 2);
    assert_eq!(resolved.source.source_id, "rws-3");
    assert_eq!(queried(&log), vec!["rws-1", "rws-2", "rws-3"]);
}

#[tokio::test]
async fn reports_every_failed_candidate_when_exhausted() {
    let mut values = MockValues::new();
    values
        .expect_latest_measurement()
        .times(3)
        .returning(|_, sensor_id, _| match sensor_id {
            "dsc-1" => Ok(None),
            "dsc-2" => Ok(Some(value(120.0))),
            _ => Err(Error::Unavailable(String::from("connection refused"))),
        });
    let description = with_observation_sources(
        ObservationTag::SurfaceTemperature,
        vec![
            sensor(MEASURED_ROAD_SURFACE_TEMPERATURE, "dsc-1"),
            sensor(MEASURED_ROAD_SURFACE_TEMPERATURE, "dsc-2"),
            sensor(MEASURED_ROAD_SURFACE_TEMPERATURE, "dsc-3"),
        ],
    );
    let resolver = resolver(values, descriptions_returning(description));

    let error = resolver
        .resolve_observation_tag(ObservationTag::SurfaceTemperature, &station(), MODEL_ID)
        .await
        .unwrap_err();

    let ResolutionError::AllSourcesExhausted { tag, attempts } = error else {
        panic!("expected exhausted sources, got {:?}", error);
    };
    assert_eq!(
        tag,
        MetroTag::Observation(ObservationTag::SurfaceTemperature)
    );
    assert_eq!(attempts.len(), 3);
    assert_eq!(attempts[0].failure, CandidateFailure::SourceUnavailable);
    assert!(matches!(
        attempts[1].failure,
        CandidateFailure::Invalid(InvalidValue::OutOfRange { value, .. }) if value == 120.0
    ));
    assert!(matches!(attempts[2].failure, CandidateFailure::Store(_)));
    assert_eq!(
        attempts.iter().map(|a| a.priority).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[tokio::test]
async fn out_of_range_value_falls_back_to_next_sensor() {
    let mut values = MockValues::new();
    values
        .expect_latest_measurement()
        .times(2)
        .returning(|_, sensor_id, _| match sensor_id {
            "dsc-1" => Ok(Some(value(-75.0))),
            _ => Ok(Some(value(-2.2))),
        });
    let description = with_observation_sources(
        ObservationTag::SurfaceTemperature,
        vec![
            sensor(MEASURED_ROAD_SURFACE_TEMPERATURE, "dsc-1"),
            sensor(MEASURED_ROAD_SURFACE_TEMPERATURE, "dsc-2"),
        ],
    );
    let resolver = resolver(values, descriptions_returning(description));

    let resolved = resolver
        .resolve_observation_tag(ObservationTag::SurfaceTemperature, &station(), MODEL_ID)
        .await
        .unwrap();
    assert_eq!(resolved.value, -2.2);
    assert_eq!(resolved.priority, 1);
}

#[tokio::test]
async fn precipitation_rate_resolves_to_presence_indicator() {
    for (rate, indicator) in [(2.5, 1.0), (0.0, 0.0)] {
        let mut values = MockValues::new();
        values
            .expect_latest_measurement()
            .times(1)
            .returning(move |_, _, _| Ok(Some(value(rate))));
        let description = with_observation_sources(
            ObservationTag::PrecipitationPresence,
            vec![sensor(MEASURED_PRECIPITATION_INTENSITY, "rws-1")],
        );
        let resolver = resolver(values, descriptions_returning(description));

        let resolved = resolver
            .resolve_observation_tag(ObservationTag::PrecipitationPresence, &station(), MODEL_ID)
            .await
            .unwrap();
        assert_eq!(resolved.value, indicator, "rate {}", rate);
    }
}

#[tokio::test]
async fn unmapped_road_condition_code_falls_back_to_next_sensor() {
    let mut values = MockValues::new();
    values
        .expect_latest_measurement()
        .times(2)
        .returning(|_, sensor_id, _| match sensor_id {
            "dsc-1" => Ok(Some(value(SENSOR_UNKNOWN))),
            _ => Ok(Some(value(SENSOR_CRITICAL))),
        });
    let description = with_observation_sources(
        ObservationTag::RoadCondition,
        vec![
            sensor(MEASURED_ROAD_CONDITION, "dsc-1"),
            DataSource::measurement(MEASURED_ROAD_CONDITION, "dsc-2", nearby()),
        ],
    );
    let resolver = resolver(values, descriptions_returning(description));

    let resolved = resolver
        .resolve_observation_tag(ObservationTag::RoadCondition, &station(), MODEL_ID)
        .await
        .unwrap();
    assert_eq!(resolved.value, SSI_ICING_RAIN);
    assert_eq!(resolved.value, 40.0);
    assert_eq!(resolved.source.location, nearby());
}

#[tokio::test]
async fn not_convertible_source_stops_resolution() {
    let log = query_log();
    let recorder = log.clone();
    let mut values = MockValues::new();
    values
        .expect_latest_measurement()
        .times(1)
        .returning(move |_, sensor_id, _| {
            recorder.lock().unwrap().push(sensor_id.to_owned());
            Ok(Some(value(85.0)))
        });
    let description = with_observation_sources(
        ObservationTag::DewPoint,
        vec![
            sensor(MEASURED_RELATIVE_HUMIDITY, "rws-1"),
            sensor(MEASURED_RELATIVE_HUMIDITY, "rws-2"),
        ],
    );
    let resolver = resolver(values, descriptions_returning(description));

    let error = resolver
        .resolve_observation_tag(ObservationTag::DewPoint, &station(), MODEL_ID)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ResolutionError::Misconfigured {
            error: ConversionError::NotConvertible { .. },
            ..
        }
    ));
    assert_eq!(queried(&log), vec!["rws-1"]);
}

#[tokio::test]
async fn road_condition_source_cannot_feed_air_temperature() {
    let log = query_log();
    let recorder = log.clone();
    let mut values = MockValues::new();
    values
        .expect_latest_measurement()
        .times(1)
        .returning(move |parameter, sensor_id, _| {
            assert_eq!(parameter, MEASURED_ROAD_CONDITION);
            recorder.lock().unwrap().push(sensor_id.to_owned());
            Ok(Some(value(SENSOR_CRITICAL)))
        });
    let description = with_observation_sources(
        ObservationTag::AirTemperature,
        vec![
            sensor(MEASURED_ROAD_CONDITION, "dsc-1"),
            sensor(MEASURED_ROAD_CONDITION, "dsc-2"),
        ],
    );
    let resolver = resolver(values, descriptions_returning(description));

    let error = resolver
        .resolve_observation_tag(ObservationTag::AirTemperature, &station(), MODEL_ID)
        .await
        .unwrap_err();

    let ResolutionError::Misconfigured { tag, error, .. } = error else {
        panic!("expected a configuration error, got {:?}", error);
    };
    let air_temperature = MetroTag::Observation(ObservationTag::AirTemperature);
    assert_eq!(tag, air_temperature);
    let expected = ConversionError::NotConvertible {
        label: MEASURED_ROAD_CONDITION.to_owned(),
        tag: air_temperature,
    };
    assert_eq!(error, expected);
    assert_eq!(queried(&log), vec!["dsc-1"]);
}

#[tokio::test]
async fn unknown_parameter_is_a_configuration_error() {
    let mut values = MockValues::new();
    values.expect_latest_measurement().never();
    let description = with_observation_sources(
        ObservationTag::AirTemperature,
        vec![sensor("Temperature in [deg F]", "rws-1")],
    );
    let resolver = resolver(values, descriptions_returning(description));

    let error = resolver
        .resolve_observation_tag(ObservationTag::AirTemperature, &station(), MODEL_ID)
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        ResolutionError::Misconfigured {
            error: ConversionError::UnknownParameter(_),
            ..
        }
    ));
}

#[tokio::test]
async fn missing_description_is_reported() {
    let mut descriptions = MockDescriptions::new();
    descriptions
        .expect_description()
        .times(1)
        .returning(|_, _| Ok(None));
    let resolver = resolver(MockValues::new(), descriptions);

    let error = resolver
        .resolve_observation_tag(ObservationTag::AirTemperature, &station(), "other-model")
        .await
        .unwrap_err();
    let expected = ResolutionError::NoDescription {
        location: station(),
        model_id: String::from("other-model"),
    };
    assert_eq!(error, expected);
}

#[tokio::test]
async fn description_store_failure_is_reported() {
    let mut descriptions = MockDescriptions::new();
    descriptions
        .expect_description()
        .returning(|_, _| Err(Error::Unavailable(String::from("timeout"))));
    let resolver = resolver(MockValues::new(), descriptions);

    let error = resolver
        .resolve_observation_tag(ObservationTag::AirTemperature, &station(), MODEL_ID)
        .await
        .unwrap_err();
    assert!(matches!(error, ResolutionError::DescriptionStore(_)));
}

/// Answers slowly for sensor "slow" and immediately for everything else.
struct SlowSensorStore;

#[async_trait::async_trait]
impl ValueStore for SlowSensorStore {
    async fn latest_measurement(
        &self,
        _parameter: &str,
        sensor_id: &str,
        _location: &rwis::Location,
    ) -> Result<Option<TimedValue>, Error> {
        if sensor_id == "slow" {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        Ok(Some(value(4.0)))
    }

    async fn latest_forecast(
        &self,
        _parameter: &str,
        _location: &rwis::Location,
        _model_id: &str,
    ) -> Result<Option<TimedValue>, Error> {
        Ok(None)
    }
}

#[tokio::test]
async fn timed_out_source_is_skipped() {
    crate::helpers::init_logger();
    let description = with_observation_sources(
        ObservationTag::WindSpeed,
        vec![
            sensor(MEASURED_WIND_SPEED_10M, "slow"),
            sensor(MEASURED_WIND_SPEED_10M, "fast"),
        ],
    );
    let resolver = rwis::Resolver::new(
        Arc::new(rwis::Catalog::standard().unwrap()),
        Arc::new(SlowSensorStore),
        Arc::new(descriptions_returning(description)),
    )
    .with_source_timeout(Duration::from_millis(50));

    let resolved = resolver
        .resolve_observation_tag(ObservationTag::WindSpeed, &station(), MODEL_ID)
        .await
        .unwrap();
    assert_eq!(resolved.source.source_id, "fast");
    assert_eq!(resolved.priority, 1);
    assert!((resolved.value - 14.4).abs() < 1e-9);
}
