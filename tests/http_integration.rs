// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP protocol using wiremock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use smartprugio_lib::accessory::{
    Accessory, Characteristic, CharacteristicValue, LightAccessory, ThermostatAccessory,
};
use smartprugio_lib::command::ControlRequest;
use smartprugio_lib::protocol::{HttpClient, HttpConfig, Protocol};
use smartprugio_lib::subscription::Subscribable;
use smartprugio_lib::types::{AttributeCode, Category, PowerState, TargetTemperature};
use smartprugio_lib::{Error, ProtocolError, find_attribute};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONTROL_PATH: &str = "/v1/control/device";

fn client_for(server: &MockServer) -> HttpClient {
    HttpConfig::new()
        .with_base_url(server.uri())
        .with_credentials("tok-123", "Bearer abc")
        .into_client()
        .unwrap()
}

fn listing(device_id: &str, attributes: &[(&str, &str)]) -> serde_json::Value {
    let attributes: Vec<_> = attributes
        .iter()
        .map(|(code, value)| serde_json::json!({"device_attr_cd": code, "attr_cont": value}))
        .collect();
    serde_json::json!([{
        "device_grp_list": [{
            "device_list": [{"device_id": device_id, "device_attr_list": attributes}]
        }]
    }])
}

// ============================================================================
// HttpClient Tests
// ============================================================================

mod http_client {
    use super::*;

    #[tokio::test]
    async fn list_devices_sends_query_and_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(CONTROL_PATH))
            .and(query_param("certf_tp_cd", "KAKAO"))
            .and(query_param("ctl_tp_cd", "LIGHTS"))
            .and(header("token", "tok-123"))
            .and(header("authorization", "Bearer abc"))
            .and(header("app_version", HttpConfig::DEFAULT_APP_VERSION))
            .and(header("user-agent", HttpConfig::DEFAULT_USER_AGENT))
            .and(header("accept-language", "en-US,en;q=0.9"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(listing("Lt01", &[("POWER", "ON")])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let listing = client.list_devices(Category::Lights).await.unwrap();

        assert_eq!(
            find_attribute(&listing, "Lt01", AttributeCode::Power),
            Some("ON")
        );
        assert!(listing.snapshot("Lt02").is_none());
    }

    #[tokio::test]
    async fn list_devices_uses_heating_category() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(CONTROL_PATH))
            .and(query_param("ctl_tp_cd", "HEATING"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(
                "Ht03",
                &[("POWER", "OFF"), ("HTEMPERATURE", "23"), ("CTEMPERATURE", "21.5")],
            )))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let listing = client.list_devices(Category::Heating).await.unwrap();
        let snapshot = listing.snapshot("Ht03").unwrap();

        assert_eq!(snapshot.get(AttributeCode::HeatingTemperature), Some("23"));
        assert_eq!(snapshot.get(AttributeCode::CurrentTemperature), Some("21.5"));
    }

    #[tokio::test]
    async fn control_device_posts_attribute_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(CONTROL_PATH))
            .and(header("token", "tok-123"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "certf_tp_cd": "KAKAO",
                "ctl_tp_cd": "HEATING",
                "device_tp_cd": "HEATING",
                "device_id": "Ht03",
                "device_attr_list": [
                    {"device_attr_cd": "POWER", "set_cont": "ON"},
                    {"device_attr_cd": "HTEMPERATURE", "set_cont": "22"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"result":"OK"}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let request = ControlRequest::new(Category::Heating, "Ht03")
            .power(PowerState::On)
            .heating_temperature(TargetTemperature::from_setpoint(22.0).unwrap());

        let response = client.control_device(&request).await.unwrap();
        assert!(response.body().contains("OK"));
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.list_devices(Category::Lights).await.unwrap_err();

        assert!(matches!(err, ProtocolError::Status { status: 503, .. }));
        assert!(Error::from(err).is_remote_unavailable());
    }

    #[tokio::test]
    async fn malformed_listing_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.list_devices(Category::Heating).await.unwrap_err();

        assert!(matches!(err, ProtocolError::Malformed(_)));
    }

    #[tokio::test]
    async fn slow_listing_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(listing("Lt01", &[("POWER", "ON")]))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let client = HttpConfig::new()
            .with_base_url(mock_server.uri())
            .with_credentials("tok-123", "Bearer abc")
            .with_read_timeout(Duration::from_millis(100))
            .into_client()
            .unwrap();

        let err = client.list_devices(Category::Lights).await.unwrap_err();
        assert!(matches!(err, ProtocolError::Timeout(100)));
    }
}

// ============================================================================
// Accessory Tests
// ============================================================================

mod accessories {
    use super::*;

    #[tokio::test]
    async fn light_get_reads_remote_and_notifies() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("ctl_tp_cd", "LIGHTS"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(listing("Lt01", &[("POWER", "ON")])),
            )
            .mount(&mock_server)
            .await;

        let light = LightAccessory::builder(Arc::new(client_for(&mock_server)), "Lt01")
            .with_poll_interval(Duration::ZERO)
            .build()
            .unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        light.on_updated(Characteristic::On, move |value| {
            sink.lock().unwrap().push(value);
        });

        let value = light.handle_get(Characteristic::On).await.unwrap();
        assert_eq!(value, CharacteristicValue::Bool(true));
        assert_eq!(*seen.lock().unwrap(), vec![CharacteristicValue::Bool(true)]);
    }

    #[tokio::test]
    async fn rapid_light_toggles_send_one_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(CONTROL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"result":"OK"}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let light = LightAccessory::builder(Arc::new(client_for(&mock_server)), "Lt01")
            .with_poll_interval(Duration::ZERO)
            .with_reconcile_delay(Duration::from_secs(60))
            .build()
            .unwrap();

        light.set_on(true).await;
        light.set_on(false).await;

        assert!(!light.is_on());
    }

    #[tokio::test]
    async fn thermostat_cool_mode_turns_heating_on() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(CONTROL_PATH))
            .and(body_json(serde_json::json!({
                "certf_tp_cd": "KAKAO",
                "ctl_tp_cd": "HEATING",
                "device_tp_cd": "HEATING",
                "device_id": "Ht03",
                "device_attr_list": [{"device_attr_cd": "POWER", "set_cont": "ON"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"result":"OK"}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let thermostat = ThermostatAccessory::builder(Arc::new(client_for(&mock_server)), "Ht03")
            .with_poll_interval(Duration::ZERO)
            .with_reconcile_delay(Duration::from_secs(60))
            .build()
            .unwrap();

        thermostat
            .handle_set(
                Characteristic::TargetHeatingCoolingState,
                CharacteristicValue::UInt(2),
            )
            .await
            .unwrap();

        assert_eq!(
            thermostat
                .handle_get(Characteristic::TargetHeatingCoolingState)
                .await
                .unwrap(),
            CharacteristicValue::UInt(1)
        );
    }

    #[tokio::test]
    async fn thermostat_set_point_is_reconciled() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"result":"OK"}"#))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(
                "Ht03",
                &[("POWER", "ON"), ("HTEMPERATURE", "22"), ("CTEMPERATURE", "19.5")],
            )))
            .expect(1)
            .mount(&mock_server)
            .await;

        let thermostat = ThermostatAccessory::builder(Arc::new(client_for(&mock_server)), "Ht03")
            .with_poll_interval(Duration::ZERO)
            .with_reconcile_delay(Duration::from_millis(50))
            .build()
            .unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        thermostat.on_characteristic_updated(move |characteristic, value| {
            sink.lock().unwrap().push((characteristic, value));
        });

        thermostat.set_target_temperature(21.6).await.unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;

        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 5);
        assert!(seen.contains(&(
            Characteristic::CurrentTemperature,
            CharacteristicValue::Float(19.5)
        )));
        assert!(seen.contains(&(
            Characteristic::TargetTemperature,
            CharacteristicValue::Float(22.0)
        )));
    }

    #[tokio::test]
    async fn thermostat_get_falls_back_to_cache_on_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let thermostat = ThermostatAccessory::builder(Arc::new(client_for(&mock_server)), "Ht03")
            .with_poll_interval(Duration::ZERO)
            .build()
            .unwrap();

        let cached = thermostat.state();
        let value = thermostat
            .handle_get(Characteristic::TargetTemperature)
            .await
            .unwrap();

        assert_eq!(
            value,
            CharacteristicValue::Float(cached.target_temperature().value())
        );
    }
}
