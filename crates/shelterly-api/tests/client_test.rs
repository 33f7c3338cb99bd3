#![allow(clippy::unwrap_used)]
// Integration tests for `ShelterClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shelterly_api::{
    AddressDto, Credentials, Error, NewShelterDto, ShelterClient, ShelterDto, ShelterTypeDto,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ShelterClient) {
    let server = MockServer::start().await;
    let client =
        ShelterClient::from_reqwest(&format!("{}/api", server.uri()), reqwest::Client::new())
            .unwrap();
    (server, client)
}

fn token() -> SecretString {
    SecretString::from("tok-123".to_string())
}

fn shelter_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "password": "pw",
        "phoneNumber": "630838080",
        "address": { "latitude": 40.4168, "longitude": -3.7038 },
        "shelterType": "shelterPoint",
        "photoURL": null
    })
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_sign_in_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/signin"))
        .and(body_json(json!({ "user": "validUser", "password": "validPassword" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["token", "id"])))
        .mount(&server)
        .await;

    let creds = Credentials::new("validUser", SecretString::from("validPassword".to_string()));
    let grant = client.sign_in(&creds).await.unwrap();

    assert_eq!(grant.token(), "token");
    assert_eq!(grant.shelter_id(), "id");
}

#[tokio::test]
async fn test_sign_in_rejected_carries_server_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/signin"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Wrong password" })),
        )
        .mount(&server)
        .await;

    let creds = Credentials::new("someone", SecretString::from("bad".to_string()));
    let result = client.sign_in(&creds).await;

    match result {
        Err(Error::Authentication { message }) => assert_eq!(message, "Wrong password"),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_sign_in_empty_token_is_no_token_found() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/signin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["", "id"])))
        .mount(&server)
        .await;

    let creds = Credentials::new("validUser", SecretString::from("validPassword".to_string()));
    let result = client.sign_in(&creds).await;

    match result {
        Err(Error::Authentication { message }) => assert_eq!(message, "No token found"),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_sign_up_surfaces_server_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "message": "A shelter with that name already exists" })),
        )
        .mount(&server)
        .await;

    let new_shelter = NewShelterDto {
        name: "Fran".into(),
        password: "pw".into(),
        phone_number: "600000000".into(),
        address: AddressDto {
            latitude: 1.0,
            longitude: 2.0,
        },
        shelter_type: ShelterTypeDto::Particular,
        photo_url: None,
    };
    let result = client.sign_up(&new_shelter).await;

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 409);
            assert_eq!(message, "A shelter with that name already exists");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_sign_up_accepts_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let new_shelter = NewShelterDto {
        name: "Fran".into(),
        password: "pw".into(),
        phone_number: "600000000".into(),
        address: AddressDto {
            latitude: 1.0,
            longitude: 2.0,
        },
        shelter_type: ShelterTypeDto::Veterinary,
        photo_url: None,
    };
    client.sign_up(&new_shelter).await.unwrap();
}

// ── Shelter tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_list_shelters() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/shelters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            shelter_json("1", "Fran"),
            shelter_json("2", "Lola"),
        ])))
        .mount(&server)
        .await;

    let shelters = client.list_shelters().await.unwrap();

    assert_eq!(shelters.len(), 2);
    assert_eq!(shelters[0].name, "Fran");
    assert_eq!(shelters[1].shelter_type, ShelterTypeDto::ShelterPoint);
}

#[tokio::test]
async fn test_get_shelter_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/shelters/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.get_shelter("missing").await.unwrap_err();
    assert!(err.is_not_found(), "expected not-found, got: {err:?}");
}

#[tokio::test]
async fn test_get_shelter_bad_json() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/shelters/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.get_shelter("1").await.unwrap_err();
    assert!(
        matches!(err, Error::Deserialization { ref body, .. } if body == "not json"),
        "expected Deserialization error, got: {err:?}"
    );
}

#[tokio::test]
async fn test_update_shelter_sends_bearer_token() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/shelters/1"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shelter_json("1", "Renamed")))
        .expect(1)
        .mount(&server)
        .await;

    let dto: ShelterDto = serde_json::from_value(shelter_json("1", "Renamed")).unwrap();
    let updated = client.update_shelter("1", &dto, &token()).await.unwrap();

    assert_eq!(updated, dto);
}

#[tokio::test]
async fn test_update_shelter_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/shelters/1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dto: ShelterDto = serde_json::from_value(shelter_json("1", "Renamed")).unwrap();
    let err = client
        .update_shelter("1", &dto, &token())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Unauthorized), "got: {err:?}");
}

#[tokio::test]
async fn test_upload_photo_is_multipart() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/shelters/1/photo"))
        .and(header("authorization", "Bearer tok-123"))
        .and(header_exists("content-type"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .upload_photo("1", vec![0xFF, 0xD8, 0xFF], "abc.jpg", &token())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"photo\""));
    assert!(body.contains("filename=\"abc.jpg\""));
}

#[tokio::test]
async fn test_server_error_without_body_uses_status_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/shelters"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.list_shelters().await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("500"), "message: {message}");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}
