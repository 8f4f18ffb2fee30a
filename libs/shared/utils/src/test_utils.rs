use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;

pub struct TestConfig {
    pub jwt_secret: String,
    pub store_url: String,
    pub store_anon_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            store_url: "http://localhost:54321".to_string(),
            store_anon_key: "test-anon-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_store_url(url: &str) -> Self {
        Self {
            store_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            store_url: self.store_url.clone(),
            store_anon_key: self.store_anon_key.clone(),
            store_jwt_secret: self.jwt_secret.clone(),
            whatsapp_base_url: "https://wa.me".to_string(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: "secretary".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn professional(email: &str) -> Self {
        Self::new(email, "professional")
    }

    pub fn secretary(email: &str) -> Self {
        Self::new(email, "secretary")
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, "admin")
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
            metadata: None,
            created_at: Some(Utc::now()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let claims = json!({
            "sub": user.id,
            "email": user.email,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp(),
            "aud": "authenticated"
        });

        let header_b64 = URL_SAFE_NO_PAD.encode(header.to_string());
        let claims_b64 = URL_SAFE_NO_PAD.encode(claims.to_string());
        let signing_input = format!("{}.{}", header_b64, claims_b64);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        format!("{}.{}", signing_input, signature)
    }
}

/// Canned store rows for wiremock-backed tests.
pub struct MockStoreResponses;

impl MockStoreResponses {
    pub fn center_response(center_id: &str, name: &str, suspended: bool) -> Value {
        json!({
            "id": center_id,
            "name": name,
            "suspended": suspended,
            "agenda_start": "08:00",
            "agenda_end": "21:00",
            "slot_minutes": 20,
            "created_at": Utc::now().to_rfc3339()
        })
    }

    pub fn open_slot_response(
        center_id: &str,
        professional_id: &str,
        date: &str,
        time: &str,
    ) -> Value {
        json!({
            "id": format!("{}:{}:{}:{}", center_id, professional_id, date, time),
            "center_id": center_id,
            "professional_id": professional_id,
            "date": date,
            "time": time,
            "status": "available",
            "patient_name": "",
            "patient_rut": "",
            "patient_phone": "",
            "patient_id": null,
            "active": true,
            "created_at": Utc::now().to_rfc3339()
        })
    }

    pub fn booked_slot_response(
        center_id: &str,
        professional_id: &str,
        date: &str,
        time: &str,
        patient_name: &str,
    ) -> Value {
        json!({
            "id": format!("{}:{}:{}:{}", center_id, professional_id, date, time),
            "center_id": center_id,
            "professional_id": professional_id,
            "date": date,
            "time": time,
            "status": "booked",
            "patient_name": patient_name,
            "patient_rut": "12.345.678-9",
            "patient_phone": "+56911112222",
            "patient_id": Uuid::new_v4().to_string(),
            "active": true,
            "created_at": Utc::now().to_rfc3339()
        })
    }
}
