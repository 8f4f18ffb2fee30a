use axum::extract::{Extension, State};
use axum::Json;
use serde_json::json;

use notification_cell::handlers::{validate_template, whatsapp_link};
use notification_cell::models::{TemplateValues, ValidateTemplateRequest, WhatsappLinkRequest};
use shared_utils::test_utils::{TestConfig, TestUser};

fn secretary() -> Extension<shared_models::auth::User> {
    Extension(TestUser::secretary("staff@example.com").to_user())
}

#[tokio::test]
async fn whatsapp_link_handler_builds_a_deep_link() {
    let config = TestConfig::default().to_arc();

    let result = whatsapp_link(
        State(config),
        secretary(),
        Json(WhatsappLinkRequest {
            phone: "+56 9 1111 2222".to_string(),
            template: "Hola {patientName}, le escribe {centerName}".to_string(),
            placeholders: TemplateValues {
                patient_name: "Ana Rojas".to_string(),
                next_control_date: String::new(),
                center_name: "Centro Integral".to_string(),
            },
        }),
    )
    .await;

    let Json(body) = result.unwrap();
    assert_eq!(body["message"], "Hola Ana Rojas, le escribe Centro Integral");
    assert!(body["url"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/56911112222?text="));
}

#[tokio::test]
async fn whatsapp_link_handler_rejects_digitless_phones() {
    let config = TestConfig::default().to_arc();

    let result = whatsapp_link(
        State(config),
        secretary(),
        Json(WhatsappLinkRequest {
            phone: "sin fono".to_string(),
            template: "Hola".to_string(),
            placeholders: TemplateValues::default(),
        }),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn validate_template_handler_reports_unknown_tokens() {
    let result = validate_template(
        secretary(),
        Json(ValidateTemplateRequest {
            template: "Hola {patientName}, firma {doctorName}".to_string(),
        }),
    )
    .await;

    let Json(body) = result.unwrap();
    assert_eq!(body["valid"], json!(false));
    assert_eq!(body["unknown_placeholders"], json!(["doctorName"]));
}
