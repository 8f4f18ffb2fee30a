use assert_matches::assert_matches;

use notification_cell::models::{NotificationError, TemplateValues};
use notification_cell::services::whatsapp::{
    build_whatsapp_link, render_template, unknown_placeholders,
};

fn values() -> TemplateValues {
    TemplateValues {
        patient_name: "Ana Rojas".to_string(),
        next_control_date: "2030-06-15".to_string(),
        center_name: "Centro Integral".to_string(),
    }
}

#[test]
fn renders_all_known_placeholders() {
    let message = render_template(
        "Hola {patientName}, su control en {centerName} es el {nextControlDate}.",
        &values(),
    );
    assert_eq!(
        message,
        "Hola Ana Rojas, su control en Centro Integral es el 2030-06-15."
    );
}

#[test]
fn unknown_placeholders_stay_literal_when_rendering() {
    let message = render_template("Hola {patientName}, firma: {doctorName}", &values());
    assert_eq!(message, "Hola Ana Rojas, firma: {doctorName}");
}

#[test]
fn repeated_placeholders_are_all_substituted() {
    let message = render_template("{patientName} {patientName}", &values());
    assert_eq!(message, "Ana Rojas Ana Rojas");
}

#[test]
fn substituted_values_are_emitted_verbatim() {
    // A value that looks like a placeholder must not be expanded again
    let mut vals = values();
    vals.patient_name = "{centerName}".to_string();

    let message = render_template("Hola {patientName} de {centerName}", &vals);
    assert_eq!(message, "Hola {centerName} de Centro Integral");
}

#[test]
fn validation_flags_only_out_of_set_placeholders() {
    let unknown =
        unknown_placeholders("Hola {patientName}, {doctorName} le espera en {centerName} ({sede})");
    assert_eq!(unknown, vec!["doctorName", "sede"]);
}

#[test]
fn validation_accepts_a_clean_template() {
    assert!(unknown_placeholders("Hola {patientName}, nos vemos el {nextControlDate}").is_empty());
    assert!(unknown_placeholders("Sin marcadores").is_empty());
}

#[test]
fn validation_reports_each_unknown_once_and_skips_unclosed_braces() {
    assert_eq!(unknown_placeholders("{x} {x} {y"), vec!["x"]);
    assert!(unknown_placeholders("llaves {} vacías").is_empty());
}

#[test]
fn link_uses_digits_only_phone_and_encodes_the_message() {
    let url = build_whatsapp_link(
        "https://wa.me",
        "+56 9 1111-2222",
        "Hola Ana, ¿confirma su hora?",
    )
    .unwrap();

    assert!(url.starts_with("https://wa.me/56911112222?text="));
    assert!(!url.contains(' '));
    assert!(url.contains("%20"));
}

#[test]
fn phone_without_digits_is_refused() {
    let err = build_whatsapp_link("https://wa.me", "no-phone", "Hola").unwrap_err();
    assert_matches!(err, NotificationError::InvalidPhone(_));
}

#[test]
fn trailing_slash_on_base_url_is_tolerated() {
    let url = build_whatsapp_link("https://wa.me/", "56911112222", "Hola").unwrap();
    assert!(url.starts_with("https://wa.me/56911112222?text="));
}
