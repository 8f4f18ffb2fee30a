use tracing::debug;

use crate::models::{NotificationError, TemplateValues};

/// Tokens a template author may use. Validation is an authoring-time helper;
/// rendering never rejects a template.
pub const ALLOWED_PLACEHOLDERS: [&str; 3] = ["patientName", "nextControlDate", "centerName"];

/// Substitute the known placeholders into a free-text template. Unknown
/// placeholders stay as literal text. Single pass over the template, so
/// substituted values are emitted verbatim and never expanded themselves.
pub fn render_template(template: &str, values: &TemplateValues) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        rest = &rest[open + 1..];

        let Some(close) = rest.find('}') else {
            out.push('{');
            break;
        };

        let replacement = match &rest[..close] {
            "patientName" => Some(values.patient_name.as_str()),
            "nextControlDate" => Some(values.next_control_date.as_str()),
            "centerName" => Some(values.center_name.as_str()),
            _ => None,
        };

        match replacement {
            Some(value) => {
                out.push_str(value);
                rest = &rest[close + 1..];
            }
            // Unknown token: the brace is literal, keep scanning after it
            None => out.push('{'),
        }
    }

    out.push_str(rest);
    out
}

/// Collect placeholder names outside the allowed set, in order of appearance.
/// Meant for center admins editing templates, not for send time.
pub fn unknown_placeholders(template: &str) -> Vec<String> {
    let mut unknown = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rest = &rest[open + 1..];
        let Some(close) = rest.find('}') else {
            break;
        };
        let name = &rest[..close];
        rest = &rest[close + 1..];

        if name.is_empty() || name.contains('{') {
            continue;
        }
        if !ALLOWED_PLACEHOLDERS.contains(&name) && !unknown.iter().any(|u| u == name) {
            unknown.push(name.to_string());
        }
    }

    unknown
}

/// Build the outbound deep link: `<base>/<digits>?text=<urlencoded message>`.
/// The phone is reduced to digits; anything without digits is refused.
pub fn build_whatsapp_link(
    base_url: &str,
    phone: &str,
    message: &str,
) -> Result<String, NotificationError> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(NotificationError::InvalidPhone(phone.to_string()));
    }

    let url = format!(
        "{}/{}?text={}",
        base_url.trim_end_matches('/'),
        digits,
        urlencoding::encode(message)
    );
    debug!("Built whatsapp link for {} digits", digits.len());

    Ok(url)
}
