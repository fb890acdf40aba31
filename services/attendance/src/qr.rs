//! QR encoding of session check-in payloads
//!
//! The engine never decodes QR images; clients decode them and submit the
//! contained session id with their check-in.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDateTime;
use qrcode::QrCode;
use qrcode::render::svg;
use serde_json::json;

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::WIRE_TIME_FORMAT;

/// Encode the `{session_id, expiry_time}` payload as a base64 SVG QR image
pub fn encode_session(session_id: i64, expiry_time: NaiveDateTime) -> AttendanceResult<String> {
    let payload = json!({
        "session_id": session_id,
        "expiry_time": expiry_time.format(WIRE_TIME_FORMAT).to_string(),
    });

    let code = QrCode::new(payload.to_string().as_bytes())
        .map_err(|e| AttendanceError::Encoding(e.to_string()))?;

    let image = code
        .render::<svg::Color>()
        .min_dimensions(240, 240)
        .build();

    Ok(STANDARD.encode(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn encodes_payload_as_base64_svg() {
        let expiry = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();

        let encoded = encode_session(7, expiry).unwrap();
        let decoded = STANDARD.decode(&encoded).unwrap();
        let svg_text = String::from_utf8(decoded).unwrap();
        assert!(svg_text.contains("<svg"));
    }
}
