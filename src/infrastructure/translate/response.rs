use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;

/// Literal line some responses lead with so the body cannot be pulled in as
/// a script; it is framing, never payload.
const ANTI_HIJACKING_PREFIX: &str = ")]}'";

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("no audio payload found in response")]
    NoAudioFound,
    #[error("malformed audio payload: {0}")]
    MalformedPayload(String),
    #[error("audio payload is not valid base64: {0}")]
    MalformedAudio(#[from] base64::DecodeError),
}

/// Pulls the audio bytes out of a raw batch-RPC response.
///
/// The body is not one JSON document but a stream of newline-separated
/// chunks: an optional anti-hijacking prefix, numeric chunk-length lines,
/// and JSON array records whose positions vary with server-side bookkeeping.
/// The scanner skips framing, opportunistically parses candidate lines, and
/// settles on the first record shaped like a speech reply: its first element
/// carries a non-null payload at index 2.
///
/// That payload is itself a JSON-encoded string array (the response mirrors
/// the request's double encoding); its first element is the base64 audio.
pub fn extract_audio(raw: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let text = String::from_utf8_lossy(raw);

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty()
            || line == ANTI_HIJACKING_PREFIX
            || line.starts_with(|c: char| c.is_ascii_digit())
        {
            continue;
        }
        if !line.starts_with('[') {
            continue;
        }

        // A candidate that fails to parse is more framing, not an error.
        let Ok(records) = serde_json::from_str::<Vec<Vec<Value>>>(line) else {
            continue;
        };
        let Some(reply) = records.first() else {
            continue;
        };
        if reply.len() > 2 && !reply[2].is_null() {
            return decode_payload(&reply[2]);
        }
    }

    Err(DecodeError::NoAudioFound)
}

fn decode_payload(payload: &Value) -> Result<Vec<u8>, DecodeError> {
    let payload = payload
        .as_str()
        .ok_or_else(|| DecodeError::MalformedPayload("payload is not a string".to_string()))?;

    let audio: Vec<String> = serde_json::from_str(payload).map_err(|e| {
        DecodeError::MalformedPayload(format!("nested payload is not a string array: {e}"))
    })?;

    let encoded = audio
        .first()
        .ok_or_else(|| DecodeError::MalformedPayload("nested payload array is empty".to_string()))?;

    Ok(BASE64.decode(encoded)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reply_line(audio: &[u8]) -> String {
        let payload =
            serde_json::to_string(&vec![BASE64.encode(audio)]).unwrap();
        serde_json::to_string(&serde_json::json!([
            ["wrb.fr", "jQ1olc", payload, null, null, null, "generic"],
            ["di", 208],
        ]))
        .unwrap()
    }

    #[test]
    fn decodes_a_bare_reply_line() {
        let raw = reply_line(b"mp3 bytes");
        assert_eq!(extract_audio(raw.as_bytes()).unwrap(), b"mp3 bytes");
    }

    #[test]
    fn tolerates_framing_around_the_reply() {
        let raw = format!(
            ")]}}'\n\n308\n[garbage that is not json\n[[\"di\",59]]\n{}\n25\n",
            reply_line(b"audio")
        );
        assert_eq!(extract_audio(raw.as_bytes()).unwrap(), b"audio");
    }

    #[test]
    fn handles_crlf_line_endings() {
        let raw = format!(")]}}'\r\n120\r\n{}\r\n", reply_line(b"audio"));
        assert_eq!(extract_audio(raw.as_bytes()).unwrap(), b"audio");
    }

    #[test]
    fn noise_only_stream_reports_no_audio() {
        let raw = b")]}'\n\n42\n1337\n[not json at all\n[\"flat\",\"array\"]\n";
        assert!(matches!(
            extract_audio(raw),
            Err(DecodeError::NoAudioFound)
        ));
    }

    #[test]
    fn empty_input_reports_no_audio() {
        assert!(matches!(extract_audio(b""), Err(DecodeError::NoAudioFound)));
    }

    #[test]
    fn reply_with_null_payload_is_not_a_match() {
        let raw = br#"[["wrb.fr","jQ1olc",null,null,null,null,"generic"]]"#;
        assert!(matches!(
            extract_audio(raw),
            Err(DecodeError::NoAudioFound)
        ));
    }

    #[test]
    fn skips_non_matching_records_before_the_reply() {
        // First record line has a short first element; the reply follows.
        let raw = format!("[[\"di\",59]]\n{}", reply_line(b"later"));
        assert_eq!(extract_audio(raw.as_bytes()).unwrap(), b"later");
    }

    #[test]
    fn non_string_payload_is_malformed() {
        let raw = br#"[["wrb.fr","jQ1olc",42,null,null,null,"generic"]]"#;
        assert!(matches!(
            extract_audio(raw),
            Err(DecodeError::MalformedPayload(_))
        ));
    }

    #[test]
    fn payload_that_is_not_nested_json_is_malformed() {
        let raw = br#"[["wrb.fr","jQ1olc","oops",null]]"#;
        assert!(matches!(
            extract_audio(raw),
            Err(DecodeError::MalformedPayload(_))
        ));
    }

    #[test]
    fn empty_nested_array_is_malformed() {
        let raw = br#"[["wrb.fr","jQ1olc","[]",null]]"#;
        assert!(matches!(
            extract_audio(raw),
            Err(DecodeError::MalformedPayload(_))
        ));
    }

    #[test]
    fn invalid_base64_is_malformed_audio() {
        let raw = br#"[["wrb.fr","jQ1olc","[\"!!! not base64 !!!\"]",null]]"#;
        assert!(matches!(
            extract_audio(raw),
            Err(DecodeError::MalformedAudio(_))
        ));
    }
}
