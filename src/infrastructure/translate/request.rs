use crate::domain::synthesis::Opt;
use serde_json::json;

/// Procedure id of the text-to-speech call within the batch-RPC surface.
const RPC_ID: &str = "jQ1olc";

/// Serializing well-formed options cannot realistically fail; an instance of
/// this error is a defect, not a user problem.
#[derive(Debug, thiserror::Error)]
#[error("failed to serialize request envelope: {0}")]
pub struct EnvelopeError(#[from] serde_json::Error);

/// Builds the `application/x-www-form-urlencoded` body for one synthesis
/// call.
///
/// The endpoint takes call arguments as a JSON *string* inside the outer
/// envelope, so the argument array is serialized twice:
///
/// ```text
/// f.req=[[["jQ1olc","[\"<text>\",\"<voice>\",null,null,[<speed>]]",null,"generic"]]]
/// ```
///
/// The envelope nests two extra array levels because the endpoint is a
/// multi-call batch surface; this client only ever places the one call.
/// Output is deterministic: equal options produce byte-identical bodies.
pub fn form_body(opt: &Opt) -> Result<String, EnvelopeError> {
    let args = json!([opt.text, opt.voice, null, null, [opt.speed.code()]]);
    let args = serde_json::to_string(&args)?;

    let envelope = json!([[[RPC_ID, args, null, "generic"]]]);
    let envelope = serde_json::to_string(&envelope)?;

    Ok(format!("f.req={}", urlencoding::encode(&envelope)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::synthesis::{Speed, Voice};
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn opt(text: &str, voice: &str, speed: Speed) -> Opt {
        Opt::new(text, Voice::new(voice), speed)
    }

    fn decode_envelope(body: &str) -> Value {
        let encoded = body.strip_prefix("f.req=").expect("f.req form field");
        let raw = urlencoding::decode(encoded).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn wraps_arguments_in_the_batch_envelope() {
        let body = form_body(&opt("hello", "en", Speed::Normal)).unwrap();
        let envelope = decode_envelope(&body);

        let call = &envelope[0][0];
        assert_eq!(call[0], "jQ1olc");
        assert_eq!(call[2], Value::Null);
        assert_eq!(call[3], "generic");

        // The arguments ride along as a string, not a nested structure.
        let args: Value = serde_json::from_str(call[1].as_str().unwrap()).unwrap();
        assert_eq!(args, json!(["hello", "en", null, null, [0]]));
    }

    #[test]
    fn speed_code_reaches_the_arguments() {
        let body = form_body(&opt("x", "th", Speed::Slowest)).unwrap();
        let envelope = decode_envelope(&body);

        let args: Value =
            serde_json::from_str(envelope[0][0][1].as_str().unwrap()).unwrap();
        assert_eq!(args[4], json!([2]));
    }

    #[test]
    fn encoding_is_deterministic() {
        let opt = opt("สวัสดีชาวโลก", "th", Speed::Slower);
        assert_eq!(form_body(&opt).unwrap(), form_body(&opt).unwrap());
    }

    #[test]
    fn unicode_text_survives_the_double_encoding() {
        let body = form_body(&opt("สวัสดีชาวโลก", "th", Speed::Normal)).unwrap();
        let envelope = decode_envelope(&body);

        let args: Value =
            serde_json::from_str(envelope[0][0][1].as_str().unwrap()).unwrap();
        assert_eq!(args[0], "สวัสดีชาวโลก");
        assert_eq!(args[1], "th");
    }
}
