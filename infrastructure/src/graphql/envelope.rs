//! GraphQL response envelope handling

use resolver_application::UpstreamError;
use serde_json::{Map, Value};

/// Extract the first proposal from a `{"data": {"proposals": [...]}}` envelope.
///
/// Returns `{}` when the hub found no proposal.
pub fn first_proposal(envelope: Value) -> Result<Value, UpstreamError> {
    let Value::Object(mut root) = envelope else {
        return Err(UpstreamError::MalformedEnvelope(
            "response is not a JSON object".to_string(),
        ));
    };

    if let Some(errors) = root.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            return Err(UpstreamError::QueryRejected(error_messages(errors)));
        }
    }

    let data = match root.remove("data") {
        Some(Value::Object(data)) => data,
        _ => {
            return Err(UpstreamError::MalformedEnvelope(
                "missing \"data\" object".to_string(),
            ));
        }
    };

    match data.get("proposals") {
        None => Err(UpstreamError::MalformedEnvelope(
            "missing \"data.proposals\"".to_string(),
        )),
        Some(Value::Null) => Ok(Value::Object(Map::new())),
        Some(Value::Array(proposals)) => Ok(proposals
            .first()
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))),
        Some(_) => Err(UpstreamError::MalformedEnvelope(
            "\"data.proposals\" is not an array".to_string(),
        )),
    }
}

fn error_messages(errors: &[Value]) -> String {
    errors
        .iter()
        .map(|e| {
            e.get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| e.to_string())
        })
        .collect::<Vec<_>>()
        .join("; ")
}
