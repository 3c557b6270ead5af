use crate::error::EncodingError;
use model::core::value::Value;

/// Moves text between the client's character set and the one the table
/// files are stored in. Applied to outgoing SQL text and string
/// parameters, and to string columns of every returned row.
pub trait TextCodec: Send + Sync {
    fn charset(&self) -> &str;

    fn encode(&self, text: &str) -> Result<String, EncodingError>;

    fn decode(&self, text: &str) -> Result<String, EncodingError>;

    fn encode_value(&self, value: &Value) -> Result<Value, EncodingError> {
        match value {
            Value::String(text) => Ok(Value::String(self.encode(text)?)),
            other => Ok(other.clone()),
        }
    }

    fn decode_value(&self, value: Value) -> Result<Value, EncodingError> {
        match value {
            Value::String(text) => Ok(Value::String(self.decode(&text)?)),
            other => Ok(other),
        }
    }
}

/// Leaves text untouched. Used when the driver already transcodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl TextCodec for Passthrough {
    fn charset(&self) -> &str {
        "utf-8"
    }

    fn encode(&self, text: &str) -> Result<String, EncodingError> {
        Ok(text.to_string())
    }

    fn decode(&self, text: &str) -> Result<String, EncodingError> {
        Ok(text.to_string())
    }
}
