use serde::{Deserialize, Serialize};

/// Every v3 route wraps its payload in a `data` field.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct DataEnvelope<T> {
    pub(crate) data: T,
}
