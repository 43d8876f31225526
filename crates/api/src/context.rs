use uuid::Uuid;

/// Per-request context, installed by the request middleware.
///
/// Handlers can extract it with `Extension<RequestContext>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: String,
}

impl RequestContext {
    /// Use the caller's `x-request-id` when present, otherwise mint one.
    pub fn from_header(header: Option<&str>) -> Self {
        let request_id = header
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::now_v7().to_string());
        Self { request_id }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_caller_id_or_mints_one() {
        assert_eq!(RequestContext::from_header(Some("abc")).request_id(), "abc");

        let minted = RequestContext::from_header(Some("  "));
        assert!(Uuid::parse_str(minted.request_id()).is_ok());
    }
}
