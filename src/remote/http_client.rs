use super::*;

impl HttpSubtreeFetcher {
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::Response,
        id: EmployeeId,
    ) -> Result<reqwest::Response, TransportError> {
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TransportError::Unauthorized);
        }
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(TransportError::Forbidden { id });
        }
        if !status.is_success() {
            return Err(TransportError::Status {
                id,
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }

    pub(super) fn auth(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
