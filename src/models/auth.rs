use serde::{Deserialize, Serialize};

/// Login form values
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Status of a backend call. The backend reports numeric HTTP codes; anything
/// other than 200 is an error as far as the session flow is concerned.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(from = "u16", into = "u16")]
pub enum HttpStatus {
    Ok,
    Error(u16),
}

impl HttpStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, HttpStatus::Ok)
    }
}

impl From<u16> for HttpStatus {
    fn from(code: u16) -> Self {
        match code {
            200 => HttpStatus::Ok,
            other => HttpStatus::Error(other),
        }
    }
}

impl From<HttpStatus> for u16 {
    fn from(status: HttpStatus) -> Self {
        match status {
            HttpStatus::Ok => 200,
            HttpStatus::Error(code) => code,
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult {
    pub status_code: HttpStatus,
    #[serde(default)]
    pub body: Option<ApiErrorBody>,
}

/// Credential set minted by the authentication backend
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expiration_time: String,
}

impl TokenInfo {
    pub fn new(
        token: impl Into<String>,
        refresh_token: Option<String>,
        expiration_time: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            refresh_token,
            expiration_time: expiration_time.into(),
        }
    }
}

/// Result of a login or token refresh call
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ApiLoginResult {
    pub api_result: ApiResult,
    #[serde(default)]
    pub token: Option<TokenInfo>,
}

impl ApiLoginResult {
    pub fn ok(token: TokenInfo) -> Self {
        Self {
            api_result: ApiResult {
                status_code: HttpStatus::Ok,
                body: None,
            },
            token: Some(token),
        }
    }

    pub fn error(status: u16, message: Option<String>) -> Self {
        Self {
            api_result: ApiResult {
                status_code: HttpStatus::from(status),
                body: Some(ApiErrorBody { message }),
            },
            token: None,
        }
    }

    /// Token set, only when the call succeeded AND actually carries a token
    pub fn accepted_token(&self) -> Option<&TokenInfo> {
        if !self.api_result.status_code.is_ok() {
            return None;
        }
        self.token.as_ref().filter(|t| !t.token.is_empty())
    }

    /// Human readable message sent by the backend, if any
    pub fn error_message(&self) -> Option<&str> {
        self.api_result
            .body
            .as_ref()
            .and_then(|b| b.message.as_deref())
            .filter(|m| !m.is_empty())
    }
}
