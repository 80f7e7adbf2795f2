/// Shown when the backend gives no usable message for a failed login
pub const GENERIC_LOGIN_ERROR: &str = "General login error";

pub const NO_REFRESH_TOKEN_ERROR: &str = "No refresh token available";

/// DOM id of the `<script type="application/json">` carrying the server snapshot
pub const HYDRATION_SCRIPT_ID: &str = "__STOREFRONT_STATE__";

/// A refresh finished after the session it was started for had ended
pub const SESSION_ENDED_ERROR: &str = "Session ended during refresh";
