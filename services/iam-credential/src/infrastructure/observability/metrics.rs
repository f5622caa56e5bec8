//! IAM Credential Metrics
//!
//! 业务指标记录

use metrics::{counter, gauge};

/// 记录注册结果
pub fn record_registration(success: bool) {
    let labels = [("success", success.to_string())];
    counter!("iam_registrations_total", &labels).increment(1);
}

/// 记录登录尝试
pub fn record_login_attempt(success: bool) {
    let labels = [("success", success.to_string())];

    counter!("iam_login_attempts_total", &labels).increment(1);

    if success {
        counter!("iam_login_success_total").increment(1);
    } else {
        counter!("iam_login_failure_total").increment(1);
    }
}

/// 记录令牌撤销
pub fn record_token_revoked() {
    counter!("iam_tokens_revoked_total").increment(1);
}

/// 记录授权结果
pub fn record_authorization(success: bool) {
    let labels = [("success", success.to_string())];
    counter!("iam_authorizations_total", &labels).increment(1);
}

/// 设置当前黑名单条目数
pub fn set_revoked_tokens(count: usize) {
    gauge!("iam_revoked_tokens").set(count as f64);
}
