//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps to HTTP status codes.

/// エラー種別の列挙体
///
/// HTTP ステータスコードに対応するエラー分類を定義します。
/// 各バリアントは RFC 7231/9110 に準拠したステータスコードにマッピングされます。
/// 4xx はフォーム入力や認証情報の問題、5xx はこのサービスまたは
/// ユーザープール側の問題を表します。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Unauthorized;
/// assert_eq!(kind.status_code(), 401);
/// assert_eq!(kind.as_str(), "Unauthorized");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - Bad Request: フォーム入力や確認コードの不備
    BadRequest,
    /// 401 - Unauthorized: 認証情報の誤り、またはセッションなし
    Unauthorized,
    /// 403 - Forbidden: 未確認アカウントなど、操作が許可されない状態
    Forbidden,
    /// 409 - Conflict: 登録済みメールアドレスでのサインアップ
    Conflict,
    /// 410 - Gone: 確認コードの有効期限切れ
    Gone,
    /// 422 - Unprocessable Entity: パスワードポリシー違反
    UnprocessableEntity,
    /// 429 - Too Many Requests: ユーザープール側のレート制限・試行回数超過
    TooManyRequests,
    /// 500 - Internal Server Error: プール/クライアント ID の設定不備など
    InternalServerError,
    /// 502 - Bad Gateway: ユーザープールからの不正な応答
    BadGateway,
    /// 503 - Service Unavailable: ユーザープールに到達できない
    ServiceUnavailable,
    /// 504 - Gateway Timeout: ユーザープールの応答待ちタイムアウト
    GatewayTimeout,
}

impl ErrorKind {
    /// HTTP ステータスコードを取得
    ///
    /// ## Returns
    /// RFC 7231/9110 に準拠した HTTP ステータスコード
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::BadRequest.status_code(), 400);
    /// assert_eq!(ErrorKind::GatewayTimeout.status_code(), 504);
    /// ```
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::Conflict => 409,
            ErrorKind::Gone => 410,
            ErrorKind::UnprocessableEntity => 422,
            ErrorKind::TooManyRequests => 429,
            ErrorKind::InternalServerError => 500,
            ErrorKind::BadGateway => 502,
            ErrorKind::ServiceUnavailable => 503,
            ErrorKind::GatewayTimeout => 504,
        }
    }

    /// ユーザー向けの文字列表現を取得
    ///
    /// ## Returns
    /// HTTP ステータスの標準的な理由フレーズ
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::BadRequest.as_str(), "Bad Request");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Gone => "Gone",
            ErrorKind::UnprocessableEntity => "Unprocessable Entity",
            ErrorKind::TooManyRequests => "Too Many Requests",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::BadGateway => "Bad Gateway",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
            ErrorKind::GatewayTimeout => "Gateway Timeout",
        }
    }

}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::BadRequest.status_code(), 400);
        assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
        assert_eq!(ErrorKind::Forbidden.status_code(), 403);
        assert_eq!(ErrorKind::Conflict.status_code(), 409);
        assert_eq!(ErrorKind::Gone.status_code(), 410);
        assert_eq!(ErrorKind::UnprocessableEntity.status_code(), 422);
        assert_eq!(ErrorKind::TooManyRequests.status_code(), 429);
        assert_eq!(ErrorKind::InternalServerError.status_code(), 500);
        assert_eq!(ErrorKind::BadGateway.status_code(), 502);
        assert_eq!(ErrorKind::ServiceUnavailable.status_code(), 503);
        assert_eq!(ErrorKind::GatewayTimeout.status_code(), 504);
    }

    #[test]
    fn test_reason_phrases() {
        assert_eq!(ErrorKind::BadRequest.as_str(), "Bad Request");
        assert_eq!(ErrorKind::UnprocessableEntity.as_str(), "Unprocessable Entity");
        assert_eq!(ErrorKind::TooManyRequests.as_str(), "Too Many Requests");
        assert_eq!(ErrorKind::GatewayTimeout.as_str(), "Gateway Timeout");
    }

    #[test]
    fn test_display_is_reason_phrase() {
        assert_eq!(ErrorKind::ServiceUnavailable.to_string(), "Service Unavailable");
    }
}
