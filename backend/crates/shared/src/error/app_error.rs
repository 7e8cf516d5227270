//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.
//!
//! `AppError` is the user-facing end of the error pipeline: what the
//! screens render. Causes stay in the crate-local error types that
//! produce it; this type carries only kind, message, and an optional
//! suggested action.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// 画面に返す唯一のエラー表現です。フォーム検証は
/// [`AppError::bad_request`] で直接作り、プール由来のエラーは
/// 分類済みの種別を添えて [`AppError::new`] で作られます。
///
/// ## Fields
/// * `kind` - エラーの分類（HTTP ステータスコードにマッピング）
/// * `message` - ユーザー向けのエラーメッセージ
/// * `action` - ユーザーが取るべきアクション（オプション）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// // シンプルなエラー
/// let err = AppError::new(ErrorKind::Unauthorized, "Incorrect username or password.");
///
/// // 詳細なエラー
/// let err = AppError::new(ErrorKind::BadRequest, "Invalid email format")
///     .with_action("Please enter a valid email address");
/// ```
pub struct AppError {
    /// エラー種別
    kind: ErrorKind,
    /// ユーザー向けメッセージ
    message: Cow<'static, str>,
    /// ユーザーが取るべきアクション
    action: Option<Cow<'static, str>>,
}

/// アプリケーション結果型エイリアス
///
/// `Result<T, AppError>` の省略形です。
///
/// ## Examples
/// ```rust
/// use kernel::error::app_error::{AppError, AppResult};
///
/// fn validate_code(code: &str) -> AppResult<&str> {
///     if code.trim().is_empty() {
///         return Err(AppError::bad_request("Confirmation code cannot be empty"));
///     }
///     Ok(code)
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 分類済みの種別からエラーを作成
    ///
    /// ## Arguments
    /// * `kind` - エラー種別
    /// * `message` - ユーザー向けメッセージ
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::{app_error::AppError, kind::ErrorKind};
    /// let err = AppError::new(ErrorKind::BadRequest, "Invalid input");
    /// ```
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
        }
    }

    /// 400 Bad Request エラー
    ///
    /// フォーム検証用の短縮形。プール由来のエラーは種別を添えて
    /// [`AppError::new`] から作られます。
    #[inline]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// ユーザー向けアクションを設定
    ///
    /// 確認コードの再送を促すなど、次に取るべき操作を伝えるときに
    /// 使います。
    ///
    /// ## Arguments
    /// * `action` - ユーザーが取るべきアクション
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::{app_error::AppError, kind::ErrorKind};
    /// let err = AppError::new(ErrorKind::Gone, "Confirmation code has expired")
    ///     .with_action("Request a new code");
    /// ```
    #[inline]
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// エラー種別を取得
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP ステータスコードを取得
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// メッセージを取得
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// アクションを取得
    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(action) = &self.action {
            builder.field("action", action);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(action) = &self.action {
            write!(f, " (Action: {})", action)?;
        }
        Ok(())
    }
}

impl Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::Unauthorized, "Incorrect username or password.");
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.message(), "Incorrect username or password.");
        assert!(err.action().is_none());
    }

    #[test]
    fn test_bad_request_shorthand() {
        let err = AppError::bad_request("Email cannot be empty");
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_with_action() {
        let err = AppError::new(ErrorKind::Gone, "Confirmation code has expired")
            .with_action("Request a new code");
        assert_eq!(err.action(), Some("Request a new code"));
    }

    #[test]
    fn test_display() {
        let err = AppError::new(ErrorKind::Unauthorized, "Incorrect username or password.");
        assert_eq!(
            err.to_string(),
            "[Unauthorized] Incorrect username or password."
        );

        let err_with_action =
            AppError::bad_request("Invalid email format").with_action("Enter a valid email");
        assert!(err_with_action.to_string().contains("Action:"));
    }

    #[test]
    fn test_debug_omits_absent_action() {
        let plain = format!("{:?}", AppError::bad_request("Invalid email format"));
        assert!(!plain.contains("action"));

        let with_action = format!(
            "{:?}",
            AppError::bad_request("Invalid email format").with_action("Enter a valid email")
        );
        assert!(with_action.contains("Enter a valid email"));
    }
}
