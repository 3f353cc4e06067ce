//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`] struct, [`AppResult<T>`] type alias and the
//! [`ErrorBody`] that every failed request returns.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use serde::Serialize;

use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// 各ドメインのエラー (`QuizError` など) はこの型に変換されてから
/// HTTP レスポンスになります。
///
/// ## Fields
/// * `kind` - エラーの分類（HTTP ステータスコードにマッピング）
/// * `title` - 機械判読用のエラーコード (例: `NoActiveQuestion`)
/// * `message` - ユーザー向けのエラーメッセージ
/// * `trace` - エラーが発生した処理段階 (例: `session_lookup`)
/// * `source` - 元のエラー（オプション、デバッグ用）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::BadRequest, "MissingSessionId", "Session id is missing.")
///     .with_trace("request_validation");
/// assert_eq!(err.title(), "MissingSessionId");
/// ```
pub struct AppError {
    kind: ErrorKind,
    title: Cow<'static, str>,
    message: Cow<'static, str>,
    trace: Option<Cow<'static, str>>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// アプリケーション結果型エイリアス
pub type AppResult<T> = Result<T, AppError>;

/// 失敗したリクエストに返す JSON ボディ
///
/// `{"errorTitle": ..., "errorMessage": ..., "errorTrace": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_title: String,
    pub error_message: String,
    pub error_trace: String,
}

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 新しいエラーを作成
    #[inline]
    pub fn new(
        kind: ErrorKind,
        title: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            trace: None,
            source: None,
        }
    }

    /// 400 Bad Request エラー
    #[inline]
    pub fn bad_request(
        title: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::BadRequest, title, message)
    }

    /// 404 Not Found エラー
    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, "NotFound", message)
    }

    /// 500 Internal Server Error
    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, "InternalError", message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// エラーが発生した処理段階を設定
    #[inline]
    pub fn with_trace(mut self, trace: impl Into<Cow<'static, str>>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// 元のエラーを設定（デバッグ用）
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::app_error::{AppError, AppResult};
    ///
    /// fn read_quiz() -> AppResult<String> {
    ///     std::fs::read_to_string("quiz.json")
    ///         .map_err(|e| AppError::internal("Failed to read quiz file").with_source(e))
    /// }
    /// ```
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn trace(&self) -> Option<&str> {
        self.trace.as_deref()
    }

    /// レスポンスボディを組み立てる
    ///
    /// `trace` 未設定の場合は種別名を使います。スタックトレースは含めません。
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error_title: self.title.to_string(),
            error_message: self.message.to_string(),
            error_trace: self
                .trace
                .as_deref()
                .unwrap_or(self.kind.as_str())
                .to_string(),
        }
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("title", &self.title);
        builder.field("message", &self.message);
        if let Some(trace) = &self.trace {
            builder.field("trace", trace);
        }
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.title, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}
