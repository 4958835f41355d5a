use crate::domain::ports::{Clipboard, ShareSheet};
use crate::utils::error::{Result, SplitError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    /// Fell back to the clipboard; carries the confirmation notice.
    Copied { notice: String },
}

/// Hands `text` to the share facility when there is one, otherwise (or when
/// it refuses) copies it to the clipboard.
pub async fn share_or_copy<S, C>(
    share_sheet: Option<&S>,
    clipboard: &C,
    title: &str,
    text: &str,
    copied_notice: &str,
) -> Result<ShareOutcome>
where
    S: ShareSheet + ?Sized,
    C: Clipboard + ?Sized,
{
    if let Some(sheet) = share_sheet {
        match sheet.share(title, text).await {
            Ok(()) => {
                tracing::info!("📤 Shared '{}'", title);
                return Ok(ShareOutcome::Shared);
            }
            Err(e) => {
                tracing::warn!(
                    "Share sheet rejected '{}': {}, falling back to clipboard",
                    title,
                    e
                );
            }
        }
    } else {
        tracing::debug!("No share facility available, using clipboard");
    }

    match clipboard.write_text(text).await {
        Ok(()) => {
            tracing::info!("📋 {}", copied_notice);
            Ok(ShareOutcome::Copied {
                notice: copied_notice.to_string(),
            })
        }
        Err(e) => {
            tracing::error!("❌ Clipboard copy failed: {}", e);
            Err(SplitError::ShareError {
                message: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingSheet {
        fail: bool,
        shared: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ShareSheet for RecordingSheet {
        async fn share(&self, title: &str, _text: &str) -> Result<()> {
            if self.fail {
                return Err(SplitError::ShareError {
                    message: "AbortError".to_string(),
                });
            }
            self.shared.lock().unwrap().push(title.to_string());
            Ok(())
        }
    }

    struct MemoryClipboard {
        fail: bool,
        contents: Mutex<Option<String>>,
    }

    impl MemoryClipboard {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                contents: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl Clipboard for MemoryClipboard {
        async fn write_text(&self, text: &str) -> Result<()> {
            if self.fail {
                return Err(SplitError::ShareError {
                    message: "permission denied".to_string(),
                });
            }
            *self.contents.lock().unwrap() = Some(text.to_string());
            Ok(())
        }
    }

    const NOTICE: &str = "Ringkasan berhasil disalin ke clipboard!";

    #[tokio::test]
    async fn test_share_sheet_used_when_available() {
        let sheet = RecordingSheet {
            fail: false,
            shared: Mutex::new(vec![]),
        };
        let clipboard = MemoryClipboard::new(false);

        let outcome = share_or_copy(Some(&sheet), &clipboard, "Ringkasan", "teks", NOTICE)
            .await
            .unwrap();

        assert_eq!(outcome, ShareOutcome::Shared);
        assert_eq!(*sheet.shared.lock().unwrap(), vec!["Ringkasan".to_string()]);
        assert!(clipboard.contents.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejected_share_falls_back_to_clipboard() {
        let sheet = RecordingSheet {
            fail: true,
            shared: Mutex::new(vec![]),
        };
        let clipboard = MemoryClipboard::new(false);

        let outcome = share_or_copy(Some(&sheet), &clipboard, "Ringkasan", "teks", NOTICE)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ShareOutcome::Copied {
                notice: NOTICE.to_string()
            }
        );
        assert_eq!(clipboard.contents.lock().unwrap().as_deref(), Some("teks"));
    }

    #[tokio::test]
    async fn test_missing_share_sheet_uses_clipboard() {
        let clipboard = MemoryClipboard::new(false);
        let outcome =
            share_or_copy::<RecordingSheet, _>(None, &clipboard, "Ringkasan", "teks", NOTICE)
                .await
                .unwrap();
        assert!(matches!(outcome, ShareOutcome::Copied { .. }));
    }

    #[tokio::test]
    async fn test_clipboard_failure_is_reported() {
        let clipboard = MemoryClipboard::new(true);
        let err = share_or_copy::<RecordingSheet, _>(None, &clipboard, "Ringkasan", "teks", NOTICE)
            .await
            .unwrap_err();
        assert_eq!(err.user_friendly_message(), "Gagal menyalin ke clipboard");
    }
}
