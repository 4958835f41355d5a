use crate::domain::ports::Clipboard;
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

/// Terminal stand-in for a clipboard: prints the text to stdout so it can be
/// piped into a system clipboard tool (`| wl-copy`, `| pbcopy`).
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutClipboard;

#[async_trait]
impl Clipboard for StdoutClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(text.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        Ok(())
    }
}
