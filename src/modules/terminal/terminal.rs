use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tokio::sync::Mutex;

use crate::features::access::Challenge;
use crate::features::animals::Confirm;

type Input = Lines<Box<dyn AsyncBufRead + Unpin + Send>>;
type Output = Box<dyn AsyncWrite + Unpin + Send>;

/// Line-oriented prompt over an async reader/writer pair.
///
/// Backs both the admin code challenge and the delete confirmation, so the
/// core never touches stdin directly.
pub struct Terminal {
    input: Mutex<Input>,
    output: Mutex<Output>,
}

impl Terminal {
    pub fn new(
        input: impl AsyncBufRead + Unpin + Send + 'static,
        output: impl AsyncWrite + Unpin + Send + 'static,
    ) -> Self {
        let input: Box<dyn AsyncBufRead + Unpin + Send> = Box::new(input);
        Self {
            input: Mutex::new(input.lines()),
            output: Mutex::new(Box::new(output)),
        }
    }

    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }

    /// Write text as-is
    pub async fn print(&self, text: &str) {
        let mut output = self.output.lock().await;
        if let Err(e) = output.write_all(text.as_bytes()).await {
            tracing::warn!("Failed to write to terminal: {}", e);
            return;
        }
        let _ = output.flush().await;
    }

    pub async fn println(&self, text: &str) {
        self.print(&format!("{}\n", text)).await;
    }

    /// Show `prompt` and read one line. `None` on end of input.
    pub async fn prompt(&self, prompt: &str) -> Option<String> {
        self.print(&format!("{} ", prompt)).await;
        self.read_line().await
    }

    pub async fn read_line(&self) -> Option<String> {
        let mut input = self.input.lock().await;
        match input.next_line().await {
            Ok(Some(line)) => Some(line.trim_end_matches('\r').to_string()),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read from terminal: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl Challenge for Terminal {
    async fn challenge(&self, prompt: &str) -> Option<String> {
        self.prompt(prompt).await
    }
}

#[async_trait]
impl Confirm for Terminal {
    async fn confirm(&self, prompt: &str) -> bool {
        match self.prompt(&format!("{} [y/N]", prompt)).await {
            Some(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    fn terminal(input: &[u8]) -> Terminal {
        let reader = Builder::new().read(input).build();
        Terminal::new(BufReader::new(reader), tokio::io::sink())
    }

    #[tokio::test]
    async fn test_challenge_returns_typed_line() {
        let term = terminal(b"123123\n");
        assert_eq!(
            term.challenge("Enter admin access code:").await.as_deref(),
            Some("123123")
        );
    }

    #[tokio::test]
    async fn test_challenge_cancelled_on_eof() {
        let term = terminal(b"");
        assert_eq!(term.challenge("Enter admin access code:").await, None);
    }

    #[tokio::test]
    async fn test_confirm_answers() {
        let term = terminal(b"y\nYES\nn\n\nmaybe\n");
        assert!(term.confirm("Delete?").await);
        assert!(term.confirm("Delete?").await);
        assert!(!term.confirm("Delete?").await);
        assert!(!term.confirm("Delete?").await);
        assert!(!term.confirm("Delete?").await);
        // End of input declines
        assert!(!term.confirm("Delete?").await);
    }

    #[tokio::test]
    async fn test_prompt_writes_question() {
        let reader = Builder::new().read(b"Mochi\r\n").build();
        let writer = Builder::new().write(b"Name: ").build();
        let term = Terminal::new(BufReader::new(reader), writer);

        assert_eq!(term.prompt("Name:").await.as_deref(), Some("Mochi"));
    }
}
