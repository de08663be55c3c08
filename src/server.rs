/// Line-oriented stdio driver
///
/// Reads one JSON-RPC payload per line, feeds it through the engine and
/// writes each reply on its own line. Inputs that produce no reply (all
/// notifications) write nothing.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::engine::Engine;
use crate::ServerError;

/// Drives an [`Engine`] over a byte stream
pub struct RpcServer {
    engine: Engine,
}

impl RpcServer {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    /// Serve stdin/stdout until stdin is closed
    pub async fn run(&self) -> Result<(), ServerError> {
        info!("Waiting for JSON-RPC requests on stdin...");
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.serve(reader, writer).await
    }

    /// Serve any line-oriented reader/writer pair until the reader hits EOF
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = Vec::new();
        let mut handled = 0usize;

        loop {
            line.clear();
            // Raw bytes: a line that is not UTF-8 is answered, not fatal
            if reader.read_until(b'\n', &mut line).await? == 0 {
                info!("Input closed after {} payloads", handled);
                break;
            }

            let payload = line.trim_ascii();
            if payload.is_empty() {
                continue;
            }
            handled += 1;

            if let Some(response) = self.engine.process_bytes(payload) {
                writer.write_all(response.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            } else {
                debug!("No response for payload {}", handled);
            }
        }

        Ok(())
    }
}
