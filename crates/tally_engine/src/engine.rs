use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use tally_logging::{tally_debug, tally_warn};

use crate::{read_text_file, EngineEvent, RequestId, TokenCalculator};

enum EngineCommand {
    ReadFile {
        request: RequestId,
        path: PathBuf,
    },
    Count {
        request: RequestId,
        text: Arc<str>,
        model_key: String,
    },
}

/// Runs file reads and token counts on a background tokio runtime.
///
/// Commands run concurrently and results arrive in completion order; callers
/// use the echoed `RequestId` to drop superseded results.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(calculator: TokenCalculator) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let calculator = Arc::new(calculator);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("tally-worker")
            .build()?;

        thread::Builder::new()
            .name("tally-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let calculator = Arc::clone(&calculator);
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(&calculator, command, event_tx).await;
                    });
                }
                tally_debug!("engine command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn read_file(&self, request: RequestId, path: impl Into<PathBuf>) {
        self.send(EngineCommand::ReadFile {
            request,
            path: path.into(),
        });
    }

    pub fn count(&self, request: RequestId, text: Arc<str>, model_key: impl Into<String>) {
        self.send(EngineCommand::Count {
            request,
            text,
            model_key: model_key.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            tally_warn!("engine thread is gone; dropping command");
        }
    }
}

async fn handle_command(
    calculator: &TokenCalculator,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::ReadFile { request, path } => EngineEvent::FileRead {
            request,
            result: read_text_file(&path).await,
        },
        EngineCommand::Count {
            request,
            text,
            model_key,
        } => EngineEvent::Counted {
            request,
            result: calculator.calculate(&text, &model_key).await,
        },
    };
    let _ = event_tx.send(event);
}
