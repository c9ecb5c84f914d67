use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::{oneshot, Mutex, RwLock};

use crate::error::BridgeError;
use crate::handle::{event_channel, EmbeddedEditor, EventReceiver, EventSender, SavedModel};
use crate::options::EditorOptions;

pub const EVENT_METHOD: &str = "modeler/event";

/// How long `modeler/mount` and `shutdown` may take before the editor is
/// considered hung. Saves are never timed out.
pub const LIFECYCLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on a single framed message from the editor.
pub const MAX_MESSAGE_LEN: usize = 64 * 1024 * 1024;

type PendingRequests = Arc<RwLock<HashMap<i64, oneshot::Sender<Value>>>>;

/// An editor running as a child process, spoken to over JSON-RPC on stdio.
///
/// Messages use `Content-Length` framing. The editor pushes its event
/// records as `modeler/event` notifications; commands are requests.
pub struct ProcessEditor {
    name: String,
    child: Mutex<Child>,
    stdin: Mutex<ChildStdin>,
    request_id: AtomicI64,
    pending_requests: PendingRequests,
    alive: Arc<AtomicBool>,
    lifecycle_timeout: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: i64,
    method: String,
    params: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonRpcNotification {
    jsonrpc: String,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

impl ProcessEditor {
    /// Start the editor process and mount `xml` with `options`.
    pub async fn launch(
        command: &str,
        args: &[String],
        xml: &str,
        options: Arc<EditorOptions>,
    ) -> Result<(Arc<Self>, EventReceiver), BridgeError> {
        Self::launch_with_timeout(command, args, xml, options, LIFECYCLE_TIMEOUT).await
    }

    /// Like [`launch`](Self::launch), with a custom limit for mount and shutdown.
    pub async fn launch_with_timeout(
        command: &str,
        args: &[String],
        xml: &str,
        options: Arc<EditorOptions>,
        lifecycle_timeout: Duration,
    ) -> Result<(Arc<Self>, EventReceiver), BridgeError> {
        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| BridgeError::Transport("editor stdin not captured".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BridgeError::Transport("editor stdout not captured".to_string()))?;
        let stderr = child.stderr.take();

        let (events, receiver) = event_channel();
        let editor = Arc::new(Self {
            name: command.to_string(),
            child: Mutex::new(child),
            stdin: Mutex::new(stdin),
            request_id: AtomicI64::new(1),
            pending_requests: Arc::new(RwLock::new(HashMap::new())),
            alive: Arc::new(AtomicBool::new(true)),
            lifecycle_timeout,
        });

        editor.start_message_handler(BufReader::new(stdout), events);
        if let Some(stderr) = stderr {
            let name = editor.name.clone();
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    log::debug!("[{}] {}", name, line);
                }
            });
        }

        editor
            .lifecycle_request("modeler/mount", json!({ "xml": xml, "options": &*options }))
            .await?;
        log::info!("Editor process '{}' mounted the diagram", editor.name);

        Ok((editor, receiver))
    }

    fn start_message_handler<R>(&self, mut reader: R, events: EventSender)
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let pending_requests = self.pending_requests.clone();
        let alive = self.alive.clone();

        tokio::spawn(async move {
            loop {
                if !alive.load(Ordering::SeqCst) {
                    log::info!("Editor message handler shutting down");
                    break;
                }

                match read_message(&mut reader).await {
                    Ok(Some(text)) => match serde_json::from_str::<Value>(&text) {
                        Ok(message) => route_message(message, &pending_requests, &events).await,
                        Err(e) => log::warn!("Editor sent invalid JSON: {}", e),
                    },
                    Ok(None) => {
                        log::info!("Editor closed its output stream");
                        break;
                    }
                    Err(e) => {
                        log::warn!("Failed to read from editor: {}", e);
                        break;
                    }
                }
            }

            // Dropping the senders fails every request still waiting.
            alive.store(false, Ordering::SeqCst);
            pending_requests.write().await.clear();
        });
    }

    async fn send_request<P: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, BridgeError> {
        if !self.is_alive() {
            return Err(BridgeError::Transport("editor process is not running".to_string()));
        }

        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id,
            method: method.to_string(),
            params: serde_json::to_value(params)?,
        };

        let (tx, rx) = oneshot::channel();
        self.pending_requests.write().await.insert(id, tx);

        if let Err(e) = self.send_message(&request).await {
            self.pending_requests.write().await.remove(&id);
            return Err(e);
        }

        // No timeout here; callers wrap one around the command if they want it.
        let response = rx
            .await
            .map_err(|_| BridgeError::Transport("editor closed before responding".to_string()))?;

        if let Some(error) = response.get("error") {
            let error: JsonRpcError = serde_json::from_value(error.clone())?;
            if let Some(data) = error.data {
                log::debug!("Editor error data: {}", data);
            }
            return Err(BridgeError::Editor {
                code: error.code,
                message: error.message,
            });
        }

        let result = response.get("result").cloned().unwrap_or(Value::Null);
        Ok(serde_json::from_value(result)?)
    }

    /// A request the editor must answer within the lifecycle timeout. On
    /// expiry the editor is marked dead and its process killed.
    async fn lifecycle_request(&self, method: &str, params: Value) -> Result<Value, BridgeError> {
        match tokio::time::timeout(self.lifecycle_timeout, self.send_request(method, params)).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!(
                    "Editor '{}' did not answer {} within {:?}, killing it",
                    self.name,
                    method,
                    self.lifecycle_timeout
                );
                self.terminate().await;
                Err(BridgeError::Transport(format!(
                    "editor did not answer {} within {:?}",
                    method, self.lifecycle_timeout
                )))
            }
        }
    }

    async fn terminate(&self) {
        self.alive.store(false, Ordering::SeqCst);
        self.pending_requests.write().await.clear();

        let mut child = self.child.lock().await;
        let _ = child.kill().await;
    }

    async fn send_notification<P: Serialize>(&self, method: &str, params: P) -> Result<(), BridgeError> {
        let notification = JsonRpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params: serde_json::to_value(params)?,
        };

        self.send_message(&notification).await
    }

    async fn send_message<T: Serialize>(&self, message: &T) -> Result<(), BridgeError> {
        let json = serde_json::to_string(message)?;
        let mut stdin = self.stdin.lock().await;
        stdin.write_all(encode_message(&json).as_bytes()).await?;
        stdin.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl EmbeddedEditor for ProcessEditor {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    async fn save(&self) -> Result<SavedModel, BridgeError> {
        self.send_request("modeler/save", Value::Null).await
    }

    async fn configure(&self, options: Arc<EditorOptions>) -> Result<(), BridgeError> {
        self.send_request::<_, Value>("modeler/configure", json!({ "options": &*options }))
            .await
            .map(|_| ())
    }

    async fn unmount(&self) -> Result<(), BridgeError> {
        let result = self.lifecycle_request("shutdown", Value::Null).await;
        if result.is_ok() {
            let _ = self.send_notification("exit", Value::Null).await;
        }

        self.terminate().await;
        result.map(|_| ())
    }
}

impl Drop for ProcessEditor {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

pub(crate) fn encode_message(json: &str) -> String {
    format!("Content-Length: {}\r\n\r\n{}", json.len(), json)
}

/// Read one framed message. `Ok(None)` means the stream ended cleanly.
pub(crate) async fn read_message<R>(reader: &mut R) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut content_length: Option<usize> = None;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        if line == "\r\n" || line == "\n" {
            if content_length.is_some() {
                break;
            }
            continue;
        }
        if let Some(value) = line.strip_prefix("Content-Length:") {
            content_length = value.trim().parse::<usize>().ok();
        }
    }

    let len = content_length.unwrap_or_default();
    if len > MAX_MESSAGE_LEN {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("editor message of {} bytes exceeds the {} byte limit", len, MAX_MESSAGE_LEN),
        ));
    }
    let mut content = vec![0u8; len];
    reader.read_exact(&mut content).await?;
    String::from_utf8(content)
        .map(Some)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

/// Hand a decoded message to whoever is waiting for it.
pub(crate) async fn route_message(message: Value, pending_requests: &PendingRequests, events: &EventSender) {
    let id = message.get("id").and_then(Value::as_i64);
    let method = message.get("method").and_then(Value::as_str);

    match (id, method) {
        (Some(id), None) => {
            if let Some(sender) = pending_requests.write().await.remove(&id) {
                let _ = sender.send(message);
            } else {
                log::debug!("Response for unknown request {}", id);
            }
        }
        (None, Some(EVENT_METHOD)) => {
            let record = message.get("params").cloned().unwrap_or(Value::Null);
            if events.send(record).is_err() {
                log::debug!("Event receiver gone, dropping editor event");
            }
        }
        (None, Some(method)) => {
            log::debug!("Received editor notification: {}", method);
        }
        (Some(_), Some(method)) => {
            log::warn!("Ignoring request from editor: {}", method);
        }
        (None, None) => log::warn!("Editor sent a message with neither id nor method"),
    }
}
