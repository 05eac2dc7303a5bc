use std::sync::Arc;
use std::time::Duration;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;
use starhop_core::{Ambience, AmbienceError, Mode, NavigationMachine, Stage};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct StarhopServer {
    state: Arc<Mutex<Session>>,
    cancel: CancellationToken,
    tool_router: ToolRouter<Self>,
}

struct Session {
    machine: NavigationMachine,
    ambience: Ambience,
}

impl Session {
    fn advance(&mut self, elapsed_ms: f64) {
        let before = self.milestone();
        self.machine.tick(elapsed_ms);
        let after = self.milestone();
        if before != after {
            let (mode, active, stage) = after;
            tracing::debug!(?mode, active, ?stage, "navigation state changed");
        }
    }

    fn milestone(&self) -> (Mode, usize, Option<Stage>) {
        (
            self.machine.mode(),
            self.machine.active_destination(),
            self.machine.transition().map(|t| t.stage),
        )
    }

    fn sync_ambience(&mut self) {
        if let Err(e) = self.ambience.sync(self.machine.sound_enabled()) {
            tracing::warn!("ambient audio disabled: {e}");
        }
    }

    fn snapshot_json(&self) -> serde_json::Value {
        serde_json::to_value(self.machine.snapshot()).unwrap_or_default()
    }
}

/// Ambience for a process with no audio device attached.
pub fn headless_ambience() -> Ambience {
    Ambience::new(|| {
        Err(AmbienceError::Unavailable(
            "no audio output on this host".to_string(),
        ))
    })
}

fn json_result(value: &serde_json::Value) -> CallToolResult {
    CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).unwrap_or_default(),
    )])
}

impl StarhopServer {
    pub fn new(machine: NavigationMachine, ambience: Ambience) -> Self {
        Self {
            state: Arc::new(Mutex::new(Session { machine, ambience })),
            cancel: CancellationToken::new(),
            tool_router: Self::tool_router(),
        }
    }

    /// Drive `tick` from wall-clock time until `shutdown`.
    ///
    /// Late frames are skipped rather than bunched; the next tick passes
    /// the full measured elapsed time, so simulated time never drifts.
    pub fn spawn_ticker(&self, frame: Duration) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            let mut frames = tokio::time::interval(frame);
            frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut last = Instant::now();

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = frames.tick() => {
                        let now = Instant::now();
                        let elapsed_ms = now.duration_since(last).as_secs_f64() * 1000.0;
                        last = now;
                        state.lock().await.advance(elapsed_ms);
                    }
                }
            }
            tracing::info!("frame ticker stopped");
        })
    }

    /// Stop the ticker, then release the machine and the ambience.
    pub async fn shutdown(&self, ticker: JoinHandle<()>) {
        self.cancel.cancel();
        if let Err(e) = ticker.await {
            tracing::warn!("frame ticker ended abnormally: {e}");
        }
        let mut session = self.state.lock().await;
        session.machine.shutdown();
        session.ambience.shutdown();
        tracing::info!("navigation session closed");
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct KeyRequest {
    /// Key name as a browser reports it: "ArrowUp", "ArrowLeft", " " (space), "1".."9"
    key: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct NavigateRequest {
    /// Zero-based destination index (see nav_destinations)
    index: usize,
}

#[tool_router]
impl StarhopServer {
    #[tool(
        description = "Press a key. Arrow keys take manual control of the craft (Up thrusts forward, Down reverses, Left/Right rotate). Space toggles the minimap. Digits 1-9 jump to the matching destination. Keys stay held until nav_key_up."
    )]
    async fn nav_key_down(
        &self,
        Parameters(req): Parameters<KeyRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut session = self.state.lock().await;
        session.machine.on_key_down(req.key.as_str());
        Ok(json_result(&session.snapshot_json()))
    }

    #[tool(description = "Release a key previously pressed with nav_key_down.")]
    async fn nav_key_up(
        &self,
        Parameters(req): Parameters<KeyRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut session = self.state.lock().await;
        session.machine.on_key_up(req.key.as_str());
        Ok(json_result(&session.snapshot_json()))
    }

    #[tool(
        description = "Fly to a destination by index with the scripted undock, reposition, dock and reveal sequence (about 2.8 seconds). Refused while loading, during another transition, for an out-of-range index, or for the destination already active; a refusal changes nothing."
    )]
    async fn nav_navigate(
        &self,
        Parameters(req): Parameters<NavigateRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut session = self.state.lock().await;
        let result = match session.machine.navigate(req.index) {
            Ok(()) => {
                let target = session.machine.catalog().get(req.index).map(|d| d.id);
                serde_json::json!({ "accepted": true, "target": target })
            }
            Err(rejected) => {
                tracing::debug!("navigation to {} refused: {rejected}", req.index);
                serde_json::json!({ "accepted": false, "reason": rejected.to_string() })
            }
        };
        Ok(json_result(&result))
    }

    #[tool(description = "Show or hide the minimap.")]
    async fn nav_toggle_minimap(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.state.lock().await;
        session.machine.toggle_minimap();
        let visible = session.machine.minimap_visible();
        Ok(json_result(&serde_json::json!({ "minimapVisible": visible })))
    }

    #[tool(description = "Show or hide the controls help overlay.")]
    async fn nav_toggle_help(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.state.lock().await;
        session.machine.toggle_help();
        let visible = session.machine.help_visible();
        Ok(json_result(&serde_json::json!({ "helpVisible": visible })))
    }

    #[tool(
        description = "Switch the ambient drone on or off. The flag always flips; `playing` reports whether audio actually started and `audioAvailable` turns false once no output device could be opened."
    )]
    async fn nav_toggle_sound(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.state.lock().await;
        session.machine.toggle_sound();
        session.sync_ambience();
        let result = serde_json::json!({
            "soundEnabled": session.machine.sound_enabled(),
            "playing": session.ambience.is_playing(),
            "audioAvailable": !session.ambience.is_degraded(),
        });
        Ok(json_result(&result))
    }

    #[tool(
        description = "Current navigation state: craft position, velocity and heading, mode, active destination, content visibility, overlays, loading progress, transition stage, thrusters and draw pose."
    )]
    async fn nav_snapshot(&self) -> Result<CallToolResult, McpError> {
        let session = self.state.lock().await;
        Ok(json_result(&session.snapshot_json()))
    }

    #[tool(description = "List the destinations in index order with their anchor coordinates.")]
    async fn nav_destinations(&self) -> Result<CallToolResult, McpError> {
        let session = self.state.lock().await;
        let destinations: Vec<serde_json::Value> = session
            .machine
            .catalog()
            .iter()
            .enumerate()
            .map(|(index, d)| {
                serde_json::json!({
                    "index": index,
                    "id": d.id,
                    "name": d.name,
                    "x": d.anchor.x,
                    "y": d.anchor.y,
                })
            })
            .collect();
        Ok(json_result(&serde_json::json!({ "destinations": destinations })))
    }
}

#[tool_handler]
impl ServerHandler for StarhopServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Pilot a spacecraft between portfolio sections drawn as planets on a 100x100 plane.\n\n\
                 - Call nav_destinations to see where you can go, then nav_navigate with an index.\n\
                 - For manual flight, hold arrow keys with nav_key_down and release with nav_key_up. \
                   The craft docks when it drifts within 7 units of a planet at low speed.\n\
                 - Content for a destination appears one second after docking; poll nav_snapshot \
                   and check contentVisible.\n\
                 - Nothing responds until loading finishes (a few seconds after start)."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
