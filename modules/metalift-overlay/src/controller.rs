use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info, warn};
use uuid::Uuid;

use assist_client::{AssistPayload, AssistRequest, AssistRole, AssistService};
use metalift_common::{Config, ExtractedMetadata, InjectionState, MetaliftError};
use metalift_page::{resolver, HostPage, MetadataCache};
use metalift_score::{engine, fallback};

use crate::panel::{FieldUpdate, Notice, PanelSink, UpdateOrigin};
use crate::settings::SettingsStore;
use crate::wait::{wait_for, WaitConfig};

/// Actions the panel can invoke against the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Analyze,
    GenerateTitle,
    GenerateDescription,
    GenerateTags,
}

/// Owns the injection lifecycle for one page session: waits for the host
/// page's editor region, attaches the panel, wires panel actions to the
/// cache, the scoring engine, and the assist/fallback generators, and
/// re-runs the whole sequence when the page identity changes.
///
/// Errors stop here. Nothing thrown by an action handler may propagate into
/// the host page's own execution context; it is logged and surfaced as a
/// panel notice instead.
pub struct OverlayController {
    state: InjectionState,
    session: Uuid,
    current_identity: String,
    page: Arc<dyn HostPage>,
    panel: Arc<dyn PanelSink>,
    settings: Arc<dyn SettingsStore>,
    assist: Option<Arc<dyn AssistService>>,
    cache: MetadataCache,
    wait: WaitConfig,
    max_sequence_retries: u32,
    settle_delay: Duration,
}

impl OverlayController {
    pub fn new(
        page: Arc<dyn HostPage>,
        panel: Arc<dyn PanelSink>,
        settings: Arc<dyn SettingsStore>,
        assist: Option<Arc<dyn AssistService>>,
        config: &Config,
    ) -> Self {
        Self {
            state: InjectionState::Idle,
            session: Uuid::new_v4(),
            current_identity: String::new(),
            page,
            panel,
            settings,
            assist,
            cache: MetadataCache::new(config.cache_ttl),
            wait: WaitConfig::from(config),
            max_sequence_retries: config.injection_max_retries,
            settle_delay: config.settle_delay,
        }
    }

    pub fn state(&self) -> InjectionState {
        self.state
    }

    /// Identity token for the current page session. Rotated on navigation;
    /// assist results issued under an old token are discarded.
    pub fn session(&self) -> Uuid {
        self.session
    }

    fn set_state(&mut self, next: InjectionState) {
        if self.state != next {
            info!(from = %self.state, to = %next, "Injection state change");
            self.state = next;
            self.panel.state_changed(next);
        }
    }

    /// Run the full injection sequence for the current page visit.
    pub async fn inject(&mut self) -> InjectionState {
        self.set_state(InjectionState::DetectingPage);
        self.current_identity = page_identity(&self.page.url());

        for attempt in 0..=self.max_sequence_retries {
            self.set_state(InjectionState::AwaitingContainer);

            let page = self.page.clone();
            let container = wait_for(self.wait, move || {
                resolver::find_container(&page.snapshot())
            })
            .await;

            match container {
                Some(_) => {
                    self.set_state(InjectionState::Injected);
                    self.panel.attached();

                    let metadata = self.cache.get(self.page.as_ref());
                    let score = engine::score(&metadata);
                    self.panel.score_updated(&score);
                    info!(
                        url = self.current_identity.as_str(),
                        overall = score.overall_score,
                        "Overlay injected"
                    );
                    return self.state;
                }
                None if attempt < self.max_sequence_retries => {
                    warn!(attempt = attempt + 1, "Editor region not found, retrying sequence");
                }
                None => {
                    self.set_state(InjectionState::Failed);
                    self.panel.notify(&Notice::Failure(
                        "Could not find the editor on this page".to_string(),
                    ));
                }
            }
        }

        self.state
    }

    /// The embedding layer observed a navigation. Tear down, wait out the
    /// host page's own re-render, and run the sequence again.
    pub async fn on_url_changed(&mut self) -> InjectionState {
        let identity = page_identity(&self.page.url());
        if identity == self.current_identity {
            return self.state;
        }

        info!(
            old = self.current_identity.as_str(),
            new = identity.as_str(),
            "Page identity changed, reinjecting"
        );

        if self.state == InjectionState::Injected {
            self.panel.detached();
        }
        self.cache.invalidate();
        self.session = Uuid::new_v4();
        self.set_state(InjectionState::Idle);

        sleep(self.settle_delay).await;
        self.inject().await
    }

    /// An edit-type interaction was observed on an editable element.
    pub fn on_edit_activity(&mut self) {
        self.cache.invalidate();
    }

    /// Handle a panel action. This is the error boundary: failures are
    /// logged and surfaced as a notice, never propagated.
    pub async fn handle_action(&mut self, action: PanelAction) {
        let issued = self.session;
        if let Err(e) = self.run_action(action, issued).await {
            error!(?action, error = %e, "Panel action failed");
            self.panel
                .notify(&Notice::Failure(format!("Action failed: {e}")));
        }
    }

    async fn run_action(
        &mut self,
        action: PanelAction,
        issued: Uuid,
    ) -> Result<(), MetaliftError> {
        if self.state != InjectionState::Injected {
            return Err(MetaliftError::Injection(format!(
                "panel is not attached (state: {})",
                self.state
            )));
        }

        let metadata = self.cache.get(self.page.as_ref());

        match action {
            PanelAction::Analyze => {
                let score = engine::score(&metadata);
                self.panel.score_updated(&score);
            }
            PanelAction::GenerateTitle => {
                self.generate(AssistRole::Title, &metadata, issued).await;
            }
            PanelAction::GenerateDescription => {
                self.generate(AssistRole::Description, &metadata, issued)
                    .await;
            }
            PanelAction::GenerateTags => {
                self.generate(AssistRole::Tags, &metadata, issued).await;
            }
        }
        Ok(())
    }

    /// Try the generative path when configured; fall through to the
    /// heuristic generator on any error. The two outcomes are surfaced with
    /// differentiated, non-error messaging.
    async fn generate(&mut self, role: AssistRole, metadata: &ExtractedMetadata, issued: Uuid) {
        let assist_payload = if self.settings.assist_configured() {
            match &self.assist {
                Some(client) => {
                    let request = AssistRequest {
                        role,
                        current_title: metadata.title.clone(),
                        current_description: metadata.description.clone(),
                    };
                    match client.generate(&request).await {
                        Ok(payload) => Some(payload),
                        Err(e) => {
                            warn!(%role, error = %e, "Assist call failed, using heuristic fallback");
                            None
                        }
                    }
                }
                None => None,
            }
        } else {
            None
        };

        // A navigation may have happened while the assist call was in
        // flight; results issued under the old session are stale.
        if issued != self.session {
            info!(%role, "Discarding stale assist result after navigation");
            return;
        }

        let (update, origin) = match assist_payload {
            Some(payload) => (payload_update(payload), UpdateOrigin::Generated),
            None => {
                let now = Utc::now();
                let update = match role {
                    AssistRole::Title => {
                        FieldUpdate::Title(fallback::fallback_title(&metadata.title, now))
                    }
                    AssistRole::Description => FieldUpdate::Description(
                        fallback::fallback_description(&metadata.title, &metadata.description, now),
                    ),
                    AssistRole::Tags => FieldUpdate::Tags(fallback::fallback_tags(
                        &metadata.title,
                        &metadata.description,
                        now,
                    )),
                };
                (update, UpdateOrigin::Heuristic)
            }
        };

        self.panel.field_generated(&update, origin);
        match origin {
            UpdateOrigin::Generated => self
                .panel
                .notify(&Notice::Success(format!("AI suggestion ready for {role}"))),
            UpdateOrigin::Heuristic => self.panel.notify(&Notice::Info(format!(
                "Heuristic suggestion ready for {role} (AI unavailable)"
            ))),
        }
    }
}

fn payload_update(payload: AssistPayload) -> FieldUpdate {
    match payload {
        AssistPayload::Title(title) => FieldUpdate::Title(title),
        AssistPayload::Description(description) => FieldUpdate::Description(description),
        AssistPayload::Tags(tags) => FieldUpdate::Tags(tags),
    }
}

/// Page identity: the URL without its fragment. SPA hosts mutate fragments
/// freely without re-rendering the editor.
fn page_identity(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => raw.to_string(),
    }
}
