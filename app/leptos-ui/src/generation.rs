//! Generation coordinator: drives each dashboard tab's generation lifecycle
//! from user intent to a displayed result.
//!
//! The backend treats generation as a fire-and-forget job, so the
//! coordinator bridges the gap with polling: submit, then check
//! `latest_design` every three seconds until the rendered asset shows up.
//! Each tab owns an independent poll generation counter. Bumping it retires
//! whatever loop is currently serving that tab, which is how replacement,
//! teardown, and cancellation are all expressed. Submissions are fenced with
//! a per-tab epoch so a slow response from an abandoned run can never
//! clobber state written by a newer one.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use hub_api_types::{AnalysisResult, DesignResponse};

use crate::api::{self, ApiError, DesignApi};

pub const POLL_INTERVAL_MS: u32 = 3000;

// ── Tab identity ──

/// The three independent generation workflows on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabId {
    Prompt,
    Image,
    Suggestions,
}

impl TabId {
    pub const ALL: [TabId; 3] = [TabId::Prompt, TabId::Image, TabId::Suggestions];

    pub fn index(self) -> usize {
        match self {
            TabId::Prompt => 0,
            TabId::Image => 1,
            TabId::Suggestions => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TabId::Prompt => "prompt",
            TabId::Image => "image",
            TabId::Suggestions => "suggestions",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TabId::Prompt => "Prompt to Moodboard",
            TabId::Image => "Image to Moodboard",
            TabId::Suggestions => "Design Suggestions",
        }
    }
}

// ── Status machine ──

/// Persisted per-tab generation status.
///
/// `not_started → tokens_pending → tokens_generated → (image_pending) →
/// complete`, with `error` reachable from any pending state. `Complete` and
/// `Error` are terminal for a run; a new submission resets to
/// `TokensPending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenStatus {
    #[default]
    NotStarted,
    TokensPending,
    TokensGenerated,
    ImagePending,
    Complete,
    Error,
}

impl GenStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GenStatus::NotStarted => "not_started",
            GenStatus::TokensPending => "tokens_pending",
            GenStatus::TokensGenerated => "tokens_generated",
            GenStatus::ImagePending => "image_pending",
            GenStatus::Complete => "complete",
            GenStatus::Error => "error",
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(
            self,
            GenStatus::TokensPending | GenStatus::TokensGenerated | GenStatus::ImagePending
        )
    }
}

/// Display-only sub-stage walked through while a submission is in flight.
/// Never persisted as status; exists purely so the progress panel has
/// something richer to say than "pending".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingStage {
    #[default]
    Initializing,
    Processing,
    Extracting,
    Generating,
    TokensPending,
    TokensGenerated,
    Finalizing,
}

impl LoadingStage {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadingStage::Initializing => "initializing",
            LoadingStage::Processing => "processing",
            LoadingStage::Extracting => "extracting",
            LoadingStage::Generating => "generating",
            LoadingStage::TokensPending => "tokens_pending",
            LoadingStage::TokensGenerated => "tokens_generated",
            LoadingStage::Finalizing => "finalizing",
        }
    }
}

// ── Per-tab state ──

/// Display metadata for the user's selected file. The `web_sys::File` handle
/// itself is handed straight to the gateway and never parked in state.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub size: f64,
    pub mime: String,
}

impl SelectedFile {
    pub fn from_file(file: &web_sys::File) -> Self {
        SelectedFile {
            name: file.name(),
            size: file.size(),
            mime: file.type_(),
        }
    }
}

/// Result of the synchronous design-critique flow, tracked independently of
/// the design payload model.
#[derive(Debug, Clone, Default)]
pub struct AnalysisView {
    pub loading: bool,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
}

#[derive(Clone, Copy)]
struct TabSlot {
    status: RwSignal<GenStatus>,
    message: RwSignal<String>,
    input: RwSignal<String>,
    file: RwSignal<Option<SelectedFile>>,
    design: RwSignal<Option<DesignResponse>>,
    loading: RwSignal<bool>,
    stage: RwSignal<LoadingStage>,
    /// Submission fence: a response is applied only if its captured epoch is
    /// still current.
    epoch: RwSignal<u64>,
    /// Poll ownership: the loop that captured the current value owns the
    /// tab; bumping the counter retires it.
    poll_gen: RwSignal<u64>,
}

impl TabSlot {
    fn new() -> Self {
        TabSlot {
            status: RwSignal::new(GenStatus::NotStarted),
            message: RwSignal::new(String::new()),
            input: RwSignal::new(String::new()),
            file: RwSignal::new(None),
            design: RwSignal::new(None),
            loading: RwSignal::new(false),
            stage: RwSignal::new(LoadingStage::Initializing),
            epoch: RwSignal::new(0),
            poll_gen: RwSignal::new(0),
        }
    }
}

/// What a single poll tick observed. Only `Complete` and `Unauthorized` end
/// the loop; everything else lets the next tick fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Complete,
    NotReady,
    TransientError,
    Unauthorized,
    Cancelled,
}

// ── Coordinator ──

#[derive(Clone)]
pub struct GenerationCoordinator<A: DesignApi + Clone + 'static> {
    api: A,
    tabs: [TabSlot; 3],
    analysis: RwSignal<AnalysisView>,
}

impl<A: DesignApi + Clone + 'static> GenerationCoordinator<A> {
    pub fn new(api: A) -> Self {
        // Every per-tab map carries an entry for every tab from the start;
        // there is no such thing as a partially-initialized tab.
        GenerationCoordinator {
            api,
            tabs: [TabSlot::new(), TabSlot::new(), TabSlot::new()],
            analysis: RwSignal::new(AnalysisView::default()),
        }
    }

    fn slot(&self, tab: TabId) -> TabSlot {
        self.tabs[tab.index()]
    }

    // Signal accessors for the views.

    pub fn status(&self, tab: TabId) -> RwSignal<GenStatus> {
        self.slot(tab).status
    }

    pub fn message(&self, tab: TabId) -> RwSignal<String> {
        self.slot(tab).message
    }

    pub fn input(&self, tab: TabId) -> RwSignal<String> {
        self.slot(tab).input
    }

    pub fn selected_file(&self, tab: TabId) -> RwSignal<Option<SelectedFile>> {
        self.slot(tab).file
    }

    pub fn design(&self, tab: TabId) -> RwSignal<Option<DesignResponse>> {
        self.slot(tab).design
    }

    pub fn loading(&self, tab: TabId) -> RwSignal<bool> {
        self.slot(tab).loading
    }

    pub fn stage(&self, tab: TabId) -> RwSignal<LoadingStage> {
        self.slot(tab).stage
    }

    pub fn analysis(&self) -> RwSignal<AnalysisView> {
        self.analysis
    }

    /// Current poll generation for a tab; moves whenever the tab's poll loop
    /// is started, replaced, or cancelled.
    pub fn poll_generation(&self, tab: TabId) -> u64 {
        self.slot(tab).poll_gen.get_untracked()
    }

    fn epoch_current(&self, tab: TabId, epoch: u64) -> bool {
        self.slot(tab).epoch.get_untracked() == epoch
    }

    /// Open a new run on a tab: fence out older submissions and retire any
    /// poll loop still serving the previous run.
    fn begin_run(&self, tab: TabId) -> u64 {
        let slot = self.slot(tab);
        let epoch = slot.epoch.get_untracked() + 1;
        slot.epoch.set(epoch);
        slot.poll_gen.update(|g| *g += 1);
        epoch
    }

    // ── Submissions ──

    /// Start a prompt-based generation. An empty-after-trim prompt is a
    /// silent no-op, not an error. Exactly one outbound call per invocation;
    /// the submission itself is never retried.
    pub fn submit_prompt(&self, tab: TabId, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }

        let slot = self.slot(tab);
        let epoch = self.begin_run(tab);
        slot.loading.set(true);
        slot.status.set(GenStatus::TokensPending);
        slot.stage.set(LoadingStage::TokensPending);
        slot.message.set(String::new());

        let this = self.clone();
        let prompt = trimmed.to_string();
        spawn_local(async move {
            let result = this.api.generate_from_prompt(&prompt).await;
            if !this.epoch_current(tab, epoch) {
                web_sys::console::log_1(&"[generate] stale prompt response dropped".into());
                return;
            }
            match result {
                Ok(_) => {
                    slot.status.set(GenStatus::TokensGenerated);
                    slot.stage.set(LoadingStage::TokensGenerated);
                    slot.message
                        .set("Design tokens generated! Head to Figma plugin...".to_string());
                    this.start_polling(tab);
                }
                Err(e) => this.fail(tab, &e),
            }
        });
    }

    /// Start an image-based generation. Validation happens before any state
    /// mutation or network call: a rejected pick surfaces its message inline
    /// and leaves the tab's status exactly where it was.
    pub fn submit_image(&self, tab: TabId, file: web_sys::File) {
        let slot = self.slot(tab);
        if let Err(e) = api::validate_image(&file.type_(), file.size()) {
            slot.message.set(e.message);
            return;
        }

        slot.file.set(Some(SelectedFile::from_file(&file)));
        let epoch = self.begin_run(tab);
        slot.loading.set(true);
        slot.status.set(GenStatus::TokensPending);
        slot.stage.set(LoadingStage::Initializing);
        slot.message.set(String::new());

        let this = self.clone();
        spawn_local(async move {
            TimeoutFuture::new(1500).await;
            if !this.epoch_current(tab, epoch) {
                return;
            }
            slot.stage.set(LoadingStage::Processing);

            TimeoutFuture::new(1500).await;
            if !this.epoch_current(tab, epoch) {
                return;
            }
            slot.stage.set(LoadingStage::Generating);

            let result = this.api.generate_from_image(&file).await;
            if !this.epoch_current(tab, epoch) {
                web_sys::console::log_1(&"[generate] stale image response dropped".into());
                return;
            }
            match result {
                Ok(design) => {
                    // Image jobs may return partial design data synchronously;
                    // keep it visible while polling for the rendered asset.
                    slot.design.set(Some(design));
                    slot.status.set(GenStatus::TokensGenerated);
                    slot.stage.set(LoadingStage::TokensGenerated);
                    slot.message
                        .set("Design tokens generated! Head to Figma plugin...".to_string());

                    TimeoutFuture::new(2000).await;
                    if !this.epoch_current(tab, epoch) {
                        return;
                    }
                    slot.stage.set(LoadingStage::Finalizing);
                    this.start_polling(tab);
                }
                Err(e) => this.fail(tab, &e),
            }
        });
    }

    /// Submit an image for design critique. Request/response, no polling;
    /// the outcome lands in the independent [`AnalysisView`], and the tab's
    /// status map is never touched.
    pub fn analyze(&self, file: web_sys::File) {
        let tab = TabId::Suggestions;
        let slot = self.slot(tab);
        if let Err(e) = api::validate_image(&file.type_(), file.size()) {
            self.analysis.set(AnalysisView {
                loading: false,
                result: None,
                error: Some(e.message),
            });
            return;
        }

        slot.file.set(Some(SelectedFile::from_file(&file)));
        let epoch = self.begin_run(tab);
        slot.loading.set(true);
        slot.stage.set(LoadingStage::Initializing);
        self.analysis.update(|a| a.loading = true);

        let this = self.clone();
        spawn_local(async move {
            for stage in [LoadingStage::Processing, LoadingStage::Extracting] {
                TimeoutFuture::new(1500).await;
                if !this.epoch_current(tab, epoch) {
                    return;
                }
                slot.stage.set(stage);
            }
            TimeoutFuture::new(1500).await;
            if !this.epoch_current(tab, epoch) {
                return;
            }
            slot.stage.set(LoadingStage::Generating);

            let result = this.api.analyze_design(&file).await;
            if !this.epoch_current(tab, epoch) {
                web_sys::console::log_1(&"[analyze] stale analysis response dropped".into());
                return;
            }
            match result {
                Ok(result) => {
                    slot.stage.set(LoadingStage::Finalizing);
                    TimeoutFuture::new(1000).await;
                    if !this.epoch_current(tab, epoch) {
                        return;
                    }
                    this.analysis.set(AnalysisView {
                        loading: false,
                        result: Some(result),
                        error: None,
                    });
                }
                Err(e) => {
                    this.analysis.set(AnalysisView {
                        loading: false,
                        result: None,
                        error: Some(e.message),
                    });
                }
            }
            slot.loading.set(false);
        });
    }

    // ── Polling ──

    /// Start the poll loop for a tab. Replace, never stack: bumping the
    /// generation retires any loop already serving this tab, so at most one
    /// is ever live. The first check fires immediately rather than waiting
    /// out a full period.
    pub fn start_polling(&self, tab: TabId) {
        let slot = self.slot(tab);
        let gen = slot.poll_gen.get_untracked() + 1;
        slot.poll_gen.set(gen);
        web_sys::console::log_1(&format!("[poll] starting for {}", tab.as_str()).into());

        let this = self.clone();
        spawn_local(async move {
            loop {
                if slot.poll_gen.get_untracked() != gen {
                    web_sys::console::log_1(&"[poll] loop retired".into());
                    return;
                }
                match this.poll_once(tab).await {
                    PollOutcome::Complete | PollOutcome::Unauthorized | PollOutcome::Cancelled => {
                        return
                    }
                    PollOutcome::NotReady | PollOutcome::TransientError => {}
                }
                TimeoutFuture::new(POLL_INTERVAL_MS).await;
            }
        });
    }

    /// One poll tick against the latest-design endpoint.
    ///
    /// A populated image completes the run. An empty response is a miss; so
    /// is any transport failure except 401, which stops polling and clears
    /// the loading flag but deliberately leaves status in its pending state:
    /// the job may still finish once the user re-authenticates.
    pub async fn poll_once(&self, tab: TabId) -> PollOutcome {
        let slot = self.slot(tab);
        let gen = slot.poll_gen.get_untracked();
        let result = self.api.latest_design().await;
        if slot.poll_gen.get_untracked() != gen {
            // A newer run owns this tab now; apply nothing.
            return PollOutcome::Cancelled;
        }
        match result {
            Ok(design) if design.has_image() => {
                slot.design.set(Some(design));
                slot.status.set(GenStatus::Complete);
                slot.message
                    .set("Design generated successfully! Figma plugin updated.".to_string());
                slot.loading.set(false);
                PollOutcome::Complete
            }
            Ok(_) => PollOutcome::NotReady,
            Err(e) if e.is_unauthorized() => {
                web_sys::console::warn_1(
                    &"[poll] authentication failure, giving up until re-login".into(),
                );
                slot.loading.set(false);
                PollOutcome::Unauthorized
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("[poll] transient miss: {}", e.message).into());
                PollOutcome::TransientError
            }
        }
    }

    /// Retire every tab's poll loop. Called on dashboard teardown: a
    /// leaked loop would keep firing network requests forever.
    pub fn stop_all_polling(&self) {
        for tab in TabId::ALL {
            self.slot(tab).poll_gen.update(|g| *g += 1);
        }
    }

    // ── Failure and reset ──

    /// Terminal failure for the current attempt: the user must resubmit.
    pub fn fail(&self, tab: TabId, err: &ApiError) {
        let slot = self.slot(tab);
        slot.loading.set(false);
        slot.status.set(GenStatus::Error);
        let msg = if err.message.is_empty() {
            "Generation failed. Please try again.".to_string()
        } else {
            err.message.clone()
        };
        slot.message.set(msg);
    }

    /// Reset a tab's selected file, status, and message. The suggestions tab
    /// also drops its analysis result. Poll loops on other tabs are left
    /// alone.
    pub fn clear(&self, tab: TabId) {
        let slot = self.slot(tab);
        slot.file.set(None);
        slot.status.set(GenStatus::NotStarted);
        slot.message.set(String::new());
        slot.stage.set(LoadingStage::Initializing);
        if tab == TabId::Suggestions {
            self.analysis.set(AnalysisView::default());
        }
    }
}
