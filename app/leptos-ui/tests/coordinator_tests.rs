// =============================================================================
// coordinator_tests.rs - Generation coordinator state machine tests
//
// Drives the per-tab generation lifecycle against a scripted DesignApi mock:
// submissions, epoch fencing, poll replacement, completion, and the 401
// give-up path. Runs via wasm-bindgen-test in a headless browser.
//
// Run with:
//   cd app/leptos-ui && wasm-pack test --headless --chrome
// =============================================================================

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_test::*;

use leptos::prelude::{GetUntracked, Set, Update};

use hub_api_types::{AnalysisData, AnalysisResult, DesignIssue, DesignResponse};
use hub_leptos_ui::api::{ApiError, DesignApi};
use hub_leptos_ui::generation::{GenStatus, GenerationCoordinator, PollOutcome, TabId};

wasm_bindgen_test_configure!(run_in_browser);

// =============================================================================
// Scripted DesignApi mock
// =============================================================================

#[derive(Default)]
struct MockInner {
    prompt_calls: u32,
    image_calls: u32,
    latest_calls: u32,
    analyze_calls: u32,
    /// Per-call delay before each generate_from_prompt resolves.
    prompt_delays: VecDeque<u32>,
    /// Forced failure for the next prompt submission.
    prompt_error: Option<ApiError>,
    /// Poll responses consumed front-to-back; exhausted = "not ready yet".
    latest_script: VecDeque<Result<DesignResponse, ApiError>>,
    analyze_result: Option<Result<AnalysisResult, ApiError>>,
}

#[derive(Clone, Default)]
struct MockApi {
    inner: Rc<RefCell<MockInner>>,
}

impl MockApi {
    fn prompt_calls(&self) -> u32 {
        self.inner.borrow().prompt_calls
    }

    fn image_calls(&self) -> u32 {
        self.inner.borrow().image_calls
    }

    fn latest_calls(&self) -> u32 {
        self.inner.borrow().latest_calls
    }

    fn analyze_calls(&self) -> u32 {
        self.inner.borrow().analyze_calls
    }

    fn script_latest(&self, responses: Vec<Result<DesignResponse, ApiError>>) {
        self.inner.borrow_mut().latest_script = responses.into();
    }

    fn script_prompt_delays(&self, delays: Vec<u32>) {
        self.inner.borrow_mut().prompt_delays = delays.into();
    }

    fn fail_next_prompt(&self, err: ApiError) {
        self.inner.borrow_mut().prompt_error = Some(err);
    }

    fn script_analysis(&self, result: Result<AnalysisResult, ApiError>) {
        self.inner.borrow_mut().analyze_result = Some(result);
    }
}

#[async_trait(?Send)]
impl DesignApi for MockApi {
    async fn generate_from_prompt(&self, _prompt: &str) -> Result<DesignResponse, ApiError> {
        // Borrow is dropped before any await point.
        let (delay, error) = {
            let mut inner = self.inner.borrow_mut();
            inner.prompt_calls += 1;
            (inner.prompt_delays.pop_front(), inner.prompt_error.take())
        };
        if let Some(ms) = delay {
            TimeoutFuture::new(ms).await;
        }
        match error {
            Some(e) => Err(e),
            None => Ok(DesignResponse::default()),
        }
    }

    async fn generate_from_image(&self, _file: &web_sys::File) -> Result<DesignResponse, ApiError> {
        self.inner.borrow_mut().image_calls += 1;
        Ok(DesignResponse::default())
    }

    async fn latest_design(&self) -> Result<DesignResponse, ApiError> {
        let mut inner = self.inner.borrow_mut();
        inner.latest_calls += 1;
        inner
            .latest_script
            .pop_front()
            .unwrap_or_else(|| Ok(DesignResponse::default()))
    }

    async fn analyze_design(&self, _file: &web_sys::File) -> Result<AnalysisResult, ApiError> {
        let mut inner = self.inner.borrow_mut();
        inner.analyze_calls += 1;
        inner
            .analyze_result
            .take()
            .unwrap_or_else(|| Ok(AnalysisResult::default()))
    }
}

fn ready_design(image: &str) -> DesignResponse {
    DesignResponse {
        design_image: Some(image.to_string()),
        ..DesignResponse::default()
    }
}

fn unauthorized() -> ApiError {
    // Shape matches what the gateway produces for an HTTP 401.
    ApiError {
        message: "Request failed with status 401".to_string(),
        status: Some(401),
    }
}

fn make_text_file(name: &str) -> web_sys::File {
    let parts = js_sys::Array::of1(&"not an image".into());
    let opts = web_sys::FilePropertyBag::new();
    opts.set_type("text/plain");
    web_sys::File::new_with_str_sequence_and_options(&parts, name, &opts)
        .expect("File construction failed")
}

fn make_image_file(name: &str, bytes: u32) -> web_sys::File {
    let buf = js_sys::Uint8Array::new_with_length(bytes);
    let parts = js_sys::Array::of1(&buf.into());
    let opts = web_sys::FilePropertyBag::new();
    opts.set_type("image/png");
    web_sys::File::new_with_u8_array_sequence_and_options(&parts, name, &opts)
        .expect("File construction failed")
}

// =============================================================================
// Clear / reset
// =============================================================================

mod clearing {
    use super::*;

    #[wasm_bindgen_test]
    fn clear_resets_status_and_message_on_every_tab() {
        let coord = GenerationCoordinator::new(MockApi::default());
        for tab in TabId::ALL {
            coord.fail(tab, &ApiError::new("boom"));
            assert_eq!(coord.status(tab).get_untracked(), GenStatus::Error);

            coord.clear(tab);
            assert_eq!(coord.status(tab).get_untracked(), GenStatus::NotStarted);
            assert_eq!(coord.message(tab).get_untracked(), "");
            assert!(coord.selected_file(tab).get_untracked().is_none());
        }
    }

    #[wasm_bindgen_test]
    fn clear_on_suggestions_also_resets_analysis() {
        let coord = GenerationCoordinator::new(MockApi::default());
        coord.analysis().update(|a| {
            a.error = Some("Analysis failed".to_string());
        });

        coord.clear(TabId::Suggestions);

        let view = coord.analysis().get_untracked();
        assert!(!view.loading);
        assert!(view.result.is_none());
        assert!(view.error.is_none());
    }

    #[wasm_bindgen_test]
    fn clear_on_other_tabs_leaves_analysis_alone() {
        let coord = GenerationCoordinator::new(MockApi::default());
        coord.analysis().update(|a| {
            a.error = Some("Analysis failed".to_string());
        });

        coord.clear(TabId::Prompt);
        assert!(coord.analysis().get_untracked().error.is_some());
    }
}

// =============================================================================
// Prompt submissions
// =============================================================================

mod prompt_submission {
    use super::*;

    #[wasm_bindgen_test]
    async fn empty_prompt_is_a_silent_noop() {
        let api = MockApi::default();
        let coord = GenerationCoordinator::new(api.clone());

        coord.submit_prompt(TabId::Prompt, "   ");
        TimeoutFuture::new(50).await;

        assert_eq!(api.prompt_calls(), 0, "no gateway call for empty prompt");
        assert_eq!(
            coord.status(TabId::Prompt).get_untracked(),
            GenStatus::NotStarted
        );
        assert!(!coord.loading(TabId::Prompt).get_untracked());
    }

    #[wasm_bindgen_test]
    async fn successful_submission_reaches_tokens_generated_and_polls() {
        let api = MockApi::default();
        let coord = GenerationCoordinator::new(api.clone());

        coord.submit_prompt(TabId::Prompt, "minimalist blue logo");
        assert_eq!(
            coord.status(TabId::Prompt).get_untracked(),
            GenStatus::TokensPending,
            "status moves to tokens_pending synchronously"
        );
        assert!(coord.loading(TabId::Prompt).get_untracked());

        TimeoutFuture::new(100).await;

        assert_eq!(api.prompt_calls(), 1, "exactly one submission call");
        assert_eq!(
            coord.status(TabId::Prompt).get_untracked(),
            GenStatus::TokensGenerated
        );
        assert!(!coord.message(TabId::Prompt).get_untracked().is_empty());
        assert_eq!(api.latest_calls(), 1, "first poll fires immediately");
    }

    #[wasm_bindgen_test]
    async fn submission_failure_is_terminal_and_does_not_poll() {
        let api = MockApi::default();
        api.fail_next_prompt(ApiError::new("backend exploded"));
        let coord = GenerationCoordinator::new(api.clone());

        coord.submit_prompt(TabId::Prompt, "something");
        TimeoutFuture::new(100).await;

        assert_eq!(coord.status(TabId::Prompt).get_untracked(), GenStatus::Error);
        assert_eq!(
            coord.message(TabId::Prompt).get_untracked(),
            "backend exploded"
        );
        assert!(!coord.loading(TabId::Prompt).get_untracked());
        assert_eq!(api.latest_calls(), 0, "no polling after a failed submit");
    }

    #[wasm_bindgen_test]
    async fn failure_without_message_gets_generic_fallback() {
        let api = MockApi::default();
        api.fail_next_prompt(ApiError::new(""));
        let coord = GenerationCoordinator::new(api.clone());

        coord.submit_prompt(TabId::Prompt, "anything");
        TimeoutFuture::new(50).await;

        assert_eq!(
            coord.message(TabId::Prompt).get_untracked(),
            "Generation failed. Please try again."
        );
    }

    #[wasm_bindgen_test]
    async fn stale_submission_response_is_discarded() {
        let api = MockApi::default();
        // First submission resolves slowly, second immediately.
        api.script_prompt_delays(vec![300, 0]);
        let coord = GenerationCoordinator::new(api.clone());

        coord.submit_prompt(TabId::Prompt, "first attempt");
        coord.submit_prompt(TabId::Prompt, "second attempt");
        TimeoutFuture::new(600).await;

        assert_eq!(api.prompt_calls(), 2);
        assert_eq!(
            coord.status(TabId::Prompt).get_untracked(),
            GenStatus::TokensGenerated
        );
        // Submissions bumped the poll generation twice, the second (current)
        // response started one poll loop. The stale first response must not
        // have started another.
        assert_eq!(coord.poll_generation(TabId::Prompt), 3);
        assert_eq!(api.latest_calls(), 1, "only the live run polls");
    }
}

// =============================================================================
// Image submissions and validation
// =============================================================================

mod image_submission {
    use super::*;

    #[wasm_bindgen_test]
    async fn non_image_file_is_rejected_before_any_network_call() {
        let api = MockApi::default();
        let coord = GenerationCoordinator::new(api.clone());

        coord.submit_image(TabId::Image, make_text_file("notes.txt"));
        TimeoutFuture::new(50).await;

        assert_eq!(api.image_calls(), 0);
        assert_eq!(
            coord.status(TabId::Image).get_untracked(),
            GenStatus::NotStarted,
            "rejected pick leaves status untouched"
        );
        assert_eq!(
            coord.message(TabId::Image).get_untracked(),
            "Please upload a valid image file"
        );
        assert!(!coord.loading(TabId::Image).get_untracked());
    }

    #[wasm_bindgen_test]
    async fn oversized_image_is_rejected_before_any_network_call() {
        let api = MockApi::default();
        let coord = GenerationCoordinator::new(api.clone());

        coord.submit_image(TabId::Image, make_image_file("big.png", 6 * 1024 * 1024));
        TimeoutFuture::new(50).await;

        assert_eq!(api.image_calls(), 0);
        assert_eq!(
            coord.status(TabId::Image).get_untracked(),
            GenStatus::NotStarted
        );
        assert_eq!(
            coord.message(TabId::Image).get_untracked(),
            "Image must be smaller than 5MB"
        );
    }

    #[wasm_bindgen_test]
    async fn valid_image_records_file_and_starts_pending() {
        let api = MockApi::default();
        let coord = GenerationCoordinator::new(api.clone());

        coord.submit_image(TabId::Image, make_image_file("ref.png", 1024));

        let file = coord.selected_file(TabId::Image).get_untracked();
        assert_eq!(file.expect("file recorded").name, "ref.png");
        assert_eq!(
            coord.status(TabId::Image).get_untracked(),
            GenStatus::TokensPending
        );
        assert!(coord.loading(TabId::Image).get_untracked());
    }
}

// =============================================================================
// Polling
// =============================================================================

mod polling {
    use super::*;

    #[wasm_bindgen_test]
    async fn starting_twice_leaves_exactly_one_live_loop() {
        let api = MockApi::default();
        let coord = GenerationCoordinator::new(api.clone());

        coord.start_polling(TabId::Prompt);
        coord.start_polling(TabId::Prompt);
        TimeoutFuture::new(200).await;

        // The first loop was retired before its first tick; only the second
        // performed the immediate poll.
        assert_eq!(api.latest_calls(), 1);
    }

    #[wasm_bindgen_test]
    async fn empty_then_populated_poll_completes_the_run() {
        let api = MockApi::default();
        api.script_latest(vec![
            Ok(DesignResponse::default()),
            Ok(DesignResponse::default()),
            Ok(DesignResponse::default()),
            Ok(ready_design("aGVsbG8=")),
        ]);
        let coord = GenerationCoordinator::new(api.clone());

        coord.submit_prompt(TabId::Prompt, "minimalist blue logo");
        TimeoutFuture::new(100).await;
        assert_eq!(api.latest_calls(), 1, "immediate first tick consumed");

        // Retire the background loop and drive the remaining ticks by hand
        // so the test does not sit through real 3s periods.
        coord.stop_all_polling();

        assert_eq!(coord.poll_once(TabId::Prompt).await, PollOutcome::NotReady);
        assert_eq!(coord.poll_once(TabId::Prompt).await, PollOutcome::NotReady);
        assert_eq!(
            coord.status(TabId::Prompt).get_untracked(),
            GenStatus::TokensGenerated,
            "misses leave status alone"
        );

        assert_eq!(coord.poll_once(TabId::Prompt).await, PollOutcome::Complete);
        assert_eq!(
            coord.status(TabId::Prompt).get_untracked(),
            GenStatus::Complete
        );
        let design = coord.design(TabId::Prompt).get_untracked().expect("payload");
        assert_eq!(design.design_image.as_deref(), Some("aGVsbG8="));
        assert!(!coord.loading(TabId::Prompt).get_untracked());
    }

    #[wasm_bindgen_test]
    async fn populated_poll_cancels_the_timer_not_just_ignores_it() {
        let api = MockApi::default();
        api.script_latest(vec![Ok(ready_design("ZG9uZQ=="))]);
        let coord = GenerationCoordinator::new(api.clone());

        coord.start_polling(TabId::Prompt);
        TimeoutFuture::new(100).await;
        assert_eq!(coord.status(TabId::Prompt).get_untracked(), GenStatus::Complete);
        assert_eq!(api.latest_calls(), 1);

        // Past the next 3s period: a live timer would have fired again.
        TimeoutFuture::new(3500).await;
        assert_eq!(api.latest_calls(), 1, "no tick after completion");
    }

    #[wasm_bindgen_test]
    async fn unauthorized_poll_stops_and_leaves_status_pending() {
        let api = MockApi::default();
        api.script_latest(vec![Err(unauthorized())]);
        let coord = GenerationCoordinator::new(api.clone());
        coord.status(TabId::Prompt).set(GenStatus::TokensGenerated);
        coord.loading(TabId::Prompt).set(true);

        coord.start_polling(TabId::Prompt);
        TimeoutFuture::new(100).await;

        assert!(!coord.loading(TabId::Prompt).get_untracked());
        assert_eq!(
            coord.status(TabId::Prompt).get_untracked(),
            GenStatus::TokensGenerated,
            "401 leaves the pending status unresolved"
        );

        TimeoutFuture::new(3500).await;
        assert_eq!(api.latest_calls(), 1, "loop stopped after 401");
    }

    #[wasm_bindgen_test]
    async fn transient_poll_failure_is_a_miss_not_an_error() {
        let api = MockApi::default();
        api.script_latest(vec![
            Err(ApiError::new("connection reset")),
            Ok(ready_design("b2s=")),
        ]);
        let coord = GenerationCoordinator::new(api.clone());
        coord.status(TabId::Prompt).set(GenStatus::TokensGenerated);

        assert_eq!(
            coord.poll_once(TabId::Prompt).await,
            PollOutcome::TransientError
        );
        assert_eq!(
            coord.status(TabId::Prompt).get_untracked(),
            GenStatus::TokensGenerated,
            "transient failure changes nothing"
        );

        assert_eq!(coord.poll_once(TabId::Prompt).await, PollOutcome::Complete);
    }

    #[wasm_bindgen_test]
    async fn teardown_retires_every_tab_loop() {
        let api = MockApi::default();
        let coord = GenerationCoordinator::new(api.clone());

        coord.start_polling(TabId::Prompt);
        coord.start_polling(TabId::Image);
        TimeoutFuture::new(100).await;
        let after_start = api.latest_calls();
        assert_eq!(after_start, 2, "both loops tick once immediately");

        coord.stop_all_polling();
        TimeoutFuture::new(3500).await;
        assert_eq!(api.latest_calls(), after_start, "no ticks after teardown");
    }
}

// =============================================================================
// Analysis flow
// =============================================================================

mod analysis {
    use super::*;

    #[wasm_bindgen_test]
    async fn invalid_file_sets_analysis_error_without_touching_status() {
        let api = MockApi::default();
        let coord = GenerationCoordinator::new(api.clone());

        coord.analyze(make_text_file("mockup.txt"));
        TimeoutFuture::new(50).await;

        assert_eq!(api.analyze_calls(), 0);
        let view = coord.analysis().get_untracked();
        assert_eq!(view.error.as_deref(), Some("Please upload a valid image file"));
        assert_eq!(
            coord.status(TabId::Suggestions).get_untracked(),
            GenStatus::NotStarted,
            "analysis errors never touch the status map"
        );
    }

    #[wasm_bindgen_test]
    async fn successful_analysis_lands_in_the_analysis_view() {
        let api = MockApi::default();
        api.script_analysis(Ok(AnalysisResult {
            id: None,
            analysis: AnalysisData {
                critical: Some(vec![DesignIssue {
                    title: "Low contrast".to_string(),
                    description: "Body text fails WCAG AA".to_string(),
                    category: "Accessibility".to_string(),
                    severity: 1,
                    color_code: "#ef4444".to_string(),
                }]),
                ..AnalysisData::default()
            },
            created_at: None,
        }));
        let coord = GenerationCoordinator::new(api.clone());

        coord.analyze(make_image_file("mockup.png", 2048));
        assert!(coord.analysis().get_untracked().loading);
        assert!(coord.loading(TabId::Suggestions).get_untracked());

        // Staged progress walks ~5.5s of display pauses before the result
        // becomes visible.
        TimeoutFuture::new(6500).await;

        assert_eq!(api.analyze_calls(), 1);
        let view = coord.analysis().get_untracked();
        assert!(!view.loading);
        assert!(view.error.is_none());
        let result = view.result.expect("analysis result");
        assert!(result.analysis.is_structured());
        assert_eq!(
            result.analysis.critical.unwrap()[0].title,
            "Low contrast"
        );
        assert!(!coord.loading(TabId::Suggestions).get_untracked());
    }
}
